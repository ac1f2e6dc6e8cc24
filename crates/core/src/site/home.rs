use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::{Manufacturer, SiteContent};
use crate::ui::Carousel;

/// One manufacturer block on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerSection<'a> {
    pub manufacturer: &'a Manufacturer,
    pub carousel: Carousel,
}

impl ManufacturerSection<'_> {
    pub fn logo_alt(&self) -> String {
        format!("{} logo", self.manufacturer.name)
    }
}

/// Home page: every manufacturer with its product carousel, in random order.
///
/// The order is drawn once when the page is built and stays fixed for the
/// page's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage<'a> {
    sections: Vec<ManufacturerSection<'a>>,
}

impl<'a> HomePage<'a> {
    pub fn new(content: &'a SiteContent, viewport_width: u32) -> Self {
        Self::with_rng(content, viewport_width, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        content: &'a SiteContent,
        viewport_width: u32,
        rng: &mut R,
    ) -> Self {
        let mut manufacturers: Vec<&Manufacturer> = content.manufacturers.iter().collect();
        manufacturers.shuffle(rng);

        let sections = manufacturers
            .into_iter()
            .map(|manufacturer| ManufacturerSection {
                manufacturer,
                carousel: Carousel::new(manufacturer.products.len(), viewport_width),
            })
            .collect();

        Self { sections }
    }

    pub fn sections(&self) -> &[ManufacturerSection<'a>] {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut [ManufacturerSection<'a>] {
        &mut self.sections
    }

    /// Propagates a viewport change to every carousel.
    pub fn resize(&mut self, viewport_width: u32) {
        for section in &mut self.sections {
            section.carousel.resize(viewport_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn content(names: &[&str]) -> SiteContent {
        SiteContent {
            manufacturers: names
                .iter()
                .map(|name| Manufacturer {
                    id: name.to_lowercase(),
                    name: name.to_string(),
                    logo: format!("https://cdn.example.com/{name}.svg"),
                    website: format!("https://{name}.example.com"),
                    description: None,
                    products: Vec::new(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn names<'a>(page: &'a HomePage<'_>) -> Vec<&'a str> {
        page.sections()
            .iter()
            .map(|s| s.manufacturer.name.as_str())
            .collect()
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let content = content(&["Castell", "Reer", "Kontronik", "Gordon", "Mechan"]);
        let page = HomePage::with_rng(&content, 1280, &mut StdRng::seed_from_u64(7));

        let mut shuffled = names(&page);
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec!["Castell", "Gordon", "Kontronik", "Mechan", "Reer"]);
    }

    #[test]
    fn same_seed_same_order() {
        let content = content(&["Castell", "Reer", "Kontronik", "Gordon", "Mechan"]);
        let a = HomePage::with_rng(&content, 1280, &mut StdRng::seed_from_u64(42));
        let b = HomePage::with_rng(&content, 1280, &mut StdRng::seed_from_u64(42));
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn shuffle_leaves_content_untouched() {
        let content = content(&["Castell", "Reer", "Kontronik"]);
        let _ = HomePage::new(&content, 1280);
        assert_eq!(content.manufacturers[0].name, "Castell");
    }

    #[test]
    fn carousels_sized_from_products() {
        let content = SiteContent::builtin().unwrap();
        let mut page = HomePage::new(&content, 1280);

        for section in page.sections() {
            assert_eq!(
                section.carousel.item_count(),
                section.manufacturer.products.len()
            );
            assert_eq!(section.carousel.per_page(), 4);
        }

        page.resize(400);
        assert!(page.sections().iter().all(|s| s.carousel.per_page() == 1));
    }

    #[test]
    fn logo_alt_text() {
        let content = content(&["Castell"]);
        let page = HomePage::new(&content, 1280);
        assert_eq!(page.sections()[0].logo_alt(), "Castell logo");
    }
}
