use super::{
    DownloadRecord, ManufacturerRecord, NavItemRecord, ProductRecord, SiteContent,
};

/// Table records derived from [`SiteContent`], ready to be written to the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedRecords {
    pub manufacturers: Vec<ManufacturerRecord>,
    pub products: Vec<ProductRecord>,
    pub nav_items: Vec<NavItemRecord>,
    pub downloads: Vec<DownloadRecord>,
}

impl SeedRecords {
    pub fn len(&self) -> usize {
        self.manufacturers.len() + self.products.len() + self.nav_items.len() + self.downloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lowercase ASCII slug: runs of non-alphanumerics collapse to one `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

impl From<&SiteContent> for SeedRecords {
    fn from(content: &SiteContent) -> Self {
        let mut records = SeedRecords::default();

        for manufacturer in &content.manufacturers {
            records.manufacturers.push(ManufacturerRecord {
                id: manufacturer.id.clone(),
                name: manufacturer.name.clone(),
                logo: manufacturer.logo.clone(),
                website: manufacturer.website.clone(),
                description: manufacturer.description.clone(),
            });

            for product in &manufacturer.products {
                let id = product.id.clone().unwrap_or_else(|| {
                    format!("{}-{}", manufacturer.id, slugify(&product.name))
                });
                records.products.push(ProductRecord {
                    id,
                    manufacturer_id: manufacturer.id.clone(),
                    name: product.name.clone(),
                    image: product.image.clone(),
                    link: product.link.clone(),
                });
            }
        }

        for section in &content.side_nav {
            for item in &section.items {
                records.nav_items.push(NavItemRecord {
                    section: section.section.clone(),
                    title: item.title.clone(),
                    link: item.link.clone(),
                    path: item.path.clone(),
                    is_internal: item.is_internal,
                    subitems: item.subitems.clone(),
                });
            }
        }

        for category in &content.downloads {
            for link in &category.links {
                records.downloads.push(DownloadRecord {
                    category: category.title.clone(),
                    title: link.title.clone(),
                    url: link.url.clone(),
                    is_external: link.is_external,
                });
            }
        }

        records
    }
}
