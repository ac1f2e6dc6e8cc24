use crate::content::{DownloadCategory, SiteContent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEntry<'a> {
    pub title: &'a str,
    /// Raw url as configured. Internal documents stay relative.
    pub href: &'a str,
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSection<'a> {
    pub title: &'a str,
    pub entries: Vec<DownloadEntry<'a>>,
}

/// Downloads page: categories in configured order. Every entry opens in a new tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadsPage<'a> {
    sections: Vec<DownloadSection<'a>>,
}

impl<'a> DownloadsPage<'a> {
    pub fn new(content: &'a SiteContent) -> Self {
        Self {
            sections: content.downloads.iter().map(section).collect(),
        }
    }

    pub fn sections(&self) -> &[DownloadSection<'a>] {
        &self.sections
    }

    /// Entries that point to documents hosted with the site.
    pub fn internal_documents(&self) -> impl Iterator<Item = &DownloadEntry<'a>> {
        self.sections
            .iter()
            .flat_map(|s| s.entries.iter())
            .filter(|e| !e.is_external)
    }
}

fn section(category: &DownloadCategory) -> DownloadSection<'_> {
    DownloadSection {
        title: &category.title,
        entries: category
            .links
            .iter()
            .map(|link| DownloadEntry {
                title: &link.title,
                href: &link.url,
                is_external: link.is_external,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_configured_order() {
        let content = SiteContent::builtin().unwrap();
        let page = DownloadsPage::new(&content);

        let titles: Vec<_> = page.sections().iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Technical Documentation", "Catalogs", "Presentations"]);
        assert_eq!(page.sections()[0].entries[0].title, "SISTEMA Software");
    }

    #[test]
    fn internal_documents_are_relative() {
        let content = SiteContent::builtin().unwrap();
        let page = DownloadsPage::new(&content);

        let internal: Vec<_> = page.internal_documents().collect();
        assert!(!internal.is_empty());
        assert!(internal.iter().all(|e| !e.href.starts_with("http")));
        assert!(internal
            .iter()
            .any(|e| e.href == "presentations/the_muting_functions.pptx"));
    }

    #[test]
    fn empty_content() {
        let content = SiteContent::default();
        assert!(DownloadsPage::new(&content).sections().is_empty());
    }
}
