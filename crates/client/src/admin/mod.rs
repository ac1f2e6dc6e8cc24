//! Headless admin panel: page controllers over the table client.

mod dashboard;
mod page;
mod products;

use caseco_core::content::{DownloadRecord, ManufacturerRecord, NavItemRecord};

pub use dashboard::{AdminModule, Dashboard, ADMIN_MODULES};
pub use page::{AdminPage, Form, FormMode};
pub use products::{new_product_id, ProductsPage};

pub type ManufacturersPage = AdminPage<ManufacturerRecord>;
pub type NavItemsPage = AdminPage<NavItemRecord>;
pub type DownloadsPage = AdminPage<DownloadRecord>;

/// Section preselected for a new navigation item when none is loaded.
pub const DEFAULT_SECTION: &str = "Applications";
/// Category preselected for a new download when none is loaded.
pub const DEFAULT_CATEGORY: &str = "Technical Documentation";

/// Blank navigation item in the first loaded section.
pub fn new_nav_item(page: &NavItemsPage) -> NavItemRecord {
    NavItemRecord {
        section: first_group_or(page, DEFAULT_SECTION),
        ..Default::default()
    }
}

/// Blank download in the first loaded category.
pub fn new_download(page: &DownloadsPage) -> DownloadRecord {
    DownloadRecord {
        category: first_group_or(page, DEFAULT_CATEGORY),
        ..Default::default()
    }
}

fn first_group_or<R: caseco_core::content::TableRecord>(page: &AdminPage<R>, default: &str) -> String {
    page.groups()
        .into_iter()
        .next()
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::{StaticToken, TableClient};

    fn client() -> TableClient {
        TableClient::new("http://localhost:3000", Arc::new(StaticToken::none()))
    }

    #[test]
    fn blank_records_use_defaults_before_load() {
        assert_eq!(new_nav_item(&NavItemsPage::new(client())).section, "Applications");
        assert_eq!(
            new_download(&DownloadsPage::new(client())).category,
            "Technical Documentation"
        );
    }
}
