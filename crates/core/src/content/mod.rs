//! Site content: the catalog, navigation and downloads data shown on the
//! public pages, and the table records the admin panel edits.

mod error;
mod export;
mod records;
mod types;
mod validation;

pub use error::{ContentError, Result};
pub use export::{slugify, SeedRecords};
pub use records::{DownloadRecord, ManufacturerRecord, NavItemRecord, ProductRecord, TableRecord};
pub use types::{
    DownloadCategory, DownloadLink, Manufacturer, NavItem, NavLink, NavSection, Product,
    SiteContent, TopNavLink,
};
pub use validation::{is_http_url, FieldErrors};
