//! Page view models built from injected [`SiteContent`](crate::content::SiteContent).

mod downloads;
mod home;

pub use downloads::{DownloadEntry, DownloadSection, DownloadsPage};
pub use home::{HomePage, ManufacturerSection};
