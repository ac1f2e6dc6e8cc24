use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ContentError, Result};

const BUILTIN_SITE_JSON: &str = include_str!("../../content/site.json");

/// A product card shown in a manufacturer's carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier. Derived from the manufacturer and product name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub image: String,
    pub link: String,
}

/// A manufacturer and its ordered product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A leaf navigation entry. Used for subitems, which never nest further.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_internal: bool,
}

impl NavLink {
    /// Where the entry points: the external link, else the internal path.
    pub fn target(&self) -> Option<&str> {
        self.link.as_deref().or(self.path.as_deref())
    }
}

/// A side navigation entry, optionally carrying one level of subitems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subitems: Vec<NavLink>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_internal: bool,
}

impl NavItem {
    pub fn target(&self) -> Option<&str> {
        self.link.as_deref().or(self.path.as_deref())
    }

    pub fn has_subitems(&self) -> bool {
        !self.subitems.is_empty()
    }
}

/// A named group of side navigation entries ("Applications", "Manufacturers").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub section: String,
    pub items: Vec<NavItem>,
}

/// An entry of the top navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopNavLink {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadCategory {
    pub title: String,
    pub links: Vec<DownloadLink>,
}

/// All static content of the public site.
///
/// Injected into the page view models and the seeding tool instead of being
/// read from globals. [`SiteContent::builtin`] returns the copy shipped with
/// the crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    #[serde(default)]
    pub top_nav: Vec<TopNavLink>,
    #[serde(default)]
    pub side_nav: Vec<NavSection>,
    #[serde(default)]
    pub downloads: Vec<DownloadCategory>,
    #[serde(default)]
    pub manufacturers: Vec<Manufacturer>,
}

impl SiteContent {
    /// Parses and checks content from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let content: SiteContent = serde_json::from_str(json)?;
        content.check()?;
        Ok(content)
    }

    /// Reads content from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            manufacturers = content.manufacturers.len(),
            sections = content.side_nav.len(),
            "Loaded site content"
        );
        Ok(content)
    }

    /// The content embedded at build time.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SITE_JSON)
    }

    pub fn manufacturer(&self, id: &str) -> Option<&Manufacturer> {
        self.manufacturers.iter().find(|m| m.id == id)
    }

    pub fn section(&self, name: &str) -> Option<&NavSection> {
        self.side_nav.iter().find(|s| s.section == name)
    }

    /// Structural checks that serde cannot express.
    fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for manufacturer in &self.manufacturers {
            if !seen.insert(manufacturer.id.as_str()) {
                return Err(ContentError::DuplicateManufacturer(
                    manufacturer.id.clone(),
                ));
            }
        }

        for section in &self.side_nav {
            for item in &section.items {
                if item.target().is_none() && !item.has_subitems() {
                    return Err(ContentError::DanglingNavItem {
                        section: section.section.clone(),
                        title: item.title.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_loads() {
        let content = SiteContent::builtin().unwrap();

        assert_eq!(content.top_nav.len(), 9);
        assert!(content.section("Applications").is_some());
        assert!(content.section("Manufacturers").is_some());
        assert_eq!(
            content
                .downloads
                .iter()
                .map(|c| c.title.as_str())
                .collect::<Vec<_>>(),
            vec!["Technical Documentation", "Catalogs", "Presentations"]
        );
        assert!(content.manufacturer("micro-epsilon").is_some());
    }

    #[test]
    fn builtin_subitems_are_flat() {
        let content = SiteContent::builtin().unwrap();
        let mats = content
            .section("Applications")
            .unwrap()
            .items
            .iter()
            .find(|i| i.title == "Electrical Mats")
            .unwrap();

        assert!(mats.target().is_none());
        assert_eq!(mats.subitems.len(), 2);
    }

    #[test]
    fn internal_subitem_keeps_flag() {
        let content = SiteContent::builtin().unwrap();
        let tapeswitch = content
            .section("Manufacturers")
            .unwrap()
            .items
            .iter()
            .find(|i| i.title == "Tapeswitch")
            .unwrap();

        let quick_refs = &tapeswitch.subitems[1];
        assert!(quick_refs.is_internal);
        assert_eq!(quick_refs.target(), Some("/tapeswitch-quick-references"));
    }

    #[test]
    fn nav_target_prefers_link() {
        let item = NavItem {
            title: "Both".to_string(),
            link: Some("https://example.com".to_string()),
            path: Some("/local".to_string()),
            ..Default::default()
        };
        assert_eq!(item.target(), Some("https://example.com"));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let content = SiteContent::from_json("{}").unwrap();
        assert_eq!(content, SiteContent::default());
    }

    #[test]
    fn duplicate_manufacturer_rejected() {
        let json = r#"{"manufacturers": [
            {"id": "reer", "name": "Reer", "logo": "https://a", "website": "https://b"},
            {"id": "reer", "name": "Reer 2", "logo": "https://a", "website": "https://b"}
        ]}"#;
        let err = SiteContent::from_json(json).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateManufacturer(id) if id == "reer"));
    }

    #[test]
    fn dangling_nav_item_rejected() {
        let json = r#"{"sideNav": [{"section": "Applications", "items": [{"title": "Nowhere"}]}]}"#;
        let err = SiteContent::from_json(json).unwrap_err();
        assert!(matches!(err, ContentError::DanglingNavItem { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SiteContent::load("/nonexistent/site.json").unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[test]
    fn serializes_camel_case() {
        let link = DownloadLink {
            title: "Guide".to_string(),
            url: "https://example.com/guide.pdf".to_string(),
            is_external: true,
        };
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["isExternal"], true);
    }
}
