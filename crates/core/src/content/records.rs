use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{slugify, FieldErrors, NavLink};
use crate::tables::{ItemKey, TableName};

/// An item stored in one of the admin tables.
///
/// Ties a record type to its table, its composite key and its form
/// validation so the table client and the admin pages can stay generic.
pub trait TableRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const TABLE: TableName;

    /// Column headers used when listing records.
    const COLUMNS: &'static [&'static str];

    fn key(&self) -> ItemKey;

    /// Client-side form validation. Empty when the record may be submitted.
    fn validate(&self) -> FieldErrors;

    /// Grouping value (section or category) for tables that group items.
    fn group(&self) -> Option<&str> {
        None
    }

    /// Human readable name used in confirmations and logs.
    fn label(&self) -> &str;

    /// One cell per entry of [`TableRecord::COLUMNS`].
    fn row(&self) -> Vec<String>;

    /// Derives missing key attributes before the record is created.
    fn fill_key(&mut self) {}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerRecord {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TableRecord for ManufacturerRecord {
    const TABLE: TableName = TableName::Manufacturers;
    const COLUMNS: &'static [&'static str] = &["Name", "Logo", "Website", "Description"];

    fn key(&self) -> ItemKey {
        ItemKey::new(&self.id)
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_url(
            "logo",
            &self.logo,
            "Logo URL is required",
            "Logo URL must be a valid URL",
        );
        errors.require_url(
            "website",
            &self.website,
            "Website URL is required",
            "Website must be a valid URL",
        );
        errors
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.logo.clone(),
            self.website.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }

    fn fill_key(&mut self) {
        if self.id.trim().is_empty() {
            self.id = slugify(&self.name);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub manufacturer_id: String,
    pub name: String,
    pub image: String,
    pub link: String,
}

impl TableRecord for ProductRecord {
    const TABLE: TableName = TableName::Products;
    const COLUMNS: &'static [&'static str] = &["Name", "Manufacturer", "Image", "Link"];

    fn key(&self) -> ItemKey {
        ItemKey::with_sort(&self.id, &self.manufacturer_id)
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Product name is required");
        errors.require(
            "manufacturerId",
            &self.manufacturer_id,
            "Manufacturer is required",
        );
        errors.require_url(
            "image",
            &self.image,
            "Image URL is required",
            "Image URL must be a valid URL",
        );
        errors.require_url(
            "link",
            &self.link,
            "Product link is required",
            "Product link must be a valid URL",
        );
        errors
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.manufacturer_id.clone(),
            self.image.clone(),
            self.link.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItemRecord {
    pub section: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_internal: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subitems: Vec<NavLink>,
}

impl NavItemRecord {
    /// "Has Subitems", "Internal Link" or "External Link".
    pub fn link_type(&self) -> &'static str {
        if !self.subitems.is_empty() {
            "Has Subitems"
        } else if self.is_internal {
            "Internal Link"
        } else {
            "External Link"
        }
    }

    pub fn destination(&self) -> String {
        if !self.subitems.is_empty() {
            return format!("{} subitems", self.subitems.len());
        }
        self.path
            .as_deref()
            .or(self.link.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

impl TableRecord for NavItemRecord {
    const TABLE: TableName = TableName::NavItems;
    const COLUMNS: &'static [&'static str] = &["Section", "Title", "Link Type", "Destination"];

    fn key(&self) -> ItemKey {
        ItemKey::with_sort(&self.section, &self.title)
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("section", &self.section, "Section is required");
        errors.require("title", &self.title, "Title is required");
        if self.subitems.is_empty() && is_blank(&self.link) && is_blank(&self.path) {
            errors.insert("link", "Either Link or Path must be provided");
        }
        errors
    }

    fn group(&self) -> Option<&str> {
        Some(&self.section)
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.section.clone(),
            self.title.clone(),
            self.link_type().to_string(),
            self.destination(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRecord {
    pub category: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub is_external: bool,
}

impl TableRecord for DownloadRecord {
    const TABLE: TableName = TableName::Downloads;
    const COLUMNS: &'static [&'static str] = &["Category", "Title", "Type", "URL"];

    fn key(&self) -> ItemKey {
        ItemKey::with_sort(&self.category, &self.title)
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("category", &self.category, "Category is required");
        errors.require("title", &self.title, "Title is required");
        if errors.require("url", &self.url, "URL is required")
            && self.is_external
            && !super::is_http_url(&self.url)
        {
            errors.insert("url", "External URL must start with http:// or https://");
        }
        errors
    }

    fn group(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn row(&self) -> Vec<String> {
        let kind = if self.is_external {
            "External Link"
        } else {
            "Internal Document"
        };
        vec![
            self.category.clone(),
            self.title.clone(),
            kind.to_string(),
            self.url.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manufacturer_form_with_three_errors() {
        let record = ManufacturerRecord {
            id: "reer".to_string(),
            name: String::new(),
            logo: "reer-logo.png".to_string(),
            website: "www.reersafety.com".to_string(),
            description: None,
        };

        let errors = record.validate();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("logo"), Some("Logo URL must be a valid URL"));
        assert_eq!(errors.get("website"), Some("Website must be a valid URL"));
    }

    #[test]
    fn valid_manufacturer() {
        let record = ManufacturerRecord {
            id: "reer".to_string(),
            name: "Reer Safety".to_string(),
            logo: "https://cdn.caseco-inc.com/images/reer/logo.png".to_string(),
            website: "https://www.reersafety.com/us/en/".to_string(),
            description: Some("Safety light curtains".to_string()),
        };
        assert!(record.validate().is_empty());
        assert_eq!(record.key(), ItemKey::new("reer"));
    }

    #[test]
    fn manufacturer_id_derived_from_name() {
        let mut record = ManufacturerRecord {
            name: "ReeR Safety".to_string(),
            ..Default::default()
        };
        record.fill_key();
        assert_eq!(record.id, "reer-safety");

        record.name = "Renamed".to_string();
        record.fill_key();
        assert_eq!(record.id, "reer-safety");
    }

    #[test]
    fn product_key_uses_manufacturer_as_sort() {
        let record = ProductRecord {
            id: "product-1".to_string(),
            manufacturer_id: "micro-epsilon".to_string(),
            ..Default::default()
        };
        assert_eq!(record.key(), ItemKey::with_sort("product-1", "micro-epsilon"));
    }

    #[test]
    fn empty_product_reports_every_field() {
        let errors = ProductRecord::default().validate();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["image", "link", "manufacturerId", "name"]
        );
        assert_eq!(errors.get("link"), Some("Product link is required"));
    }

    #[test]
    fn nav_item_needs_destination_without_subitems() {
        let record = NavItemRecord {
            section: "Applications".to_string(),
            title: "Safety Relays".to_string(),
            ..Default::default()
        };
        let errors = record.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("link"), Some("Either Link or Path must be provided"));
    }

    #[test]
    fn nav_item_with_subitems_needs_no_destination() {
        let record = NavItemRecord {
            section: "Applications".to_string(),
            title: "Electrical Mats".to_string(),
            subitems: vec![NavLink {
                title: "LMI".to_string(),
                link: Some("http://www.londonmat.com/mats/zone.html".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(record.validate().is_empty());
        assert_eq!(record.link_type(), "Has Subitems");
        assert_eq!(record.destination(), "1 subitems");
        assert_eq!(record.group(), Some("Applications"));
    }

    #[test]
    fn internal_nav_item_row() {
        let record = NavItemRecord {
            section: "Manufacturers".to_string(),
            title: "Quick References".to_string(),
            path: Some("/tapeswitch-quick-references".to_string()),
            is_internal: true,
            ..Default::default()
        };
        assert_eq!(
            record.row(),
            vec![
                "Manufacturers",
                "Quick References",
                "Internal Link",
                "/tapeswitch-quick-references"
            ]
        );
    }

    #[test]
    fn external_download_requires_http() {
        let record = DownloadRecord {
            category: "Catalogs".to_string(),
            title: "Full Product Sheet".to_string(),
            url: "catalogs/full_product_sheet.pdf".to_string(),
            is_external: true,
        };
        assert_eq!(
            record.validate().get("url"),
            Some("External URL must start with http:// or https://")
        );

        let internal = DownloadRecord {
            is_external: false,
            ..record
        };
        assert!(internal.validate().is_empty());
    }

    #[test]
    fn download_wire_format() {
        let record = DownloadRecord {
            category: "Presentations".to_string(),
            title: "The Muting Function".to_string(),
            url: "presentations/the_muting_functions.pptx".to_string(),
            is_external: false,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["isExternal"], false);

        let key = DownloadRecord::TABLE.key_schema().key_of(DownloadRecord::TABLE, &json).unwrap();
        assert_eq!(key, record.key());
    }

    #[test]
    fn nav_item_omits_empty_optionals() {
        let record = NavItemRecord {
            section: "Applications".to_string(),
            title: "Safety Relays".to_string(),
            link: Some("https://www.tapeswitch.com/sim.html".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("path").is_none());
        assert!(json.get("subitems").is_none());
        assert!(json.get("isInternal").is_none());
    }
}
