//! Products page: a product table plus the manufacturers it refers to.

use caseco_core::content::{ManufacturerRecord, ProductRecord};
use caseco_core::tables::{ListQuery, TableName};
use chrono::{DateTime, Utc};

use super::AdminPage;
use crate::client::TableClient;
use crate::error::Result;

/// Id for a product created at `now`.
pub fn new_product_id(now: DateTime<Utc>) -> String {
    format!("product-{}", now.timestamp_millis())
}

#[derive(Debug)]
pub struct ProductsPage {
    page: AdminPage<ProductRecord>,
    client: TableClient,
    manufacturers: Vec<ManufacturerRecord>,
}

impl ProductsPage {
    pub fn new(client: TableClient) -> Self {
        Self {
            page: AdminPage::new(client.clone()),
            client,
            manufacturers: Vec::new(),
        }
    }

    pub fn page(&self) -> &AdminPage<ProductRecord> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut AdminPage<ProductRecord> {
        &mut self.page
    }

    pub fn manufacturers(&self) -> &[ManufacturerRecord] {
        &self.manufacturers
    }

    /// Loads products and manufacturers.
    ///
    /// A failure to load manufacturers is logged only; the product list
    /// still loads and its error is the one returned.
    pub async fn load(&mut self) -> Result<()> {
        let query = ListQuery::default();
        let (products, manufacturers) = tokio::join!(
            self.page.load(),
            self.client
                .list_all::<ManufacturerRecord>(TableName::Manufacturers, &query)
        );

        match manufacturers {
            Ok(manufacturers) => self.manufacturers = manufacturers,
            Err(e) => tracing::error!(error = %e, "Failed to load manufacturers"),
        }
        products
    }

    /// Name of the manufacturer `id`, or "Unknown".
    pub fn manufacturer_name(&self, id: &str) -> &str {
        self.manufacturers
            .iter()
            .find(|m| m.id == id)
            .map_or("Unknown", |m| m.name.as_str())
    }

    /// Opens a create form for a product with a fresh id, assigned to the
    /// first loaded manufacturer.
    pub fn open_create(&mut self, now: DateTime<Utc>) {
        let manufacturer_id = self
            .manufacturers
            .first()
            .map(|m| m.id.clone())
            .unwrap_or_default();
        self.page.open_create(ProductRecord {
            id: new_product_id(now),
            manufacturer_id,
            ..Default::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::client::StaticToken;
    use crate::mock_api::MockTableApi;

    #[test]
    fn product_id_uses_unix_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(new_product_id(now), "product-1700000000123");
    }

    #[tokio::test]
    async fn test_new_product_defaults_to_first_manufacturer() {
        let api = MockTableApi::new();
        api.seed(
            TableName::Manufacturers,
            [
                json!({ "id": "micro-epsilon", "name": "Micro-Epsilon", "logo": "https://l/me.png", "website": "https://www.micro-epsilon.com" }),
                json!({ "id": "tapeswitch", "name": "Tapeswitch", "logo": "https://l/ts.png", "website": "https://www.tapeswitch.com" }),
            ],
        )
        .await;
        api.seed(
            TableName::Products,
            [json!({ "id": "p1", "manufacturerId": "gone", "name": "Old", "image": "https://i", "link": "https://l" })],
        )
        .await;
        let addr = api.spawn().await.unwrap();
        let client = TableClient::new(format!("http://{addr}"), Arc::new(StaticToken::none()));

        let mut products = ProductsPage::new(client);
        products.load().await.unwrap();
        assert_eq!(products.manufacturer_name("tapeswitch"), "Tapeswitch");
        assert_eq!(products.manufacturer_name("gone"), "Unknown");

        let now = Utc.timestamp_millis_opt(42).unwrap();
        products.open_create(now);
        let form = products.page().form().unwrap();
        assert_eq!(form.record.id, "product-42");
        assert_eq!(form.record.manufacturer_id, "micro-epsilon");
    }

    #[tokio::test]
    async fn test_manufacturer_failure_keeps_products() {
        let api = MockTableApi::new();
        // Missing logo and website: not a valid manufacturer record.
        api.seed(
            TableName::Manufacturers,
            [json!({ "id": "tapeswitch", "name": "Tapeswitch" })],
        )
        .await;
        api.seed(
            TableName::Products,
            [json!({ "id": "p1", "manufacturerId": "tapeswitch", "name": "Mat", "image": "https://i", "link": "https://l" })],
        )
        .await;
        let addr = api.spawn().await.unwrap();
        let mut products = ProductsPage::new(TableClient::new(
            format!("http://{addr}"),
            Arc::new(StaticToken::none()),
        ));

        products.load().await.unwrap();
        assert_eq!(products.page().items().len(), 1);
        assert_eq!(products.page().error(), None);
        assert!(products.manufacturers().is_empty());
        assert_eq!(products.manufacturer_name("tapeswitch"), "Unknown");

        products.open_create(Utc::now());
        assert_eq!(products.page().form().unwrap().record.manufacturer_id, "");
    }

    #[tokio::test]
    async fn test_new_product_without_manufacturers() {
        let api = MockTableApi::new();
        let addr = api.spawn().await.unwrap();
        let mut products = ProductsPage::new(TableClient::new(
            format!("http://{addr}"),
            Arc::new(StaticToken::none()),
        ));
        products.load().await.unwrap();

        products.open_create(Utc::now());
        products.page_mut().validate();
        let errors = &products.page().form().unwrap().errors;
        assert_eq!(errors.get("manufacturerId"), Some("Manufacturer is required"));
    }
}
