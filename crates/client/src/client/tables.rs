//! CRUD operations on the generic table API.

use std::collections::HashSet;

use caseco_core::tables::{operation_path, ItemKey, ListQuery, ListResponse, TableName, TableOperation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::TableClient;
use crate::error::{ClientError, Result};

impl TableClient {
    /// Fetch one page of items from `table`.
    ///
    /// Only the first page is returned; use [`TableClient::list_all`] to
    /// follow `nextToken`.
    pub async fn list<T: DeserializeOwned>(
        &self,
        table: TableName,
        query: &ListQuery,
    ) -> Result<ListResponse<T>> {
        let operation = TableOperation::List;
        let path = operation_path(operation, table, None)?;
        let builder = self.request(operation, &path).await.query(&query.to_pairs());
        let response = self.send(operation, &path, builder).await?;
        let page: ListResponse<T> = self.handle_response(operation, &path, response).await?;
        tracing::debug!(%table, count = page.items.len(), more = page.has_more(), "Listed items");
        Ok(page)
    }

    /// Fetch every item of `table`, following `nextToken` until the last page.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        table: TableName,
        query: &ListQuery,
    ) -> Result<Vec<T>> {
        let mut query = query.clone();
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        loop {
            let page: ListResponse<T> = self.list(table, &query).await?;
            items.extend(page.items);

            match page.next_token {
                Some(token) if !seen.insert(token.clone()) => {
                    return Err(ClientError::InvalidResponse(format!(
                        "{table} returned nextToken {token} twice"
                    )));
                }
                Some(token) => query.next_token = Some(token),
                None => return Ok(items),
            }
        }
    }

    /// Fetch one item by key.
    pub async fn get<T: DeserializeOwned>(&self, table: TableName, key: &ItemKey) -> Result<T> {
        let operation = TableOperation::Get;
        let path = operation_path(operation, table, Some(key))?;
        let builder = self.request(operation, &path).await;
        let response = self.send(operation, &path, builder).await?;
        self.handle_response(operation, &path, response).await
    }

    /// Create an item and return what the server stored.
    pub async fn create<T, R>(&self, table: TableName, item: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let operation = TableOperation::Create;
        let path = operation_path(operation, table, None)?;
        let builder = self.request(operation, &path).await.json(item);
        let response = self.send(operation, &path, builder).await?;
        let created = self.handle_response(operation, &path, response).await?;
        tracing::info!(%table, "Created item");
        Ok(created)
    }

    /// Replace the item at `key`.
    pub async fn update<T, R>(&self, table: TableName, key: &ItemKey, item: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let operation = TableOperation::Update;
        let path = operation_path(operation, table, Some(key))?;
        let builder = self.request(operation, &path).await.json(item);
        let response = self.send(operation, &path, builder).await?;
        let updated = self.handle_response(operation, &path, response).await?;
        tracing::info!(%table, %key, "Updated item");
        Ok(updated)
    }

    /// Delete the item at `key`.
    pub async fn delete(&self, table: TableName, key: &ItemKey) -> Result<()> {
        let operation = TableOperation::Delete;
        let path = operation_path(operation, table, Some(key))?;
        let builder = self.request(operation, &path).await;
        let response = self.send(operation, &path, builder).await?;
        self.handle_delete_response(operation, &path, response).await?;
        tracing::info!(%table, %key, "Deleted item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use caseco_auth::{AuthSession, MockIdentityProvider};
    use caseco_core::auth::UserAttributes;
    use caseco_core::content::{ManufacturerRecord, ProductRecord};
    use serde_json::{json, Value};

    use super::*;
    use crate::client::StaticToken;
    use crate::mock_api::MockTableApi;

    async fn client_for(api: &MockTableApi, token: Option<&str>) -> TableClient {
        let addr = api.spawn().await.unwrap();
        let tokens = match token {
            Some(token) => StaticToken::new(token),
            None => StaticToken::none(),
        };
        TableClient::new(format!("http://{addr}/"), Arc::new(tokens))
    }

    fn reer() -> ManufacturerRecord {
        ManufacturerRecord {
            id: "reer".to_string(),
            name: "ReeR Safety".to_string(),
            logo: "https://cdn.caseco-inc.com/images/reer-logo.png".to_string(),
            website: "https://www.reersafety.com".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let api = MockTableApi::new();
        let client = client_for(&api, Some("t")).await;

        let created: ManufacturerRecord = client.create(TableName::Manufacturers, &reer()).await.unwrap();
        assert_eq!(created, reer());

        let fetched: ManufacturerRecord = client
            .get(TableName::Manufacturers, &ItemKey::new("reer"))
            .await
            .unwrap();
        assert_eq!(fetched.name, "ReeR Safety");
    }

    #[tokio::test]
    async fn test_update_then_get_with_sort_key() {
        let api = MockTableApi::new();
        let client = client_for(&api, Some("t")).await;
        let key = ItemKey::with_sort("product-1", "reer");

        let mut product = ProductRecord {
            id: "product-1".to_string(),
            manufacturer_id: "reer".to_string(),
            name: "EOS-4".to_string(),
            image: "https://cdn.caseco-inc.com/images/eos4.png".to_string(),
            link: "https://www.reersafety.com/eos4".to_string(),
        };
        let _: ProductRecord = client.create(TableName::Products, &product).await.unwrap();

        product.name = "EOS-4 A".to_string();
        let _: ProductRecord = client.update(TableName::Products, &key, &product).await.unwrap();

        let fetched: ProductRecord = client.get(TableName::Products, &key).await.unwrap();
        assert_eq!(fetched, product);
        assert_eq!(api.items(TableName::Products).await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_and_missing_item() {
        let api = MockTableApi::new();
        api.seed(TableName::Manufacturers, [serde_json::to_value(reer()).unwrap()]).await;
        let client = client_for(&api, Some("t")).await;
        let key = ItemKey::new("reer");

        client.delete(TableName::Manufacturers, &key).await.unwrap();
        assert!(api.items(TableName::Manufacturers).await.is_empty());

        let err = client
            .get::<Value>(TableName::Manufacturers, &key)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::NotFound { resource } if resource == "/tables/manufacturers/reer"
        ));
    }

    #[tokio::test]
    async fn test_list_returns_first_page_only() {
        let api = MockTableApi::new().with_page_size(2);
        api.seed(
            TableName::Manufacturers,
            (1..=5).map(|i| json!({ "id": format!("m{i}"), "name": format!("M{i}") })),
        )
        .await;
        let client = client_for(&api, Some("t")).await;

        let page: ListResponse<Value> = client
            .list(TableName::Manufacturers, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.has_more());

        let all: Vec<Value> = client
            .list_all(TableName::Manufacturers, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[4]["id"], "m5");
    }

    #[tokio::test]
    async fn test_list_sends_filters() {
        let api = MockTableApi::new();
        api.seed(
            TableName::Downloads,
            [
                json!({ "category": "Catalogs", "title": "A", "url": "/a.pdf" }),
                json!({ "category": "Presentations", "title": "B", "url": "/b.pdf" }),
            ],
        )
        .await;
        let client = client_for(&api, None).await;

        let query = ListQuery::default().with_filter("category", "Presentations");
        let page: ListResponse<Value> = client.list(TableName::Downloads, &query).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["title"], "B");
    }

    #[tokio::test]
    async fn test_missing_token_sends_no_header() {
        let api = MockTableApi::new();
        let client = client_for(&api, None).await;

        let _: ListResponse<Value> = client
            .list(TableName::Products, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(api.authorization_headers().await, vec![None]);
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_server_error() {
        let api = MockTableApi::new().require_token("secret");
        let client = client_for(&api, Some("wrong")).await;

        let err = client
            .list::<Value>(TableName::Products, &ListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ServerError { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_bearer_token_read_per_request() {
        let provider = Arc::new(MockIdentityProvider::new().with_user(
            "admin@caseco-inc.com",
            "Correct#1",
            UserAttributes::new().with("sub", "sub-1"),
        ));
        let session = AuthSession::new(provider.clone());
        session.sign_in("admin@caseco-inc.com", "Correct#1").await.unwrap();

        let api = MockTableApi::new();
        let addr = api.spawn().await.unwrap();
        let client = TableClient::new(format!("http://{addr}"), Arc::new(session.clone()));

        let before = provider.token_reads();
        for _ in 0..3 {
            let _: ListResponse<Value> = client
                .list(TableName::Manufacturers, &ListQuery::default())
                .await
                .unwrap();
        }
        assert_eq!(provider.token_reads(), before + 3);
        assert_eq!(
            api.authorization_headers().await,
            vec![Some("Bearer mock-id-admin@caseco-inc.com-1".to_string()); 3]
        );

        session.sign_out().await.unwrap();
        let _: ListResponse<Value> = client
            .list(TableName::Manufacturers, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(api.authorization_headers().await.last(), Some(&None));
    }

    #[tokio::test]
    async fn test_empty_partition_rejected_before_request() {
        let api = MockTableApi::new();
        let client = client_for(&api, None).await;

        let err = client
            .delete(TableName::Manufacturers, &ItemKey::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Table(_)));
        assert!(api.authorization_headers().await.is_empty());
    }
}
