//! Generic list/form/delete controller shared by the admin pages.

use caseco_core::content::{FieldErrors, TableRecord};
use caseco_core::tables::{ItemKey, ListQuery};

use crate::client::TableClient;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the item stored under this key.
    Edit(ItemKey),
}

/// An open create or edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct Form<R> {
    pub mode: FormMode,
    pub record: R,
    pub errors: FieldErrors,
}

impl<R> Form<R> {
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }
}

/// State of one admin table page.
///
/// Holds the loaded items, the error banner, the open form and a pending
/// delete. Failed requests set the banner to the error's message and are
/// returned to the caller as well.
#[derive(Debug)]
pub struct AdminPage<R> {
    client: TableClient,
    items: Vec<R>,
    loading: bool,
    error: Option<String>,
    form: Option<Form<R>>,
    pending_delete: Option<R>,
}

impl<R: TableRecord> AdminPage<R> {
    pub fn new(client: TableClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            loading: false,
            error: None,
            form: None,
            pending_delete: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error banner text.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn form(&self) -> Option<&Form<R>> {
        self.form.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&R> {
        self.pending_delete.as_ref()
    }

    /// Distinct group values of the loaded items, in first-seen order.
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for group in self.items.iter().filter_map(R::group) {
            if !groups.iter().any(|g| g == group) {
                groups.push(group.to_string());
            }
        }
        groups
    }

    /// Replaces the items with every item of the table.
    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        self.error = None;

        let result = self
            .client
            .list_all::<R>(R::TABLE, &ListQuery::default())
            .await;
        self.loading = false;

        match result {
            Ok(items) => {
                tracing::debug!(table = %R::TABLE, count = items.len(), "Loaded admin page");
                self.items = items;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn open_create(&mut self, record: R) {
        self.form = Some(Form {
            mode: FormMode::Create,
            record,
            errors: FieldErrors::new(),
        });
    }

    /// Opens the edit form for the item stored under `key`.
    pub fn open_edit(&mut self, key: &ItemKey) -> Result<()> {
        let record = self.find(key)?.clone();
        self.form = Some(Form {
            mode: FormMode::Edit(key.clone()),
            record,
            errors: FieldErrors::new(),
        });
        Ok(())
    }

    /// Applies `edit` to the open form's record and clears its field errors.
    pub fn edit_form(&mut self, edit: impl FnOnce(&mut R)) -> Result<()> {
        let form = self.form.as_mut().ok_or_else(no_form)?;
        edit(&mut form.record);
        form.errors = FieldErrors::new();
        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Validates the open form, storing its field errors. `true` when valid.
    pub fn validate(&mut self) -> bool {
        match self.form.as_mut() {
            Some(form) => {
                form.errors = form.record.validate();
                form.errors.is_empty()
            }
            None => false,
        }
    }

    /// Submits the open form.
    ///
    /// An invalid form is never sent. Creating appends the stored item;
    /// editing replaces the edited item in place. Editing may not change the
    /// item's key fields. The form closes on success.
    pub async fn submit(&mut self) -> Result<()> {
        if !self.validate() {
            return Err(match &self.form {
                Some(form) => ClientError::Validation(form.errors.clone()),
                None => no_form(),
            });
        }
        let Some(form) = self.form.as_ref() else {
            return Err(no_form());
        };
        self.error = None;

        let mode = form.mode.clone();
        let mut record = form.record.clone();
        match &mode {
            FormMode::Create => record.fill_key(),
            FormMode::Edit(key) if record.key() != *key => {
                let err = ClientError::InvalidInput(format!(
                    "key fields cannot change when editing: {key} became {}",
                    record.key()
                ));
                return Err(self.fail(err));
            }
            FormMode::Edit(_) => {}
        }
        let result = match &mode {
            FormMode::Create => self.client.create::<R, R>(R::TABLE, &record).await,
            FormMode::Edit(key) => self.client.update::<R, R>(R::TABLE, key, &record).await,
        };

        match result {
            Ok(stored) => {
                match mode {
                    FormMode::Create => self.items.push(stored),
                    FormMode::Edit(key) => {
                        if let Some(item) = self.items.iter_mut().find(|item| item.key() == key) {
                            *item = stored;
                        }
                    }
                }
                self.form = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Asks for confirmation before deleting the item under `key`.
    pub fn request_delete(&mut self, key: &ItemKey) -> Result<()> {
        self.pending_delete = Some(self.find(key)?.clone());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the pending item and drops it from the loaded items.
    ///
    /// The list is not fetched again.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(record) = self.pending_delete.as_ref() else {
            return Err(ClientError::InvalidInput("No delete pending".to_string()));
        };
        let key = record.key();

        match self.client.delete(R::TABLE, &key).await {
            Ok(()) => {
                tracing::info!(table = %R::TABLE, label = record.label(), "Removed from admin page");
                self.items.retain(|item| item.key() != key);
                self.pending_delete = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn find(&self, key: &ItemKey) -> Result<&R> {
        self.items
            .iter()
            .find(|item| &item.key() == key)
            .ok_or_else(|| ClientError::NotFound {
                resource: format!("{}/{}", R::TABLE, key),
            })
    }

    fn fail(&mut self, error: ClientError) -> ClientError {
        tracing::error!(table = %R::TABLE, error = %error, "Admin request failed");
        self.error = Some(error.to_string());
        error
    }
}

fn no_form() -> ClientError {
    ClientError::InvalidInput("No form is open".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use caseco_core::content::{DownloadRecord, ManufacturerRecord, NavItemRecord};
    use caseco_core::tables::TableName;
    use serde_json::json;

    use super::*;
    use crate::client::StaticToken;
    use crate::mock_api::MockTableApi;

    async fn page<R: TableRecord>(api: &MockTableApi) -> AdminPage<R> {
        let addr = api.spawn().await.unwrap();
        AdminPage::new(TableClient::new(
            format!("http://{addr}"),
            Arc::new(StaticToken::new("t")),
        ))
    }

    async fn seeded() -> MockTableApi {
        let api = MockTableApi::new().with_page_size(1);
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
            [json!({ "id": "p1", "manufacturerId": "tapeswitch", "name": "Mat", "image": "https://i", "link": "https://l" })],
        )
        .await;
        api
    }

    #[tokio::test]
    async fn test_load_follows_pages() {
        let api = seeded().await;
        let mut page = page::<ManufacturerRecord>(&api).await;

        page.load().await.unwrap();
        assert_eq!(page.items().len(), 2);
        assert!(!page.is_loading());
        assert_eq!(page.error(), None);
    }

    #[tokio::test]
    async fn test_invalid_form_never_creates() {
        let api = MockTableApi::new();
        let mut page = page::<ManufacturerRecord>(&api).await;

        page.open_create(ManufacturerRecord {
            logo: "ftp://logo".to_string(),
            website: "www.example.com".to_string(),
            ..Default::default()
        });
        let err = page.submit().await.unwrap_err();

        let ClientError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(page.form().unwrap().errors, errors);
        assert!(api.authorization_headers().await.is_empty());
        assert!(api.items(TableName::Manufacturers).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_appends() {
        let api = seeded().await;
        let mut page = page::<ManufacturerRecord>(&api).await;
        page.load().await.unwrap();

        page.open_create(ManufacturerRecord::default());
        page.edit_form(|m| {
            m.name = "ReeR Safety".to_string();
            m.logo = "https://l/reer.png".to_string();
            m.website = "https://www.reersafety.com".to_string();
        })
        .unwrap();
        page.submit().await.unwrap();

        assert!(page.form().is_none());
        assert_eq!(page.items().len(), 3);
        assert_eq!(page.items()[2].id, "reer-safety");
        assert_eq!(api.items(TableName::Manufacturers).await.len(), 3);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let api = seeded().await;
        let mut page = page::<ManufacturerRecord>(&api).await;
        page.load().await.unwrap();

        let key = ItemKey::new("micro-epsilon");
        page.open_edit(&key).unwrap();
        assert!(page.form().unwrap().is_editing());
        page.edit_form(|m| m.description = Some("Sensors".to_string())).unwrap();
        page.submit().await.unwrap();

        assert_eq!(page.items()[0].id, "micro-epsilon");
        assert_eq!(page.items()[0].description.as_deref(), Some("Sensors"));
        assert_eq!(page.items().len(), 2);
    }

    #[tokio::test]
    async fn test_edit_cannot_change_key_fields() {
        let api = MockTableApi::new();
        api.seed(
            TableName::NavItems,
            [json!({ "section": "Applications", "title": "Mats", "link": "https://m" })],
        )
        .await;
        let mut page = page::<NavItemRecord>(&api).await;
        page.load().await.unwrap();
        let requests = api.authorization_headers().await.len();

        let key = ItemKey::with_sort("Applications", "Mats");
        page.open_edit(&key).unwrap();
        page.edit_form(|item| item.title = "Safety Mats".to_string()).unwrap();
        let err = page.submit().await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert_eq!(page.error(), Some(err.to_string().as_str()));
        assert!(page.form().is_some());
        assert_eq!(page.items()[0].title, "Mats");
        assert_eq!(api.authorization_headers().await.len(), requests);
        let stored = api.items(TableName::NavItems).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["title"], "Mats");
    }

    #[tokio::test]
    async fn test_edit_of_sorted_item_updates_in_place() {
        let api = MockTableApi::new();
        api.seed(
            TableName::NavItems,
            [json!({ "section": "Applications", "title": "Mats", "link": "https://m" })],
        )
        .await;
        let mut page = page::<NavItemRecord>(&api).await;
        page.load().await.unwrap();

        page.open_edit(&ItemKey::with_sort("Applications", "Mats")).unwrap();
        page.edit_form(|item| item.link = Some("https://mats".to_string())).unwrap();
        page.submit().await.unwrap();

        assert_eq!(page.items().len(), 1);
        assert_eq!(page.items()[0].link.as_deref(), Some("https://mats"));
        let stored = api.items(TableName::NavItems).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["link"], "https://mats");
    }

    #[tokio::test]
    async fn test_delete_removes_locally_without_refetch() {
        let api = seeded().await;
        let mut page = page::<ManufacturerRecord>(&api).await;
        page.load().await.unwrap();
        let requests = api.authorization_headers().await.len();

        page.request_delete(&ItemKey::new("tapeswitch")).unwrap();
        assert_eq!(page.pending_delete().unwrap().name, "Tapeswitch");
        page.confirm_delete().await.unwrap();

        assert_eq!(page.items().len(), 1);
        assert_eq!(page.items()[0].id, "micro-epsilon");
        assert!(page.pending_delete().is_none());
        // One DELETE and nothing else.
        assert_eq!(api.authorization_headers().await.len(), requests + 1);
        assert_eq!(api.items(TableName::Products).await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_sets_banner() {
        let api = seeded().await;
        let mut page = page::<ManufacturerRecord>(&api).await;
        page.load().await.unwrap();
        page.request_delete(&ItemKey::new("tapeswitch")).unwrap();

        // Gone on the server already.
        page.client
            .delete(TableName::Manufacturers, &ItemKey::new("tapeswitch"))
            .await
            .unwrap();

        let err = page.confirm_delete().await.unwrap_err();
        assert_eq!(page.error(), Some(err.to_string().as_str()));
        assert_eq!(page.items().len(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_sets_banner() {
        let api = MockTableApi::new().require_token("other");
        let mut page = page::<DownloadRecord>(&api).await;

        assert!(page.load().await.is_err());
        assert!(page.error().unwrap().starts_with("Server returned 401"));
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn test_groups_in_first_seen_order() {
        let api = MockTableApi::new();
        api.seed(
            TableName::NavItems,
            [
                json!({ "section": "Manufacturers", "title": "ReeR", "link": "https://r" }),
                json!({ "section": "Applications", "title": "Mats", "link": "https://m" }),
                json!({ "section": "Applications", "title": "Relays", "link": "https://s" }),
            ],
        )
        .await;
        let mut page = page::<NavItemRecord>(&api).await;
        page.load().await.unwrap();

        // The mock serves items in key order.
        assert_eq!(page.groups(), vec!["Applications", "Manufacturers"]);
    }
}
