use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use caseco_core::content::{SeedRecords, TableRecord};
use caseco_core::tables::{ItemKey, ListResponse, TableName};
use serde_json::Value;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

type Items = BTreeMap<ItemKey, Value>;

#[derive(Debug, Default)]
struct Store {
    tables: RwLock<HashMap<TableName, Items>>,
    authorization: RwLock<Vec<Option<String>>>,
}

#[derive(Debug)]
struct ApiState {
    page_size: Option<usize>,
    required_token: Option<String>,
    store: Arc<Store>,
}

/// Error responses of the mock API: a status and a plain text message.
struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

fn parse_table(name: &str) -> ApiResult<TableName> {
    name.parse()
        .map_err(|_| ApiError(StatusCode::NOT_FOUND, format!("Unknown table: {name}")))
}

/// Key from path segments, checked against the table's key schema.
fn path_key(table: TableName, id: String, sort: Option<String>) -> ApiResult<ItemKey> {
    let schema = table.key_schema();
    match (schema.sort, sort) {
        (Some(_), Some(sort)) => Ok(ItemKey::with_sort(id, sort)),
        (None, None) => Ok(ItemKey::new(id)),
        (Some(attribute), None) => Err(ApiError(
            StatusCode::BAD_REQUEST,
            format!("Missing sort key {attribute} for table {table}"),
        )),
        (None, Some(_)) => Err(ApiError(
            StatusCode::BAD_REQUEST,
            format!("Table {table} has no sort key"),
        )),
    }
}

/// Table API server backed by memory.
///
/// Clones share the same data, so a test can keep a handle to inspect what
/// the client wrote.
#[derive(Debug, Clone, Default)]
pub struct MockTableApi {
    page_size: Option<usize>,
    required_token: Option<String>,
    store: Arc<Store>,
}

impl MockTableApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap list pages at `size` items unless the request asks for fewer.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size.max(1));
        self
    }

    /// Reject requests that do not carry `Authorization: Bearer <token>`.
    pub fn require_token(mut self, token: impl Into<String>) -> Self {
        self.required_token = Some(token.into());
        self
    }

    /// Inserts items as-is. Items without valid key attributes are skipped.
    pub async fn seed(&self, table: TableName, items: impl IntoIterator<Item = Value>) {
        let schema = table.key_schema();
        let mut tables = self.store.tables.write().await;
        let entries = tables.entry(table).or_default();
        for item in items {
            match schema.key_of(table, &item) {
                Ok(key) => {
                    entries.insert(key, item);
                }
                Err(e) => tracing::warn!(%table, error = %e, "Skipping seed item"),
            }
        }
    }

    /// Inserts every record of `records` into its table.
    pub async fn seed_records(&self, records: &SeedRecords) -> serde_json::Result<()> {
        self.seed_all(&records.manufacturers).await?;
        self.seed_all(&records.products).await?;
        self.seed_all(&records.nav_items).await?;
        self.seed_all(&records.downloads).await
    }

    async fn seed_all<R: TableRecord>(&self, records: &[R]) -> serde_json::Result<()> {
        let items = records
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        self.seed(R::TABLE, items).await;
        Ok(())
    }

    /// Items currently stored in `table`, in key order.
    pub async fn items(&self, table: TableName) -> Vec<Value> {
        self.store
            .tables
            .read()
            .await
            .get(&table)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default()
    }

    /// `Authorization` header of every request received so far.
    pub async fn authorization_headers(&self) -> Vec<Option<String>> {
        self.store.authorization.read().await.clone()
    }

    pub fn router(&self) -> Router {
        let state = Arc::new(ApiState {
            page_size: self.page_size,
            required_token: self.required_token.clone(),
            store: self.store.clone(),
        });

        Router::new()
            .route("/tables/{table}", get(list_items).post(create_item))
            .route(
                "/tables/{table}/{id}",
                get(get_item).put(update_item).delete(delete_item),
            )
            .route(
                "/tables/{table}/{id}/{sort}",
                get(get_sorted_item)
                    .put(update_sorted_item)
                    .delete(delete_sorted_item),
            )
            .layer(middleware::from_fn_with_state(state.clone(), authorize))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serves on an ephemeral localhost port in the background.
    pub async fn spawn(&self) -> std::io::Result<SocketAddr> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = self.router();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock table API stopped");
            }
        });
        Ok(addr)
    }

    /// Serves on `addr` until the process exits.
    pub async fn serve(&self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "Mock table API listening");
        axum::serve(listener, self.router()).await
    }
}

async fn authorize(State(state): State<Arc<ApiState>>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.store.authorization.write().await.push(header.clone());

    if let Some(token) = &state.required_token {
        if header.as_deref() != Some(format!("Bearer {token}").as_str()) {
            return ApiError(StatusCode::UNAUTHORIZED, "Unauthorized".to_string()).into_response();
        }
    }

    next.run(request).await
}

async fn list_items(
    State(state): State<Arc<ApiState>>,
    Path(table): Path<String>,
    Query(mut params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Value>>> {
    let table = parse_table(&table)?;

    let limit = match params.remove("limit") {
        Some(limit) => Some(limit.parse::<usize>().map_err(|_| {
            ApiError(StatusCode::BAD_REQUEST, format!("Invalid limit: {limit}"))
        })?),
        None => None,
    };
    let limit = match (limit, state.page_size) {
        (Some(limit), Some(size)) => Some(limit.min(size)),
        (limit, size) => limit.or(size),
    };
    // Tokens are offsets into the key-ordered table.
    let offset = match params.remove("nextToken") {
        Some(token) => token.parse::<usize>().map_err(|_| {
            ApiError(StatusCode::BAD_REQUEST, format!("Invalid nextToken: {token}"))
        })?,
        None => 0,
    };

    let tables = state.store.tables.read().await;
    let all: Vec<&Value> = tables
        .get(&table)
        .map(|items| items.values().collect())
        .unwrap_or_default();

    let end = limit.map_or(all.len(), |limit| (offset + limit).min(all.len()));
    let page = all.get(offset..end).unwrap_or_default();
    let items: Vec<Value> = page
        .iter()
        .filter(|item| {
            params
                .iter()
                .all(|(name, value)| item.get(name).and_then(Value::as_str) == Some(value.as_str()))
        })
        .map(|item| (*item).clone())
        .collect();

    Ok(Json(ListResponse {
        count: items.len() as u64,
        scanned_count: page.len() as u64,
        items,
        next_token: (end < all.len()).then(|| end.to_string()),
    }))
}

async fn create_item(
    State(state): State<Arc<ApiState>>,
    Path(table): Path<String>,
    Json(item): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let table = parse_table(&table)?;
    let key = table
        .key_schema()
        .key_of(table, &item)
        .map_err(|e| ApiError(StatusCode::BAD_REQUEST, e.to_string()))?;

    state
        .store
        .tables
        .write()
        .await
        .entry(table)
        .or_default()
        .insert(key, item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn fetch(state: &ApiState, table: &str, id: String, sort: Option<String>) -> ApiResult<Json<Value>> {
    let table = parse_table(table)?;
    let key = path_key(table, id, sort)?;
    state
        .store
        .tables
        .read()
        .await
        .get(&table)
        .and_then(|items| items.get(&key))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError(StatusCode::NOT_FOUND, format!("Item not found: {key}")))
}

async fn replace(
    state: &ApiState,
    table: &str,
    id: String,
    sort: Option<String>,
    mut item: Value,
) -> ApiResult<Json<Value>> {
    let table = parse_table(table)?;
    let key = path_key(table, id, sort)?;
    let schema = table.key_schema();

    // The path is authoritative for key attributes.
    if let Some(object) = item.as_object_mut() {
        object.insert(schema.partition.to_string(), Value::String(key.partition.clone()));
        if let (Some(attribute), Some(sort)) = (schema.sort, &key.sort) {
            object.insert(attribute.to_string(), Value::String(sort.clone()));
        }
    } else {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            "Item must be a JSON object".to_string(),
        ));
    }

    state
        .store
        .tables
        .write()
        .await
        .entry(table)
        .or_default()
        .insert(key, item.clone());
    Ok(Json(item))
}

async fn remove(state: &ApiState, table: &str, id: String, sort: Option<String>) -> ApiResult<StatusCode> {
    let table = parse_table(table)?;
    let key = path_key(table, id, sort)?;
    state
        .store
        .tables
        .write()
        .await
        .get_mut(&table)
        .and_then(|items| items.remove(&key))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError(StatusCode::NOT_FOUND, format!("Item not found: {key}")))
}

async fn get_item(
    State(state): State<Arc<ApiState>>,
    Path((table, id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    fetch(&state, &table, id, None).await
}

async fn get_sorted_item(
    State(state): State<Arc<ApiState>>,
    Path((table, id, sort)): Path<(String, String, String)>,
) -> ApiResult<Json<Value>> {
    fetch(&state, &table, id, Some(sort)).await
}

async fn update_item(
    State(state): State<Arc<ApiState>>,
    Path((table, id)): Path<(String, String)>,
    Json(item): Json<Value>,
) -> ApiResult<Json<Value>> {
    replace(&state, &table, id, None, item).await
}

async fn update_sorted_item(
    State(state): State<Arc<ApiState>>,
    Path((table, id, sort)): Path<(String, String, String)>,
    Json(item): Json<Value>,
) -> ApiResult<Json<Value>> {
    replace(&state, &table, id, Some(sort), item).await
}

async fn delete_item(
    State(state): State<Arc<ApiState>>,
    Path((table, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    remove(&state, &table, id, None).await
}

async fn delete_sorted_item(
    State(state): State<Arc<ApiState>>,
    Path((table, id, sort)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    remove(&state, &table, id, Some(sort)).await
}
