//! HTTP client for the table API.

pub mod tables;
pub mod token;

use std::fmt;
use std::sync::Arc;

use caseco_core::auth::{bearer_value, TokenSource};
use caseco_core::tables::{HttpMethod, TableOperation};
use reqwest::header::AUTHORIZATION;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub use token::StaticToken;

/// HTTP client for the generic table API.
///
/// Every request asks the [`TokenSource`] for the current id token and sends
/// it as a bearer credential. Nothing is cached between requests.
#[derive(Clone)]
pub struct TableClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl fmt::Debug for TableClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TableClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn from_config(config: &ClientConfig, tokens: Arc<dyn TokenSource>) -> Self {
        Self::new(&config.api_url, tokens)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder for `operation` on `path`, carrying the current token.
    async fn request(&self, operation: TableOperation, path: &str) -> reqwest::RequestBuilder {
        let method = match operation.method() {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let builder = self.client.request(method, self.url(path));
        match self.tokens.id_token().await {
            Some(token) => builder.header(AUTHORIZATION, bearer_value(&token)),
            None => {
                tracing::debug!(%operation, path, "No id token; sending request without credentials");
                builder
            }
        }
    }

    /// Sends a request, logging transport failures.
    async fn send(
        &self,
        operation: TableOperation,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        builder.send().await.map_err(|e| {
            tracing::error!(%operation, path, error = %e, "Table request failed");
            ClientError::from(e)
        })
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        operation: TableOperation,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| {
                tracing::error!(%operation, path, error = %e, "Unreadable table response");
                ClientError::from(e)
            });
        }
        Err(self.error_from(operation, path, response).await)
    }

    /// Handle delete responses (no body expected).
    async fn handle_delete_response(
        &self,
        operation: TableOperation,
        path: &str,
        response: reqwest::Response,
    ) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from(operation, path, response).await)
        }
    }

    async fn error_from(
        &self,
        operation: TableOperation,
        path: &str,
        response: reqwest::Response,
    ) -> ClientError {
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::error!(%operation, path, status = status.as_u16(), %message, "Table request rejected");

        if status.as_u16() == 404 {
            ClientError::NotFound {
                resource: path.to_string(),
            }
        } else {
            ClientError::ServerError {
                status: status.as_u16(),
                message,
            }
        }
    }
}
