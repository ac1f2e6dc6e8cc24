//! Fixed token sources.

use async_trait::async_trait;
use caseco_core::auth::TokenSource;

/// A token source that always returns the same value.
///
/// Used with `--token` and against the local mock API.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A source that never has a token.
    pub fn none() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn id_token(&self) -> Option<String> {
        self.0.clone()
    }
}
