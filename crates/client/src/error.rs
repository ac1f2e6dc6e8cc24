//! Client error types.

use caseco_core::content::{ContentError, FieldErrors};
use caseco_core::tables::TableError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Auth(#[from] caseco_auth::AuthError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FieldErrors> for ClientError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display() {
        let err = ClientError::ServerError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 500: Internal Server Error");
    }

    #[test]
    fn validation_error_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required");
        let err = ClientError::from(errors);
        assert_eq!(err.to_string(), "Validation failed: name: Name is required");
    }
}
