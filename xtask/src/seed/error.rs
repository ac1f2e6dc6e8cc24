//! Error types for content seeding.

use thiserror::Error;

/// Result type alias for seed module.
pub type Result<T> = std::result::Result<T, SeedError>;

/// Errors that can occur while seeding the tables.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Content(#[from] caseco_core::content::ContentError),

    #[error(transparent)]
    Client(#[from] caseco_client::ClientError),

    #[error(transparent)]
    Auth(#[from] caseco_auth::AuthError),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("{failed} of {total} items failed to seed")]
    Incomplete { failed: usize, total: usize },

    #[error("Operation cancelled by user")]
    UserCancelled,
}
