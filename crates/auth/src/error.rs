use thiserror::Error;

/// Auth errors for the caseco_auth crate.
///
/// Wraps the core `AuthError` returned by identity providers and adds the
/// variants for setup failures that happen outside a provider call.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error reported by the identity provider or the session state machine.
    #[error(transparent)]
    Core(#[from] caseco_core::auth::AuthError),

    /// HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// The core error, when this is one.
    pub fn core(&self) -> Option<&caseco_core::auth::AuthError> {
        match self {
            AuthError::Core(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
