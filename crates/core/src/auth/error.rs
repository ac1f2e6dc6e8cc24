use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("session is still initializing")]
    Initializing,

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("session expired")]
    SessionExpired,

    #[error("user attribute missing: {0}")]
    MissingAttribute(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("provider error: {0}")]
    Provider(String),
}
