use async_trait::async_trait;

use super::{AuthError, CurrentUser, SessionTokens, SignInOutcome, UserAttributes};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Abstraction over the external identity provider.
///
/// Implementations own the remote session; callers only observe it through
/// these calls.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with username and password.
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInOutcome>;

    /// End the current session with the provider.
    async fn sign_out(&self) -> Result<()>;

    /// Identity of the signed-in user. Fails when no session exists.
    async fn current_user(&self) -> Result<CurrentUser>;

    /// Profile attributes of the signed-in user.
    async fn user_attributes(&self) -> Result<UserAttributes>;

    /// Current session tokens, refreshed by the provider when expired.
    async fn session_tokens(&self) -> Result<Option<SessionTokens>>;
}

/// Source of the bearer token attached to API requests.
///
/// Queried on every request; implementations must not assume the caller
/// caches the value.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn id_token(&self) -> Option<String>;
}
