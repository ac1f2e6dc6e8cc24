mod error;
mod functions;
mod traits;
mod types;

pub use error::AuthError;
pub use functions::{bearer_value, calculate_expiry, is_token_expired};
pub use traits::{IdentityProvider, Result, TokenSource};
pub use types::{AuthStatus, AuthUser, CurrentUser, SessionTokens, SignInOutcome, UserAttributes};
