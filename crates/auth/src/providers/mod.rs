//! Identity provider implementations.
//!
//! - Cognito user pools over the Cognito JSON API
//! - An in-memory mock for development and tests

mod cognito;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use cognito::CognitoProvider;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockIdentityProvider;
