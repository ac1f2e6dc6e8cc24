//! Admin authentication for the CASECO site.
//!
//! This crate provides:
//! - The [`AuthSession`] state machine over any identity provider
//! - A Cognito user pool provider speaking the Cognito JSON API
//! - Session token persistence for command line use
//! - A mock provider (feature `mock`) for development and tests

mod config;
mod error;
mod providers;
mod session;
mod store;

pub use config::{default_endpoint, CognitoConfig, DEFAULT_SESSION_FILE};
pub use error::{AuthError, Result};
pub use providers::CognitoProvider;
#[cfg(any(test, feature = "mock"))]
pub use providers::MockIdentityProvider;
pub use session::AuthSession;
pub use store::TokenStore;
