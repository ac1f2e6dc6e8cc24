//! caseco_client - table API client, admin page controllers and CLI for the
//! CASECO site.

pub mod admin;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock_api;
pub mod output;

pub use client::{StaticToken, TableClient};
pub use config::{ClientConfig, Environment};
pub use error::{ClientError, Result};
