//! Error types for admin provisioning.

use thiserror::Error;

use super::password::PasswordRule;

/// Result type alias for admin module.
pub type Result<T> = std::result::Result<T, AdminError>;

/// Errors that can occur while provisioning administrators.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Cognito error: {0}")]
    Cognito(String),

    #[error("Password does not meet the pool policy: {}", format_rules(.0))]
    WeakPassword(Vec<PasswordRule>),

    #[error("{0} is required")]
    MissingValue(&'static str),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Operation cancelled by user")]
    UserCancelled,
}

fn format_rules(rules: &[PasswordRule]) -> String {
    rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
