use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading site content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid content JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate manufacturer id: {0}")]
    DuplicateManufacturer(String),

    #[error("navigation item '{title}' in section '{section}' has no link, path or subitems")]
    DanglingNavItem { section: String, title: String },
}

pub type Result<T> = std::result::Result<T, ContentError>;
