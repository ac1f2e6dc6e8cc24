//! Session token persistence for command line use.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use caseco_core::auth::{AuthError, Result, SessionTokens};
use tokio::io::AsyncWriteExt;

/// JSON file holding the tokens of the last signed-in session.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored tokens, or `None` when no session was saved.
    pub async fn load(&self) -> Result<Option<SessionTokens>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(&self.path, e)),
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| storage_error(&self.path, e))
    }

    /// Writes the tokens, readable by the owner only on unix.
    pub async fn save(&self, tokens: &SessionTokens) -> Result<()> {
        let json = serde_json::to_string_pretty(tokens).map_err(|e| storage_error(&self.path, e))?;
        self.write_private(json.as_bytes())
            .await
            .map_err(|e| storage_error(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "Saved session tokens");
        Ok(())
    }

    async fn write_private(&self, contents: &[u8]) -> std::io::Result<()> {
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&self.path).await?;
        // `mode` only applies to new files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await?;
        }
        file.write_all(contents).await?;
        file.flush().await
    }

    /// Removes the stored session. Missing files are not an error.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(&self.path, e)),
        }
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> AuthError {
    AuthError::Storage(format!("{}: {err}", path.display()))
}
