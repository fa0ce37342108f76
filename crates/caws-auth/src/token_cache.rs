//! Per-workspace bearer token and log file locations.
//!
//! Spawned sessions read the token from `caws.<id>.token` and write their log to
//! `caws.<id>.log` under the storage root. One workspace is connected at a time,
//! so writes assume a single writer per id.

use std::path::{Path, PathBuf};

use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct BearerTokenCache {
    root: PathBuf,
}

impl BearerTokenCache {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn token_path(&self, workspace_id: &str) -> PathBuf {
        self.root.join(format!("caws.{workspace_id}.token"))
    }

    #[must_use]
    pub fn log_path(&self, workspace_id: &str) -> PathBuf {
        self.root.join(format!("caws.{workspace_id}.log"))
    }

    /// Overwrite the workspace's token file with `token`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenCacheError` if the root or file cannot be written.
    pub async fn cache_token(&self, token: &str, workspace_id: &str) -> Result<PathBuf, AuthError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AuthError::TokenCacheError(format!("mkdir {}: {e}", self.root.display()))
        })?;

        let path = self.token_path(workspace_id);
        tokio::fs::write(&path, token.as_bytes())
            .await
            .map_err(|e| AuthError::TokenCacheError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| {
                    AuthError::TokenCacheError(format!("chmod {}: {e}", path.display()))
                })?;
        }

        tracing::debug!(workspace_id, path = %path.display(), "cached bearer token");
        Ok(path)
    }
}
