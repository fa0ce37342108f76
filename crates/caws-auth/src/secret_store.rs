use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "caws-cli";
const SECRET_ENV_VAR: &str = "CAWS_SESSION_SECRET";
const CREDENTIALS_DIR_NAME: &str = "credentials";

/// Returns the keyring service name.
///
/// Defaults to `"caws-cli"`. Override via `CAWS_KEYRING_SERVICE` for testing to
/// avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("CAWS_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Per-account session secrets: OS keychain first, files under the storage root
/// as fallback.
#[derive(Debug, Clone)]
pub struct SecretStore {
    root: PathBuf,
    use_keyring: bool,
}

impl SecretStore {
    /// Keychain-backed where the platform has a native store (macOS, Windows);
    /// elsewhere `keyring` only has an in-memory mock, so files are used.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            use_keyring: cfg!(any(target_os = "macos", target_os = "windows")),
        }
    }

    /// A store that never touches the OS keychain (headless hosts, tests).
    #[must_use]
    pub fn file_only(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            use_keyring: false,
        }
    }

    /// Store a secret in the OS keychain. Falls back to file if keyring unavailable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SecretStoreError` if both keyring and file storage fail.
    pub fn store(&self, account_id: &str, secret: &str) -> Result<(), AuthError> {
        if !self.use_keyring {
            return self.store_file(account_id, secret);
        }
        match keyring::Entry::new(&keyring_service(), account_id) {
            Ok(entry) => match entry.set_password(secret) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.store_file(account_id, secret)
                }
            },
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                self.store_file(account_id, secret)
            }
        }
    }

    /// Load a secret. Priority: keyring → `CAWS_SESSION_SECRET` env → file.
    #[must_use]
    pub fn load(&self, account_id: &str) -> Option<String> {
        if self.use_keyring
            && let Ok(entry) = keyring::Entry::new(&keyring_service(), account_id)
            && let Ok(secret) = entry.get_password()
            && !secret.is_empty()
        {
            return Some(secret);
        }

        if let Ok(secret) = std::env::var(SECRET_ENV_VAR)
            && !secret.is_empty()
        {
            return Some(secret);
        }

        self.load_file(account_id)
    }

    /// Delete a stored secret from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SecretStoreError` if the credentials file cannot be removed.
    pub fn delete(&self, account_id: &str) -> Result<(), AuthError> {
        if self.use_keyring
            && let Ok(entry) = keyring::Entry::new(&keyring_service(), account_id)
        {
            let _ = entry.delete_credential();
        }

        let path = self.credentials_path(account_id)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                AuthError::SecretStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    // --- Private file helpers ---

    /// Account ids come from the server, so they are percent-encoded (dots
    /// included) into a single file name that cannot leave the directory.
    fn credentials_path(&self, account_id: &str) -> Result<PathBuf, AuthError> {
        if account_id.is_empty() {
            return Err(AuthError::SecretStoreError("empty account id".into()));
        }
        let file_name = urlencoding::encode(account_id).replace('.', "%2E");
        Ok(self.root.join(CREDENTIALS_DIR_NAME).join(file_name))
    }

    fn store_file(&self, account_id: &str, secret: &str) -> Result<(), AuthError> {
        let path = self.credentials_path(account_id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::SecretStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            restrict(parent, 0o700);
        }
        fs::write(&path, secret)
            .map_err(|e| AuthError::SecretStoreError(format!("write {}: {e}", path.display())))?;
        restrict(&path, 0o600);
        Ok(())
    }

    fn load_file(&self, account_id: &str) -> Option<String> {
        fs::read_to_string(self.credentials_path(account_id).ok()?)
            .ok()
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(unix)]
fn restrict(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
        tracing::warn!("failed to chmod {mode:o} {}: {e}", path.display());
    }
}

#[cfg(not(unix))]
fn restrict(_path: &Path, _mode: u32) {}
