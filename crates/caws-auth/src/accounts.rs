//! Saved accounts backed by an on-disk index and the [`SecretStore`].

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::account::{Account, Session};
use crate::error::AuthError;
use crate::provider::{AuthProvider, SessionVerifier};
use crate::secret_store::SecretStore;

const ACCOUNTS_FILE_NAME: &str = "accounts.json";

/// [`AuthProvider`] over accounts saved by previous logins.
///
/// The most recently used account is listed first.
pub struct StoredAccountProvider<V> {
    index_path: PathBuf,
    secrets: SecretStore,
    verifier: V,
    active: Mutex<Option<Session>>,
}

impl<V: SessionVerifier> StoredAccountProvider<V> {
    #[must_use]
    pub fn new(root: &Path, secrets: SecretStore, verifier: V) -> Self {
        Self {
            index_path: root.join(ACCOUNTS_FILE_NAME),
            secrets,
            verifier,
            active: Mutex::new(None),
        }
    }

    /// Read the account index. A missing index is an empty list.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AccountIndexError` if the file exists but cannot be read or parsed.
    pub fn load_accounts(&self) -> Result<Vec<Account>, AuthError> {
        if !self.index_path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.index_path).map_err(|e| {
            AuthError::AccountIndexError(format!("read {}: {e}", self.index_path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AuthError::AccountIndexError(format!("parse {}: {e}", self.index_path.display()))
        })
    }

    /// Verify `secret`, remember it, and make the account the first candidate.
    ///
    /// # Errors
    ///
    /// Verification failures from the [`SessionVerifier`], or storage errors.
    pub async fn login(&self, secret: &str) -> Result<Session, AuthError> {
        let verified = self.verifier.verify(secret).await?;
        let account = Account::new(&verified.user, &verified.user, true);

        self.secrets.store(&account.id, secret)?;
        self.upsert_front(account.clone())?;

        let session = Session {
            id: verified.session_id,
            access_token: secret.to_string(),
            account,
        };
        *self.active.lock() = Some(session.clone());
        tracing::info!(account = %session.account.label, "logged in");
        Ok(session)
    }

    /// Forget an account and its secret. Returns whether it was known.
    ///
    /// # Errors
    ///
    /// Storage errors while rewriting the index or deleting the secret.
    pub fn logout(&self, account_id: &str) -> Result<bool, AuthError> {
        self.secrets.delete(account_id)?;

        let mut accounts = self.load_accounts()?;
        let before = accounts.len();
        accounts.retain(|account| account.id != account_id);
        let removed = accounts.len() != before;
        if removed {
            self.write_accounts(&accounts)?;
        }

        let mut active = self.active.lock();
        if active
            .as_ref()
            .is_some_and(|session| session.account.id == account_id)
        {
            *active = None;
        }
        Ok(removed)
    }

    fn upsert_front(&self, account: Account) -> Result<(), AuthError> {
        let mut accounts = self.load_accounts()?;
        accounts.retain(|existing| existing.id != account.id);
        accounts.insert(0, account);
        self.write_accounts(&accounts)
    }

    fn write_accounts(&self, accounts: &[Account]) -> Result<(), AuthError> {
        if let Some(parent) = self.index_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::AccountIndexError(format!("mkdir {}: {e}", parent.display()))
            })?;
        }
        let raw = serde_json::to_string_pretty(accounts)
            .map_err(|e| AuthError::AccountIndexError(format!("serialize accounts: {e}")))?;
        fs::write(&self.index_path, raw).map_err(|e| {
            AuthError::AccountIndexError(format!("write {}: {e}", self.index_path.display()))
        })
    }
}

#[async_trait]
impl<V: SessionVerifier> AuthProvider for StoredAccountProvider<V> {
    fn list_accounts(&self) -> Vec<Account> {
        self.load_accounts().unwrap_or_else(|error| {
            tracing::warn!(%error, "ignoring unreadable account index");
            Vec::new()
        })
    }

    fn active_session(&self) -> Option<Session> {
        self.active.lock().clone()
    }

    async fn create_session(&self, account: &Account) -> Result<Session, AuthError> {
        let secret = self
            .secrets
            .load(&account.id)
            .ok_or(AuthError::NotAuthenticated)?;
        let verified = self.verifier.verify(&secret).await?;

        if verified.user != account.id {
            return Err(AuthError::SessionRejected(format!(
                "stored secret for {} belongs to {}",
                account.id, verified.user
            )));
        }

        let session = Session {
            id: verified.session_id,
            access_token: secret,
            account: account.clone(),
        };
        *self.active.lock() = Some(session.clone());
        Ok(session)
    }
}
