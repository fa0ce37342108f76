use async_trait::async_trait;

use crate::account::{Account, Session};
use crate::error::AuthError;

/// Source of accounts and sessions for the connection flow.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Accounts in the order they should be tried.
    fn list_accounts(&self) -> Vec<Account>;

    /// The session created most recently, if it is still held.
    fn active_session(&self) -> Option<Session>;

    /// Create a session for `account`. May refresh tokens as a side effect.
    async fn create_session(&self, account: &Account) -> Result<Session, AuthError>;
}

/// Identity confirmed by the control plane for a stored secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    pub session_id: String,
    pub user: String,
}

/// Checks a stored secret against the control plane.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, secret: &str) -> Result<VerifiedSession, AuthError>;
}
