//! # caws-auth
//!
//! Account and credential handling for caws.
//!
//! Provides the [`AuthProvider`] seam the connection flow talks to, the
//! sequential auto-connect over saved accounts, OS keychain secret storage
//! (`keyring`, with a file fallback), the on-disk account index, and the
//! per-workspace bearer token cache handed to spawned sessions.

pub mod account;
pub mod accounts;
pub mod auto_connect;
pub mod error;
pub mod provider;
pub mod secret_store;
pub mod token_cache;

pub use account::{Account, AccountMetadata, Session};
pub use accounts::StoredAccountProvider;
pub use auto_connect::auto_connect;
pub use error::AuthError;
pub use provider::{AuthProvider, SessionVerifier, VerifiedSession};
pub use secret_store::SecretStore;
pub use token_cache::BearerTokenCache;
