use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `caws login`")]
    NotAuthenticated,

    #[error("session rejected: {0}")]
    SessionRejected(String),

    #[error("keyring error: {0}")]
    KeyringError(String),

    #[error("secret store error: {0}")]
    SecretStoreError(String),

    #[error("account index error: {0}")]
    AccountIndexError(String),

    #[error("token cache error: {0}")]
    TokenCacheError(String),

    #[error("{0}")]
    Other(String),
}
