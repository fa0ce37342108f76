//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the control plane or the workspace agent.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API rejected the credentials.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited — retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A request needed credentials but none were set.
    #[error("client is not connected — run `caws login`")]
    NotConnected,

    /// No control-plane URL configured.
    #[error("control-plane endpoint is not configured (set CAWS_ENDPOINT__API_URL)")]
    NotConfigured,
}
