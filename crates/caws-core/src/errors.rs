//! Cross-cutting error types for caws.
//!
//! Errors raised while interpreting identifiers and host state. Transport,
//! auth, and session errors live in their respective crates and wrap this one
//! where a failure crosses the boundary.

use thiserror::Error;

/// Errors that can be raised by any caws crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The identifier had nothing after its last `:`.
    #[error("workspace identifier \"{arn}\" did not contain a path segment")]
    MalformedIdentifier { arn: String },

    /// The path segment did not name a development workspace.
    #[error("unable to parse workspace id from identifier \"{arn}\"")]
    WorkspaceIdNotFound { arn: String },

    /// The host did not provide an organization or project name.
    #[error("no {field} found in the host context")]
    MissingContext { field: &'static str },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
