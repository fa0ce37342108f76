//! Workspace identifier resolution.
//!
//! ARN path segments look like
//! `organization/<guid>/project/<guid>/development-workspace/<guid>`. Only the
//! workspace id is taken from the ARN; organization and project names come from
//! the [`HostContext`].

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::CoreError;
use crate::host::HostContext;
use crate::workspace::WorkspaceIdentity;

static WORKSPACE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"development-workspace/([A-Za-z0-9_-]+)").expect("workspace id pattern is valid")
});

/// Extract the workspace id from the final colon-delimited segment of `arn`.
///
/// # Errors
///
/// - [`CoreError::MalformedIdentifier`] if nothing follows the last `:`.
/// - [`CoreError::WorkspaceIdNotFound`] if the segment has no `development-workspace/<id>`.
pub fn parse_workspace_id(arn: &str) -> Result<String, CoreError> {
    let path = arn.rsplit_once(':').map_or(arn, |(_, path)| path);
    if path.is_empty() {
        return Err(CoreError::MalformedIdentifier {
            arn: arn.to_string(),
        });
    }

    WORKSPACE_ID
        .captures(path)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| CoreError::WorkspaceIdNotFound {
            arn: arn.to_string(),
        })
}

/// Resolve a full [`WorkspaceIdentity`] from an ARN plus the host context.
///
/// # Errors
///
/// Any [`parse_workspace_id`] error, or [`CoreError::MissingContext`] when the
/// host lacks an organization or project name.
pub fn resolve(arn: &str, context: &HostContext) -> Result<WorkspaceIdentity, CoreError> {
    let id = parse_workspace_id(arn)?;
    let organization_name = context.organization_name()?;
    let project_name = context.project_name()?;
    WorkspaceIdentity::new(id, organization_name, project_name)
}
