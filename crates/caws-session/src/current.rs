//! Resolve the workspace this process is running inside, if any.

use caws_client::{ControlPlane, LocalWorkspace};
use caws_core::{DevelopmentWorkspace, HostContext, WorkspaceIdentity};

use crate::error::SessionError;

/// A workspace descriptor paired with the client for its local agent.
#[derive(Debug)]
pub struct ConnectedWorkspace<W> {
    pub summary: DevelopmentWorkspace,
    pub workspace_client: W,
}

/// Look up the workspace hosting this process.
///
/// `Ok(None)` means this host is not a development workspace; nothing remote
/// is called in that case. Once the host claims to be a workspace, an
/// unparsable ARN or missing organization/project is an error.
///
/// # Errors
///
/// Identifier errors, [`caws_core::CoreError::MissingContext`], or the
/// control-plane lookup failure.
pub async fn resolve_current<C, W>(
    client: &C,
    workspace_client: W,
    host: &HostContext,
) -> Result<Option<ConnectedWorkspace<W>>, SessionError>
where
    C: ControlPlane + ?Sized,
    W: LocalWorkspace,
{
    let Some(arn) = workspace_client.arn() else {
        return Ok(None);
    };
    if !workspace_client.is_workspace() {
        return Ok(None);
    }

    let identity: WorkspaceIdentity = caws_core::resolve(arn, host)?;
    tracing::debug!(workspace = %identity, "running inside a development workspace");

    let summary = client.get_development_workspace(&identity).await?;
    Ok(Some(ConnectedWorkspace {
        summary,
        workspace_client,
    }))
}
