//! Provision a new workspace and bring it up.

use caws_client::ControlPlane;
use caws_core::{CreateWorkspaceRequest, DevelopmentWorkspace, WorkspaceStatus};

use crate::error::SessionError;

/// Create a workspace from `request` and wait for it to reach `RUNNING`.
///
/// # Errors
///
/// [`SessionError::NotAuthenticated`] for a disconnected client,
/// [`SessionError::WorkspaceStartFailed`] if the new workspace never came up,
/// or the control plane's error.
pub async fn create_development_workspace<C>(
    client: &C,
    request: &CreateWorkspaceRequest,
) -> Result<DevelopmentWorkspace, SessionError>
where
    C: ControlPlane + ?Sized,
{
    if !client.connected() {
        return Err(SessionError::NotAuthenticated);
    }

    let created = client.create_development_workspace(request).await?;
    let identity = created.identity()?;
    tracing::info!(workspace_id = %identity.id, project = %identity.project_name, "workspace created");

    client
        .start_workspace_with_progress(&identity, WorkspaceStatus::Running)
        .await?
        .ok_or_else(|| {
            tracing::error!(workspace_id = %identity.id, "created workspace did not start");
            SessionError::WorkspaceStartFailed {
                workspace_id: identity.id,
            }
        })
}
