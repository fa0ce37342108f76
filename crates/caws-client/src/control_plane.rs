use std::time::Duration;

use async_trait::async_trait;
use caws_auth::{Session, VerifiedSession};
use caws_core::{
    CreateWorkspaceRequest, DevelopmentWorkspace, Repository, WorkspaceIdentity, WorkspaceStatus,
};
use futures::stream::BoxStream;

use crate::error::ClientError;

const START_POLL_INTERVAL: Duration = Duration::from_secs(5);
const START_POLL_ATTEMPTS: u32 = 120;

/// The cloud control plane as seen by the connection subsystem.
///
/// Retries and backoff for individual HTTP calls belong to implementations.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Whether credentials are set and were accepted.
    fn connected(&self) -> bool;

    /// Current bearer token, if any.
    fn token(&self) -> Option<String>;

    fn region_code(&self) -> String;

    /// Endpoint exported to spawned sessions.
    fn endpoint(&self) -> String;

    /// Apply a session's credentials and verify them.
    async fn set_credentials(&self, session: &Session) -> Result<VerifiedSession, ClientError>;

    /// Identity behind the current credentials.
    async fn verify_session(&self) -> Result<VerifiedSession, ClientError>;

    async fn get_development_workspace(
        &self,
        identity: &WorkspaceIdentity,
    ) -> Result<DevelopmentWorkspace, ClientError>;

    /// Every workspace visible to the caller, fetched page by page on demand.
    fn list_development_workspaces(&self) -> BoxStream<'_, Result<DevelopmentWorkspace, ClientError>>;

    /// Every repository visible to the caller, fetched page by page on demand.
    fn list_repositories(&self) -> BoxStream<'_, Result<Repository, ClientError>>;

    async fn start_workspace(
        &self,
        identity: &WorkspaceIdentity,
    ) -> Result<DevelopmentWorkspace, ClientError>;

    /// Provision a new workspace; it is not started.
    async fn create_development_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<DevelopmentWorkspace, ClientError>;

    /// Start the workspace if needed and poll until it reaches `desired`.
    ///
    /// `Ok(None)` means it landed in a terminal state or never got there.
    async fn start_workspace_with_progress(
        &self,
        identity: &WorkspaceIdentity,
        desired: WorkspaceStatus,
    ) -> Result<Option<DevelopmentWorkspace>, ClientError> {
        let mut workspace = self.get_development_workspace(identity).await?;
        tracing::info!(workspace_id = %identity.id, status = %workspace.status, %desired, "waiting for workspace");

        for _ in 0..START_POLL_ATTEMPTS {
            if workspace.status == desired {
                return Ok(Some(workspace));
            }
            if workspace.status.is_terminal() {
                tracing::warn!(workspace_id = %identity.id, status = %workspace.status, "workspace cannot reach desired state");
                return Ok(None);
            }
            if desired == WorkspaceStatus::Running && workspace.status == WorkspaceStatus::Stopped {
                workspace = self.start_workspace(identity).await?;
                if workspace.status == desired {
                    return Ok(Some(workspace));
                }
            }

            tokio::time::sleep(START_POLL_INTERVAL).await;
            let next = self.get_development_workspace(identity).await?;
            if next.status != workspace.status {
                tracing::info!(workspace_id = %identity.id, status = %next.status, "workspace status changed");
            }
            workspace = next;
        }

        tracing::warn!(workspace_id = %identity.id, "timed out waiting for workspace");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use caws_core::{OrganizationRef, ProjectRef};
    use futures::stream::{self, StreamExt};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Reports queued statuses one lookup at a time, repeating the last.
    struct ScriptedPlane {
        statuses: Mutex<VecDeque<WorkspaceStatus>>,
        started_as: WorkspaceStatus,
        lookups: AtomicUsize,
        starts: AtomicUsize,
    }

    impl ScriptedPlane {
        fn new(statuses: &[WorkspaceStatus], started_as: WorkspaceStatus) -> Self {
            Self {
                statuses: Mutex::new(statuses.iter().copied().collect()),
                started_as,
                lookups: AtomicUsize::new(0),
                starts: AtomicUsize::new(0),
            }
        }

        fn descriptor(status: WorkspaceStatus) -> DevelopmentWorkspace {
            DevelopmentWorkspace {
                id: "ws-1".into(),
                org: OrganizationRef { name: "acme".into() },
                project: ProjectRef { name: "rockets".into() },
                status,
                alias: None,
                repositories: Vec::new(),
                ides: Vec::new(),
                last_updated_time: None,
            }
        }
    }

    #[async_trait]
    impl ControlPlane for ScriptedPlane {
        fn connected(&self) -> bool {
            true
        }

        fn token(&self) -> Option<String> {
            Some("t".into())
        }

        fn region_code(&self) -> String {
            "us-east-1".into()
        }

        fn endpoint(&self) -> String {
            "https://api.example.dev".into()
        }

        async fn set_credentials(&self, _session: &Session) -> Result<VerifiedSession, ClientError> {
            Err(ClientError::NotConnected)
        }

        async fn verify_session(&self) -> Result<VerifiedSession, ClientError> {
            Err(ClientError::NotConnected)
        }

        async fn get_development_workspace(
            &self,
            _identity: &WorkspaceIdentity,
        ) -> Result<DevelopmentWorkspace, ClientError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            let mut statuses = self.statuses.lock();
            let status = if statuses.len() > 1 {
                statuses.pop_front()
            } else {
                statuses.front().copied()
            };
            Ok(Self::descriptor(status.unwrap_or_default()))
        }

        fn list_development_workspaces(
            &self,
        ) -> BoxStream<'_, Result<DevelopmentWorkspace, ClientError>> {
            stream::empty().boxed()
        }

        fn list_repositories(&self) -> BoxStream<'_, Result<Repository, ClientError>> {
            stream::empty().boxed()
        }

        async fn start_workspace(
            &self,
            _identity: &WorkspaceIdentity,
        ) -> Result<DevelopmentWorkspace, ClientError> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            *self.statuses.lock() = VecDeque::from([WorkspaceStatus::Running]);
            Ok(Self::descriptor(self.started_as))
        }

        async fn create_development_workspace(
            &self,
            _request: &CreateWorkspaceRequest,
        ) -> Result<DevelopmentWorkspace, ClientError> {
            Ok(Self::descriptor(WorkspaceStatus::Stopped))
        }
    }

    fn identity() -> WorkspaceIdentity {
        WorkspaceIdentity::new("ws-1", "acme", "rockets").expect("identity")
    }

    #[tokio::test(start_paused = true)]
    async fn starting_workspace_is_polled_until_running() {
        use WorkspaceStatus::{Pending, Running, Starting};
        let plane = ScriptedPlane::new(&[Pending, Starting, Starting, Running], Running);

        let running = plane
            .start_workspace_with_progress(&identity(), Running)
            .await
            .expect("poll")
            .expect("running");

        assert_eq!(running.status, Running);
        assert_eq!(plane.lookups.load(Ordering::SeqCst), 4);
        assert_eq!(plane.starts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_workspace_is_started_once_stopped() {
        use WorkspaceStatus::{Running, Starting, Stopped, Stopping};
        let plane = ScriptedPlane::new(&[Stopping, Stopping, Stopped], Starting);

        let running = plane
            .start_workspace_with_progress(&identity(), Running)
            .await
            .expect("poll")
            .expect("running");

        assert_eq!(running.status, Running);
        assert_eq!(plane.starts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_state_while_polling_gives_up() {
        use WorkspaceStatus::{Failed, Running, Starting};
        let plane = ScriptedPlane::new(&[Starting, Failed], Running);

        let result = plane
            .start_workspace_with_progress(&identity(), Running)
            .await
            .expect("poll");

        assert!(result.is_none());
        assert_eq!(plane.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn never_reaching_desired_state_times_out() {
        let plane = ScriptedPlane::new(&[WorkspaceStatus::Pending], WorkspaceStatus::Running);
        let began = tokio::time::Instant::now();

        let result = plane
            .start_workspace_with_progress(&identity(), WorkspaceStatus::Running)
            .await
            .expect("poll");

        assert!(result.is_none());
        let polls = u32::try_from(plane.lookups.load(Ordering::SeqCst)).expect("count");
        assert_eq!(polls, START_POLL_ATTEMPTS + 1);
        assert_eq!(began.elapsed(), START_POLL_INTERVAL * START_POLL_ATTEMPTS);
    }
}
