//! In-memory collaborators for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use caws_auth::{Session, VerifiedSession};
use caws_client::{ClientError, ControlPlane, LocalStatus, LocalWorkspace};
use caws_core::{
    CreateWorkspaceRequest, DevelopmentWorkspace, Ide, OrganizationRef, ProjectRef, Repository, WorkspaceIdentity,
    WorkspaceRepository, WorkspaceStatus,
};
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;

pub fn workspace(id: &str, repository: Option<&str>, ide: &str) -> DevelopmentWorkspace {
    DevelopmentWorkspace {
        id: id.to_string(),
        org: OrganizationRef { name: "o".into() },
        project: ProjectRef { name: "p".into() },
        status: WorkspaceStatus::Running,
        alias: None,
        repositories: repository
            .map(|name| WorkspaceRepository {
                repository_name: name.to_string(),
                branch_name: None,
            })
            .into_iter()
            .collect(),
        ides: vec![Ide {
            name: ide.to_string(),
            runtime: None,
        }],
        last_updated_time: None,
    }
}

pub fn repository(name: &str) -> Repository {
    Repository {
        name: name.to_string(),
        org: OrganizationRef { name: "o".into() },
        project: ProjectRef { name: "p".into() },
        description: None,
    }
}

#[derive(Default)]
pub struct FakeControlPlane {
    pub(crate) token: Mutex<Option<String>>,
    pub workspaces: Vec<DevelopmentWorkspace>,
    pub repositories: Vec<Repository>,
    pub lookups: AtomicUsize,
    pub listings: AtomicUsize,
    pub starts: AtomicUsize,
    pub created: Mutex<Vec<CreateWorkspaceRequest>>,
    /// Created workspaces report `FAILED` instead of `STOPPED`.
    pub fail_starts: bool,
}

impl FakeControlPlane {
    pub fn connected(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            ..Self::default()
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn with_workspaces(mut self, workspaces: Vec<DevelopmentWorkspace>) -> Self {
        self.workspaces = workspaces;
        self
    }

    pub fn set_token(&self, token: &str) {
        *self.token.lock() = Some(token.to_string());
    }
}

#[async_trait]
impl ControlPlane for FakeControlPlane {
    fn connected(&self) -> bool {
        self.token.lock().is_some()
    }

    fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn region_code(&self) -> String {
        "us-east-1".into()
    }

    fn endpoint(&self) -> String {
        "https://api.example.dev".into()
    }

    async fn set_credentials(&self, session: &Session) -> Result<VerifiedSession, ClientError> {
        self.set_token(&session.access_token);
        Ok(VerifiedSession {
            session_id: session.id.clone(),
            user: session.account.id.clone(),
        })
    }

    async fn verify_session(&self) -> Result<VerifiedSession, ClientError> {
        self.token().map_or(Err(ClientError::NotConnected), |_| {
            Ok(VerifiedSession {
                session_id: "s".into(),
                user: "jane".into(),
            })
        })
    }

    async fn get_development_workspace(
        &self,
        identity: &WorkspaceIdentity,
    ) -> Result<DevelopmentWorkspace, ClientError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let created = self.created.lock().len();
        self.workspaces
            .iter()
            .find(|w| w.id == identity.id)
            .cloned()
            .or_else(|| {
                (created > 0 && identity.id == format!("new-{created}")).then(|| {
                    let mut workspace = workspace(&identity.id, None, "VSCode");
                    workspace.status = if self.fail_starts {
                        WorkspaceStatus::Failed
                    } else {
                        WorkspaceStatus::Stopped
                    };
                    workspace
                })
            })
            .ok_or(ClientError::Api {
                status: 404,
                message: format!("no workspace {}", identity.id),
            })
    }

    fn list_development_workspaces(
        &self,
    ) -> BoxStream<'_, Result<DevelopmentWorkspace, ClientError>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        stream::iter(self.workspaces.clone().into_iter().map(Ok)).boxed()
    }

    fn list_repositories(&self) -> BoxStream<'_, Result<Repository, ClientError>> {
        stream::iter(self.repositories.clone().into_iter().map(Ok)).boxed()
    }

    async fn start_workspace(
        &self,
        identity: &WorkspaceIdentity,
    ) -> Result<DevelopmentWorkspace, ClientError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        let mut workspace = self.get_development_workspace(identity).await?;
        workspace.status = WorkspaceStatus::Running;
        Ok(workspace)
    }

    /// Records the request; the new workspace is `new-<n>` and starts out stopped.
    async fn create_development_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<DevelopmentWorkspace, ClientError> {
        if !self.connected() {
            return Err(ClientError::NotConnected);
        }
        let mut created = self.created.lock();
        created.push(request.clone());
        let mut workspace = workspace(&format!("new-{}", created.len()), None, "VSCode");
        workspace.status = WorkspaceStatus::Stopped;
        Ok(workspace)
    }
}

pub struct FakeLocalWorkspace {
    pub arn: Option<String>,
    pub is_workspace: bool,
    pub status: LocalStatus,
}

impl FakeLocalWorkspace {
    pub fn plain_host() -> Self {
        Self {
            arn: None,
            is_workspace: false,
            status: LocalStatus::default(),
        }
    }

    pub fn workspace_host(arn: &str) -> Self {
        Self {
            arn: Some(arn.to_string()),
            is_workspace: true,
            status: LocalStatus::default(),
        }
    }
}

#[async_trait]
impl LocalWorkspace for FakeLocalWorkspace {
    fn arn(&self) -> Option<&str> {
        self.arn.as_deref()
    }

    fn is_workspace(&self) -> bool {
        self.is_workspace
    }

    async fn status(&self) -> Result<LocalStatus, ClientError> {
        Ok(self.status.clone())
    }
}
