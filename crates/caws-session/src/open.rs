//! Open a remote editing session on a development workspace.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use caws_auth::BearerTokenCache;
use caws_client::{ControlPlane, LocalWorkspace};
use caws_config::ConnectConfig;
use caws_core::{DevelopmentWorkspace, WorkspaceIdentity, WorkspaceStatus};

use crate::environment::CawsEnvProvider;
use crate::error::SessionError;
use crate::launcher::{LaunchHooks, LaunchOptions, ProcessLauncher};
use crate::memento::MementoStore;
use crate::ssh::SshAgent;
use crate::tools::{Dependencies, ensure_dependencies};

/// SSH host label for a workspace.
#[must_use]
pub fn host_name(identity: &WorkspaceIdentity, prefix: &str) -> String {
    format!("{prefix}{}", identity.id)
}

/// Starts the actual remote editing session.
#[async_trait]
pub trait RemoteSessionLauncher: Send + Sync {
    async fn launch(
        &self,
        launcher: &ProcessLauncher,
        dependencies: &Dependencies,
        host_name: &str,
        target_path: &str,
    ) -> Result<(), SessionError>;
}

/// Opens the editor's remote-SSH folder view.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorRemoteLauncher;

#[async_trait]
impl RemoteSessionLauncher for EditorRemoteLauncher {
    async fn launch(
        &self,
        launcher: &ProcessLauncher,
        dependencies: &Dependencies,
        host_name: &str,
        target_path: &str,
    ) -> Result<(), SessionError> {
        let folder = format!("vscode-remote://ssh-remote+{host_name}{target_path}");
        launcher
            .run(
                &dependencies.editor,
                &["--folder-uri", folder.as_str()],
                LaunchOptions::default(),
            )
            .await?;
        Ok(())
    }
}

/// Collaborators shared by every open.
pub struct Connector {
    pub client: Arc<dyn ControlPlane>,
    pub tokens: BearerTokenCache,
    pub mementos: MementoStore,
    pub config: ConnectConfig,
}

impl Connector {
    /// Start `workspace`, bind a session launcher to it, and hand off to `remote`.
    ///
    /// `target_path` defaults to the configured target path. Returns the
    /// running descriptor.
    ///
    /// # Errors
    ///
    /// [`SessionError::WorkspaceStartFailed`] if the workspace never reached
    /// `RUNNING`, [`SessionError::DependencyResolutionFailed`] for missing
    /// tools, or whatever the remote launcher returns.
    pub async fn open_development_workspace(
        &self,
        workspace: &DevelopmentWorkspace,
        target_path: Option<&str>,
        remote: &dyn RemoteSessionLauncher,
    ) -> Result<DevelopmentWorkspace, SessionError> {
        let identity = workspace.identity()?;
        let Some(running) = self
            .client
            .start_workspace_with_progress(&identity, WorkspaceStatus::Running)
            .await?
        else {
            tracing::error!(workspace_id = %identity.id, "failed to start workspace");
            return Err(SessionError::WorkspaceStartFailed {
                workspace_id: identity.id,
            });
        };

        let dependencies = ensure_dependencies(&self.config)?;
        let launcher = self.session_launcher(&identity, &dependencies);
        let host = host_name(&identity, &self.config.host_name_prefix);
        let target = target_path.unwrap_or(&self.config.target_path);

        tracing::info!(workspace_id = %identity.id, host = %host, target_path = target, "opening workspace");
        remote.launch(&launcher, &dependencies, &host, target).await?;

        self.mementos.record(&running, target)?;
        Ok(running)
    }

    /// Launcher bound to `identity` that logs output and rejects failures.
    #[must_use]
    pub fn session_launcher(
        &self,
        identity: &WorkspaceIdentity,
        dependencies: &Dependencies,
    ) -> ProcessLauncher {
        let mut provider = CawsEnvProvider::new(
            Arc::clone(&self.client),
            self.tokens.clone(),
            dependencies.ssm.clone(),
            identity.clone(),
        );
        if self.config.use_ssh_agent {
            provider = provider.with_ssh_agent(SshAgent::new());
        }

        let (out_id, err_id) = (identity.id.clone(), identity.id.clone());
        ProcessLauncher::bind(Arc::new(provider)).with_hooks(
            LaunchHooks::new()
                .on_stdout(move |line| tracing::debug!(workspace_id = %out_id, "{line}"))
                .on_stderr(move |line| tracing::debug!(workspace_id = %err_id, "{line}"))
                .reject_on_error_code(true),
        )
    }
}

/// Absolute path of the workspace's devfile, as reported by the local agent.
///
/// # Errors
///
/// [`SessionError::Devfile`] without a root directory or a reported location.
pub async fn devfile_location<W>(client: &W, root: Option<&Path>) -> Result<PathBuf, SessionError>
where
    W: LocalWorkspace + ?Sized,
{
    let root = root.ok_or_else(|| SessionError::Devfile("no root directory".into()))?;
    let location = client
        .status()
        .await?
        .location
        .ok_or_else(|| SessionError::Devfile("devfile location was not found".into()))?;
    Ok(root.join(location.trim_start_matches('/')))
}
