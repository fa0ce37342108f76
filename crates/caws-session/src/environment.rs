//! Process environment handed to a remote session.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use caws_auth::BearerTokenCache;
use caws_client::ControlPlane;
use caws_core::WorkspaceIdentity;

use crate::error::SessionError;
use crate::ssh::SshAgent;

pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_SSM_CLI: &str = "AWS_SSM_CLI";
pub const CAWS_ENDPOINT: &str = "CAWS_ENDPOINT";
pub const BEARER_TOKEN_LOCATION: &str = "BEARER_TOKEN_LOCATION";
pub const LOG_FILE_LOCATION: &str = "LOG_FILE_LOCATION";
pub const ORGANIZATION_NAME: &str = "ORGANIZATION_NAME";
pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const WORKSPACE_ID: &str = "WORKSPACE_ID";
pub const SSH_AUTH_SOCK: &str = "SSH_AUTH_SOCK";

/// Variable name to value. Ordered so logs and dumps are stable.
pub type SessionEnvironment = BTreeMap<String, String>;

/// Everything the session-specific variables are derived from.
#[derive(Debug, Clone)]
pub struct SessionInputs<'a> {
    pub identity: &'a WorkspaceIdentity,
    pub region: &'a str,
    pub ssm_path: &'a Path,
    pub endpoint: &'a str,
    pub token_path: &'a Path,
    pub log_path: &'a Path,
}

/// The session-specific variables only, without any ambient entries.
#[must_use]
pub fn ssm_environment(inputs: &SessionInputs<'_>) -> SessionEnvironment {
    [
        (AWS_REGION, inputs.region.to_string()),
        (AWS_SSM_CLI, inputs.ssm_path.display().to_string()),
        (CAWS_ENDPOINT, inputs.endpoint.to_string()),
        (BEARER_TOKEN_LOCATION, inputs.token_path.display().to_string()),
        (LOG_FILE_LOCATION, inputs.log_path.display().to_string()),
        (ORGANIZATION_NAME, inputs.identity.organization_name.clone()),
        (PROJECT_NAME, inputs.identity.project_name.clone()),
        (WORKSPACE_ID, inputs.identity.id.clone()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

/// Lay `session` over `ambient`. Session values win on collision.
pub fn merge_over_ambient<I>(session: SessionEnvironment, ambient: I) -> SessionEnvironment
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut merged: SessionEnvironment = ambient.into_iter().collect();
    merged.extend(session);
    merged
}

/// Produces the full environment for one spawn.
///
/// Called again for every spawn, so implementations may do I/O.
#[async_trait]
pub trait EnvironmentProvider: Send + Sync {
    async fn environment(&self) -> Result<SessionEnvironment, SessionError>;
}

/// Where ambient variables come from.
#[derive(Debug, Clone, Default)]
pub enum Ambient {
    /// The current process environment, read at build time.
    #[default]
    Process,
    Fixed(SessionEnvironment),
}

impl Ambient {
    fn vars(&self) -> SessionEnvironment {
        match self {
            Self::Process => std::env::vars().collect(),
            Self::Fixed(vars) => vars.clone(),
        }
    }
}

/// Environment provider for a workspace reached through the control plane.
///
/// Each build checks the client is connected, rewrites the bearer token file
/// with the client's current token, and then derives the variables.
pub struct CawsEnvProvider {
    client: Arc<dyn ControlPlane>,
    tokens: BearerTokenCache,
    ssm_path: PathBuf,
    identity: WorkspaceIdentity,
    ssh_agent: Option<SshAgent>,
    ambient: Ambient,
}

impl CawsEnvProvider {
    #[must_use]
    pub fn new(
        client: Arc<dyn ControlPlane>,
        tokens: BearerTokenCache,
        ssm_path: impl Into<PathBuf>,
        identity: WorkspaceIdentity,
    ) -> Self {
        Self {
            client,
            tokens,
            ssm_path: ssm_path.into(),
            identity,
            ssh_agent: None,
            ambient: Ambient::Process,
        }
    }

    /// Forward an SSH agent socket into the session.
    #[must_use]
    pub fn with_ssh_agent(mut self, agent: SshAgent) -> Self {
        self.ssh_agent = Some(agent);
        self
    }

    #[must_use]
    pub fn with_ambient(mut self, ambient: Ambient) -> Self {
        self.ambient = ambient;
        self
    }

    #[must_use]
    pub const fn identity(&self) -> &WorkspaceIdentity {
        &self.identity
    }
}

#[async_trait]
impl EnvironmentProvider for CawsEnvProvider {
    async fn environment(&self) -> Result<SessionEnvironment, SessionError> {
        if !self.client.connected() {
            return Err(SessionError::NotAuthenticated);
        }
        let token = self.client.token().ok_or(SessionError::NotAuthenticated)?;

        let token_path = self.tokens.cache_token(&token, &self.identity.id).await?;
        let log_path = self.tokens.log_path(&self.identity.id);
        let region = self.client.region_code();
        let endpoint = self.client.endpoint();

        let mut session = ssm_environment(&SessionInputs {
            identity: &self.identity,
            region: &region,
            ssm_path: &self.ssm_path,
            endpoint: &endpoint,
            token_path: &token_path,
            log_path: &log_path,
        });
        if let Some(agent) = &self.ssh_agent {
            session.insert(SSH_AUTH_SOCK.to_string(), agent.socket().await?);
        }

        tracing::debug!(workspace_id = %self.identity.id, "built session environment");
        Ok(merge_over_ambient(session, self.ambient.vars()))
    }
}
