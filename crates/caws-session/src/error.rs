use caws_auth::AuthError;
use caws_client::ClientError;
use caws_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not logged in: cannot build a workspace session environment")]
    NotAuthenticated,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("failed to start workspace {workspace_id}")]
    WorkspaceStartFailed { workspace_id: String },

    #[error("missing dependency {tool}: {reason}")]
    DependencyResolutionFailed { tool: &'static str, reason: String },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}: {stderr}", code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
    ProcessFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("ssh-agent error: {0}")]
    SshAgent(String),

    #[error("memento store error: {0}")]
    Memento(String),

    #[error("devfile location unavailable: {0}")]
    Devfile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
