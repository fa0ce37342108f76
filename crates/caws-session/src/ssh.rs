//! SSH agent socket for agent forwarding.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::process::Command;

use crate::environment::SSH_AUTH_SOCK;
use crate::error::SessionError;

/// Locates (or starts) an SSH agent and remembers its socket.
#[derive(Debug, Clone, Default)]
pub struct SshAgent {
    socket: Arc<Mutex<Option<String>>>,
}

impl SshAgent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An agent with a known socket; nothing is started.
    #[must_use]
    pub fn with_socket(socket: impl Into<String>) -> Self {
        Self {
            socket: Arc::new(Mutex::new(Some(socket.into()))),
        }
    }

    /// Socket path of the running agent.
    ///
    /// Prefers `SSH_AUTH_SOCK`; otherwise runs `ssh-agent -s` once.
    ///
    /// # Errors
    ///
    /// [`SessionError::SshAgent`] if the agent cannot be started or its
    /// output has no socket.
    pub async fn socket(&self) -> Result<String, SessionError> {
        if let Some(socket) = self.socket.lock().clone() {
            return Ok(socket);
        }

        let socket = match std::env::var(SSH_AUTH_SOCK) {
            Ok(existing) if !existing.is_empty() => existing,
            _ => start_agent().await?,
        };
        *self.socket.lock() = Some(socket.clone());
        Ok(socket)
    }
}

async fn start_agent() -> Result<String, SessionError> {
    let output = Command::new("ssh-agent")
        .arg("-s")
        .output()
        .await
        .map_err(|e| SessionError::SshAgent(format!("run ssh-agent: {e}")))?;
    if !output.status.success() {
        return Err(SessionError::SshAgent(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let socket = parse_agent_output(&stdout)
        .ok_or_else(|| SessionError::SshAgent("no socket in ssh-agent output".into()))?;
    tracing::info!(socket = %socket, "started ssh-agent");
    Ok(socket)
}

/// Extract the socket from `ssh-agent -s` (Bourne shell) output.
#[must_use]
pub fn parse_agent_output(output: &str) -> Option<String> {
    let prefix = format!("{SSH_AUTH_SOCK}=");
    output.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(&prefix)?;
        let socket = rest.split(';').next()?.trim();
        (!socket.is_empty()).then(|| socket.to_string())
    })
}
