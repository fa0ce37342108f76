//! Local tooling needed to open a remote session.

use std::path::PathBuf;

use caws_config::ConnectConfig;

use crate::error::SessionError;

const SSM_PLUGIN: &str = "session-manager-plugin";
const SSH: &str = "ssh";
const EDITOR: &str = "code";

/// Resolved executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependencies {
    pub ssm: PathBuf,
    pub ssh: PathBuf,
    pub editor: PathBuf,
}

/// Locate the SSM plugin, `ssh`, and the editor CLI.
///
/// Non-empty config values win over `PATH` lookup.
///
/// # Errors
///
/// [`SessionError::DependencyResolutionFailed`] for the first tool not found.
pub fn ensure_dependencies(config: &ConnectConfig) -> Result<Dependencies, SessionError> {
    Ok(Dependencies {
        ssm: locate("ssm plugin", &config.ssm_plugin, SSM_PLUGIN)?,
        ssh: locate("ssh", &config.ssh, SSH)?,
        editor: locate("editor", &config.editor, EDITOR)?,
    })
}

fn locate(tool: &'static str, configured: &str, default: &str) -> Result<PathBuf, SessionError> {
    let wanted = if configured.is_empty() {
        default
    } else {
        configured
    };
    let path = which::which(wanted).map_err(|e| SessionError::DependencyResolutionFailed {
        tool,
        reason: format!("{wanted}: {e}"),
    })?;
    tracing::debug!(tool, path = %path.display(), "resolved dependency");
    Ok(path)
}
