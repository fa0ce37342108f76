//! Settings for opening a remote session.

use serde::{Deserialize, Serialize};

const fn default_use_ssh_agent() -> bool {
    true
}

fn default_target_path() -> String {
    "/projects".to_string()
}

fn default_host_name_prefix() -> String {
    "aws-caws-".to_string()
}

fn default_ide_runtime() -> String {
    "VSCode".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectConfig {
    /// Forward the local SSH agent into the session.
    #[serde(default = "default_use_ssh_agent")]
    pub use_ssh_agent: bool,

    /// Folder opened inside the workspace.
    #[serde(default = "default_target_path")]
    pub target_path: String,

    /// SSH host label prefix; the workspace id is appended.
    #[serde(default = "default_host_name_prefix")]
    pub host_name_prefix: String,

    /// IDE tag a workspace must carry to be associated with a repository.
    #[serde(default = "default_ide_runtime")]
    pub ide_runtime: String,

    /// Explicit path to the SSM session-manager plugin.
    #[serde(default)]
    pub ssm_plugin: String,

    /// Explicit path to `ssh`.
    #[serde(default)]
    pub ssh: String,

    /// Explicit path to the editor CLI.
    #[serde(default)]
    pub editor: String,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            use_ssh_agent: default_use_ssh_agent(),
            target_path: default_target_path(),
            host_name_prefix: default_host_name_prefix(),
            ide_runtime: default_ide_runtime(),
            ssm_plugin: String::new(),
            ssh: String::new(),
            editor: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ConnectConfig::default();
        assert!(config.use_ssh_agent);
        assert_eq!(config.target_path, "/projects");
        assert_eq!(config.host_name_prefix, "aws-caws-");
        assert!(config.ssm_plugin.is_empty());
    }
}
