//! Settings used when running inside a development workspace.

use serde::{Deserialize, Serialize};

fn default_local_api_url() -> String {
    "http://127.0.0.1:1339".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    /// Base URL of the in-workspace agent API.
    #[serde(default = "default_local_api_url")]
    pub local_api_url: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            local_api_url: default_local_api_url(),
        }
    }
}
