//! Control-plane endpoint configuration.

use serde::{Deserialize, Serialize};

fn default_region() -> String {
    "us-east-1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Base URL of the control-plane API.
    #[serde(default)]
    pub api_url: String,

    /// Region code handed to spawned sessions when the client has none.
    #[serde(default = "default_region")]
    pub region: String,

    /// Hostname used to build git clone URLs.
    #[serde(default)]
    pub git_hostname: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            region: default_region(),
            git_hostname: String::new(),
        }
    }
}

impl EndpointConfig {
    /// Check if the API endpoint is set.
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty()
    }
}
