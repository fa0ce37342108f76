//! # caws-config
//!
//! Layered configuration loading for caws using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CAWS_*` prefix, `__` as separator)
//! 2. Project-level `.caws/config.toml`
//! 3. User-level `~/.config/caws/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CAWS_ENDPOINT__API_URL` -> `endpoint.api_url`,
//! `CAWS_CONNECT__USE_SSH_AGENT` -> `connect.use_ssh_agent`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use caws_config::CawsConfig;
//!
//! let config = CawsConfig::load_with_dotenv().expect("config");
//! let root = config.storage.root_dir().expect("storage root");
//! println!("tokens live under {}", root.display());
//! ```
//!
//! The loaded value is owned by the caller and passed down explicitly; nothing
//! in caws reads configuration from a global.

mod connect;
mod endpoint;
mod error;
mod storage;
mod workspace;

pub use connect::ConnectConfig;
pub use endpoint::EndpointConfig;
pub use error::ConfigError;
pub use storage::StorageConfig;
pub use workspace::WorkspaceConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CawsConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub connect: ConnectConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

impl CawsConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".caws/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority). Only nested keys:
        // spawned sessions export a flat `CAWS_ENDPOINT` that is not config.
        figment.merge(
            Env::prefixed("CAWS_")
                .filter(|key| key.as_str().contains("__"))
                .split("__"),
        )
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("caws").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = CawsConfig::default();
        assert!(!config.endpoint.is_configured());
        assert!(config.connect.use_ssh_agent);
        assert_eq!(config.connect.target_path, "/projects");
    }

    #[test]
    fn flat_session_variables_are_ignored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CAWS_ENDPOINT", "https://session.example.dev");
            let config: CawsConfig = CawsConfig::figment().extract()?;
            assert!(!config.endpoint.is_configured());
            Ok(())
        });
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: CawsConfig = CawsConfig::figment().extract()?;
            assert_eq!(config.endpoint.region, "us-east-1");
            assert_eq!(config.connect.host_name_prefix, "aws-caws-");
            assert_eq!(config.connect.ide_runtime, "VSCode");
            Ok(())
        });
    }
}
