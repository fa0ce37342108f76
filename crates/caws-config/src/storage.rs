//! Local storage root for token, log, and state files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding `caws.<id>.token`, `caws.<id>.log`, and state files.
    /// Empty means `<data_dir>/caws`.
    #[serde(default)]
    pub root: String,
}

impl StorageConfig {
    /// Resolve the storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if no root is set and the platform
    /// has no data directory.
    pub fn root_dir(&self) -> Result<PathBuf, ConfigError> {
        if !self.root.is_empty() {
            return Ok(PathBuf::from(&self.root));
        }
        dirs::data_dir()
            .map(|dir| dir.join("caws"))
            .ok_or_else(|| ConfigError::NotConfigured {
                section: "storage".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_wins() {
        let config = StorageConfig {
            root: "/tmp/caws-state".into(),
        };
        assert_eq!(
            config.root_dir().expect("root"),
            PathBuf::from("/tmp/caws-state")
        );
    }

    #[test]
    fn default_root_ends_with_caws() {
        if let Ok(root) = StorageConfig::default().root_dir() {
            assert!(root.ends_with("caws"));
        }
    }
}
