//! Connection state remembered between runs, keyed by workspace id.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use caws_core::{DevelopmentWorkspace, DevelopmentWorkspaceMemento};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

const STATE_FILE_NAME: &str = "state.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(rename = "CAWS_RECONNECT", default)]
    reconnect: BTreeMap<String, DevelopmentWorkspaceMemento>,
}

#[derive(Debug, Clone)]
pub struct MementoStore {
    path: PathBuf,
}

impl MementoStore {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(STATE_FILE_NAME),
        }
    }

    /// Remember that `workspace` was just opened at `target_path`.
    ///
    /// # Errors
    ///
    /// [`SessionError::Memento`] if the state file cannot be read or written.
    pub fn record(
        &self,
        workspace: &DevelopmentWorkspace,
        target_path: &str,
    ) -> Result<DevelopmentWorkspaceMemento, SessionError> {
        let mut state = self.read()?;
        let attempting_reconnect = state
            .reconnect
            .get(&workspace.id)
            .and_then(|previous| previous.attempting_reconnect);
        let memento = DevelopmentWorkspaceMemento {
            attempting_reconnect,
            previous_connection_timestamp: Utc::now().timestamp_millis(),
            previous_open_workspace: target_path.to_string(),
            organization_name: workspace.org.name.clone(),
            project_name: workspace.project.name.clone(),
            alias: workspace.alias.clone(),
        };
        state.reconnect.insert(workspace.id.clone(), memento.clone());
        self.write(&state)?;
        Ok(memento)
    }

    /// Flag whether something is watching `workspace_id` to reconnect.
    /// Returns `false` if nothing was recorded for it.
    ///
    /// # Errors
    ///
    /// [`SessionError::Memento`] on I/O or parse failures.
    pub fn mark_reconnect(&self, workspace_id: &str, attempting: bool) -> Result<bool, SessionError> {
        let mut state = self.read()?;
        let Some(memento) = state.reconnect.get_mut(workspace_id) else {
            return Ok(false);
        };
        memento.attempting_reconnect = Some(attempting);
        self.write(&state)?;
        Ok(true)
    }

    /// # Errors
    ///
    /// [`SessionError::Memento`] on I/O or parse failures.
    pub fn get(&self, workspace_id: &str) -> Result<Option<DevelopmentWorkspaceMemento>, SessionError> {
        Ok(self.read()?.reconnect.remove(workspace_id))
    }

    /// # Errors
    ///
    /// [`SessionError::Memento`] on I/O or parse failures.
    pub fn list(&self) -> Result<BTreeMap<String, DevelopmentWorkspaceMemento>, SessionError> {
        Ok(self.read()?.reconnect)
    }

    fn read(&self) -> Result<StateFile, SessionError> {
        if !self.path.exists() {
            return Ok(StateFile::default());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| SessionError::Memento(format!("read {}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| SessionError::Memento(format!("parse {}: {e}", self.path.display())))
    }

    fn write(&self, state: &StateFile) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::Memento(format!("mkdir {}: {e}", parent.display())))?;
        }
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| SessionError::Memento(format!("serialize state: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| SessionError::Memento(format!("write {}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::workspace;

    #[test]
    fn empty_store_lists_nothing() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let store = MementoStore::new(tmp.path());
        assert!(store.list().expect("list").is_empty());
        assert!(store.get("w1").expect("get").is_none());
    }

    #[test]
    fn record_then_mark_reconnect() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let store = MementoStore::new(tmp.path());
        let before = Utc::now().timestamp_millis();

        let memento = store
            .record(&workspace("w1", Some("r1"), "VSCode"), "/projects")
            .expect("record");
        assert_eq!(memento.organization_name, "o");
        assert_eq!(memento.previous_open_workspace, "/projects");
        assert!(memento.previous_connection_timestamp >= before);
        assert!(memento.attempting_reconnect.is_none());

        assert!(store.mark_reconnect("w1", true).expect("mark"));
        assert!(!store.mark_reconnect("unknown", true).expect("mark"));

        let stored = store.get("w1").expect("get").expect("present");
        assert_eq!(stored.attempting_reconnect, Some(true));
    }

    #[test]
    fn re_recording_keeps_reconnect_flag() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let store = MementoStore::new(tmp.path());
        let ws = workspace("w1", Some("r1"), "VSCode");

        store.record(&ws, "/projects").expect("record");
        store.mark_reconnect("w1", true).expect("mark");
        let again = store.record(&ws, "/projects/r1").expect("record");

        assert_eq!(again.attempting_reconnect, Some(true));
        assert_eq!(again.previous_open_workspace, "/projects/r1");
    }

    #[test]
    fn state_file_uses_reconnect_section() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let store = MementoStore::new(tmp.path());
        store
            .record(&workspace("w1", None, "VSCode"), "/projects")
            .expect("record");

        let raw = std::fs::read_to_string(tmp.path().join(STATE_FILE_NAME)).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["CAWS_RECONNECT"]["w1"]["projectName"], "p");
    }
}
