use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::repository::{OrganizationRef, ProjectRef, association_key};

/// Uniquely addresses a cloud development workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceIdentity {
    pub id: String,
    pub organization_name: String,
    pub project_name: String,
}

impl WorkspaceIdentity {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if any component is empty.
    pub fn new(
        id: impl Into<String>,
        organization_name: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let identity = Self {
            id: id.into(),
            organization_name: organization_name.into(),
            project_name: project_name.into(),
        };
        for (field, value) in [
            ("id", &identity.id),
            ("organization name", &identity.organization_name),
            ("project name", &identity.project_name),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "workspace {field} must not be empty"
                )));
            }
        }
        Ok(identity)
    }
}

impl fmt::Display for WorkspaceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.organization_name, self.project_name, self.id
        )
    }
}

/// Lifecycle state reported by the control plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkspaceStatus {
    Pending,
    Starting,
    Running,
    Stopping,
    Stopped,
    Failed,
    Deleting,
    Deleted,
    #[default]
    #[serde(other)]
    Unknown,
}

impl WorkspaceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Starting => "STARTING",
            Self::Running => "RUNNING",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::Failed => "FAILED",
            Self::Deleting => "DELETING",
            Self::Deleted => "DELETED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// States a workspace cannot leave on its own.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Deleting | Self::Deleted)
    }
}

impl fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository cloned into a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRepository {
    pub repository_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

/// An IDE runtime a workspace was provisioned for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ide {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

/// Full workspace descriptor as returned by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentWorkspace {
    pub id: String,
    pub org: OrganizationRef,
    pub project: ProjectRef,
    #[serde(default)]
    pub status: WorkspaceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub repositories: Vec<WorkspaceRepository>,
    #[serde(default)]
    pub ides: Vec<Ide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<DateTime<Utc>>,
}

impl DevelopmentWorkspace {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the descriptor has blank names.
    pub fn identity(&self) -> Result<WorkspaceIdentity, CoreError> {
        WorkspaceIdentity::new(&self.id, &self.org.name, &self.project.name)
    }

    #[must_use]
    pub fn supports_ide(&self, ide: &str) -> bool {
        self.ides.iter().any(|candidate| candidate.name == ide)
    }

    /// `org.project.repository` for the first attached repository, if any.
    #[must_use]
    pub fn association_key(&self) -> Option<String> {
        self.repositories.first().map(|repo| {
            association_key(&self.org.name, &self.project.name, &repo.repository_name)
        })
    }
}

/// IDE runtime requested for newly created workspaces.
pub const DEFAULT_IDE_RUNTIME: &str = "VSCode";

/// Parameters for provisioning a new workspace in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    pub organization_name: String,
    pub project_name: String,
    pub ide_runtimes: Vec<String>,
    #[serde(default)]
    pub repositories: Vec<WorkspaceRepository>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl CreateWorkspaceRequest {
    /// An empty workspace for the default IDE runtime.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if either name is blank.
    pub fn for_project(
        organization_name: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let request = Self {
            organization_name: organization_name.into(),
            project_name: project_name.into(),
            ide_runtimes: vec![DEFAULT_IDE_RUNTIME.to_string()],
            repositories: Vec::new(),
            alias: None,
        };
        if request.organization_name.trim().is_empty() || request.project_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "organization and project names must not be empty".into(),
            ));
        }
        Ok(request)
    }

    #[must_use]
    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }
}

/// Connection state persisted per workspace between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentWorkspaceMemento {
    /// Set while something is watching the workspace status to reconnect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempting_reconnect: Option<bool>,
    /// Unix time (milliseconds) of the most recent connection.
    pub previous_connection_timestamp: i64,
    pub previous_open_workspace: String,
    pub organization_name: String,
    pub project_name: String,
    #[serde(default)]
    pub alias: Option<String>,
}
