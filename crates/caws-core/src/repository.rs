use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef {
    pub name: String,
}

/// A source repository hosted in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub org: OrganizationRef,
    pub project: ProjectRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Repository {
    #[must_use]
    pub fn association_key(&self) -> String {
        association_key(&self.org.name, &self.project.name, &self.name)
    }

    /// HTTPS clone URL with inline credentials.
    #[must_use]
    pub fn clone_url(&self, git_hostname: &str, username: &str, token: &str) -> String {
        format!(
            "https://{}:{}@{git_hostname}/v1/{}/{}/{}",
            urlencoding::encode(username),
            urlencoding::encode(token),
            self.org.name,
            self.project.name,
            self.name
        )
    }
}

/// Composite key joining repositories and workspaces.
#[must_use]
pub fn association_key(organization: &str, project: &str, repository: &str) -> String {
    format!("{organization}.{project}.{repository}")
}
