//! Client for the agent API that runs inside a development workspace.
//!
//! A workspace host exports its ARN and an agent token; a plain local machine
//! exports neither.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::http::check_response;

pub const ARN_VAR: &str = "__DEV_ENVIRONMENT_ARN";
pub const AGENT_TOKEN_VAR: &str = "__DEV_ENVIRONMENT_AGENT_TOKEN";

/// Status reported by the in-workspace agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalStatus {
    #[serde(default)]
    pub status: Option<String>,
    /// Devfile path relative to the workspace root.
    #[serde(default)]
    pub location: Option<String>,
}

/// The local host as seen from inside (or outside) a workspace.
#[async_trait]
pub trait LocalWorkspace: Send + Sync {
    /// ARN exported by the host, if any.
    fn arn(&self) -> Option<&str>;

    /// Whether this process runs inside a managed development workspace.
    fn is_workspace(&self) -> bool;

    async fn status(&self) -> Result<LocalStatus, ClientError>;
}

#[derive(Debug, Clone)]
pub struct LocalWorkspaceClient {
    http: reqwest::Client,
    base_url: String,
    arn: Option<String>,
    token: Option<String>,
}

impl LocalWorkspaceClient {
    /// Read the ARN and agent token from the process environment.
    #[must_use]
    pub fn from_env(base_url: &str) -> Self {
        Self::from_lookup(base_url, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(base_url: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            arn: read(ARN_VAR),
            token: read(AGENT_TOKEN_VAR),
        }
    }
}

#[async_trait]
impl LocalWorkspace for LocalWorkspaceClient {
    fn arn(&self) -> Option<&str> {
        self.arn.as_deref()
    }

    fn is_workspace(&self) -> bool {
        self.arn.is_some() && self.token.is_some()
    }

    async fn status(&self) -> Result<LocalStatus, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotConnected)?;
        let resp = self
            .http
            .get(format!("{}/status", self.base_url))
            .header(reqwest::header::AUTHORIZATION, token)
            .send()
            .await?;
        let body = check_response(resp).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn client(vars: &[(&str, &str)]) -> LocalWorkspaceClient {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        LocalWorkspaceClient::from_lookup("http://127.0.0.1:1339/", |name| vars.get(name).cloned())
    }

    #[test]
    fn plain_host_is_not_a_workspace() {
        let local = client(&[]);
        assert!(!local.is_workspace());
        assert!(local.arn().is_none());
    }

    #[test]
    fn arn_without_agent_token_is_not_a_workspace() {
        let local = client(&[(ARN_VAR, "arn:aws:caws:us-east-1:1:development-workspace/ws1")]);
        assert!(!local.is_workspace());
        assert!(local.arn().is_some());
    }

    #[test]
    fn workspace_host_exports_both() {
        let local = client(&[(ARN_VAR, "arn:x:development-workspace/ws1"), (AGENT_TOKEN_VAR, "t")]);
        assert!(local.is_workspace());
        assert_eq!(local.base_url, "http://127.0.0.1:1339");
    }

    #[test]
    fn status_tolerates_missing_fields() {
        let status: LocalStatus = serde_json::from_str(r#"{"status":"READY"}"#).expect("parse");
        assert_eq!(status.status.as_deref(), Some("READY"));
        assert!(status.location.is_none());
    }

    #[tokio::test]
    async fn status_requires_agent_token() {
        let local = client(&[]);
        assert!(matches!(local.status().await, Err(ClientError::NotConnected)));
    }
}
