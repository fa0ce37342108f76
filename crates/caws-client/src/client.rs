//! reqwest-backed [`ControlPlane`].
//!
//! REST layout (JSON, bearer auth):
//! - `GET  /v1/session`
//! - `GET  /v1/organizations`
//! - `GET  /v1/organizations/{org}/projects`
//! - `GET  /v1/organizations/{org}/projects/{project}/developmentWorkspaces[/{id}]`
//! - `POST /v1/organizations/{org}/projects/{project}/developmentWorkspaces`
//! - `POST /v1/organizations/{org}/projects/{project}/developmentWorkspaces/{id}/start`
//! - `GET  /v1/organizations/{org}/projects/{project}/repositories`
//!
//! List endpoints return `{"items": [...], "nextToken": "..."}`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use caws_auth::{AuthError, Session, SessionVerifier, VerifiedSession};
use caws_config::EndpointConfig;
use caws_core::{
    CreateWorkspaceRequest, DevelopmentWorkspace, OrganizationRef, ProjectRef, Repository,
    WorkspaceIdentity,
};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::control_plane::ControlPlane;
use crate::error::ClientError;
use crate::http::check_response;

const USER_AGENT: &str = concat!("caws/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: DeserializeOwned"))]
struct Page<T> {
    #[serde(default)]
    items: Vec<T>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    session_id: String,
    user_name: String,
}

#[derive(Debug, Default)]
struct Credentials {
    token: Option<String>,
    user: Option<String>,
}

/// HTTP client for the control-plane API.
pub struct CawsClient {
    http: reqwest::Client,
    api_url: String,
    region: String,
    credentials: RwLock<Credentials>,
}

impl CawsClient {
    /// # Errors
    ///
    /// [`ClientError::NotConfigured`] without an API URL, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &EndpointConfig) -> Result<Self, ClientError> {
        if !config.is_configured() {
            return Err(ClientError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            region: config.region.clone(),
            credentials: RwLock::new(Credentials::default()),
        })
    }

    /// A verifier for stored secrets that shares this client's connection pool.
    #[must_use]
    pub fn session_verifier(&self) -> ApiSessionVerifier {
        ApiSessionVerifier {
            http: self.http.clone(),
            api_url: self.api_url.clone(),
        }
    }

    /// Forget credentials.
    pub fn clear_credentials(&self) {
        *self.credentials.write() = Credentials::default();
    }

    /// Name of the verified user, if connected.
    #[must_use]
    pub fn user(&self) -> Option<String> {
        self.credentials.read().user.clone()
    }

    fn bearer(&self) -> Result<String, ClientError> {
        self.credentials
            .read()
            .token
            .clone()
            .ok_or(ClientError::NotConnected)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        next_token: Option<&str>,
    ) -> Result<T, ClientError> {
        let mut url = format!("{}{path}", self.api_url);
        if let Some(token) = next_token {
            url.push_str("?nextToken=");
            url.push_str(&urlencoding::encode(token));
        }
        let resp = self
            .http
            .get(url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        parse_json(check_response(resp).await?).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .post(format!("{}{path}", self.api_url))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;
        parse_json(check_response(resp).await?).await
    }

    /// Lazily walk every page of a list endpoint.
    fn paginate<'a, T>(&'a self, path: String) -> BoxStream<'a, Result<T, ClientError>>
    where
        T: DeserializeOwned + Send + 'a,
    {
        paginate_pages(move |next_token| {
            let path = path.clone();
            async move { self.get_json::<Page<T>>(&path, next_token.as_deref()).await }
        })
    }

    fn list_projects(&self) -> BoxStream<'_, Result<(OrganizationRef, ProjectRef), ClientError>> {
        self.paginate::<OrganizationRef>("/v1/organizations".to_string())
            .map_ok(move |org| {
                let path = format!("/v1/organizations/{}/projects", urlencoding::encode(&org.name));
                self.paginate::<ProjectRef>(path)
                    .map_ok(move |project| (org.clone(), project))
            })
            .try_flatten()
            .boxed()
    }
}

/// Flatten `{items, nextToken}` pages fetched on demand into one stream.
///
/// A missing or empty `nextToken` ends the listing.
fn paginate_pages<'a, T, F, Fut>(fetch: F) -> BoxStream<'a, Result<T, ClientError>>
where
    T: Send + 'a,
    F: Fn(Option<String>) -> Fut + Send + 'a,
    Fut: Future<Output = Result<Page<T>, ClientError>> + Send + 'a,
{
    enum Cursor {
        Start,
        Next(String),
        Done,
    }

    stream::try_unfold(Cursor::Start, move |cursor| {
        let next_token = match cursor {
            Cursor::Done => None,
            Cursor::Start => Some(None),
            Cursor::Next(token) => Some(Some(token)),
        };
        let page = next_token.map(&fetch);
        async move {
            let Some(page) = page else {
                return Ok(None);
            };
            let page = page.await?;
            let cursor = page
                .next_token
                .filter(|token| !token.is_empty())
                .map_or(Cursor::Done, Cursor::Next);
            Ok::<_, ClientError>(Some((stream::iter(page.items.into_iter().map(Ok)), cursor)))
        }
    })
    .try_flatten()
    .boxed()
}

fn project_path(organization: &str, project: &str) -> String {
    format!(
        "/v1/organizations/{}/projects/{}",
        urlencoding::encode(organization),
        urlencoding::encode(project)
    )
}

fn workspace_path(identity: &WorkspaceIdentity) -> String {
    format!(
        "{}/developmentWorkspaces/{}",
        project_path(&identity.organization_name, &identity.project_name),
        urlencoding::encode(&identity.id)
    )
}

async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
}

async fn fetch_session(
    http: &reqwest::Client,
    api_url: &str,
    token: &str,
) -> Result<VerifiedSession, ClientError> {
    let resp = http
        .get(format!("{api_url}/v1/session"))
        .bearer_auth(token)
        .send()
        .await?;
    let session: SessionResponse = parse_json(check_response(resp).await?).await?;
    Ok(VerifiedSession {
        session_id: session.session_id,
        user: session.user_name,
    })
}

#[async_trait]
impl ControlPlane for CawsClient {
    fn connected(&self) -> bool {
        let credentials = self.credentials.read();
        credentials.token.is_some() && credentials.user.is_some()
    }

    fn token(&self) -> Option<String> {
        self.credentials.read().token.clone()
    }

    fn region_code(&self) -> String {
        self.region.clone()
    }

    fn endpoint(&self) -> String {
        self.api_url.clone()
    }

    async fn set_credentials(&self, session: &Session) -> Result<VerifiedSession, ClientError> {
        let verified = fetch_session(&self.http, &self.api_url, &session.access_token).await?;
        *self.credentials.write() = Credentials {
            token: Some(session.access_token.clone()),
            user: Some(verified.user.clone()),
        };
        tracing::debug!(user = %verified.user, "control-plane credentials set");
        Ok(verified)
    }

    async fn verify_session(&self) -> Result<VerifiedSession, ClientError> {
        fetch_session(&self.http, &self.api_url, &self.bearer()?).await
    }

    async fn get_development_workspace(
        &self,
        identity: &WorkspaceIdentity,
    ) -> Result<DevelopmentWorkspace, ClientError> {
        self.get_json(&workspace_path(identity), None).await
    }

    fn list_development_workspaces(&self) -> BoxStream<'_, Result<DevelopmentWorkspace, ClientError>> {
        self.list_projects()
            .map_ok(move |(org, project)| {
                let path = format!(
                    "{}/developmentWorkspaces",
                    project_path(&org.name, &project.name)
                );
                self.paginate::<DevelopmentWorkspace>(path)
            })
            .try_flatten()
            .boxed()
    }

    fn list_repositories(&self) -> BoxStream<'_, Result<Repository, ClientError>> {
        self.list_projects()
            .map_ok(move |(org, project)| {
                let path = format!("{}/repositories", project_path(&org.name, &project.name));
                self.paginate::<Repository>(path)
            })
            .try_flatten()
            .boxed()
    }

    async fn start_workspace(
        &self,
        identity: &WorkspaceIdentity,
    ) -> Result<DevelopmentWorkspace, ClientError> {
        tracing::info!(workspace_id = %identity.id, "starting workspace");
        self.post_json(&format!("{}/start", workspace_path(identity)), &serde_json::json!({}))
            .await
    }

    async fn create_development_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<DevelopmentWorkspace, ClientError> {
        tracing::info!(
            organization = %request.organization_name,
            project = %request.project_name,
            "creating workspace"
        );
        let path = format!(
            "{}/developmentWorkspaces",
            project_path(&request.organization_name, &request.project_name)
        );
        self.post_json(&path, request).await
    }
}

/// [`SessionVerifier`] that checks secrets against `GET /v1/session`.
#[derive(Debug, Clone)]
pub struct ApiSessionVerifier {
    http: reqwest::Client,
    api_url: String,
}

#[async_trait]
impl SessionVerifier for ApiSessionVerifier {
    async fn verify(&self, secret: &str) -> Result<VerifiedSession, AuthError> {
        fetch_session(&self.http, &self.api_url, secret)
            .await
            .map_err(|e| match e {
                ClientError::Unauthorized(body) => AuthError::SessionRejected(body),
                other => AuthError::Other(other.to_string()),
            })
    }
}
