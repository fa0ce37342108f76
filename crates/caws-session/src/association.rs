//! Pair repositories with the workspace they are checked out in.

use std::collections::HashMap;

use caws_client::{ClientError, ControlPlane};
use caws_core::{DevelopmentWorkspace, Repository};
use futures::{Stream, StreamExt, TryStreamExt};
use serde::Serialize;

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedRepository {
    #[serde(flatten)]
    pub repository: Repository,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_workspace: Option<DevelopmentWorkspace>,
}

/// Attach a matching workspace to each repository.
///
/// The workspace listing is drained up front into a map keyed by
/// `org.project.<first repository>`; workspaces without repositories or
/// without the `ide` tag are skipped. Repositories are then mapped one at a
/// time as the caller polls, so a large repository listing is never held in
/// memory.
///
/// # Errors
///
/// Fails if the workspace listing fails. Errors from `repositories` are
/// yielded from the returned stream.
pub async fn associate<'a, C, S>(
    client: &C,
    repositories: S,
    ide: &str,
) -> Result<impl Stream<Item = Result<AssociatedRepository, SessionError>> + 'a, SessionError>
where
    C: ControlPlane + ?Sized,
    S: Stream<Item = Result<Repository, ClientError>> + 'a,
{
    let workspaces: HashMap<String, DevelopmentWorkspace> = client
        .list_development_workspaces()
        .try_filter_map(|workspace| {
            let key = workspace
                .association_key()
                .filter(|_| workspace.supports_ide(ide));
            futures::future::ready(Ok(key.map(|key| (key, workspace))))
        })
        .try_collect()
        .await?;
    tracing::debug!(count = workspaces.len(), "indexed workspaces for association");

    Ok(repositories.map(move |repository| {
        let repository = repository?;
        let development_workspace = workspaces.get(&repository.association_key()).cloned();
        Ok(AssociatedRepository {
            repository,
            development_workspace,
        })
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use futures::stream;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{FakeControlPlane, repository, workspace};

    async fn run(
        client: &FakeControlPlane,
        repos: Vec<Repository>,
    ) -> Vec<AssociatedRepository> {
        associate(client, stream::iter(repos.into_iter().map(Ok)), "VSCode")
            .await
            .expect("associate")
            .try_collect()
            .await
            .expect("collect")
    }

    #[tokio::test]
    async fn enriches_only_matching_repositories() {
        let client = FakeControlPlane::connected("t")
            .with_workspaces(vec![workspace("w1", Some("r1"), "VSCode")]);

        let associated = run(&client, vec![repository("r1"), repository("r2")]).await;

        assert_eq!(associated.len(), 2);
        assert_eq!(associated[0].repository.name, "r1");
        assert_eq!(
            associated[0]
                .development_workspace
                .as_ref()
                .map(|w| w.id.as_str()),
            Some("w1")
        );
        assert_eq!(associated[1].repository.name, "r2");
        assert!(associated[1].development_workspace.is_none());
    }

    #[tokio::test]
    async fn skips_workspaces_without_repositories_or_ide() {
        let client = FakeControlPlane::connected("t").with_workspaces(vec![
            workspace("bare", None, "VSCode"),
            workspace("other-ide", Some("r1"), "Cloud9"),
        ]);

        let associated = run(&client, vec![repository("r1")]).await;
        assert!(associated[0].development_workspace.is_none());
    }

    #[tokio::test]
    async fn workspaces_are_listed_once_before_any_repository() {
        let client = FakeControlPlane::connected("t")
            .with_workspaces(vec![workspace("w1", Some("r1"), "VSCode")]);

        let repos = stream::iter(vec![Ok(repository("r1"))]);
        let associated = associate(&client, repos, "VSCode").await.expect("associate");
        assert_eq!(client.listings.load(Ordering::SeqCst), 1);

        let collected: Vec<_> = associated.try_collect().await.expect("collect");
        assert_eq!(collected.len(), 1);
        assert_eq!(client.listings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repository_errors_flow_through_the_stream() {
        let client = FakeControlPlane::connected("t");
        let repos = stream::iter(vec![Ok(repository("r1")), Err(ClientError::NotConnected)]);

        let results: Vec<_> = associate(&client, repos, "VSCode")
            .await
            .expect("associate")
            .collect()
            .await;
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(SessionError::Client(ClientError::NotConnected))
        ));
    }
}
