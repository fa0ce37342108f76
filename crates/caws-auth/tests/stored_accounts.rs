//! Login, auto-connect, and logout against the on-disk account index.

use async_trait::async_trait;
use caws_auth::{
    AuthError, AuthProvider, SecretStore, SessionVerifier, StoredAccountProvider, VerifiedSession,
    auto_connect,
};
use pretty_assertions::assert_eq;

/// Accepts secrets of the form `cookie-<user>`.
struct CookieVerifier;

#[async_trait]
impl SessionVerifier for CookieVerifier {
    async fn verify(&self, secret: &str) -> Result<VerifiedSession, AuthError> {
        secret
            .strip_prefix("cookie-")
            .map(|user| VerifiedSession {
                session_id: format!("sess-{user}"),
                user: user.to_string(),
            })
            .ok_or_else(|| AuthError::SessionRejected("unknown cookie".into()))
    }
}

fn provider(root: &std::path::Path) -> StoredAccountProvider<CookieVerifier> {
    StoredAccountProvider::new(root, SecretStore::file_only(root), CookieVerifier)
}

#[tokio::test]
async fn login_persists_account_for_later_auto_connect() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");

    let session = provider(tmp.path())
        .login("cookie-jane")
        .await
        .expect("login");
    assert_eq!(session.account.id, "jane");

    // A fresh provider (new process) only has what was persisted.
    let fresh = provider(tmp.path());
    assert!(fresh.active_session().is_none());

    let session = auto_connect(&fresh).await.expect("auto-connect");
    assert_eq!(session.id, "sess-jane");
    assert_eq!(session.access_token, "cookie-jane");
    assert_eq!(fresh.active_session(), Some(session));
}

#[tokio::test]
async fn most_recent_login_is_tried_first() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let provider = provider(tmp.path());

    provider.login("cookie-jane").await.expect("login jane");
    provider.login("cookie-omar").await.expect("login omar");
    provider.login("cookie-jane").await.expect("login jane again");

    let ids: Vec<_> = provider
        .list_accounts()
        .into_iter()
        .map(|account| account.id)
        .collect();
    assert_eq!(ids, vec!["jane", "omar"]);
}

#[tokio::test]
async fn rejected_login_stores_nothing() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let provider = provider(tmp.path());

    let err = provider.login("garbage").await.unwrap_err();
    assert!(matches!(err, AuthError::SessionRejected(_)));
    assert!(provider.list_accounts().is_empty());
}

#[tokio::test]
async fn logout_forgets_account_and_secret() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let provider = provider(tmp.path());
    provider.login("cookie-jane").await.expect("login");

    assert!(provider.logout("jane").expect("logout"));
    assert!(provider.active_session().is_none());
    assert!(provider.list_accounts().is_empty());
    assert!(!provider.logout("jane").expect("second logout"));
    assert!(auto_connect(&provider).await.is_none());
}

#[tokio::test]
async fn missing_secret_is_not_authenticated() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let provider = provider(tmp.path());
    let account = caws_auth::Account::new("ghost", "Ghost", true);

    let err = provider.create_session(&account).await.unwrap_err();
    assert!(matches!(err, AuthError::NotAuthenticated));
}

#[test]
fn corrupt_index_is_reported_but_listing_stays_empty() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    std::fs::write(tmp.path().join("accounts.json"), "{not json").expect("write");
    let provider = provider(tmp.path());

    assert!(matches!(
        provider.load_accounts(),
        Err(AuthError::AccountIndexError(_))
    ));
    assert!(provider.list_accounts().is_empty());
}
