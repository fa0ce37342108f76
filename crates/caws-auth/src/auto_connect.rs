use crate::account::Session;
use crate::provider::AuthProvider;

/// Try every auto-connect-capable account in listed order, stopping at the
/// first that yields a session.
///
/// Failures are logged and skipped. `None` means no ambient credentials are
/// available, whether there was nothing to try or everything failed; callers
/// fall back to interactive login. Attempts never overlap.
pub async fn auto_connect<P>(provider: &P) -> Option<Session>
where
    P: AuthProvider + ?Sized,
{
    let candidates = provider
        .list_accounts()
        .into_iter()
        .filter(|account| account.metadata.can_auto_connect);

    for account in candidates {
        tracing::info!(account = %account.label, "trying to auto-connect");

        match provider.create_session(&account).await {
            Ok(session) => {
                tracing::info!(account = %account.label, "auto-connected");
                return Some(session);
            }
            Err(error) => {
                tracing::debug!(account = %account.label, %error, "unable to auto-connect");
            }
        }
    }

    None
}
