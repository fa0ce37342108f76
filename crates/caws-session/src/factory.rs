use caws_auth::{AuthProvider, auto_connect};
use caws_client::ControlPlane;

use crate::error::SessionError;

/// Give `client` credentials if any are available without user interaction.
///
/// Uses the provider's active session, otherwise tries auto-connect. A client
/// with no credentials is still returned; callers check
/// [`ControlPlane::connected`] and prompt for login.
///
/// # Errors
///
/// Only if applying a found session fails.
pub async fn connect_client<C, P>(client: C, provider: &P) -> Result<C, SessionError>
where
    C: ControlPlane,
    P: AuthProvider + ?Sized,
{
    let session = match provider.active_session() {
        Some(session) => Some(session),
        None => auto_connect(provider).await,
    };

    match session {
        Some(session) => {
            let verified = client.set_credentials(&session).await?;
            tracing::debug!(user = %verified.user, "client connected");
        }
        None => tracing::debug!("no credentials available; client left disconnected"),
    }
    Ok(client)
}
