use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use caws_auth::{BearerTokenCache, SecretStore, StoredAccountProvider};
use caws_client::{ApiSessionVerifier, CawsClient, ControlPlane};
use caws_config::CawsConfig;
use caws_session::{Connector, MementoStore};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: CawsConfig,
    pub storage_root: PathBuf,
    pub client: Arc<CawsClient>,
    pub accounts: StoredAccountProvider<ApiSessionVerifier>,
}

impl AppContext {
    /// Build the control-plane client and give it saved credentials if any.
    pub async fn init(config: CawsConfig) -> anyhow::Result<Self> {
        let storage_root = config
            .storage
            .root_dir()
            .context("failed to resolve storage root")?;

        let client = CawsClient::new(&config.endpoint).context("failed to create control-plane client")?;
        let accounts = StoredAccountProvider::new(
            &storage_root,
            SecretStore::new(&storage_root),
            client.session_verifier(),
        );

        let client = caws_session::connect_client(client, &accounts)
            .await
            .context("failed to apply saved credentials")?;
        tracing::debug!(connected = client.connected(), "control-plane client ready");

        Ok(Self {
            config,
            storage_root,
            client: Arc::new(client),
            accounts,
        })
    }

    /// Fail unless the client has verified credentials.
    pub fn require_connected(&self) -> anyhow::Result<()> {
        if !self.client.connected() {
            anyhow::bail!("not logged in: run `caws login`");
        }
        Ok(())
    }

    pub fn connector(&self) -> Connector {
        Connector {
            client: self.client.clone(),
            tokens: BearerTokenCache::new(&self.storage_root),
            mementos: MementoStore::new(&self.storage_root),
            config: self.config.connect.clone(),
        }
    }
}
