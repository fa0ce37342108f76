use caws_auth::AuthProvider;
use caws_client::ControlPlane;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatusResponse {
    endpoint: String,
    region: String,
    storage_root: String,
    connected: bool,
    user: Option<String>,
    accounts: Vec<AccountEntry>,
}

#[derive(Serialize)]
struct AccountEntry {
    id: String,
    label: String,
    can_auto_connect: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let accounts = ctx
        .accounts
        .list_accounts()
        .into_iter()
        .map(|account| AccountEntry {
            id: account.id,
            label: account.label,
            can_auto_connect: account.metadata.can_auto_connect,
        })
        .collect();

    output(
        &StatusResponse {
            endpoint: ctx.client.endpoint(),
            region: ctx.client.region_code(),
            storage_root: ctx.storage_root.display().to_string(),
            connected: ctx.client.connected(),
            user: ctx.client.user(),
            accounts,
        },
        flags.format,
    )
}
