use caws_auth::AuthProvider;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogoutArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
    account: Option<String>,
}

pub async fn handle(args: &LogoutArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let account = args.account.clone().or_else(|| {
        ctx.accounts
            .list_accounts()
            .into_iter()
            .next()
            .map(|account| account.id)
    });

    let cleared = match &account {
        Some(id) => ctx.accounts.logout(id)?,
        None => false,
    };
    ctx.client.clear_credentials();

    output(&LogoutResponse { cleared, account }, flags.format)
}
