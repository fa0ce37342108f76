use caws_client::ControlPlane;
use caws_session::{AssociatedRepository, associate};
use futures::TryStreamExt;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReposArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &ReposArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_connected()?;
    let ide = args
        .ide
        .clone()
        .unwrap_or_else(|| ctx.config.connect.ide_runtime.clone());

    let client = ctx.client.as_ref();
    let associated: Vec<AssociatedRepository> = associate(client, client.list_repositories(), &ide)
        .await?
        .try_filter(|repo| {
            futures::future::ready(!args.with_workspace || repo.development_workspace.is_some())
        })
        .try_collect()
        .await?;

    output(&associated, flags.format)
}
