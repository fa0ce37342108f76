use anyhow::Context;
use caws_client::ControlPlane;
use caws_core::WorkspaceStatus;
use caws_session::{EditorRemoteLauncher, host_name};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OpenArgs;
use crate::commands::identity;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct OpenResponse {
    workspace_id: String,
    status: WorkspaceStatus,
    host_name: String,
    target_path: String,
    log_file: String,
}

pub async fn handle(args: &OpenArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_connected()?;
    let identity = identity(&args.workspace)?;

    let workspace = ctx
        .client
        .get_development_workspace(&identity)
        .await
        .with_context(|| format!("failed to look up workspace {identity}"))?;

    let connector = ctx.connector();
    if !flags.quiet {
        eprintln!("starting workspace {identity}...");
    }
    let running = connector
        .open_development_workspace(&workspace, args.target_path.as_deref(), &EditorRemoteLauncher)
        .await
        .with_context(|| format!("failed to open workspace {identity}"))?;

    output(
        &OpenResponse {
            workspace_id: running.id,
            status: running.status,
            host_name: host_name(&identity, &ctx.config.connect.host_name_prefix),
            target_path: args
                .target_path
                .clone()
                .unwrap_or_else(|| ctx.config.connect.target_path.clone()),
            log_file: connector.tokens.log_path(&identity.id).display().to_string(),
        },
        flags.format,
    )
}
