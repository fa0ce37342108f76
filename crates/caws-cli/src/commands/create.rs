use anyhow::Context;
use caws_core::{CreateWorkspaceRequest, WorkspaceStatus};
use caws_session::create_development_workspace;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CreateResponse {
    workspace_id: String,
    organization: String,
    project: String,
    status: WorkspaceStatus,
}

pub async fn handle(args: &CreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_connected()?;
    let request =
        CreateWorkspaceRequest::for_project(&args.org, &args.project)?.with_alias(args.alias.clone());

    if !flags.quiet {
        eprintln!("creating workspace in {}/{}...", args.org, args.project);
    }
    let running = create_development_workspace(ctx.client.as_ref(), &request)
        .await
        .with_context(|| {
            format!("failed to create workspace in {}/{}", args.org, args.project)
        })?;

    output(
        &CreateResponse {
            workspace_id: running.id,
            organization: running.org.name,
            project: running.project.name,
            status: running.status,
        },
        flags.format,
    )
}
