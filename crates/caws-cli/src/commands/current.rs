use std::path::Path;

use caws_client::LocalWorkspaceClient;
use caws_core::{DevelopmentWorkspace, HostContext};
use caws_session::{devfile_location, resolve_current};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CurrentArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CurrentResponse {
    inside_workspace: bool,
    workspace: Option<DevelopmentWorkspace>,
    devfile: Option<String>,
}

pub async fn handle(args: &CurrentArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let local = LocalWorkspaceClient::from_env(&ctx.config.workspace.local_api_url);
    let current = resolve_current(ctx.client.as_ref(), local, &HostContext::from_env()).await?;

    let response = match current {
        None => CurrentResponse {
            inside_workspace: false,
            workspace: None,
            devfile: None,
        },
        Some(connected) => {
            let devfile = match &args.devfile_root {
                Some(root) => Some(
                    devfile_location(&connected.workspace_client, Some(Path::new(root)))
                        .await?
                        .display()
                        .to_string(),
                ),
                None => None,
            };
            CurrentResponse {
                inside_workspace: true,
                workspace: Some(connected.summary),
                devfile,
            }
        }
    };

    output(&response, flags.format)
}
