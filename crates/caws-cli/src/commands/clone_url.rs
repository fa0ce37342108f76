use caws_client::ControlPlane;
use caws_core::{OrganizationRef, ProjectRef, Repository};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CloneUrlArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CloneUrlResponse {
    url: String,
}

pub async fn handle(args: &CloneUrlArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_connected()?;
    let git_hostname = &ctx.config.endpoint.git_hostname;
    if git_hostname.is_empty() {
        anyhow::bail!("clone-url: CAWS_ENDPOINT__GIT_HOSTNAME is not configured");
    }
    let (Some(user), Some(token)) = (ctx.client.user(), ctx.client.token()) else {
        anyhow::bail!("not logged in: run `caws login`");
    };

    let repository = Repository {
        name: args.repository.clone(),
        org: OrganizationRef {
            name: args.org.clone(),
        },
        project: ProjectRef {
            name: args.project.clone(),
        },
        description: None,
    };

    output(
        &CloneUrlResponse {
            url: repository.clone_url(git_hostname, &user, &token),
        },
        flags.format,
    )
}
