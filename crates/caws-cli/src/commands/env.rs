use caws_auth::BearerTokenCache;
use caws_session::{
    Ambient, CawsEnvProvider, EnvironmentProvider, SessionEnvironment, SshAgent,
    ensure_dependencies,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EnvArgs;
use crate::commands::identity;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &EnvArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_connected()?;
    let identity = identity(&args.workspace)?;
    let dependencies = ensure_dependencies(&ctx.config.connect)?;

    let ambient = if args.all {
        Ambient::Process
    } else {
        Ambient::Fixed(SessionEnvironment::new())
    };
    let mut provider = CawsEnvProvider::new(
        ctx.client.clone(),
        BearerTokenCache::new(&ctx.storage_root),
        dependencies.ssm,
        identity,
    )
    .with_ambient(ambient);
    if ctx.config.connect.use_ssh_agent {
        provider = provider.with_ssh_agent(SshAgent::new());
    }

    let environment = provider.environment().await?;
    output(&environment, flags.format)
}
