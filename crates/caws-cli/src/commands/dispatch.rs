use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => commands::login::handle(&args, ctx, flags).await,
        Commands::Logout(args) => commands::logout::handle(&args, ctx, flags).await,
        Commands::Status => commands::status::handle(ctx, flags).await,
        Commands::Open(args) => commands::open::handle(&args, ctx, flags).await,
        Commands::Create(args) => commands::create::handle(&args, ctx, flags).await,
        Commands::Env(args) => commands::env::handle(&args, ctx, flags).await,
        Commands::Repos(args) => commands::repos::handle(&args, ctx, flags).await,
        Commands::Current(args) => commands::current::handle(&args, ctx, flags).await,
        Commands::CloneUrl(args) => commands::clone_url::handle(&args, ctx, flags).await,
    }
}
