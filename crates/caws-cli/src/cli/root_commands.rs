use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Verify a session secret and remember it.
    Login(LoginArgs),
    /// Forget a saved account.
    Logout(LogoutArgs),
    /// Show endpoint, connection, and saved accounts.
    Status,
    /// Start a workspace and open it in the editor over SSH.
    Open(OpenArgs),
    /// Create a workspace in a project and start it.
    Create(CreateArgs),
    /// Print the environment a session process would get.
    Env(EnvArgs),
    /// List repositories with the workspace each is checked out in.
    Repos(ReposArgs),
    /// Show the workspace hosting this process, if any.
    Current(CurrentArgs),
    /// Print an authenticated git clone URL.
    CloneUrl(CloneUrlArgs),
}

/// Addresses one workspace.
#[derive(Clone, Debug, Args)]
pub struct WorkspaceArgs {
    /// Workspace id.
    pub id: String,
    /// Organization name.
    #[arg(long)]
    pub org: String,
    /// Project name.
    #[arg(long)]
    pub project: String,
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    /// Session secret. Read from stdin when omitted.
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct LogoutArgs {
    /// Account to forget (defaults to the most recent).
    #[arg(long)]
    pub account: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct OpenArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,
    /// Folder to open inside the workspace.
    #[arg(long)]
    pub target_path: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    /// Organization name.
    #[arg(long)]
    pub org: String,
    /// Project name.
    #[arg(long)]
    pub project: String,
    /// Display name for the new workspace.
    #[arg(long)]
    pub alias: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EnvArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,
    /// Include the ambient process environment.
    #[arg(long)]
    pub all: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ReposArgs {
    /// IDE tag a workspace must carry (defaults to config).
    #[arg(long)]
    pub ide: Option<String>,
    /// Only repositories that have a workspace.
    #[arg(long)]
    pub with_workspace: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CurrentArgs {
    /// Also resolve the devfile under this root directory.
    #[arg(long)]
    pub devfile_root: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct CloneUrlArgs {
    /// Organization name.
    pub org: String,
    /// Project name.
    pub project: String,
    /// Repository name.
    pub repository: String,
}
