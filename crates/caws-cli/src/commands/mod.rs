pub mod clone_url;
pub mod create;
pub mod current;
pub mod dispatch;
pub mod env;
pub mod login;
pub mod logout;
pub mod open;
pub mod repos;
pub mod status;

use caws_core::WorkspaceIdentity;

use crate::cli::root_commands::WorkspaceArgs;

pub(crate) fn identity(args: &WorkspaceArgs) -> anyhow::Result<WorkspaceIdentity> {
    WorkspaceIdentity::new(&args.id, &args.org, &args.project).map_err(anyhow::Error::from)
}
