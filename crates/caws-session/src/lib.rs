//! # caws-session
//!
//! Turns an authenticated client and a workspace descriptor into a live
//! remote session:
//!
//! - [`environment`]: the per-spawn session environment and its provider,
//!   which re-caches the bearer token on every build
//! - [`launcher`]: processes bound to a provider, resolving the environment
//!   per call, with optional output taps and exit-code rejection
//! - [`association`]: repositories paired with their workspace
//! - [`current`]: the workspace hosting this process, if any
//! - [`open`]: start, bind, and hand off to the remote launcher
//! - [`create`]: provision a workspace and wait for it to run
//! - [`factory`]: give a client ambient credentials
//! - [`memento`], [`ssh`], [`tools`]: supporting state and local tooling

pub mod association;
pub mod create;
pub mod current;
pub mod environment;
pub mod error;
pub mod factory;
pub mod launcher;
pub mod memento;
pub mod open;
pub mod ssh;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

pub use association::{AssociatedRepository, associate};
pub use create::create_development_workspace;
pub use current::{ConnectedWorkspace, resolve_current};
pub use environment::{
    Ambient, CawsEnvProvider, EnvironmentProvider, SessionEnvironment, SessionInputs,
    merge_over_ambient, ssm_environment,
};
pub use error::SessionError;
pub use factory::connect_client;
pub use launcher::{LaunchHooks, LaunchOptions, ProcessLauncher, ProcessOutput};
pub use memento::MementoStore;
pub use open::{Connector, EditorRemoteLauncher, RemoteSessionLauncher, devfile_location, host_name};
pub use ssh::SshAgent;
pub use tools::{Dependencies, ensure_dependencies};
