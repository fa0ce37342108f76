//! # caws-client
//!
//! HTTP clients for caws.
//!
//! - [`ControlPlane`]: the cloud API seam (workspaces, repositories, session
//!   verification), implemented over `reqwest` by [`CawsClient`]. Listings are
//!   lazy paginated streams.
//! - [`LocalWorkspace`]: the agent running inside a development workspace,
//!   implemented by [`LocalWorkspaceClient`].

pub mod client;
pub mod control_plane;
pub mod error;
pub mod http;
pub mod local;

pub use client::{ApiSessionVerifier, CawsClient};
pub use control_plane::ControlPlane;
pub use error::ClientError;
pub use local::{LocalStatus, LocalWorkspace, LocalWorkspaceClient};
