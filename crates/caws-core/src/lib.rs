//! # caws-core
//!
//! Core types, identifier resolution, and error types for caws.
//!
//! This crate provides the foundational types shared across all caws crates:
//! - Workspace identity and the control-plane workspace descriptor
//! - Repository records and their association key
//! - Persisted per-workspace connection state (memento)
//! - ARN parsing into a workspace id
//! - Host context (organization/project supplied by the surrounding host)
//! - Cross-cutting error types

pub mod errors;
pub mod host;
pub mod identifier;
pub mod repository;
pub mod workspace;

pub use errors::CoreError;
pub use host::HostContext;
pub use identifier::{parse_workspace_id, resolve};
pub use repository::{OrganizationRef, ProjectRef, Repository, association_key};
pub use workspace::{
    CreateWorkspaceRequest, DEFAULT_IDE_RUNTIME, DevelopmentWorkspace, DevelopmentWorkspaceMemento, Ide, WorkspaceIdentity, WorkspaceRepository,
    WorkspaceStatus,
};
