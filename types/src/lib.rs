//! Core domain types for Waypoint.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod auth;
mod files;
mod ids;
mod message;
mod workspace;

pub use auth::{AuthMode, AuthOutcome, Credentials};
pub use files::{FileKind, FileNode, FileSystemData, ROOT_PATH, has_entries_beyond_root};
pub use ids::WorkspaceId;
pub use message::{ChatMessage, Role};
pub use workspace::{AnonWork, Workspace, WorkspaceSeed};
