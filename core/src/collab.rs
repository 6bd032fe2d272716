//! Seams to the systems the core drives but does not own.
//!
//! Implementations are injected as trait objects at construction. Fallible
//! calls return [`BoxError`] so an implementation's own error type reaches the
//! caller unmodified as the `source` of the flow error.

use std::future::Future;
use std::pin::Pin;

use waypoint_types::{AnonWork, AuthOutcome, Credentials, Workspace, WorkspaceId, WorkspaceSeed};

/// Failure raised by a collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Collaborator future type alias.
pub type CollabFut<'a, T> = Pin<Box<dyn Future<Output = Result<T, BoxError>> + Send + 'a>>;

/// Verifies credentials. A rejected credential is `Ok` with `success == false`;
/// `Err` is reserved for transport or unexpected failures.
pub trait AuthProvider: Send + Sync {
    fn sign_in<'a>(&'a self, credentials: &'a Credentials) -> CollabFut<'a, AuthOutcome>;
    fn sign_up<'a>(&'a self, credentials: &'a Credentials) -> CollabFut<'a, AuthOutcome>;
}

/// Holds at most one anonymous session's work.
pub trait AnonWorkStore: Send + Sync {
    fn read(&self) -> Option<AnonWork>;
    /// Must be idempotent.
    fn clear(&self);
}

/// Lists and creates the authenticated user's workspaces.
pub trait ProjectStore: Send + Sync {
    fn list(&self) -> CollabFut<'_, Vec<Workspace>>;
    fn create(&self, seed: WorkspaceSeed) -> CollabFut<'_, Workspace>;
}

/// Moves the user to a workspace.
pub trait Navigator: Send + Sync {
    fn go_to(&self, workspace: &WorkspaceId);
}
