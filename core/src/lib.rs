//! Post-authentication workspace reconciliation for Waypoint.
//!
//! After a successful sign-in or sign-up the user lands in exactly one
//! workspace: anonymous work is promoted into a new one, otherwise the most
//! recent workspace is resumed, otherwise an empty one is created.
//! [`AuthOrchestrator`] drives the authentication call, the reconciliation and
//! the navigation, and owns the busy flag a UI uses to block re-submission.

mod busy;
pub mod collab;
mod error;
pub mod memory;
pub mod naming;
mod orchestrator;
pub mod reconcile;
mod route;

pub use busy::{BusyFlag, BusyGuard, BusyWatch};
pub use collab::{AnonWorkStore, AuthProvider, BoxError, CollabFut, Navigator, ProjectStore};
pub use error::{AuthFlowError, FlowErrorKind, ReconcileError};
pub use naming::WorkspaceNamer;
pub use orchestrator::{AuthOrchestrator, Authentication, Collaborators};
pub use reconcile::{ReconcileOrigin, Reconciliation, WorkspaceReconciler, most_recent};
pub use route::workspace_route;
