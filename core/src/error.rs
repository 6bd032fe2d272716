use thiserror::Error;

use waypoint_types::AuthMode;

use crate::collab::BoxError;

/// Failure while resolving the destination workspace.
///
/// Neither variant leaves partial state behind: anonymous work is only cleared
/// after the workspace holding it exists.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to list workspaces")]
    ListUnavailable(#[source] BoxError),
    #[error("failed to create workspace")]
    WorkspaceCreationFailed(#[source] BoxError),
}

/// Infrastructure failure surfaced by `sign_in`/`sign_up`.
///
/// Rejected credentials are not represented here; they come back as an
/// `AuthOutcome` with `success == false`.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error("authentication provider unavailable during {mode}")]
    ProviderUnavailable {
        mode: AuthMode,
        #[source]
        source: BoxError,
    },
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowErrorKind {
    ProviderUnavailable,
    ListUnavailable,
    WorkspaceCreationFailed,
}

impl AuthFlowError {
    #[must_use]
    pub fn kind(&self) -> FlowErrorKind {
        match self {
            AuthFlowError::ProviderUnavailable { .. } => FlowErrorKind::ProviderUnavailable,
            AuthFlowError::Reconcile(ReconcileError::ListUnavailable(_)) => {
                FlowErrorKind::ListUnavailable
            }
            AuthFlowError::Reconcile(ReconcileError::WorkspaceCreationFailed(_)) => {
                FlowErrorKind::WorkspaceCreationFailed
            }
        }
    }
}
