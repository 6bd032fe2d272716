//! Post-authentication reconciliation.
//!
//! Decision order, first match wins:
//!
//! 1. Usable anonymous work: create a workspace seeded with it, then clear the
//!    anonymous store. The existing workspaces are never listed on this path.
//! 2. At least one existing workspace: resume the most recent one.
//! 3. Otherwise: create an empty workspace.
//!
//! At most one workspace is created per call, and the anonymous store is
//! cleared only after the workspace holding its content exists.

use std::cmp::Ordering;

use waypoint_types::{AnonWork, Workspace, WorkspaceId, WorkspaceSeed};

use crate::collab::{AnonWorkStore, ProjectStore};
use crate::error::ReconcileError;
use crate::naming::WorkspaceNamer;

/// Which branch produced the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOrigin {
    AnonymousWork,
    MostRecent,
    Fresh,
}

impl ReconcileOrigin {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReconcileOrigin::AnonymousWork => "anonymous-work",
            ReconcileOrigin::MostRecent => "most-recent",
            ReconcileOrigin::Fresh => "fresh",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub destination: WorkspaceId,
    pub origin: ReconcileOrigin,
}

impl Reconciliation {
    #[must_use]
    pub fn created(&self) -> bool {
        !matches!(self.origin, ReconcileOrigin::MostRecent)
    }
}

/// Recency order: `updated_at`, then `created_at`, then the smaller id ranks higher.
fn recency(a: &Workspace, b: &Workspace) -> Ordering {
    a.updated_at
        .cmp(&b.updated_at)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Most recently updated workspace, independent of the input order.
#[must_use]
pub fn most_recent(workspaces: &[Workspace]) -> Option<&Workspace> {
    workspaces.iter().max_by(|a, b| recency(a, b))
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceReconciler {
    namer: WorkspaceNamer,
}

impl WorkspaceReconciler {
    #[must_use]
    pub fn new(namer: WorkspaceNamer) -> Self {
        Self { namer }
    }

    #[must_use]
    pub fn namer(&self) -> &WorkspaceNamer {
        &self.namer
    }

    pub async fn reconcile(
        &self,
        anon_work: &dyn AnonWorkStore,
        projects: &dyn ProjectStore,
    ) -> Result<Reconciliation, ReconcileError> {
        if let Some(work) = anon_work.read().filter(AnonWork::is_usable) {
            return self.promote(work, anon_work, projects).await;
        }

        let workspaces = projects.list().await.map_err(|source| {
            tracing::warn!(error = %source, "Workspace listing failed");
            ReconcileError::ListUnavailable(source)
        })?;

        if let Some(latest) = most_recent(&workspaces) {
            tracing::info!(
                workspace_id = %latest.id,
                count = workspaces.len(),
                "Resuming most recent workspace"
            );
            return Ok(Reconciliation {
                destination: latest.id.clone(),
                origin: ReconcileOrigin::MostRecent,
            });
        }

        let seed = WorkspaceSeed::empty(Some(self.namer.fresh_name_random()));
        let created = create(projects, seed).await?;
        tracing::info!(workspace_id = %created.id, "Created fresh workspace");
        Ok(Reconciliation {
            destination: created.id,
            origin: ReconcileOrigin::Fresh,
        })
    }

    async fn promote(
        &self,
        work: AnonWork,
        anon_work: &dyn AnonWorkStore,
        projects: &dyn ProjectStore,
    ) -> Result<Reconciliation, ReconcileError> {
        let messages = work.messages.len();
        let files = work.file_system_data.len();
        let seed = WorkspaceSeed::from_anon_work(work, Some(self.namer.promoted_name_now()));
        let created = create(projects, seed).await?;
        anon_work.clear();
        tracing::info!(
            workspace_id = %created.id,
            messages,
            files,
            "Promoted anonymous work into a new workspace"
        );
        Ok(Reconciliation {
            destination: created.id,
            origin: ReconcileOrigin::AnonymousWork,
        })
    }
}

async fn create(
    projects: &dyn ProjectStore,
    seed: WorkspaceSeed,
) -> Result<Workspace, ReconcileError> {
    projects.create(seed).await.map_err(|source| {
        tracing::warn!(error = %source, "Workspace creation failed");
        ReconcileError::WorkspaceCreationFailed(source)
    })
}
