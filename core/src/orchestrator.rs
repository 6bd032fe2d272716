//! Sign-in / sign-up state machine.
//!
//! ```text
//! Idle --sign_in/sign_up--> Submitting --success--> Reconciling --> Idle
//!                               |                        |
//!                               +--rejected/failed-------+--failed--> Idle
//! ```
//!
//! The busy flag is engaged when `sign_in`, `sign_up` or `authenticate` is
//! called, before the returned future is first polled, and released when the
//! future completes or is dropped. On failure the flag is already idle by the time the caller sees
//! the error.

use std::future::Future;
use std::sync::Arc;

use waypoint_types::{AuthMode, AuthOutcome, Credentials};

use crate::busy::{BusyFlag, BusyWatch};
use crate::collab::{AnonWorkStore, AuthProvider, Navigator, ProjectStore};
use crate::error::AuthFlowError;
use crate::reconcile::{Reconciliation, WorkspaceReconciler};

/// External systems the orchestrator drives.
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Arc<dyn AuthProvider>,
    pub anon_work: Arc<dyn AnonWorkStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub navigator: Arc<dyn Navigator>,
}

/// Provider answer plus the reconciliation it triggered, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    pub outcome: AuthOutcome,
    /// `None` when the credentials were rejected.
    pub reconciliation: Option<Reconciliation>,
}

/// One per session. Calls are not serialized against each other; callers
/// that want a single call in flight check [`AuthOrchestrator::is_busy`].
pub struct AuthOrchestrator {
    collaborators: Collaborators,
    reconciler: WorkspaceReconciler,
    busy: BusyFlag,
}

impl AuthOrchestrator {
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            reconciler: WorkspaceReconciler::default(),
            busy: BusyFlag::new(),
        }
    }

    #[must_use]
    pub fn with_reconciler(mut self, reconciler: WorkspaceReconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    #[must_use]
    pub fn busy_watch(&self) -> BusyWatch {
        self.busy.watch()
    }

    pub fn sign_in(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<AuthOutcome, AuthFlowError>> + Send + '_ {
        let call = self.authenticate(AuthMode::SignIn, credentials);
        async move { call.await.map(|auth| auth.outcome) }
    }

    pub fn sign_up(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<AuthOutcome, AuthFlowError>> + Send + '_ {
        let call = self.authenticate(AuthMode::SignUp, credentials);
        async move { call.await.map(|auth| auth.outcome) }
    }

    /// Same flow as `sign_in`/`sign_up`, also reporting which branch the
    /// reconciliation took.
    pub fn authenticate(
        &self,
        mode: AuthMode,
        credentials: Credentials,
    ) -> impl Future<Output = Result<Authentication, AuthFlowError>> + Send + '_ {
        let guard = self.busy.engage();
        async move {
            let _guard = guard;
            self.run(mode, &credentials).await
        }
    }

    async fn run(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<Authentication, AuthFlowError> {
        let auth = &self.collaborators.auth;
        let call = match mode {
            AuthMode::SignIn => auth.sign_in(credentials),
            AuthMode::SignUp => auth.sign_up(credentials),
        };
        let outcome = call.await.map_err(|source| {
            tracing::warn!(%mode, error = %source, "Authentication provider call failed");
            AuthFlowError::ProviderUnavailable { mode, source }
        })?;

        if !outcome.success {
            tracing::debug!(%mode, "Credentials rejected; skipping reconciliation");
            return Ok(Authentication {
                outcome,
                reconciliation: None,
            });
        }

        let reconciliation = self
            .reconciler
            .reconcile(
                self.collaborators.anon_work.as_ref(),
                self.collaborators.projects.as_ref(),
            )
            .await?;

        self.collaborators
            .navigator
            .go_to(&reconciliation.destination);
        tracing::info!(
            %mode,
            workspace_id = %reconciliation.destination,
            branch = reconciliation.origin.as_str(),
            created = reconciliation.created(),
            "Navigated after authentication"
        );
        Ok(Authentication {
            outcome,
            reconciliation: Some(reconciliation),
        })
    }
}
