//! Snapshot replay: one sign-in or sign-up against in-memory collaborators.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use waypoint_config::NavigationSettings;
use waypoint_core::memory::{MemoryAnonWorkStore, MemoryProjectStore, RecordingNavigator};
use waypoint_core::{
    AuthFlowError, AuthOrchestrator, AuthProvider, BoxError, CollabFut, Collaborators,
    WorkspaceReconciler, workspace_route,
};
use waypoint_types::{AnonWork, AuthMode, AuthOutcome, Credentials, Workspace};

/// Input file for `waypoint simulate`.
///
/// Exactly one of `outcome` and `providerError` must be present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub outcome: Option<AuthOutcome>,
    #[serde(default)]
    pub provider_error: Option<String>,
    #[serde(default)]
    pub anon_work: Option<AnonWork>,
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid snapshot {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(raw)?;
        if snapshot.outcome.is_some() == snapshot.provider_error.is_some() {
            bail!("snapshot must set exactly one of `outcome` and `providerError`");
        }
        Ok(snapshot)
    }
}

/// Provider that answers every call with the snapshot's scripted response.
struct ScriptedAuth {
    response: Result<AuthOutcome, String>,
}

impl ScriptedAuth {
    fn respond(&self) -> CollabFut<'_, AuthOutcome> {
        let response = self.response.clone();
        Box::pin(async move { response.map_err(BoxError::from) })
    }
}

impl AuthProvider for ScriptedAuth {
    fn sign_in<'a>(&'a self, _credentials: &'a Credentials) -> CollabFut<'a, AuthOutcome> {
        self.respond()
    }

    fn sign_up<'a>(&'a self, _credentials: &'a Credentials) -> CollabFut<'a, AuthOutcome> {
        self.respond()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub workspace_id: String,
    pub route: String,
    /// `anonymous-work`, `most-recent` or `fresh`.
    pub branch: &'static str,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub mode: AuthMode,
    pub outcome: AuthOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    pub anon_work_pending: bool,
    pub workspace_count: usize,
}

pub async fn run(
    snapshot: Snapshot,
    mode: AuthMode,
    credentials: Credentials,
    reconciler: WorkspaceReconciler,
    navigation: &NavigationSettings,
) -> Result<Report, AuthFlowError> {
    let response = match (snapshot.outcome, snapshot.provider_error) {
        (Some(outcome), _) => Ok(outcome),
        (None, Some(error)) => Err(error),
        (None, None) => Ok(AuthOutcome::rejected("no scripted outcome")),
    };

    let anon = Arc::new(match snapshot.anon_work {
        Some(work) => MemoryAnonWorkStore::with_work(work),
        None => MemoryAnonWorkStore::new(),
    });
    let projects = Arc::new(MemoryProjectStore::new());
    for workspace in snapshot.workspaces {
        projects.insert(workspace);
    }
    let orchestrator = AuthOrchestrator::new(Collaborators {
        auth: Arc::new(ScriptedAuth { response }),
        anon_work: anon.clone(),
        projects: projects.clone(),
        navigator: Arc::new(RecordingNavigator::new()),
    })
    .with_reconciler(reconciler);

    let auth = orchestrator.authenticate(mode, credentials).await?;

    let destination = auth.reconciliation.map(|reconciliation| {
        let created = reconciliation.created();
        let id = reconciliation.destination;
        Destination {
            route: workspace_route(&navigation.route_prefix, &id),
            branch: reconciliation.origin.as_str(),
            created,
            name: projects.seed_of(&id).and_then(|seed| seed.name),
            workspace_id: id.into_inner(),
        }
    });

    Ok(Report {
        mode,
        outcome: auth.outcome,
        destination,
        anon_work_pending: anon.has_work(),
        workspace_count: projects.len(),
    })
}
