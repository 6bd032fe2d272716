//! In-memory collaborator implementations for development and testing.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use chrono::Utc;
use uuid::Uuid;

use waypoint_types::{
    AnonWork, ChatMessage, FileSystemData, Workspace, WorkspaceId, WorkspaceSeed,
    has_entries_beyond_root,
};

use crate::collab::{AnonWorkStore, CollabFut, Navigator, ProjectStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local holder for a single anonymous session.
#[derive(Debug, Default)]
pub struct MemoryAnonWorkStore {
    work: Mutex<Option<AnonWork>>,
}

impl MemoryAnonWorkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_work(work: AnonWork) -> Self {
        Self {
            work: Mutex::new(Some(work)),
        }
    }

    /// Records the current anonymous session, replacing any earlier one.
    ///
    /// Nothing is stored unless there is at least one message or a file beyond
    /// the root directory. Returns whether the work was stored.
    pub fn stash(&self, messages: Vec<ChatMessage>, files: FileSystemData) -> bool {
        if messages.is_empty() && !has_entries_beyond_root(&files) {
            return false;
        }
        *lock(&self.work) = Some(AnonWork::new(messages, files));
        true
    }

    #[must_use]
    pub fn has_work(&self) -> bool {
        lock(&self.work).is_some()
    }
}

impl AnonWorkStore for MemoryAnonWorkStore {
    fn read(&self) -> Option<AnonWork> {
        lock(&self.work).clone()
    }

    fn clear(&self) {
        lock(&self.work).take();
    }
}

#[derive(Debug, Clone)]
struct StoredWorkspace {
    workspace: Workspace,
    seed: Option<WorkspaceSeed>,
}

/// Workspace store backed by a vector; ids are random v4 UUIDs.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    workspaces: RwLock<Vec<StoredWorkspace>>,
}

impl MemoryProjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an existing workspace, e.g. one loaded from a snapshot.
    pub fn insert(&self, workspace: Workspace) {
        self.workspaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredWorkspace {
                workspace,
                seed: None,
            });
    }

    /// Seed a workspace was created from. `None` for inserted workspaces.
    #[must_use]
    pub fn seed_of(&self, id: &WorkspaceId) -> Option<WorkspaceSeed> {
        self.workspaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|stored| &stored.workspace.id == id)
            .and_then(|stored| stored.seed.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.workspaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Workspaces ordered by `updated_at`, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Workspace> {
        let mut list: Vec<Workspace> = self
            .workspaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|stored| stored.workspace.clone())
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        list
    }
}

impl ProjectStore for MemoryProjectStore {
    fn list(&self) -> CollabFut<'_, Vec<Workspace>> {
        let list = self.snapshot();
        Box::pin(async move { Ok(list) })
    }

    fn create(&self, seed: WorkspaceSeed) -> CollabFut<'_, Workspace> {
        let now = Utc::now();
        let workspace = Workspace {
            id: WorkspaceId::new(Uuid::new_v4().to_string()),
            name: seed.name.clone(),
            created_at: now,
            updated_at: now,
        };
        self.workspaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredWorkspace {
                workspace: workspace.clone(),
                seed: Some(seed),
            });
        Box::pin(async move { Ok(workspace) })
    }
}

/// Navigator that remembers every destination in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<WorkspaceId>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visits(&self) -> Vec<WorkspaceId> {
        lock(&self.visits).clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<WorkspaceId> {
        lock(&self.visits).last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, workspace: &WorkspaceId) {
        lock(&self.visits).push(workspace.clone());
    }
}
