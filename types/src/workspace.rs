//! Workspaces, the seeds that create them, and pre-authentication work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::files::FileSystemData;
use crate::ids::WorkspaceId;
use crate::message::ChatMessage;

/// Work accumulated before the user authenticated.
///
/// Only usable when it carries at least one message; a file tree on its own
/// does not count as work worth promoting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonWork {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub file_system_data: FileSystemData,
}

impl AnonWork {
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>, file_system_data: FileSystemData) -> Self {
        Self {
            messages,
            file_system_data,
        }
    }

    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.messages.is_empty()
    }
}

/// A persisted workspace as listed by the project store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    #[must_use]
    pub fn new(
        id: impl Into<WorkspaceId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Creation request sent to the project store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub data: FileSystemData,
}

impl WorkspaceSeed {
    /// Seed carrying no messages and no files.
    #[must_use]
    pub fn empty(name: Option<String>) -> Self {
        Self {
            name,
            messages: Vec::new(),
            data: FileSystemData::new(),
        }
    }

    /// Seed built from anonymous work, preserving message order and files.
    #[must_use]
    pub fn from_anon_work(work: AnonWork, name: Option<String>) -> Self {
        Self {
            name,
            messages: work.messages,
            data: work.file_system_data,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.data.is_empty()
    }
}
