//! Serialized virtual file tree: a flat mapping from absolute path to node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Path of the root directory entry in a serialized tree.
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileNode {
    #[must_use]
    pub fn file(content: impl Into<String>) -> Self {
        Self {
            kind: FileKind::File,
            name: None,
            path: None,
            content: Some(content.into()),
        }
    }

    #[must_use]
    pub fn directory() -> Self {
        Self {
            kind: FileKind::Directory,
            name: None,
            path: None,
            content: None,
        }
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

/// File tree keyed by path. Ordered so seeds serialize deterministically.
pub type FileSystemData = BTreeMap<String, FileNode>;

/// Returns true if the tree holds anything beyond the root directory.
#[must_use]
pub fn has_entries_beyond_root(data: &FileSystemData) -> bool {
    data.keys().any(|path| path != ROOT_PATH)
}
