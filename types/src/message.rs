//! Chat message model as carried by anonymous work and workspace seeds.
//!
//! Messages are opaque to reconciliation: they are moved from the anonymous
//! store into a seed in their original order and never edited. Fields this
//! model does not name are kept in [`ChatMessage::extra`] and written back
//! unchanged. Roles are the closed set in [`Role`]; any other role fails to
//! deserialize.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Tool calls attached to an assistant turn, kept verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_invocations: Vec<Value>,
    /// Client fields with no typed counterpart (`createdAt`, `parts`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            tool_invocations: Vec::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, Role::User, content)
    }

    #[must_use]
    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, Role::Assistant, content)
    }

    #[must_use]
    pub fn with_tool_invocations(mut self, invocations: Vec<Value>) -> Self {
        self.tool_invocations = invocations;
        self
    }
}
