use serde::{Deserialize, Serialize};

use crate::id::FlowId;

/// A titled document with executable content, as the store represents it.
///
/// Flows round-trip through the store's canonical representation; the
/// gateway performs no caching or transformation of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Flow {
    /// Store-assigned identifier.
    pub id: FlowId,
    /// Human-readable title.
    pub title: String,
    /// The flow's program text.
    pub content: String,
}

impl Flow {
    /// Create a flow record.
    pub fn new(id: FlowId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Client-submitted flow fields, shared by create and update.
///
/// Missing fields deserialize to the empty string; the store accepts them
/// unchanged. Values here are untrusted and must only ever reach the store
/// as bound query variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl FlowDraft {
    /// Create a draft from title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
