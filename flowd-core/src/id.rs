use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier the store assigns to a flow.
///
/// The gateway never mints these. Dgraph-style stores hand back ids such as
/// `0x2a`; the value is carried as-is and only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct FlowId(pub String);

impl FlowId {
    /// Creates a `FlowId` from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FlowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
