//! Typed response payloads, mirroring the store's canonical field names.
//!
//! These structs are what the gateway hands back to clients, re-serialized
//! without transformation, so the wire names stay exactly as the store
//! reports them (`queryFlow`, `numUids`, ...).

use flowd_core::{Flow, FlowId};
use serde::{Deserialize, Serialize};

/// Payload of [`crate::graphql::LIST_FLOWS`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowList {
    #[serde(rename = "queryFlow", default)]
    pub query_flow: Vec<Flow>,
}

/// Payload of [`crate::graphql::GET_FLOW`]. `getFlow` is `null` when the id
/// is unknown; the gateway passes that through rather than synthesizing a
/// not-found of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowById {
    #[serde(rename = "getFlow")]
    pub get_flow: Option<Flow>,
}

/// Payload of [`crate::graphql::ADD_FLOW`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowAdded {
    #[serde(rename = "addFlow")]
    pub add_flow: MutationCount,
}

/// Payload of [`crate::graphql::UPDATE_FLOW`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowUpdated {
    #[serde(rename = "updateFlow")]
    pub update_flow: MutationCount,
}

/// Payload of [`crate::graphql::DELETE_FLOW`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowDeleted {
    #[serde(rename = "deleteFlow")]
    pub delete_flow: DeletedFlows,
}

/// Record count reported by a mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationCount {
    #[serde(rename = "numUids")]
    pub num_uids: Option<u64>,
}

/// Ids removed by a delete. `flow` is `null` when nothing matched, which is
/// a successful empty deletion, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedFlows {
    #[serde(default)]
    pub flow: Option<Vec<DeletedRef>>,
    #[serde(rename = "numUids")]
    pub num_uids: Option<u64>,
}

/// A deleted flow's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedRef {
    pub id: FlowId,
}
