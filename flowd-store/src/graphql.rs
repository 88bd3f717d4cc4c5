//! GraphQL wire envelopes and the fixed query documents.
//!
//! The documents below contain `$`-variable placeholders only. Request
//! values travel exclusively in [`GraphqlRequest::variables`], so a title,
//! content body, or id containing quotes or query syntax cannot alter the
//! structure of the operation the store sees.

use flowd_core::{FlowDraft, FlowId};
use serde::{Deserialize, Serialize};

/// A GraphQL request envelope: constant document plus bound variables.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<V: Serialize> {
    pub query: &'static str,
    pub variables: V,
}

/// A GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// One error entry reported by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Fetch every flow. No pagination, no filtering.
pub const LIST_FLOWS: &str = "\
query {
    queryFlow {
        id
        title
        content
    }
}";

/// Fetch one flow by id.
pub const GET_FLOW: &str = "\
query getFlow($id: ID!) {
    getFlow(id: $id) {
        id
        title
        content
    }
}";

/// Create one flow; the store assigns the id.
pub const ADD_FLOW: &str = "\
mutation addFlow($input: [AddFlowInput!]!) {
    addFlow(input: $input) {
        numUids
    }
}";

/// Replace a flow's title and content wholesale.
pub const UPDATE_FLOW: &str = "\
mutation updateFlow($input: UpdateFlowInput!) {
    updateFlow(input: $input) {
        numUids
    }
}";

/// Remove a flow by id, returning the ids actually deleted.
pub const DELETE_FLOW: &str = "\
mutation deleteFlow($filter: FlowFilter!) {
    deleteFlow(filter: $filter) {
        flow {
            id
        }
        numUids
    }
}";

/// No variables. Serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct NoVars {}

/// Variables for [`GET_FLOW`].
#[derive(Debug, Serialize)]
pub struct GetVars<'a> {
    pub id: &'a FlowId,
}

/// Variables for [`ADD_FLOW`].
#[derive(Debug, Serialize)]
pub struct AddVars<'a> {
    pub input: [&'a FlowDraft; 1],
}

/// Variables for [`UPDATE_FLOW`].
#[derive(Debug, Serialize)]
pub struct UpdateVars<'a> {
    pub input: UpdateInput<'a>,
}

#[derive(Debug, Serialize)]
pub struct UpdateInput<'a> {
    pub filter: IdFilter<'a>,
    pub set: &'a FlowDraft,
}

/// Variables for [`DELETE_FLOW`].
#[derive(Debug, Serialize)]
pub struct DeleteVars<'a> {
    pub filter: IdFilter<'a>,
}

/// Dgraph-style id filter: matches any of the listed ids.
#[derive(Debug, Serialize)]
pub struct IdFilter<'a> {
    pub id: [&'a FlowId; 1],
}
