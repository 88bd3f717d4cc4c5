//! HTTP client for the flow store's GraphQL endpoint.
//!
//! Thin wrapper over hyper's pooled client: serialize the request envelope,
//! POST it, check the status, decode the typed payload. One round trip per
//! operation; the store's own consistency guarantees are inherited as-is.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::Serialize;

use flowd_core::{FlowDraft, FlowId};

use crate::error::StoreError;
use crate::graphql::{
    AddVars, DeleteVars, GetVars, GraphqlRequest, GraphqlResponse, IdFilter, NoVars, UpdateInput,
    UpdateVars, ADD_FLOW, DELETE_FLOW, GET_FLOW, LIST_FLOWS, UPDATE_FLOW,
};
use crate::response::{FlowAdded, FlowById, FlowDeleted, FlowList, FlowUpdated};

/// Client for the external flow store.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct FlowStore {
    endpoint: Uri,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl FlowStore {
    /// Create a client for the given GraphQL endpoint URL.
    ///
    /// # Errors
    /// Returns [`StoreError::Endpoint`] if the URL does not parse or lacks a
    /// scheme and authority.
    pub fn new(endpoint: &str) -> Result<Self, StoreError> {
        let endpoint: Uri = endpoint
            .parse()
            .map_err(|e| StoreError::Endpoint(format!("{endpoint}: {e}")))?;
        if endpoint.scheme().is_none() || endpoint.authority().is_none() {
            return Err(StoreError::Endpoint(format!(
                "{endpoint}: missing scheme or host"
            )));
        }
        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self { endpoint, client })
    }

    /// Fetch all flows.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the store is unreachable or the response is
    /// malformed.
    pub async fn list(&self) -> Result<FlowList, StoreError> {
        self.run(LIST_FLOWS, NoVars {}).await
    }

    /// Fetch one flow by id. An unknown id yields `getFlow: null`, passed
    /// through as-is.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the store is unreachable or the response is
    /// malformed.
    pub async fn get(&self, id: &FlowId) -> Result<FlowById, StoreError> {
        self.run(GET_FLOW, GetVars { id }).await
    }

    /// Create a flow from the draft. The store assigns the id.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the store is unreachable or rejects the
    /// mutation.
    pub async fn create(&self, draft: &FlowDraft) -> Result<FlowAdded, StoreError> {
        self.run(ADD_FLOW, AddVars { input: [draft] }).await
    }

    /// Replace a flow's title and content wholesale.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the store is unreachable or rejects the
    /// mutation.
    pub async fn update(&self, id: &FlowId, draft: &FlowDraft) -> Result<FlowUpdated, StoreError> {
        let variables = UpdateVars {
            input: UpdateInput { filter: IdFilter { id: [id] }, set: draft },
        };
        self.run(UPDATE_FLOW, variables).await
    }

    /// Delete a flow by id. Deleting an unknown id reports an empty
    /// deletion, not an error.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the store is unreachable or rejects the
    /// mutation.
    pub async fn delete(&self, id: &FlowId) -> Result<FlowDeleted, StoreError> {
        self.run(DELETE_FLOW, DeleteVars { filter: IdFilter { id: [id] } })
            .await
    }

    /// Send one GraphQL request and decode the typed payload.
    async fn run<V, T>(&self, query: &'static str, variables: V) -> Result<T, StoreError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(&GraphqlRequest { query, variables })?;

        let req = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| StoreError::Transport(format!("build request: {e}")))?;

        let resp = self
            .client
            .request(req)
            .await
            .map_err(|e| StoreError::Transport(format!("{}: {e}", self.endpoint)))?;

        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| StoreError::Transport(format!("read response body: {e}")))?
            .to_bytes();

        tracing::debug!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            bytes = bytes.len(),
            "store response received"
        );

        if !status.is_success() {
            return Err(StoreError::BadStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let envelope: GraphqlResponse<T> = serde_json::from_slice(&bytes)?;
        if !envelope.errors.is_empty() {
            let messages: Vec<String> =
                envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(StoreError::Graphql(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| StoreError::Graphql("response carried neither data nor errors".to_owned()))
    }
}
