//! GraphQL-over-HTTP client for the external flow store.
//!
//! The store is opaque to flowd: five fixed operations, one round trip
//! each, no retries and no local caching. Every request value (ids,
//! titles, contents) is bound through the protocol's `variables` object;
//! the query documents themselves are constants and never contain
//! client-supplied text.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod client;
pub mod error;
pub mod graphql;
pub mod response;

pub use client::FlowStore;
pub use error::StoreError;
pub use response::{
    DeletedFlows, DeletedRef, FlowAdded, FlowById, FlowDeleted, FlowList, FlowUpdated,
    MutationCount,
};
