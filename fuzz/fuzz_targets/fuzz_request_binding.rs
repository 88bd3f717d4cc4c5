//! Fuzz target: the variable-binding invariant.
//!
//! For any draft contents, the serialized store request must keep the
//! query document byte-identical to the published constant; values may
//! only appear under `variables`.

#![no_main]

use libfuzzer_sys::fuzz_target;

use flowd_core::FlowDraft;
use flowd_store::graphql::{AddVars, GraphqlRequest, ADD_FLOW};

fuzz_target!(|input: (String, String)| {
    let (title, content) = input;
    let draft = FlowDraft::new(title, content);
    let req = GraphqlRequest {
        query: ADD_FLOW,
        variables: AddVars { input: [&draft] },
    };
    let bytes = serde_json::to_vec(&req).expect("serialization is infallible for strings");
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).expect("round-trip is infallible");
    assert_eq!(value["query"], ADD_FLOW, "document must never absorb request values");
});
