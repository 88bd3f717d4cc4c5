//! Fuzz target: decoding of store response envelopes.
//!
//! The store is an external service; its responses are untrusted input to
//! the gateway and must never panic the decoder.

#![no_main]

use libfuzzer_sys::fuzz_target;

use flowd_store::graphql::GraphqlResponse;
use flowd_store::FlowList;

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<GraphqlResponse<FlowList>>(data);
    let _ = serde_json::from_slice::<GraphqlResponse<flowd_store::FlowDeleted>>(data);
});
