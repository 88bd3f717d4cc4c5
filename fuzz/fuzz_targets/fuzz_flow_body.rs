//! Fuzz target: JSON deserialization of client flow bodies.
//!
//! Verifies that arbitrary byte sequences fed to the JSON parser never
//! cause panics, UB, or unbounded resource consumption.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected and fine; panics are not.
    let _ = serde_json::from_slice::<flowd_core::FlowDraft>(data);
});
