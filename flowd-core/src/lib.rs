//! Core domain types for the flowd service.
//!
//! Defines the flow resource as the external store represents it, plus the
//! client-submitted draft shape shared by the create and update paths.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod flow;
pub mod id;

pub use flow::{Flow, FlowDraft};
pub use id::FlowId;
