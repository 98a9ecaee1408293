//! Ports (trait boundaries) for the proof storage subsystem.
//!
//! - `inbound`: the `ProofStoreApi` driving port
//! - `outbound`: the `TimeSource` driven port and its implementations

pub mod inbound;
pub mod outbound;

pub use inbound::ProofStoreApi;
pub use outbound::{MockTimeSource, SystemTimeSource, TimeSource};
