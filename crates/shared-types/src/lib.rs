//! # Shared Types Crate
//!
//! Domain primitives used across the double-spend proof storage workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-crate types (`Hash`, `OutPoint`,
//!   `NodeId`, `DoubleSpendProof`) are defined here and nowhere else.
//! - **Opaque Payload**: `DoubleSpendProof` exposes only its identity, the
//!   funding output it references, and an emptiness check. Proof contents
//!   and cryptographic verification belong to other subsystems.

pub mod entities;

pub use entities::*;
