//! Error types for the proof storage subsystem.
//!
//! Only caller errors appear here. Internal consistency violations (orphan
//! counter underflow, a secondary index entry missing during unlink) are not
//! recoverable and are not part of the public contract: they log a fatal
//! diagnostic and panic instead of returning a value a caller could ignore.

use thiserror::Error;

/// Errors that can occur when driving the proof store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The supplied proof payload was empty. Adding an empty proof indicates
    /// a bug in the caller; the store is left unchanged.
    #[error("double-spend proof payload is empty")]
    EmptyProof,
}
