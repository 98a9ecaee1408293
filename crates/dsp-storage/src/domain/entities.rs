//! # Domain Entities
//!
//! The stored record type and the store configuration.
//!
//! ## Invariants
//!
//! - One `ProofEntry` per distinct proof id (enforced by `ProofIndex`).
//! - `time_stamp` is set the first time a record turns orphan and never
//!   refreshed afterwards; `UNSET_TIMESTAMP` means "never orphaned".
//! - `orphan == true` exactly when the record is counted by the store's
//!   orphan counter (enforced by `DoubleSpendProofStore`).

use serde::{Deserialize, Serialize};
use shared_types::{DoubleSpendProof, NodeId, UNKNOWN_NODE};

/// Sentinel timestamp for a record that has never been orphaned.
/// Sorts before every real timestamp in the time-ordered index.
pub const UNSET_TIMESTAMP: i64 = -1;

/// Default low watermark for the orphan eviction sweep.
pub const DEFAULT_MAX_ORPHANS: usize = 65_536;

/// Default retention, in seconds, advertised to the external age-based
/// cleanup collaborator. The store itself never sweeps by age.
pub const DEFAULT_SECONDS_TO_KEEP_ORPHANS: i64 = 90;

/// One stored double-spend proof record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofEntry {
    /// The opaque proof payload.
    pub proof: DoubleSpendProof,
    /// True while the referenced output has no known transaction context.
    pub orphan: bool,
    /// Peer that supplied the record, or `UNKNOWN_NODE`.
    pub node_id: NodeId,
    /// Seconds timestamp of the first orphan transition, or `UNSET_TIMESTAMP`.
    pub time_stamp: i64,
}

impl ProofEntry {
    /// Creates a fresh non-orphan entry for a newly admitted proof.
    pub fn new(proof: DoubleSpendProof) -> Self {
        Self {
            proof,
            orphan: false,
            node_id: UNKNOWN_NODE,
            time_stamp: UNSET_TIMESTAMP,
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Low watermark for the orphan eviction sweep. The orphan count may
    /// overshoot this by up to 25% between sweeps.
    pub max_orphans: usize,
    /// Retention advertised to the external periodic cleanup collaborator.
    pub seconds_to_keep_orphans: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_orphans: DEFAULT_MAX_ORPHANS,
            seconds_to_keep_orphans: DEFAULT_SECONDS_TO_KEEP_ORPHANS,
        }
    }
}
