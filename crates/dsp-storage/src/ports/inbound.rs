//! # Inbound Port - ProofStoreApi
//!
//! Primary driving port exposing the double-spend proof store to the relay
//! and validation layers.
//!
//! Every method is safe to call concurrently from network I/O threads; the
//! implementation serializes all operations through one lock, so each call is
//! a short, bounded critical section with no I/O inside.

use shared_types::{DoubleSpendProof, DspId, NodeId, OutPoint};

use crate::domain::StoreError;

/// Primary API for the proof storage subsystem.
pub trait ProofStoreApi: Send + Sync {
    /// Admits a proof as non-orphan.
    ///
    /// Returns `Ok(true)` if the proof was newly added, `Ok(false)` if its id
    /// was already known (an orphan record is demoted to non-orphan as a side
    /// effect).
    ///
    /// # Errors
    /// - `EmptyProof`: the payload is empty; the store is unchanged.
    fn add(&self, proof: &DoubleSpendProof) -> Result<bool, StoreError>;

    /// Admits a proof whose referenced output has no known transaction yet.
    ///
    /// Ensures the record exists, adopts `node_id` if the record has no peer
    /// yet, stamps the first orphan transition time, and marks the record
    /// orphan. The orphan-count increment may evict the oldest orphans, but
    /// never the record being admitted here.
    ///
    /// # Errors
    /// - `EmptyProof`: the payload is empty; the store is unchanged.
    fn add_orphan(&self, proof: &DoubleSpendProof, node_id: NodeId) -> Result<(), StoreError>;

    /// Ids and supplying peers of every *orphan* record referencing the
    /// given funding output. Non-orphan matches are excluded.
    fn find_orphans(&self, out_point: &OutPoint) -> Vec<(DspId, NodeId)>;

    /// Point-in-time snapshot of all records as (proof, orphan-flag) pairs,
    /// restricted to non-orphans when `include_orphans` is false.
    fn get_all(&self, include_orphans: bool) -> Vec<(DoubleSpendProof, bool)>;

    /// Clears the orphan flag of a record once its referenced output gained
    /// transaction context. The record itself is kept.
    fn claim_orphan(&self, id: &DspId);

    /// Deletes a record outright. Returns whether anything was removed.
    fn remove(&self, id: &DspId) -> bool;

    /// The stored proof payload for an id, if present.
    fn lookup(&self, id: &DspId) -> Option<DoubleSpendProof>;

    /// Whether a record with this id is stored.
    fn exists(&self, id: &DspId) -> bool;

    /// Whether this id was marked rejected since the last block.
    /// May rarely report true for an id never marked (bounded false-positive
    /// rate); never reports false for a marked, not-yet-reset id.
    fn is_recently_rejected(&self, id: &DspId) -> bool;

    /// Records an id as rejected until the next block.
    fn mark_rejected(&self, id: &DspId);

    /// Resets the recently-rejected filter. Rejections are block-relative.
    fn new_block_found(&self);

    /// Number of stored records.
    fn len(&self) -> usize;

    /// True if no records are stored.
    fn is_empty(&self) -> bool;

    /// Empties the store: records, orphan counter, and rejected filter.
    fn clear(&self);

    /// Retention advertised to the external age-based cleanup collaborator.
    fn seconds_to_keep_orphans(&self) -> i64;

    /// Updates the advertised retention. Negative values are ignored.
    fn set_seconds_to_keep_orphans(&self, secs: i64);

    /// Low watermark of the orphan eviction sweep.
    fn max_orphans(&self) -> usize;

    /// Updates the eviction low watermark.
    fn set_max_orphans(&self, max: usize);

    /// Current orphan count.
    fn num_orphans(&self) -> usize;
}
