//! # Double-Spend Proof Store
//!
//! Composition root: one lock over one record index, the orphan counter and
//! its watermarks, and the recently-rejected filter.
//!
//! ## Locking
//!
//! All mutable state lives inside a single `parking_lot::Mutex`. Public entry
//! points lock exactly once and call `_locked` helpers on the guarded state,
//! so composed operations (`add_orphan` admits via the same path as `add`)
//! never re-acquire the lock. No I/O happens under the lock; every critical
//! section is short and bounded.
//!
//! ## Orphan Accounting
//!
//! `num_orphans` must always equal the exact number of entries with
//! `orphan == true`. A decrement that would underflow proves the two already
//! disagree; that is fatal, not recoverable. The watermark sweep
//! (`check_orphan_limit_locked`) runs only on increments and reaps oldest
//! orphans first, always sparing the id being admitted.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{DoubleSpendProof, DspId, NodeId, OutPoint};
use tracing::{debug, error};

use super::entities::{ProofEntry, StoreConfig, UNSET_TIMESTAMP};
use super::errors::StoreError;
use super::index::ProofIndex;
use super::rejects::RecentRejectsFilter;
use crate::ports::inbound::ProofStoreApi;
use crate::ports::outbound::{SystemTimeSource, TimeSource};

/// Authoritative in-memory store for double-spend proof records.
///
/// Process-wide, created once. Safe to share across network I/O threads;
/// every operation serializes through the internal lock.
pub struct DoubleSpendProofStore {
    inner: Mutex<StoreInner>,
    clock: Arc<dyn TimeSource>,
}

/// Lock-protected state. Methods suffixed `_locked` assume the caller holds
/// the store lock.
struct StoreInner {
    proofs: ProofIndex,
    rejects: RecentRejectsFilter,
    num_orphans: usize,
    max_orphans: usize,
    seconds_to_keep_orphans: i64,
}

impl DoubleSpendProofStore {
    /// Creates a store with default configuration and the system clock.
    pub fn new() -> Self {
        Self::with_clock(StoreConfig::default(), Arc::new(SystemTimeSource))
    }

    /// Creates a store with explicit configuration and the system clock.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }

    /// Creates a store with explicit configuration and clock.
    pub fn with_clock(config: StoreConfig, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                proofs: ProofIndex::new(),
                rejects: RecentRejectsFilter::default(),
                num_orphans: 0,
                max_orphans: config.max_orphans,
                seconds_to_keep_orphans: config.seconds_to_keep_orphans,
            }),
            clock,
        }
    }

    /// Admits a proof as non-orphan. See [`ProofStoreApi::add`].
    pub fn add(&self, proof: &DoubleSpendProof) -> Result<bool, StoreError> {
        self.inner.lock().add_locked(proof)
    }

    /// Admits a proof as orphan. See [`ProofStoreApi::add_orphan`].
    pub fn add_orphan(
        &self,
        proof: &DoubleSpendProof,
        node_id: NodeId,
    ) -> Result<(), StoreError> {
        let now = self.clock.now_secs();
        self.inner.lock().add_orphan_locked(proof, node_id, now)
    }

    /// Orphan (id, peer) pairs referencing an output.
    pub fn find_orphans(&self, out_point: &OutPoint) -> Vec<(DspId, NodeId)> {
        self.inner
            .lock()
            .proofs
            .find_by_out_point(out_point)
            .filter(|entry| entry.orphan)
            .map(|entry| (entry.proof.id(), entry.node_id))
            .collect()
    }

    /// Snapshot of all records as (proof, orphan-flag) pairs.
    pub fn get_all(&self, include_orphans: bool) -> Vec<(DoubleSpendProof, bool)> {
        self.inner
            .lock()
            .proofs
            .iter()
            .filter(|entry| include_orphans || !entry.orphan)
            .map(|entry| (entry.proof.clone(), entry.orphan))
            .collect()
    }

    /// Demotes an orphan record to non-orphan, keeping it stored.
    pub fn claim_orphan(&self, id: &DspId) {
        let mut inner = self.inner.lock();
        if inner.proofs.get(id).is_some_and(|e| e.orphan) {
            inner.decrement_orphans_locked(1);
            inner.proofs.modify(id, |e| e.orphan = false);
        }
    }

    /// Deletes a record outright.
    pub fn remove(&self, id: &DspId) -> bool {
        let mut inner = self.inner.lock();
        let Some(was_orphan) = inner.proofs.get(id).map(|e| e.orphan) else {
            return false;
        };
        if was_orphan {
            inner.decrement_orphans_locked(1);
        }
        inner.proofs.remove(id);
        true
    }

    /// The stored proof for an id, if any.
    pub fn lookup(&self, id: &DspId) -> Option<DoubleSpendProof> {
        self.inner.lock().proofs.get(id).map(|e| e.proof.clone())
    }

    /// Whether a record with this id is stored.
    pub fn exists(&self, id: &DspId) -> bool {
        self.inner.lock().proofs.get(id).is_some()
    }

    /// Whether this id was marked rejected since the last block.
    pub fn is_recently_rejected(&self, id: &DspId) -> bool {
        self.inner.lock().rejects.contains(id)
    }

    /// Marks an id rejected until the next block.
    pub fn mark_rejected(&self, id: &DspId) {
        self.inner.lock().rejects.insert(id);
    }

    /// Resets the rejected filter; prior rejections were relative to the
    /// previous block.
    pub fn new_block_found(&self) {
        self.inner.lock().rejects.reset();
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.lock().proofs.len()
    }

    /// True if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().proofs.is_empty()
    }

    /// Empties records, counter, and filter. Hash-map keys are retained.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.proofs.clear();
        inner.rejects.reset();
        inner.num_orphans = 0;
    }

    /// Retention advertised to the external age-based cleanup collaborator.
    pub fn seconds_to_keep_orphans(&self) -> i64 {
        self.inner.lock().seconds_to_keep_orphans
    }

    /// Updates the advertised retention. Negative is not a valid retention
    /// and is silently ignored.
    pub fn set_seconds_to_keep_orphans(&self, secs: i64) {
        if secs >= 0 {
            self.inner.lock().seconds_to_keep_orphans = secs;
        }
    }

    /// Low watermark of the orphan eviction sweep.
    pub fn max_orphans(&self) -> usize {
        self.inner.lock().max_orphans
    }

    /// Updates the eviction low watermark.
    pub fn set_max_orphans(&self, max: usize) {
        self.inner.lock().max_orphans = max;
    }

    /// Current orphan count.
    pub fn num_orphans(&self) -> usize {
        self.inner.lock().num_orphans
    }
}

impl Default for DoubleSpendProofStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreInner {
    fn add_locked(&mut self, proof: &DoubleSpendProof) -> Result<bool, StoreError> {
        if proof.is_empty() {
            return Err(StoreError::EmptyProof);
        }
        let id = proof.id();
        if let Some(was_orphan) = self.proofs.get(&id).map(|e| e.orphan) {
            if was_orphan {
                // known id re-announced with transaction context: demote
                self.decrement_orphans_locked(1);
                self.proofs.modify(&id, |e| e.orphan = false);
            }
            return Ok(false);
        }
        self.proofs.insert(ProofEntry::new(proof.clone()));
        Ok(true)
    }

    fn add_orphan_locked(
        &mut self,
        proof: &DoubleSpendProof,
        node_id: NodeId,
        now: i64,
    ) -> Result<(), StoreError> {
        self.add_locked(proof)?;
        let id = proof.id();

        let mut promote = false;
        self.proofs.modify(&id, |e| {
            if e.node_id < 0 && node_id > -1 {
                e.node_id = node_id;
            }
            if e.time_stamp == UNSET_TIMESTAMP {
                e.time_stamp = now;
            }
            promote = !e.orphan;
        });
        if promote {
            // may reap older orphans; the flag is still false on this entry
            // and the id is protected, so it cannot evict itself
            self.increment_orphans_locked(&id);
            self.proofs.modify(&id, |e| e.orphan = true);
        }
        Ok(())
    }

    fn increment_orphans_locked(&mut self, protect: &DspId) {
        self.num_orphans += 1;
        self.check_orphan_limit_locked(protect);
    }

    fn decrement_orphans_locked(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        if self.num_orphans < n {
            error!(
                num_orphans = self.num_orphans,
                decrement = n,
                "orphan counter underflow: counter disagrees with orphan flags"
            );
            panic!("orphan counter internal consistency violated");
        }
        self.num_orphans -= n;
    }

    /// Reaps oldest orphans once the count exceeds the high watermark.
    ///
    /// `high = low + low/4` (25% slack) so the sweep runs occasionally
    /// instead of on every increment; the count may overshoot `max_orphans`
    /// by up to 25% between sweeps.
    fn check_orphan_limit_locked(&mut self, protect: &DspId) {
        let low = self.max_orphans;
        let high = low + low / 4;
        if self.num_orphans <= high {
            return;
        }

        let mut victims = Vec::new();
        let mut projected = self.num_orphans;
        for entry in self.proofs.iter_by_time() {
            if projected <= low {
                break;
            }
            let id = entry.proof.id();
            if entry.orphan && id != *protect {
                victims.push(id);
                projected -= 1;
            }
        }
        let reaped = victims.len();
        for id in &victims {
            self.proofs.remove(id);
        }
        self.decrement_orphans_locked(reaped);
        debug!(
            reaped,
            num_orphans = self.num_orphans,
            low, high, "reaped oldest orphans"
        );
    }
}

impl ProofStoreApi for DoubleSpendProofStore {
    fn add(&self, proof: &DoubleSpendProof) -> Result<bool, StoreError> {
        DoubleSpendProofStore::add(self, proof)
    }

    fn add_orphan(&self, proof: &DoubleSpendProof, node_id: NodeId) -> Result<(), StoreError> {
        DoubleSpendProofStore::add_orphan(self, proof, node_id)
    }

    fn find_orphans(&self, out_point: &OutPoint) -> Vec<(DspId, NodeId)> {
        DoubleSpendProofStore::find_orphans(self, out_point)
    }

    fn get_all(&self, include_orphans: bool) -> Vec<(DoubleSpendProof, bool)> {
        DoubleSpendProofStore::get_all(self, include_orphans)
    }

    fn claim_orphan(&self, id: &DspId) {
        DoubleSpendProofStore::claim_orphan(self, id)
    }

    fn remove(&self, id: &DspId) -> bool {
        DoubleSpendProofStore::remove(self, id)
    }

    fn lookup(&self, id: &DspId) -> Option<DoubleSpendProof> {
        DoubleSpendProofStore::lookup(self, id)
    }

    fn exists(&self, id: &DspId) -> bool {
        DoubleSpendProofStore::exists(self, id)
    }

    fn is_recently_rejected(&self, id: &DspId) -> bool {
        DoubleSpendProofStore::is_recently_rejected(self, id)
    }

    fn mark_rejected(&self, id: &DspId) {
        DoubleSpendProofStore::mark_rejected(self, id)
    }

    fn new_block_found(&self) {
        DoubleSpendProofStore::new_block_found(self)
    }

    fn len(&self) -> usize {
        DoubleSpendProofStore::len(self)
    }

    fn is_empty(&self) -> bool {
        DoubleSpendProofStore::is_empty(self)
    }

    fn clear(&self) {
        DoubleSpendProofStore::clear(self)
    }

    fn seconds_to_keep_orphans(&self) -> i64 {
        DoubleSpendProofStore::seconds_to_keep_orphans(self)
    }

    fn set_seconds_to_keep_orphans(&self, secs: i64) {
        DoubleSpendProofStore::set_seconds_to_keep_orphans(self, secs)
    }

    fn max_orphans(&self) -> usize {
        DoubleSpendProofStore::max_orphans(self)
    }

    fn set_max_orphans(&self, max: usize) {
        DoubleSpendProofStore::set_max_orphans(self, max)
    }

    fn num_orphans(&self) -> usize {
        DoubleSpendProofStore::num_orphans(self)
    }
}
