//! # Proof Record Index
//!
//! One record set, three access paths:
//!
//! - `by_id`: O(1) unique lookup by proof identity (primary ownership table)
//! - `by_out_point`: multi-valued lookup by referenced funding output
//! - `by_time`: ascending iteration by first-orphaned timestamp
//!
//! ## Invariants Enforced
//!
//! - One entry per distinct proof id (checked in `insert()`).
//! - Every mutation updates all three paths inside the same call; a secondary
//!   entry found missing during unlink proves the paths already disagree and
//!   is fatal, never silently repaired. The store's orphan counter is only
//!   sound if index modifications actually apply.
//! - `UNSET_TIMESTAMP` (-1) sorts before every real timestamp, so records
//!   that were never orphaned lead the time-ordered walk and get skipped by
//!   the orphan-only sweep.

use std::collections::{BTreeSet, HashMap, HashSet};

use shared_types::{DspId, OutPoint};
use tracing::error;

use super::entities::ProofEntry;
use super::salted_hasher::SaltedHasher;

/// Multi-keyed in-memory index over proof records.
#[derive(Debug)]
pub struct ProofIndex {
    /// Primary table; owns the entries.
    by_id: HashMap<DspId, ProofEntry, SaltedHasher>,
    /// Funding output -> ids of records referencing it.
    by_out_point: HashMap<OutPoint, HashSet<DspId, SaltedHasher>, SaltedHasher>,
    /// (first-orphaned timestamp, id), ascending; -1 first.
    by_time: BTreeSet<(i64, DspId)>,
    /// Bucket hasher; keyed once, shared by both maps, survives `clear()`.
    hasher: SaltedHasher,
}

impl ProofIndex {
    /// Creates an empty index keyed from the OS random source.
    pub fn new() -> Self {
        Self::with_hasher(SaltedHasher::new())
    }

    /// Creates an empty index with an explicit bucket hasher.
    pub fn with_hasher(hasher: SaltedHasher) -> Self {
        Self {
            by_id: HashMap::with_hasher(hasher.clone()),
            by_out_point: HashMap::with_hasher(hasher.clone()),
            by_time: BTreeSet::new(),
            hasher,
        }
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True if no records are held.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Looks up a record by proof id.
    pub fn get(&self, id: &DspId) -> Option<&ProofEntry> {
        self.by_id.get(id)
    }

    /// Inserts a record keyed by its proof id.
    ///
    /// Returns false (and leaves the index unchanged) if the id is already
    /// present.
    pub fn insert(&mut self, entry: ProofEntry) -> bool {
        let id = entry.proof.id();
        if self.by_id.contains_key(&id) {
            return false;
        }
        self.by_out_point
            .entry(entry.proof.out_point())
            .or_insert_with(|| HashSet::with_hasher(self.hasher.clone()))
            .insert(id);
        self.by_time.insert((entry.time_stamp, id));
        self.by_id.insert(id, entry);
        true
    }

    /// Mutates an existing record in place, re-linking the time-ordered path
    /// if the closure changed the timestamp.
    ///
    /// The record must exist: every caller first ensures presence, so a miss
    /// here is an internal consistency error and fatal.
    pub fn modify(&mut self, id: &DspId, f: impl FnOnce(&mut ProofEntry)) {
        let Some(entry) = self.by_id.get_mut(id) else {
            desync("modify", id);
        };
        let old_stamp = entry.time_stamp;
        f(entry);
        let new_stamp = entry.time_stamp;
        if new_stamp != old_stamp {
            if !self.by_time.remove(&(old_stamp, *id)) {
                desync("modify/relink", id);
            }
            self.by_time.insert((new_stamp, *id));
        }
    }

    /// All records referencing the given funding output, unspecified order.
    pub fn find_by_out_point<'a>(
        &'a self,
        out_point: &OutPoint,
    ) -> impl Iterator<Item = &'a ProofEntry> + 'a {
        self.by_out_point
            .get(out_point)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .map(move |id| self.entry_for(id, "find_by_out_point"))
    }

    /// All records, ascending by first-orphaned timestamp (never-orphaned
    /// records first).
    pub fn iter_by_time(&self) -> impl Iterator<Item = &ProofEntry> + '_ {
        self.by_time
            .iter()
            .map(move |(_, id)| self.entry_for(id, "iter_by_time"))
    }

    /// Unordered enumeration of all records.
    pub fn iter(&self) -> impl Iterator<Item = &ProofEntry> + '_ {
        self.by_id.values()
    }

    /// Removes a record by id, unlinking all three access paths.
    pub fn remove(&mut self, id: &DspId) -> Option<ProofEntry> {
        let entry = self.by_id.remove(id)?;
        let out_point = entry.proof.out_point();
        match self.by_out_point.get_mut(&out_point) {
            Some(ids) => {
                if !ids.remove(id) {
                    desync("remove/out_point", id);
                }
                if ids.is_empty() {
                    self.by_out_point.remove(&out_point);
                }
            }
            None => desync("remove/out_point", id),
        }
        if !self.by_time.remove(&(entry.time_stamp, *id)) {
            desync("remove/time", id);
        }
        Some(entry)
    }

    /// Drops every record. The bucket hasher keeps its keys.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_out_point.clear();
        self.by_time.clear();
    }

    fn entry_for(&self, id: &DspId, context: &'static str) -> &ProofEntry {
        match self.by_id.get(id) {
            Some(entry) => entry,
            None => desync(context, id),
        }
    }
}

impl Default for ProofIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// A secondary access path disagreed with the primary table. The orphan
/// accounting built on top of this index cannot be trusted past this point,
/// so terminate instead of continuing with a desynchronized store.
fn desync(context: &'static str, id: &DspId) -> ! {
    error!(
        context,
        id = %hex::encode(id),
        "proof index access paths out of sync"
    );
    panic!("proof index internal consistency violated ({context})");
}
