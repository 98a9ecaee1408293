//! # Recently-Rejected Filter
//!
//! Probabilistic membership set of proof ids the store has decided to
//! reject, so the relay layer can drop a re-sent rejected proof without
//! reprocessing it.
//!
//! ## Problem
//!
//! A peer (or many peers) can rebroadcast the same invalid proof forever.
//! Re-validating it each time is the expensive path; remembering every
//! rejected id exactly is the memory-hungry path.
//!
//! ## Solution
//!
//! A fixed-size Bloom filter: false positives are possible (a never-rejected
//! proof may rarely be dropped until the next block), false negatives are
//! not (a rejected id is always recognized until the filter is reset).
//! Rejections are block-height-relative, so the filter is reset wholesale on
//! every new block.

use bitvec::prelude::*;
use rand::rngs::OsRng;
use rand::Rng;
use shared_types::DspId;
use std::io::Cursor;

/// Capacity the filter is sized for.
pub const DEFAULT_REJECTS_CAPACITY: usize = 120_000;

/// False-positive rate the filter is sized for.
pub const DEFAULT_REJECTS_FPR: f64 = 0.000_001;

/// Bloom filter over recently rejected proof ids.
#[derive(Debug, Clone)]
pub struct RecentRejectsFilter {
    /// Bit array storing the filter state.
    bits: BitVec<u8, Lsb0>,
    /// Number of hash functions (k).
    k: usize,
    /// Size in bits (m).
    m: usize,
    /// Random seed tweak, re-drawn on every reset so an adversary cannot
    /// precompute ids that saturate the same bits across blocks.
    tweak: u32,
}

impl RecentRejectsFilter {
    /// Creates a filter sized for `capacity` entries at false-positive rate
    /// `fpr`.
    pub fn new(capacity: usize, fpr: f64) -> Self {
        let (m, k) = optimal_parameters(capacity, fpr);
        Self {
            bits: bitvec![u8, Lsb0; 0; m],
            k,
            m,
            tweak: OsRng.gen(),
        }
    }

    /// Records a proof id as rejected.
    ///
    /// After insertion, `contains(id)` is guaranteed to return true until the
    /// next `reset()` — no false negatives.
    pub fn insert(&mut self, id: &DspId) {
        for pos in self.positions(id) {
            self.bits.set(pos, true);
        }
    }

    /// Tests whether a proof id was recently rejected.
    ///
    /// Returns true for every inserted id, and rarely (bounded by the
    /// configured rate) for ids never inserted.
    pub fn contains(&self, id: &DspId) -> bool {
        self.positions(id).into_iter().all(|pos| self.bits[pos])
    }

    /// Clears the filter and re-draws the seed tweak.
    pub fn reset(&mut self) {
        self.bits.fill(false);
        self.tweak = OsRng.gen();
    }

    /// Filter size in bits.
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Number of hash functions.
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Computes the k bit positions for an id.
    ///
    /// Double hashing: h(i) = h1 + i * h2, cheaper than k independent hashes.
    fn positions(&self, id: &DspId) -> Vec<usize> {
        let h1 = murmur_hash(id, 0, self.tweak);
        let h2 = murmur_hash(id, 1, self.tweak);
        (0..self.k)
            .map(|i| {
                let hash = h1.wrapping_add((i as u64).wrapping_mul(h2));
                (hash % self.m as u64) as usize
            })
            .collect()
    }
}

impl Default for RecentRejectsFilter {
    fn default() -> Self {
        Self::new(DEFAULT_REJECTS_CAPACITY, DEFAULT_REJECTS_FPR)
    }
}

/// Hash an id with MurmurHash3 under a seed and tweak.
fn murmur_hash(id: &DspId, seed: u32, tweak: u32) -> u64 {
    let combined_seed = seed.wrapping_add(tweak);
    let mut cursor = Cursor::new(&id[..]);
    let hash = murmur3::murmur3_x64_128(&mut cursor, combined_seed).unwrap_or(0);
    hash as u64
}

/// Optimal Bloom parameters for `n` entries at false-positive rate `p`:
/// m = ceil(-n ln p / ln^2 2) bits, k = round((m/n) ln 2) hash functions.
fn optimal_parameters(n: usize, p: f64) -> (usize, usize) {
    let n = n.max(1) as f64;
    let ln2 = std::f64::consts::LN_2;
    let m = (-(n * p.ln()) / (ln2 * ln2)).ceil().max(8.0);
    let k = ((m / n) * ln2).round().max(1.0);
    (m as usize, k as usize)
}
