//! # Salted Hasher
//!
//! Keyed SipHash bucket function for the proof index hash maps.
//!
//! A plain unkeyed hash would let an adversary precompute proof ids and
//! outpoints that collide into the same bucket and degrade lookups to linear
//! scans. The two 64-bit keys are drawn from OS randomness once per store
//! instance, so bucket placement is deterministic for the store's lifetime
//! but unpredictable across instances and restarts.

use rand::rngs::OsRng;
use rand::Rng;
use shared_types::{DspId, OutPoint};
use siphasher::sip::SipHasher24;
use std::hash::{BuildHasher, Hasher};

/// Keyed bucket hasher shared by the by-id and by-outpoint maps.
///
/// Implements [`BuildHasher`], so the same pair of keys drives both the
/// identity variant (32-byte proof id) and the identity+index variant
/// (funding txid plus output index) through keyed SipHash-2-4.
#[derive(Debug, Clone)]
pub struct SaltedHasher {
    k0: u64,
    k1: u64,
}

impl SaltedHasher {
    /// Creates a hasher keyed from the OS secure random source.
    pub fn new() -> Self {
        Self {
            k0: OsRng.gen(),
            k1: OsRng.gen(),
        }
    }

    /// Creates a hasher with explicit keys. Deterministic; for tests.
    pub fn with_keys(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }

    /// Keyed hash of a proof identity.
    pub fn hash_id(&self, id: &DspId) -> u64 {
        let mut hasher = SipHasher24::new_with_keys(self.k0, self.k1);
        hasher.write(id);
        hasher.finish()
    }

    /// Keyed hash of an outpoint (funding txid plus output index).
    pub fn hash_out_point(&self, out_point: &OutPoint) -> u64 {
        let mut hasher = SipHasher24::new_with_keys(self.k0, self.k1);
        hasher.write(&out_point.txid);
        hasher.write_u32(out_point.n);
        hasher.finish()
    }
}

impl Default for SaltedHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHasher for SaltedHasher {
    type Hasher = SipHasher24;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher24::new_with_keys(self.k0, self.k1)
    }
}
