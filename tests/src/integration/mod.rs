//! Cross-module integration tests against the public store surface.

mod concurrency;
mod eviction;

use shared_types::{DoubleSpendProof, DspId, OutPoint};

/// A proof with a synthetic id and dedicated outpoint.
pub fn proof(seed: u32) -> DoubleSpendProof {
    DoubleSpendProof::new(id(seed), out_point(seed))
}

/// A synthetic 32-byte id derived from a seed.
pub fn id(seed: u32) -> DspId {
    let mut v = [0u8; 32];
    v[..4].copy_from_slice(&seed.to_le_bytes());
    v[4] = 0xD5;
    v
}

/// A synthetic outpoint derived from a seed.
pub fn out_point(seed: u32) -> OutPoint {
    let mut txid = [0u8; 32];
    txid[..4].copy_from_slice(&seed.to_be_bytes());
    OutPoint::new(txid, seed % 4)
}
