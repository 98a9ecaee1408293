//! # Domain Entities
//!
//! Core primitives for double-spend proof exchange.
//!
//! ## Data Types
//!
//! - Hash: `[u8; 32]` (32-byte transaction/proof hash)
//! - DspId: proof identity (alias of Hash; equality is exact)
//! - OutPoint: (funding transaction id, output index) pair
//! - NodeId: signed peer connection handle, negative = unknown

use serde::{Deserialize, Serialize};

/// A 32-byte hash value.
pub type Hash = [u8; 32];

/// Unique identity of a double-spend proof record.
pub type DspId = Hash;

/// Identity of a transaction.
pub type TxId = Hash;

/// Peer connection handle. Negative values mean "unknown peer".
pub type NodeId = i64;

/// Sentinel for a record whose supplying peer is unknown.
pub const UNKNOWN_NODE: NodeId = -1;

/// All-zero hash, the identity of an empty proof.
pub const NULL_HASH: Hash = [0u8; 32];

/// Reference to a single transaction output: the funding output a
/// double-spend proof claims is spent twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutPoint {
    /// Funding transaction id.
    pub txid: TxId,
    /// Output index within the funding transaction.
    pub n: u32,
}

impl OutPoint {
    /// Creates an outpoint from a transaction id and output index.
    pub fn new(txid: TxId, n: u32) -> Self {
        Self { txid, n }
    }
}

/// Opaque double-spend proof payload.
///
/// The storage subsystem never inspects proof contents; it only needs the
/// proof's identity, the outpoint it references, and whether the payload is
/// empty. Serialization and verification live in other subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleSpendProof {
    id: DspId,
    out_point: OutPoint,
}

impl Default for OutPoint {
    fn default() -> Self {
        Self {
            txid: NULL_HASH,
            n: 0,
        }
    }
}

impl DoubleSpendProof {
    /// Creates a proof payload with the given identity and referenced outpoint.
    pub fn new(id: DspId, out_point: OutPoint) -> Self {
        Self { id, out_point }
    }

    /// The unique identity of this proof.
    pub fn id(&self) -> DspId {
        self.id
    }

    /// The funding output this proof claims is double-spent.
    pub fn out_point(&self) -> OutPoint {
        self.out_point
    }

    /// True for a default-constructed (invalid) payload.
    pub fn is_empty(&self) -> bool {
        self.id == NULL_HASH
    }

    /// Hex rendering of the proof id, for log output.
    pub fn id_hex(&self) -> String {
        hex::encode(self.id)
    }
}
