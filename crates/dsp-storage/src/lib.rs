//! # Double-Spend Proof Storage Subsystem
//!
//! Authoritative in-memory store for double-spend proof records exchanged
//! between peers: compact evidence that two conflicting transactions spend
//! the same funding output.
//!
//! ## Responsibilities
//!
//! - Deduplicate proofs by identity (one record per proof id).
//! - Index proofs by the funding output they reference, so proofs arriving
//!   before their transaction ("orphans") can be matched later.
//! - Bound orphan memory under adversarial flooding with a watermark sweep
//!   that reaps oldest orphans first.
//! - Remember recently rejected ids cheaply in a block-relative Bloom filter
//!   so the relay layer never reprocesses them.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | One record per proof id | `domain/index.rs` - `insert()` uniqueness check |
//! | Orphan counter equals count of orphan-flagged records | `domain/store.rs` - all flag transitions go through `increment`/`decrement`; underflow is fatal |
//! | Orphan timestamp set once, on first orphan transition | `domain/store.rs` - `add_orphan_locked()` |
//! | Admitted record survives its own eviction sweep | `domain/store.rs` - `check_orphan_limit_locked()` protected id |
//! | All index access paths mutate together | `domain/index.rs` - single mutation path per operation, desync is fatal |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - ProofStoreApi trait (driving)           │
//! │  ports/outbound.rs - TimeSource trait + clocks (driven)      │
//! └──────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌──────────────────────────────────────────────────────────────┐
//! │  domain/store.rs         - DoubleSpendProofStore (the lock)  │
//! │  domain/index.rs         - ProofIndex (3 access paths)       │
//! │  domain/rejects.rs       - RecentRejectsFilter (Bloom)       │
//! │  domain/salted_hasher.rs - keyed SipHash buckets             │
//! │  domain/entities.rs      - ProofEntry, StoreConfig           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! One `parking_lot::Mutex` serializes every operation, queries included.
//! Critical sections are short, synchronous, and I/O-free; snapshots returned
//! to callers are independent copies with no aliasing back into the store.
//!
//! ## Out of Scope
//!
//! Proof contents and verification, proof wire serialization, peer scoring,
//! persistence, and the periodic age-based orphan cleanup loop (the store
//! only carries the `seconds_to_keep_orphans` configuration and per-record
//! timestamps that loop needs).
//!
//! ## Usage Example
//!
//! ```
//! use dsp_storage::DoubleSpendProofStore;
//! use shared_types::{DoubleSpendProof, OutPoint};
//!
//! let store = DoubleSpendProofStore::new();
//! let proof = DoubleSpendProof::new([0xAB; 32], OutPoint::new([0x01; 32], 0));
//!
//! // Proof arrived before its transaction: admit as orphan.
//! store.add_orphan(&proof, 7).unwrap();
//! assert_eq!(store.find_orphans(&proof.out_point()), vec![(proof.id(), 7)]);
//!
//! // The transaction showed up: match the proof to real context.
//! store.claim_orphan(&proof.id());
//! assert_eq!(store.num_orphans(), 0);
//! assert!(store.exists(&proof.id()));
//! ```

pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use domain::{
    DoubleSpendProofStore, ProofEntry, ProofIndex, RecentRejectsFilter, SaltedHasher,
    StoreConfig, StoreError,
};
pub use domain::{
    DEFAULT_MAX_ORPHANS, DEFAULT_REJECTS_CAPACITY, DEFAULT_REJECTS_FPR,
    DEFAULT_SECONDS_TO_KEEP_ORPHANS, UNSET_TIMESTAMP,
};
pub use ports::{MockTimeSource, ProofStoreApi, SystemTimeSource, TimeSource};
