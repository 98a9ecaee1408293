//! # Domain Layer - Proof Storage Subsystem
//!
//! Pure in-memory logic, no I/O.
//!
//! ## Components
//!
//! - `entities`: ProofEntry record, StoreConfig, sentinels and defaults
//! - `salted_hasher`: keyed SipHash bucket function for the index maps
//! - `rejects`: RecentRejectsFilter, block-relative Bloom filter
//! - `index`: ProofIndex, the multi-keyed record index
//! - `store`: DoubleSpendProofStore, the lock-owning composition root
//! - `errors`: StoreError enumeration (caller errors only)

pub mod entities;
pub mod errors;
pub mod index;
pub mod rejects;
pub mod salted_hasher;
pub mod store;

pub use entities::*;
pub use errors::*;
pub use index::*;
pub use rejects::*;
pub use salted_hasher::*;
pub use store::*;
