//! # DSProof-Store Test Suite
//!
//! Unified test crate containing:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── store_lifecycle.rs  # Admission, demotion, claims, snapshots
//!     ├── eviction.rs         # Watermark sweep behavior under flooding
//!     └── concurrency.rs      # Cross-thread serialization invariants
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dsp-tests
//! cargo test -p dsp-tests integration::eviction
//! ```

#[cfg(test)]
mod integration;
