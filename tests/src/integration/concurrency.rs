//! Cross-thread serialization tests.
//!
//! The store promises that any operation may be called from any thread and
//! that all of them serialize through one lock. These tests hammer the
//! public surface from several threads and then check the invariants that
//! would break first if the lock discipline or the counter accounting were
//! wrong.

use std::sync::Arc;
use std::thread;

use super::{id, proof};
use dsp_storage::{DoubleSpendProofStore, MockTimeSource, StoreConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn concurrent_mixed_operations_keep_counter_and_flags_agreeing() {
    let clock = Arc::new(MockTimeSource::new(1_000));
    let store = Arc::new(DoubleSpendProofStore::with_clock(
        StoreConfig {
            max_orphans: 32,
            ..StoreConfig::default()
        },
        clock.clone(),
    ));

    let mut handles = Vec::new();
    for t in 0..8u64 {
        let store = Arc::clone(&store);
        let clock = Arc::clone(&clock);
        handles.push(thread::spawn(move || {
            let mut rng = StdRng::seed_from_u64(t);
            for _ in 0..500 {
                let seed = rng.gen_range(0..64u32);
                match rng.gen_range(0..5u8) {
                    0 => {
                        let _ = store.add(&proof(seed)).unwrap();
                    }
                    1 | 2 => {
                        store.add_orphan(&proof(seed), t as i64).unwrap();
                        clock.advance(1);
                    }
                    3 => store.claim_orphan(&id(seed)),
                    _ => {
                        let _ = store.remove(&id(seed));
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker thread must not panic");
    }

    let flagged = store
        .get_all(true)
        .into_iter()
        .filter(|(_, orphan)| *orphan)
        .count();
    assert_eq!(
        store.num_orphans(),
        flagged,
        "counter must equal the number of orphan-flagged records"
    );
    assert!(store.num_orphans() <= 32 + 32 / 4);
    assert!(store.len() <= 64, "at most one record per distinct id");
}

#[test]
fn concurrent_readers_see_consistent_snapshots() {
    let store = Arc::new(DoubleSpendProofStore::new());
    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for seed in 0..2_000u32 {
                store.add_orphan(&proof(seed), 1).unwrap();
            }
        })
    };
    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..200 {
                // every snapshot must internally agree, whatever instant the
                // lock was held at
                let flagged = store
                    .get_all(true)
                    .into_iter()
                    .filter(|(_, orphan)| *orphan)
                    .count();
                assert!(flagged <= store.len());
            }
        })
    };
    writer.join().expect("writer must not panic");
    reader.join().expect("reader must not panic");

    let flagged = store
        .get_all(true)
        .into_iter()
        .filter(|(_, orphan)| *orphan)
        .count();
    assert_eq!(store.num_orphans(), flagged);
}

#[test]
fn concurrent_rejection_marks_are_never_lost() {
    let store = Arc::new(DoubleSpendProofStore::new());
    let mut handles = Vec::new();
    for t in 0..4u32 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for seed in (t * 100)..(t * 100 + 100) {
                store.mark_rejected(&id(seed));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("marker thread must not panic");
    }
    for seed in 0..400u32 {
        assert!(
            store.is_recently_rejected(&id(seed)),
            "no false negatives for a marked, not-yet-reset id"
        );
    }
}
