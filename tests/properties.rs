use std::collections::BTreeSet;

use mem_sim::replacement::{LruFrames, PageReplacer};
use mem_sim::{allocate, segments_from_sizes, simulate, simulate_fifo, simulate_lru, Placement, Policy};
use proptest::prelude::*;

fn references() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..8, 0..40)
}

proptest! {
    #[test]
    fn prop_history_matches_reference_length(refs in references(), frames in 1i64..6) {
        for policy in Policy::ALL {
            let sim = simulate(policy, &refs, frames);
            prop_assert_eq!(sim.history.len(), refs.len());
            for (snapshot, &page) in sim.history.iter().zip(&refs) {
                prop_assert!(snapshot.len() <= frames as usize);
                prop_assert!(snapshot.contains(page));
                let unique: BTreeSet<i64> = snapshot.iter().copied().collect();
                prop_assert_eq!(unique.len(), snapshot.len());
            }
        }
    }

    #[test]
    fn prop_fifo_faults_count_composition_changes(
        refs in prop::collection::vec(0i64..8, 1..40),
        frames in 1i64..6,
    ) {
        let sim = simulate_fifo(&refs, frames);
        prop_assert!(sim.faults >= 1 && sim.faults <= refs.len());

        let mut previous = BTreeSet::new();
        let mut changes = 0;
        for snapshot in &sim.history {
            let current: BTreeSet<i64> = snapshot.iter().copied().collect();
            if current != previous {
                changes += 1;
            }
            previous = current;
        }
        prop_assert_eq!(sim.faults, changes);
    }

    #[test]
    fn prop_enough_frames_faults_once_per_page(refs in references()) {
        let distinct: BTreeSet<i64> = refs.iter().copied().collect();
        let frames = distinct.len().max(1) as i64;
        for policy in Policy::ALL {
            let sim = simulate(policy, &refs, frames);
            prop_assert_eq!(sim.faults, distinct.len());
        }
    }

    #[test]
    fn prop_lru_is_deterministic(refs in references(), frames in 1i64..6) {
        prop_assert_eq!(simulate_lru(&refs, frames), simulate_lru(&refs, frames));
    }

    #[test]
    fn prop_lru_counters_age_by_one(refs in references(), frames in 1i64..6) {
        let mut lru = LruFrames::new(frames);
        for &page in &refs {
            let before = lru.staleness().to_vec();
            lru.access(page);
            let after = lru.staleness();
            let slot = lru.snapshot().iter().position(|&p| p == page).unwrap();

            prop_assert_eq!(after[slot], 1);
            for (k, &ticks) in before.iter().enumerate() {
                if k != slot {
                    prop_assert_eq!(after[k], ticks + 1);
                }
            }
        }
    }

    #[test]
    fn prop_no_frames_means_every_access_faults(refs in references(), frames in -3i64..=0) {
        for policy in Policy::ALL {
            let sim = simulate(policy, &refs, frames);
            prop_assert_eq!(sim.faults, refs.len());
            prop_assert!(sim.history.iter().all(|s| s.is_empty()));
        }
    }

    #[test]
    fn prop_allocated_segments_are_packed(
        sizes in prop::collection::vec(0i64..50, 0..20),
        memory_size in 0i64..200,
    ) {
        let mut segments = segments_from_sizes(&sizes);
        let allocation = allocate(&mut segments, memory_size);
        prop_assert_eq!(allocation.len(), sizes.len());

        // Unallocated segments leave the cursor where it was
        let mut cursor = 0;
        for segment in &segments {
            let placement = allocation.get(segment.id).unwrap();
            prop_assert_eq!(segment.placement, Some(placement));
            match placement {
                Placement::Base(base) => {
                    prop_assert_eq!(base, cursor);
                    cursor += segment.size;
                    prop_assert!(cursor <= memory_size);
                }
                Placement::Unallocated => {
                    prop_assert!(cursor + segment.size > memory_size);
                }
            }
        }
    }
}

#[test]
fn test_lru_can_fault_more_than_fifo() {
    // 4 evicts 1 under FIFO but 2 under LRU, and 2 comes back next
    let refs = [1, 2, 1, 3, 4, 2];
    assert_eq!(simulate_fifo(&refs, 3).faults, 4);
    assert_eq!(simulate_lru(&refs, 3).faults, 5);
}
