//! Property-based tests for slot allocation.
//!
//! These verify the allocator's contract over arbitrary grids and
//! occupancy patterns rather than hand-picked cases.

use std::collections::HashSet;

use proptest::prelude::*;

use super::allocator::{AllocationResult, SlotAllocator};
use super::grid::{SlotGrid, SlotId};

/// Strategy for a grid together with a random subset of its slots.
fn grid_and_occupancy() -> impl Strategy<Value = (SlotGrid, HashSet<SlotId>)> {
    (1u32..=6, 1u32..=10).prop_flat_map(|(rows, columns)| {
        let grid = SlotGrid::new(rows, columns).unwrap();
        let slots: Vec<SlotId> = grid.iter().collect();
        let len = slots.len();
        proptest::sample::subsequence(slots, 0..=len)
            .prop_map(move |occupied| (grid, occupied.into_iter().collect()))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A partially occupied grid always yields a free slot
    #[test]
    fn allocated_slot_is_free((grid, occupied) in grid_and_occupancy()) {
        let result = SlotAllocator::new(grid).allocate(&occupied);
        if occupied.len() < grid.len() {
            let slot = result.slot().expect("grid has room");
            prop_assert!(!occupied.contains(&slot));
            prop_assert!(grid.contains(slot));
        } else {
            prop_assert_eq!(result, AllocationResult::Exhausted);
        }
    }

    // The allocated slot is the first free one in row-major order
    #[test]
    fn allocated_slot_is_first_free((grid, occupied) in grid_and_occupancy()) {
        if let AllocationResult::Allocated(slot) = SlotAllocator::new(grid).allocate(&occupied) {
            for earlier in grid.iter().take_while(|s| *s < slot) {
                prop_assert!(occupied.contains(&earlier));
            }
        }
    }

    // free_slots and allocate agree
    #[test]
    fn free_slots_head_matches_allocation((grid, occupied) in grid_and_occupancy()) {
        let allocator = SlotAllocator::new(grid);
        let free = allocator.free_slots(&occupied);
        prop_assert_eq!(free.len(), grid.len() - occupied.len());
        prop_assert_eq!(free.first().copied(), allocator.allocate(&occupied).slot());
    }

    // Slot text always parses back to the same slot
    #[test]
    fn slot_text_roundtrip(row in 0u8..26, column in 1u32..=999) {
        let slot = SlotId::new(char::from(b'A' + row), column).unwrap();
        let parsed: SlotId = slot.to_string().parse().unwrap();
        prop_assert_eq!(parsed, slot);
    }
}
