//! Property-based tests for the day scheduler.
//!
//! Costs are generated as whole or half hours so that sums are exact and
//! the capacity comparisons below do not depend on float rounding.

use super::{DailyCapacity, DayScheduler, WorkItem};
use chrono::NaiveDate;
use proptest::prelude::*;

fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Strategy for a list of work items with half-hour granular costs.
fn items_strategy() -> impl Strategy<Value = Vec<WorkItem<usize>>> {
    prop::collection::vec(0u32..=40, 0..60).prop_map(|costs| {
        costs
            .into_iter()
            .enumerate()
            .map(|(id, halves)| WorkItem::new(id, f64::from(halves) / 2.0))
            .collect()
    })
}

fn capacity_strategy() -> impl Strategy<Value = DailyCapacity> {
    (1u32..=24).prop_map(|hours| DailyCapacity::new(f64::from(hours)).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every item is scheduled exactly once
    #[test]
    fn every_item_scheduled(items in items_strategy(), capacity in capacity_strategy()) {
        let result = DayScheduler::new(capacity).schedule(&items, start_day()).unwrap();
        prop_assert_eq!(result.len(), items.len());
    }

    // Nothing lands before the start day
    #[test]
    fn never_before_start(items in items_strategy(), capacity in capacity_strategy()) {
        let result = DayScheduler::new(capacity).schedule(&items, start_day()).unwrap();
        for day in result.values() {
            prop_assert!(*day >= start_day());
        }
    }

    // A day only exceeds capacity when it holds a single costed item
    #[test]
    fn load_within_capacity(items in items_strategy(), capacity in capacity_strategy()) {
        let plan = DayScheduler::new(capacity).plan(&items, start_day()).unwrap();
        for bucket in plan.days() {
            if bucket.load_hours() > capacity.hours() {
                let costed = bucket
                    .items()
                    .iter()
                    .filter(|id| items[**id].remaining_hours > 0.0)
                    .count();
                prop_assert_eq!(costed, 1);
            }
        }
    }

    // Days are consecutive and item order is never rearranged
    #[test]
    fn days_follow_input_order(items in items_strategy(), capacity in capacity_strategy()) {
        let result = DayScheduler::new(capacity).schedule(&items, start_day()).unwrap();
        let days: Vec<NaiveDate> = items.iter().map(|item| result[&item.id]).collect();
        for pair in days.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
            prop_assert!(pair[1] <= pair[0].succ_opt().unwrap());
        }
    }

    // Re-running with the same inputs gives the same mapping
    #[test]
    fn scheduling_is_idempotent(items in items_strategy(), capacity in capacity_strategy()) {
        let scheduler = DayScheduler::new(capacity);
        let first = scheduler.schedule(&items, start_day()).unwrap();
        let second = scheduler.schedule(&items, start_day()).unwrap();
        prop_assert_eq!(first, second);
    }

    // No work is lost or invented
    #[test]
    fn total_load_preserved(items in items_strategy(), capacity in capacity_strategy()) {
        let plan = DayScheduler::new(capacity).plan(&items, start_day()).unwrap();
        let expected: f64 = items.iter().map(|i| i.remaining_hours).sum();
        prop_assert!((plan.total_hours() - expected).abs() < 1e-9);
    }
}
