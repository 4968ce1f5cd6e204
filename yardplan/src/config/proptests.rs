//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, GridConfig, StaffingConfig};
use crate::planner::StatusPolicy;
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = GridConfig> {
    (
        prop::option::of(1u32..=26),
        prop::option::of(1u32..=20),
    )
        .prop_map(|(rows, columns)| GridConfig { rows, columns })
}

fn staffing_strategy() -> impl Strategy<Value = StaffingConfig> {
    (prop::option::of(1u32..=10), prop::option::of(1u32..=12)).prop_map(
        |(headcount, hours)| StaffingConfig {
            headcount,
            hours_per_person: hours.map(f64::from),
        },
    )
}

fn policy_strategy() -> impl Strategy<Value = StatusPolicy> {
    prop_oneof![Just(StatusPolicy::Derived), Just(StatusPolicy::PreserveManual)]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(grid_strategy()),
        prop::option::of(staffing_strategy()),
        prop::option::of(prop::collection::vec("[A-Z][a-z]{2,8}", 0..4)),
        prop::option::of(policy_strategy()),
    )
        .prop_map(|(grid, staffing, models, status_policy)| Config {
            grid,
            staffing,
            models,
            status_policy,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Values set by the higher layer always win
    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        if high.models.is_some() {
            prop_assert_eq!(&merged.models, &high.models);
        } else {
            prop_assert_eq!(&merged.models, &low.models);
        }
        if high.status_policy.is_some() {
            prop_assert_eq!(merged.status_policy, high.status_policy);
        } else {
            prop_assert_eq!(merged.status_policy, low.status_policy);
        }

        let rows = high.grid.as_ref().and_then(|g| g.rows)
            .or(low.grid.as_ref().and_then(|g| g.rows));
        prop_assert_eq!(merged.grid.as_ref().and_then(|g| g.rows), rows);
    }

    // Merging with an empty layer changes nothing
    #[test]
    fn empty_layer_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging a layer twice is the same as merging it once
    #[test]
    fn merge_is_idempotent(low in config_strategy(), high in config_strategy()) {
        let mut once = low.clone();
        ConfigMerger::merge_into(&mut once, &high);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &high);
        prop_assert_eq!(once, twice);
    }
}
