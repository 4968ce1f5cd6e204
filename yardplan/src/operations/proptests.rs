//! Property-based tests for operations module.
//!
//! These tests drive intake and checklist plans through the executor and
//! check the table invariants after every step.

use std::collections::HashSet;

use chrono::NaiveDate;
use proptest::prelude::*;

use super::{ChecklistPlan, ChecklistUpdate, IntakeOptions, IntakePlan, PlanExecutor};
use crate::auth::{OpenAccess, Session};
use crate::config::{Config, GridConfig};
use crate::slot::SlotId;
use crate::table::VehicleTable;
use crate::vehicle::{Status, VehicleId};
use crate::YardPlanner;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn config(rows: u32, columns: u32) -> Config {
    Config {
        grid: Some(GridConfig {
            rows: Some(rows),
            columns: Some(columns),
        }),
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        .. ProptestConfig::default()
    })]

    // Repeated intake fills the grid in row-major order, then reports exhaustion
    #[test]
    fn intake_fills_grid_in_order(rows in 1u32..=5, columns in 1u32..=6) {
        let config = config(rows, columns);
        let planner = YardPlanner::from_config(&config).unwrap();
        let session = Session::login(&OpenAccess, "yard", "").unwrap();
        let grid = config.grid().unwrap();
        let mut table = VehicleTable::new();

        for expected in grid.iter() {
            let plan = IntakePlan::new(IntakeOptions::new("Golf", "X", today()), &config)
                .build_plan(&table, today())
                .unwrap();
            let result = PlanExecutor::new(&mut table, &planner, &session)
                .execute(&plan)
                .unwrap();
            prop_assert_eq!(result.slot, Some(expected));
        }

        let err = IntakePlan::new(IntakeOptions::new("Golf", "X", today()), &config)
            .build_plan(&table, today())
            .unwrap_err();
        prop_assert!(err.is_exhausted());
        prop_assert_eq!(table.len(), grid.len());
    }

    // No two vehicles ever share a slot, whatever the preferred slots were
    #[test]
    fn slots_stay_unique(preferred in prop::collection::vec(prop::option::of((0u8..4, 1u32..=4)), 1..30)) {
        let config = config(4, 4);
        let planner = YardPlanner::from_config(&config).unwrap();
        let session = Session::login(&OpenAccess, "yard", "").unwrap();
        let mut table = VehicleTable::new();

        for choice in preferred {
            let slot = choice.map(|(row, column)| SlotId::new(char::from(b'A' + row), column).unwrap());
            let options = IntakeOptions::new("Golf", "X", today()).with_preferred_slot(slot);
            if let Ok(plan) = IntakePlan::new(options, &config).build_plan(&table, today()) {
                PlanExecutor::new(&mut table, &planner, &session).execute(&plan).unwrap();
            }
        }

        let mut seen = HashSet::new();
        for (_, vehicle) in table.iter() {
            let slot = vehicle.slot().unwrap();
            prop_assert!(seen.insert(slot));
        }
    }

    // After any checklist update the stored status matches the derived one
    #[test]
    fn status_follows_checklist(done in prop::collection::vec(any::<bool>(), 3)) {
        let config = Config::default();
        let planner = YardPlanner::from_config(&config).unwrap();
        let session = Session::login(&OpenAccess, "yard", "").unwrap();
        let checklist = config.checklist().unwrap();
        let mut table = VehicleTable::new();

        let plan = IntakePlan::new(IntakeOptions::new("Golf", "X", today()), &config)
            .build_plan(&table, today())
            .unwrap();
        PlanExecutor::new(&mut table, &planner, &session).execute(&plan).unwrap();

        let steps: Vec<&str> = checklist
            .names()
            .zip(&done)
            .filter(|(_, done)| **done)
            .map(|(name, _)| name)
            .collect();
        if !steps.is_empty() {
            let update = ChecklistUpdate::new(VehicleId(0)).with_done(steps.iter().copied());
            let plan = ChecklistPlan::new(update, &config).build_plan(&table, today()).unwrap();
            PlanExecutor::new(&mut table, &planner, &session).execute(&plan).unwrap();
        }

        let vehicle = table.get(VehicleId(0)).unwrap();
        prop_assert_eq!(vehicle.status(), checklist.derive_status(vehicle.steps()));
        prop_assert_eq!(vehicle.scheduled_day().is_none(), vehicle.status() == Status::Done);
    }
}
