//! Integration tests for the full yard workflow.
//!
//! Each test runs operations the way the command line does: load the table
//! file, plan, execute, save. The scenarios cover slot allocation, status
//! derivation and day planning working together.

mod common;

use common::{grid_config, today, TestYard};
use yardplan::config::{Config, StaffingConfig};
use yardplan::operations::{RecomputePlan, RelocatePlan, StatusPlan};
use yardplan::{ChecklistStep, Error, Status, StatusPolicy, VehicleId};

#[test]
fn test_intake_assigns_slots_in_row_major_order() {
    let yard = TestYard::new();
    let slots: Vec<String> = (0..6)
        .map(|i| {
            yard.intake("Golf", &format!("B-{i}"))
                .unwrap()
                .slot
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(slots, ["A1", "A2", "A3", "A4", "B1", "B2"]);
    assert_eq!(yard.table().len(), 6);
}

#[test]
fn test_intake_into_full_grid_saves_nothing() {
    let yard = TestYard::with_config(grid_config(1, 2));
    yard.intake("Golf", "B-1").unwrap();
    yard.intake("Polo", "B-2").unwrap();
    let before = yard.read_table();

    let err = yard.intake("Passat", "B-3").unwrap_err();
    assert!(err.is_exhausted());
    assert!(matches!(err, Error::SlotsExhausted { .. }));
    assert_eq!(yard.read_table(), before);
}

#[test]
fn test_freed_gap_is_reused() {
    let yard = TestYard::new();
    for plate in ["B-1", "B-2", "B-3"] {
        yard.intake("Golf", plate).unwrap();
    }

    let plan = RelocatePlan::new(VehicleId(0), Some("D4".parse().unwrap()), &yard.config)
        .build_plan(&yard.table(), today())
        .unwrap();
    yard.apply(&plan).unwrap();

    let result = yard.intake("Polo", "B-4").unwrap();
    assert_eq!(result.slot.unwrap().to_string(), "A1");
}

#[test]
fn test_checklist_drives_status_and_schedule() {
    let yard = TestYard::new();
    yard.intake("Golf", "B-1").unwrap();

    yard.check(VehicleId(0), &["Drain oil"]).unwrap();
    let table = yard.table();
    let vehicle = table.get(VehicleId(0)).unwrap();
    assert_eq!(vehicle.status(), Status::InProgress);
    assert_eq!(vehicle.scheduled_day(), Some(today()));

    let progress = yard.planner.progress(vehicle);
    assert_eq!(progress.open_display(), "Remove battery, Remove wheels");
    assert_eq!(progress.done_display(), "Drain oil");

    yard.check(VehicleId(0), &["Remove battery", "Remove wheels"])
        .unwrap();
    let table = yard.table();
    let vehicle = table.get(VehicleId(0)).unwrap();
    assert_eq!(vehicle.status(), Status::Done);
    assert_eq!(vehicle.scheduled_day(), None);
}

#[test]
fn test_day_plan_spills_over_capacity() {
    let config = Config {
        checklist: Some(vec![ChecklistStep::new("Strip", 5.0)]),
        staffing: Some(StaffingConfig {
            headcount: Some(1),
            hours_per_person: Some(7.0),
        }),
        ..Default::default()
    };
    let yard = TestYard::with_config(config);
    for plate in ["V1", "V2", "V3"] {
        yard.intake("Golf", plate).unwrap();
    }

    let table = yard.table();
    let day1 = today().succ_opt().unwrap();
    let day2 = day1.succ_opt().unwrap();
    let days: Vec<_> = table.iter().map(|(_, v)| v.scheduled_day()).collect();
    assert_eq!(days, [Some(today()), Some(day1), Some(day2)]);
    assert_eq!(table.scheduled_on(day1).len(), 1);
}

#[test]
fn test_recompute_plan_catches_up_stale_days() {
    let yard = TestYard::new();
    yard.intake("Golf", "B-1").unwrap();

    let later = today().succ_opt().unwrap();
    let result = yard.apply(&RecomputePlan::new(later).build_plan()).unwrap();
    assert_eq!(result.summary.unwrap().last_day, Some(later));
    assert_eq!(
        yard.table().get(VehicleId(0)).unwrap().scheduled_day(),
        Some(later)
    );
}

#[test]
fn test_manual_status_under_each_policy() {
    let yard = TestYard::new();
    yard.intake("Golf", "B-1").unwrap();
    let err = StatusPlan::new(VehicleId(0), Status::Done, &yard.config)
        .build_plan(&yard.table(), today())
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    let yard = TestYard::with_config(Config {
        status_policy: Some(StatusPolicy::PreserveManual),
        ..Default::default()
    });
    yard.intake("Golf", "B-1").unwrap();
    let plan = StatusPlan::new(VehicleId(0), Status::Done, &yard.config)
        .build_plan(&yard.table(), today())
        .unwrap();
    yard.apply(&plan).unwrap();

    let vehicle = yard.table().get(VehicleId(0)).unwrap().clone();
    assert_eq!(vehicle.status(), Status::Done);
    assert!(vehicle.has_status_override());

    // ticking a step hands the status back to the checklist
    yard.check(VehicleId(0), &["Drain oil"]).unwrap();
    let vehicle = yard.table().get(VehicleId(0)).unwrap().clone();
    assert_eq!(vehicle.status(), Status::InProgress);
    assert!(!vehicle.has_status_override());
}

#[test]
fn test_model_list_is_enforced() {
    let yard = TestYard::with_config(Config {
        models: Some(vec!["Golf".into(), "Polo".into()]),
        ..Default::default()
    });
    yard.intake("polo", "B-1").unwrap();
    assert_eq!(yard.table().get(VehicleId(0)).unwrap().model(), "Polo");

    assert!(matches!(
        yard.intake("Trabant", "B-2"),
        Err(Error::Validation { .. })
    ));
    assert_eq!(yard.table().len(), 1);
}
