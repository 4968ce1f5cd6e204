//! The recomputation pass over the vehicle table.
//!
//! Every change to the table is followed by one full pass: statuses are
//! derived from the checklist again and all open vehicles are re-planned
//! from today onwards. Nothing is pinned; a plan made yesterday carries no
//! weight today.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checklist::{Checklist, ChecklistProgress};
use crate::config::Config;
use crate::error::Result;
use crate::schedule::{DailyCapacity, DayPlan, DayScheduler, WorkItem};
use crate::table::VehicleTable;
use crate::vehicle::{Status, Vehicle, VehicleId};

/// How a recomputation pass treats statuses set by hand.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum StatusPolicy {
    /// The derived status always wins.
    #[default]
    Derived,
    /// A manual status stays until the checklist of that vehicle changes.
    PreserveManual,
}

impl fmt::Display for StatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Derived => write!(f, "derived"),
            Self::PreserveManual => write!(f, "preserve-manual"),
        }
    }
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "derived" => Ok(Self::Derived),
            "preserve-manual" | "preserve_manual" => Ok(Self::PreserveManual),
            _ => Err(format!(
                "invalid status policy '{s}' (expected derived or preserve-manual)"
            )),
        }
    }
}

/// What a recomputation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecomputeSummary {
    /// Records whose status changed.
    pub status_changes: usize,
    /// Records that received a scheduled day.
    pub scheduled: usize,
    /// Number of distinct planned days.
    pub days: usize,
    /// Last planned day, if anything is open.
    pub last_day: Option<NaiveDate>,
}

/// Runs status derivation and day planning over a table.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yardplan::schedule::DailyCapacity;
/// use yardplan::{Checklist, ChecklistStep, Status, StatusPolicy, Vehicle, VehicleTable, YardPlanner};
///
/// let checklist = Checklist::new(vec![
///     ChecklistStep::new("Drain oil", 1.0),
///     ChecklistStep::new("Remove battery", 1.0),
/// ])
/// .unwrap();
/// let planner = YardPlanner::new(checklist, DailyCapacity::new(8.0).unwrap(), StatusPolicy::Derived);
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let mut table = VehicleTable::new();
/// let mut vehicle = Vehicle::builder("Golf", "B-1", today).build().unwrap();
/// vehicle.set_step("Drain oil", true);
/// let id = table.push(vehicle);
///
/// planner.recompute(&mut table, today).unwrap();
/// let vehicle = table.get(id).unwrap();
/// assert_eq!(vehicle.status(), Status::InProgress);
/// assert_eq!(vehicle.scheduled_day(), Some(today));
/// ```
#[derive(Debug, Clone)]
pub struct YardPlanner {
    checklist: Checklist,
    scheduler: DayScheduler,
    policy: StatusPolicy,
}

impl YardPlanner {
    /// Creates a planner.
    #[must_use]
    pub fn new(checklist: Checklist, capacity: DailyCapacity, policy: StatusPolicy) -> Self {
        Self {
            checklist,
            scheduler: DayScheduler::new(capacity),
            policy,
        }
    }

    /// Creates a planner from the checklist, staffing and status policy
    /// of a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the checklist or daily capacity is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.checklist()?,
            config.daily_capacity()?,
            config.status_policy(),
        ))
    }

    /// Returns the checklist.
    #[must_use]
    pub const fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Returns the daily capacity.
    #[must_use]
    pub const fn capacity(&self) -> DailyCapacity {
        self.scheduler.capacity()
    }

    /// Returns the status policy.
    #[must_use]
    pub const fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Checklist progress of one vehicle.
    #[must_use]
    pub fn progress(&self, vehicle: &Vehicle) -> ChecklistProgress {
        self.checklist.progress(vehicle.steps())
    }

    /// Status the vehicle ends up with after a pass.
    #[must_use]
    pub fn effective_status(&self, vehicle: &Vehicle) -> Status {
        match self.policy {
            StatusPolicy::PreserveManual if vehicle.has_status_override() => vehicle.status(),
            _ => self.checklist.derive_status(vehicle.steps()),
        }
    }

    /// Open work of the table in table order.
    ///
    /// Vehicles whose effective status is `done` have nothing left to plan.
    #[must_use]
    pub fn open_items(&self, table: &VehicleTable) -> Vec<WorkItem<VehicleId>> {
        table
            .iter()
            .filter(|(_, v)| self.effective_status(v) != Status::Done)
            .map(|(id, v)| WorkItem::new(id, self.checklist.remaining_hours(v.steps())))
            .collect()
    }

    /// Plans the open work of the table from `today`, without changing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan runs past the end of the calendar.
    pub fn day_plan(&self, table: &VehicleTable, today: NaiveDate) -> Result<DayPlan<VehicleId>> {
        self.scheduler.plan(&self.open_items(table), today)
    }

    /// Runs one full recomputation pass.
    ///
    /// Statuses are derived (or kept, under
    /// [`StatusPolicy::PreserveManual`]), every open vehicle gets a fresh
    /// scheduled day and `done` vehicles lose theirs.
    ///
    /// # Errors
    ///
    /// Returns an error if planning fails; the table is left untouched then.
    pub fn recompute(&self, table: &mut VehicleTable, today: NaiveDate) -> Result<RecomputeSummary> {
        let plan = self.day_plan(table, today)?;
        let assignments = plan.assignments();

        let mut summary = RecomputeSummary {
            days: plan.days().len(),
            last_day: plan.last_day(),
            ..RecomputeSummary::default()
        };

        for (id, vehicle) in table.iter_mut() {
            let before = vehicle.status();
            let keep_manual =
                self.policy == StatusPolicy::PreserveManual && vehicle.has_status_override();
            if !keep_manual {
                vehicle.set_derived_status(self.checklist.derive_status(vehicle.steps()));
            }
            if vehicle.status() != before {
                summary.status_changes += 1;
            }

            let day = assignments.get(&id).copied();
            if day.is_some() {
                summary.scheduled += 1;
            }
            vehicle.set_scheduled_day(day);
        }

        log::debug!(
            "recomputed {} vehicles: {} status changes, {} scheduled over {} days",
            table.len(),
            summary.status_changes,
            summary.scheduled,
            summary.days
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::ChecklistStep;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn checklist() -> Checklist {
        Checklist::new(vec![
            ChecklistStep::new("Drain fluids", 2.0),
            ChecklistStep::new("Remove engine", 3.0),
        ])
        .unwrap()
    }

    fn planner(capacity: f64, policy: StatusPolicy) -> YardPlanner {
        YardPlanner::new(checklist(), DailyCapacity::new(capacity).unwrap(), policy)
    }

    fn vehicle(done: &[&str]) -> Vehicle {
        let mut v = Vehicle::builder("Passat", "X", day(1)).build().unwrap();
        for step in done {
            v.set_step(*step, true);
        }
        v
    }

    #[test]
    fn test_recompute_derives_status_and_days() {
        let mut table = VehicleTable::new();
        let a = table.push(vehicle(&[]));
        let b = table.push(vehicle(&["Drain fluids"]));
        let c = table.push(vehicle(&["Drain fluids", "Remove engine"]));

        let summary = planner(5.0, StatusPolicy::Derived)
            .recompute(&mut table, day(10))
            .unwrap();

        assert_eq!(table.get(a).unwrap().status(), Status::Arrived);
        assert_eq!(table.get(b).unwrap().status(), Status::InProgress);
        assert_eq!(table.get(c).unwrap().status(), Status::Done);

        assert_eq!(table.get(a).unwrap().scheduled_day(), Some(day(10)));
        assert_eq!(table.get(b).unwrap().scheduled_day(), Some(day(11)));
        assert_eq!(table.get(c).unwrap().scheduled_day(), None);

        assert_eq!(summary.status_changes, 2);
        assert_eq!(summary.scheduled, 2);
        assert_eq!(summary.days, 2);
        assert_eq!(summary.last_day, Some(day(11)));
    }

    #[test]
    fn test_recompute_clears_day_of_done_vehicle() {
        let mut table = VehicleTable::new();
        let id = table.push(vehicle(&[]));
        let planner = planner(8.0, StatusPolicy::Derived);
        planner.recompute(&mut table, day(3)).unwrap();
        assert!(table.get(id).unwrap().scheduled_day().is_some());

        let v = table.get_mut(id).unwrap();
        v.set_step("Drain fluids", true);
        v.set_step("Remove engine", true);
        planner.recompute(&mut table, day(3)).unwrap();
        assert_eq!(table.get(id).unwrap().scheduled_day(), None);
    }

    #[test]
    fn test_derived_policy_overwrites_manual_status() {
        let mut table = VehicleTable::new();
        let id = table.push(vehicle(&[]));
        table.get_mut(id).unwrap().set_manual_status(Status::Done);

        planner(8.0, StatusPolicy::Derived)
            .recompute(&mut table, day(3))
            .unwrap();
        let v = table.get(id).unwrap();
        assert_eq!(v.status(), Status::Arrived);
        assert!(!v.has_status_override());
    }

    #[test]
    fn test_preserve_manual_keeps_override() {
        let mut table = VehicleTable::new();
        let id = table.push(vehicle(&[]));
        table.get_mut(id).unwrap().set_manual_status(Status::Done);

        let planner = planner(8.0, StatusPolicy::PreserveManual);
        planner.recompute(&mut table, day(3)).unwrap();
        let v = table.get(id).unwrap();
        assert_eq!(v.status(), Status::Done);
        assert!(v.has_status_override());
        assert_eq!(v.scheduled_day(), None);

        // touching the checklist hands the status back to derivation
        table.get_mut(id).unwrap().set_step("Drain fluids", true);
        planner.recompute(&mut table, day(3)).unwrap();
        assert_eq!(table.get(id).unwrap().status(), Status::InProgress);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut table = VehicleTable::new();
        for _ in 0..5 {
            table.push(vehicle(&["Drain fluids"]));
        }
        let planner = planner(7.0, StatusPolicy::Derived);
        planner.recompute(&mut table, day(1)).unwrap();
        let snapshot = table.clone();
        let summary = planner.recompute(&mut table, day(1)).unwrap();
        assert_eq!(table, snapshot);
        assert_eq!(summary.status_changes, 0);
    }

    #[test]
    fn test_empty_table() {
        let mut table = VehicleTable::new();
        let summary = planner(8.0, StatusPolicy::Derived)
            .recompute(&mut table, day(1))
            .unwrap();
        assert_eq!(summary, RecomputeSummary::default());
    }

    #[test]
    fn test_status_policy_parse() {
        assert_eq!("derived".parse::<StatusPolicy>().unwrap(), StatusPolicy::Derived);
        assert_eq!(
            "Preserve-Manual".parse::<StatusPolicy>().unwrap(),
            StatusPolicy::PreserveManual
        );
        assert!("sometimes".parse::<StatusPolicy>().is_err());
        assert_eq!(StatusPolicy::PreserveManual.to_string(), "preserve-manual");
    }
}
