//! Plans that change existing vehicle records.
//!
//! Checklist updates, manual status changes, relocation and the bare
//! recomputation pass. Every plan ends with a recompute so statuses and
//! scheduled days never go stale after a change.

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::planner::StatusPolicy;
use crate::slot::{AllocationOptions, SlotAllocator, SlotId};
use crate::table::VehicleTable;
use crate::vehicle::{Status, VehicleId};

use super::plan::{OperationPlan, PlanAction};

/// Options for a checklist update.
#[derive(Debug, Clone)]
pub struct ChecklistUpdate {
    /// The vehicle to update.
    pub vehicle: VehicleId,

    /// Step names to mark done.
    pub done: Vec<String>,

    /// Step names to mark open again.
    pub undone: Vec<String>,
}

impl ChecklistUpdate {
    /// Creates an empty update for `vehicle`.
    #[must_use]
    pub const fn new(vehicle: VehicleId) -> Self {
        Self {
            vehicle,
            done: Vec::new(),
            undone: Vec::new(),
        }
    }

    /// Adds steps to mark done.
    #[must_use]
    pub fn with_done<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.done.extend(steps.into_iter().map(Into::into));
        self
    }

    /// Adds steps to mark open.
    #[must_use]
    pub fn with_undone<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.undone.extend(steps.into_iter().map(Into::into));
        self
    }
}

/// A checklist update plan generator.
pub struct ChecklistPlan<'a> {
    update: ChecklistUpdate,
    config: &'a Config,
}

impl<'a> ChecklistPlan<'a> {
    /// Creates a new checklist plan.
    #[must_use]
    pub const fn new(update: ChecklistUpdate, config: &'a Config) -> Self {
        Self { update, config }
    }

    /// Builds the plan.
    ///
    /// Steps already in the requested state produce no action. A step named
    /// both done and open ends up open.
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle does not exist, a step is not part of
    /// the configured checklist, or nothing was requested.
    pub fn build_plan(&self, table: &VehicleTable, today: NaiveDate) -> Result<OperationPlan> {
        let vehicle = table.require(self.update.vehicle)?;
        let checklist = self.config.checklist()?;

        if self.update.done.is_empty() && self.update.undone.is_empty() {
            return Err(Error::Validation {
                field: "steps".into(),
                message: "no steps given to mark done or open".into(),
            });
        }

        let mut plan = OperationPlan::new(format!(
            "Update checklist of vehicle {}",
            self.update.vehicle
        ));

        let requests = self
            .update
            .done
            .iter()
            .map(|s| (s, true))
            .chain(self.update.undone.iter().map(|s| (s, false)));

        let mut last: Vec<(String, bool)> = Vec::new();
        for (name, done) in requests {
            let step = checklist.require_step(name)?.name.clone();
            last.retain(|(existing, _)| *existing != step);
            last.push((step, done));
        }

        for (step, done) in last {
            if vehicle.is_step_done(&step) == done {
                let state = if done { "done" } else { "open" };
                plan = plan.add_warning(format!("'{step}' is already {state}"));
                continue;
            }
            plan = plan.add_action(PlanAction::SetStep {
                vehicle: self.update.vehicle,
                step,
                done,
            });
        }

        if vehicle.has_status_override() && plan.actions.iter().any(PlanAction::is_mutation) {
            if self.config.status_policy() == StatusPolicy::Derived {
                plan = plan.add_warning(format!(
                    "manual status '{}' of vehicle {} is replaced by the derived one",
                    vehicle.status(),
                    self.update.vehicle
                ));
            }
        }

        Ok(plan.add_action(PlanAction::Recompute { today }))
    }
}

/// A manual status plan generator.
///
/// Only meaningful when manual statuses survive recomputation.
pub struct StatusPlan<'a> {
    vehicle: VehicleId,
    status: Status,
    config: &'a Config,
}

impl<'a> StatusPlan<'a> {
    /// Creates a new status plan.
    #[must_use]
    pub const fn new(vehicle: VehicleId, status: Status, config: &'a Config) -> Self {
        Self {
            vehicle,
            status,
            config,
        }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle does not exist or the status policy
    /// derives every status from the checklist.
    pub fn build_plan(&self, table: &VehicleTable, today: NaiveDate) -> Result<OperationPlan> {
        table.require(self.vehicle)?;

        if self.config.status_policy() != StatusPolicy::PreserveManual {
            return Err(Error::Validation {
                field: "status_policy".into(),
                message: format!(
                    "statuses are derived from the checklist; set status_policy to '{}' to set them by hand",
                    StatusPolicy::PreserveManual
                ),
            });
        }

        Ok(OperationPlan::new(format!(
            "Set status of vehicle {} to {}",
            self.vehicle, self.status
        ))
        .add_action(PlanAction::SetStatus {
            vehicle: self.vehicle,
            status: self.status,
        })
        .add_action(PlanAction::Recompute { today }))
    }
}

/// A relocation plan generator.
pub struct RelocatePlan<'a> {
    vehicle: VehicleId,
    target: Option<SlotId>,
    config: &'a Config,
}

impl<'a> RelocatePlan<'a> {
    /// Creates a relocation plan. Without a target the vehicle moves to
    /// the first free slot.
    #[must_use]
    pub const fn new(vehicle: VehicleId, target: Option<SlotId>, config: &'a Config) -> Self {
        Self {
            vehicle,
            target,
            config,
        }
    }

    /// Builds the plan.
    ///
    /// Moving a vehicle to the slot it already holds is a no-op with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle does not exist, the target is taken
    /// or outside the grid, or no slot is free.
    pub fn build_plan(&self, table: &VehicleTable, today: NaiveDate) -> Result<OperationPlan> {
        let from = table.require(self.vehicle)?.slot();
        let plan = OperationPlan::new(format!("Relocate vehicle {}", self.vehicle));

        if self.target.is_some() && self.target == from {
            return Ok(plan.add_warning(format!(
                "vehicle {} is already parked on {}",
                self.vehicle,
                self.target.map_or_else(String::new, |s| s.to_string())
            )));
        }

        let allocator = SlotAllocator::new(self.config.grid()?);
        let to = allocator.allocate_required(
            table,
            &AllocationOptions {
                preferred: self.target,
            },
        )?;

        Ok(plan
            .add_action(PlanAction::Relocate {
                vehicle: self.vehicle,
                from,
                to,
            })
            .add_action(PlanAction::Recompute { today }))
    }
}

/// A plan that only runs the recomputation pass.
pub struct RecomputePlan {
    today: NaiveDate,
}

impl RecomputePlan {
    /// Creates a recompute plan starting on `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Builds the plan.
    #[must_use]
    pub fn build_plan(&self) -> OperationPlan {
        OperationPlan::new("Recompute statuses and day plan")
            .add_action(PlanAction::Recompute { today: self.today })
    }
}
