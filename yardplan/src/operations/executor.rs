//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans and
//! applies them to the vehicle table. Actions run against a working copy
//! that replaces the table only when every action succeeded, so a failing
//! plan leaves the table as it was.

use crate::auth::Session;
use crate::error::{Error, Result, SlotUnavailableReason};
use crate::planner::{RecomputeSummary, StatusPolicy, YardPlanner};
use crate::slot::SlotId;
use crate::table::VehicleTable;
use crate::vehicle::VehicleId;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The vehicle the plan added or touched last.
    pub vehicle: Option<VehicleId>,

    /// The slot that vehicle was parked on.
    pub slot: Option<SlotId>,

    /// Outcome of the last recomputation pass.
    pub summary: Option<RecomputeSummary>,
}

#[derive(Debug, Default)]
struct Outcome {
    vehicle: Option<VehicleId>,
    slot: Option<SlotId>,
    summary: Option<RecomputeSummary>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool, outcome: Outcome) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            vehicle: outcome.vehicle,
            slot: outcome.slot,
            summary: outcome.summary,
        }
    }
}

/// Executes operation plans against a vehicle table.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (running every action on a scratch copy that is thrown away). Saving the
/// table afterwards is up to the caller.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yardplan::auth::{OpenAccess, Session};
/// use yardplan::config::Config;
/// use yardplan::operations::{IntakeOptions, IntakePlan, PlanExecutor};
/// use yardplan::{StatusPolicy, VehicleTable, YardPlanner};
///
/// let config = Config::default();
/// let planner = YardPlanner::new(
///     config.checklist().unwrap(),
///     config.daily_capacity().unwrap(),
///     StatusPolicy::Derived,
/// );
/// let session = Session::login(&OpenAccess, "yard", "").unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let mut table = VehicleTable::new();
///
/// let plan = IntakePlan::new(IntakeOptions::new("Golf", "B-1", today), &config)
///     .build_plan(&table, today)
///     .unwrap();
///
/// // Dry-run execution
/// let result = PlanExecutor::new(&mut table, &planner, &session)
///     .dry_run()
///     .execute(&plan)
///     .unwrap();
/// assert!(result.dry_run);
/// assert!(table.is_empty());
///
/// // Normal execution
/// let result = PlanExecutor::new(&mut table, &planner, &session)
///     .execute(&plan)
///     .unwrap();
/// assert_eq!(result.slot.unwrap().to_string(), "A1");
/// assert_eq!(table.len(), 1);
/// ```
pub struct PlanExecutor<'a> {
    table: &'a mut VehicleTable,
    planner: &'a YardPlanner,
    session: &'a Session,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(table: &'a mut VehicleTable, planner: &'a YardPlanner, session: &'a Session) -> Self {
        Self {
            table,
            planner,
            session,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor runs the plan on a copy of the table
    /// and discards it.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// Slot occupancy is checked again at execution time, since the table
    /// may have changed after planning.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails. The table is unchanged then.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut working = self.table.clone();
        let mut outcome = Outcome::default();

        for action in &plan.actions {
            self.execute_action(&mut working, action, &mut outcome)?;
        }

        if !self.dry_run {
            *self.table = working;
            log::debug!(
                "{} applied '{}' ({} actions)",
                self.session.username(),
                plan.description,
                plan.len()
            );
        }

        Ok(ExecutionResult::new(plan, self.dry_run, outcome))
    }

    /// Executes a single action on the working copy.
    fn execute_action(
        &self,
        table: &mut VehicleTable,
        action: &PlanAction,
        outcome: &mut Outcome,
    ) -> Result<()> {
        match action {
            PlanAction::AddVehicle(vehicle) => {
                if let Some(slot) = vehicle.slot() {
                    ensure_free(table, slot, None)?;
                }
                let id = table.push(vehicle.clone());
                outcome.vehicle = Some(id);
                outcome.slot = vehicle.slot();
            }
            PlanAction::SetStep {
                vehicle,
                step,
                done,
            } => {
                let name = self.planner.checklist().require_step(step)?.name.clone();
                let record = table.get_mut(*vehicle)?;
                record.set_step(name, *done);
                outcome.vehicle = Some(*vehicle);
                outcome.slot = record.slot();
            }
            PlanAction::SetStatus { vehicle, status } => {
                if self.planner.policy() != StatusPolicy::PreserveManual {
                    return Err(Error::Validation {
                        field: "status_policy".into(),
                        message: "manual statuses are overwritten by recomputation".into(),
                    });
                }
                let record = table.get_mut(*vehicle)?;
                record.set_manual_status(*status);
                outcome.vehicle = Some(*vehicle);
                outcome.slot = record.slot();
            }
            PlanAction::Relocate { vehicle, from, to } => {
                ensure_free(table, *to, Some(*vehicle))?;
                let record = table.get_mut(*vehicle)?;
                if record.slot() != *from {
                    log::warn!(
                        "vehicle {vehicle} was expected on {} but is on {}",
                        display_slot(*from),
                        display_slot(record.slot())
                    );
                }
                record.set_slot(Some(*to));
                outcome.vehicle = Some(*vehicle);
                outcome.slot = Some(*to);
            }
            PlanAction::Recompute { today } => {
                outcome.summary = Some(self.planner.recompute(table, *today)?);
            }
        }
        Ok(())
    }
}

/// Fails if `slot` is held by a vehicle other than `mover`.
fn ensure_free(table: &VehicleTable, slot: SlotId, mover: Option<VehicleId>) -> Result<()> {
    match table.occupant(slot) {
        Some(occupant) if Some(occupant) != mover => Err(Error::SlotUnavailable {
            slot,
            reason: SlotUnavailableReason::Occupied,
        }),
        _ => Ok(()),
    }
}

fn display_slot(slot: Option<SlotId>) -> String {
    slot.map_or_else(|| "no slot".to_string(), |s| s.to_string())
}
