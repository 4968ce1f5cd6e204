//! Plan types for yard operations.
//!
//! This module defines the plan structures that describe what an operation
//! will change, without changing anything yet.

use chrono::NaiveDate;

use crate::slot::SlotId;
use crate::vehicle::{Status, Vehicle, VehicleId};

/// A single change to the vehicle table.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    /// Append a new vehicle record.
    AddVehicle(Vehicle),

    /// Mark a checklist step done or not done.
    SetStep {
        /// The vehicle to update.
        vehicle: VehicleId,
        /// Configured step name.
        step: String,
        /// New completion flag.
        done: bool,
    },

    /// Set a status by hand.
    SetStatus {
        /// The vehicle to update.
        vehicle: VehicleId,
        /// The new status.
        status: Status,
    },

    /// Move a vehicle to another slot.
    Relocate {
        /// The vehicle to move.
        vehicle: VehicleId,
        /// Slot it leaves, if it had one.
        from: Option<SlotId>,
        /// Slot it moves to.
        to: SlotId,
    },

    /// Run the recomputation pass starting on `today`.
    Recompute {
        /// First day of the new plan.
        today: NaiveDate,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::AddVehicle(v) => match v.slot() {
                Some(slot) => format!(
                    "Add {} ({}) on slot {slot}",
                    v.model(),
                    v.license_plate()
                ),
                None => format!("Add {} ({})", v.model(), v.license_plate()),
            },
            Self::SetStep {
                vehicle,
                step,
                done,
            } => {
                let state = if *done { "done" } else { "open" };
                format!("Mark '{step}' {state} for vehicle {vehicle}")
            }
            Self::SetStatus { vehicle, status } => {
                format!("Set status of vehicle {vehicle} to {status}")
            }
            Self::Relocate { vehicle, from, to } => match from {
                Some(from) => format!("Move vehicle {vehicle} from {from} to {to}"),
                None => format!("Park vehicle {vehicle} on {to}"),
            },
            Self::Recompute { today } => {
                format!("Recompute statuses and plan days from {today}")
            }
        }
    }

    /// Returns `true` if executing this action changes the table.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Recompute { .. })
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use yardplan::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Relocate #2");
    /// assert_eq!(plan.description, "Relocate #2");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use yardplan::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test").add_warning("plate already on file");
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
