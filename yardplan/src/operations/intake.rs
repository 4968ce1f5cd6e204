//! Vehicle intake planning.
//!
//! Intake validates the record, finds the vehicle a slot and appends it.
//! A vehicle is never planned without a slot: a full yard fails the plan.

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::slot::{AllocationOptions, SlotAllocator, SlotId};
use crate::table::VehicleTable;
use crate::vehicle::Vehicle;

use super::plan::{OperationPlan, PlanAction};

/// Options for an intake operation.
#[derive(Debug, Clone)]
pub struct IntakeOptions {
    /// Vehicle model.
    pub model: String,

    /// License plate, taken as entered.
    pub license_plate: String,

    /// Day the vehicle arrived.
    pub arrival_date: NaiveDate,

    /// Slot to use instead of the first free one.
    pub preferred_slot: Option<SlotId>,
}

impl IntakeOptions {
    /// Creates intake options without a preferred slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use yardplan::operations::IntakeOptions;
    ///
    /// let options = IntakeOptions::new("Golf", "B-XY 1", NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    /// assert!(options.preferred_slot.is_none());
    /// ```
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        license_plate: impl Into<String>,
        arrival_date: NaiveDate,
    ) -> Self {
        Self {
            model: model.into(),
            license_plate: license_plate.into(),
            arrival_date,
            preferred_slot: None,
        }
    }

    /// Sets the preferred slot.
    #[must_use]
    pub const fn with_preferred_slot(mut self, slot: Option<SlotId>) -> Self {
        self.preferred_slot = slot;
        self
    }
}

/// An intake plan generator.
pub struct IntakePlan<'a> {
    options: IntakeOptions,
    config: &'a Config,
}

impl<'a> IntakePlan<'a> {
    /// Creates a new intake plan.
    #[must_use]
    pub const fn new(options: IntakeOptions, config: &'a Config) -> Self {
        Self { options, config }
    }

    /// Builds the plan: validate, allocate a slot, add, recompute.
    ///
    /// Does not modify the table.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model is empty or not in the configured model list
    /// - The preferred slot is occupied or outside the grid
    /// - The grid is full
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use yardplan::config::Config;
    /// use yardplan::operations::{IntakeOptions, IntakePlan, PlanAction};
    /// use yardplan::VehicleTable;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    /// let config = Config::default();
    /// let plan = IntakePlan::new(IntakeOptions::new("Golf", "B-1", today), &config)
    ///     .build_plan(&VehicleTable::new(), today)
    ///     .unwrap();
    ///
    /// match &plan.actions[0] {
    ///     PlanAction::AddVehicle(v) => assert_eq!(v.slot().unwrap().to_string(), "A1"),
    ///     other => panic!("unexpected action {other:?}"),
    /// }
    /// ```
    pub fn build_plan(&self, table: &VehicleTable, today: NaiveDate) -> Result<OperationPlan> {
        let model = self.resolve_model()?;
        let mut plan = OperationPlan::new(format!(
            "Take in {model} ({})",
            self.options.license_plate.trim()
        ));

        let plate = self.options.license_plate.trim();
        if !plate.is_empty() {
            if let Some(existing) = table.find_by_plate(plate) {
                plan = plan.add_warning(format!(
                    "license plate {plate} is already on file as vehicle {existing}"
                ));
            }
        }

        let allocator = SlotAllocator::new(self.config.grid()?);
        let slot = allocator.allocate_required(
            table,
            &AllocationOptions {
                preferred: self.options.preferred_slot,
            },
        )?;

        let vehicle = Vehicle::builder(model, plate, self.options.arrival_date)
            .slot(Some(slot))
            .build()?;

        Ok(plan
            .add_action(PlanAction::AddVehicle(vehicle))
            .add_action(PlanAction::Recompute { today }))
    }

    /// Checks the model against the configured list, returning the
    /// configured spelling.
    fn resolve_model(&self) -> Result<String> {
        let model = self.options.model.trim();
        let models = self.config.models();
        if models.is_empty() || model.is_empty() {
            return Ok(model.to_string());
        }

        models
            .iter()
            .find(|m| m.trim().eq_ignore_ascii_case(model))
            .map(|m| m.trim().to_string())
            .ok_or_else(|| Error::Validation {
                field: "model".into(),
                message: format!(
                    "'{model}' is not a known model (expected one of: {})",
                    models.join(", ")
                ),
            })
    }
}
