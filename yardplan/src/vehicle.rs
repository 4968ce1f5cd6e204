//! Vehicle records tracked through the yard.
//!
//! This module provides the vehicle record, its lifecycle status, and a
//! builder for intake.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checklist::StepFlags;
use crate::SlotId;

/// Lifecycle status of a vehicle.
///
/// The status follows from the checklist (see
/// [`Checklist::derive_status`](crate::Checklist::derive_status)); it is
/// only settable by hand under the `preserve-manual` status policy.
///
/// # Examples
///
/// ```
/// use yardplan::Status;
///
/// assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
/// assert_eq!("fertig".parse::<Status>().unwrap(), Status::Done);
/// assert_eq!(Status::Arrived.to_string(), "arrived");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum Status {
    /// Parked, no step started.
    Arrived,
    /// Some but not all steps done.
    InProgress,
    /// Every step done.
    Done,
}

impl Status {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arrived => "arrived",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    /// Parses canonical labels as well as the labels older tables used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arrived" | "angekommen" => Ok(Self::Arrived),
            "in-progress" | "in progress" | "in_progress" | "in arbeit" => Ok(Self::InProgress),
            "done" | "fertig" => Ok(Self::Done),
            _ => Err(format!("invalid status: {s}")),
        }
    }
}

/// Position of a vehicle in the table.
///
/// Records are only ever appended, so a vehicle keeps its id for life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub usize);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for VehicleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('#')
            .parse()
            .map(Self)
            .map_err(|_| format!("invalid vehicle id: {s}"))
    }
}

/// A vehicle record.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yardplan::{Status, Vehicle};
///
/// let vehicle = Vehicle::builder("Golf IV", "B-XY 123", NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
///     .slot(Some("A1".parse().unwrap()))
///     .build()
///     .unwrap();
///
/// assert_eq!(vehicle.status(), Status::Arrived);
/// assert_eq!(vehicle.slot().unwrap().to_string(), "A1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    model: String,
    license_plate: String,
    arrival_date: NaiveDate,
    status: Status,
    status_override: bool,
    slot: Option<SlotId>,
    scheduled_day: Option<NaiveDate>,
    steps: StepFlags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extra: Vec<(String, String)>,
}

impl Vehicle {
    /// Creates a new vehicle builder.
    #[must_use]
    pub fn builder(
        model: impl Into<String>,
        license_plate: impl Into<String>,
        arrival_date: NaiveDate,
    ) -> VehicleBuilder {
        VehicleBuilder {
            model: model.into(),
            license_plate: license_plate.into(),
            arrival_date,
            status: None,
            status_override: false,
            slot: None,
            scheduled_day: None,
            steps: StepFlags::new(),
            extra: Vec::new(),
        }
    }

    /// Returns the vehicle model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the license plate as entered.
    #[must_use]
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// Returns the arrival date.
    #[must_use]
    pub const fn arrival_date(&self) -> NaiveDate {
        self.arrival_date
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns `true` if the status was set by hand.
    #[must_use]
    pub const fn has_status_override(&self) -> bool {
        self.status_override
    }

    /// Returns the assigned slot.
    #[must_use]
    pub const fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    /// Returns the scheduled work day.
    #[must_use]
    pub const fn scheduled_day(&self) -> Option<NaiveDate> {
        self.scheduled_day
    }

    /// Returns the checklist flags.
    #[must_use]
    pub const fn steps(&self) -> &StepFlags {
        &self.steps
    }

    /// Returns `true` if the named step is marked done.
    #[must_use]
    pub fn is_step_done(&self, name: &str) -> bool {
        self.steps.get(name).copied().unwrap_or(false)
    }

    /// Returns the columns this library does not interpret, as header and
    /// value pairs in file order. A header may repeat.
    #[must_use]
    pub fn extra(&self) -> &[(String, String)] {
        &self.extra
    }

    /// Returns the value of the first uninterpreted column called `name`.
    #[must_use]
    pub fn extra_value(&self, name: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }

    /// Marks a step done or not done.
    ///
    /// Touching the checklist drops any manual status override.
    pub fn set_step(&mut self, name: impl Into<String>, done: bool) {
        let name = name.into();
        if done {
            self.steps.insert(name, true);
        } else {
            self.steps.remove(&name);
        }
        self.status_override = false;
    }

    /// Sets the status by hand.
    pub fn set_manual_status(&mut self, status: Status) {
        self.status = status;
        self.status_override = true;
    }

    pub(crate) fn set_derived_status(&mut self, status: Status) {
        self.status = status;
        self.status_override = false;
    }

    pub(crate) fn set_slot(&mut self, slot: Option<SlotId>) {
        self.slot = slot;
    }

    pub(crate) fn set_scheduled_day(&mut self, day: Option<NaiveDate>) {
        self.scheduled_day = day;
    }
}

/// Builder for [`Vehicle`].
#[derive(Debug, Clone)]
pub struct VehicleBuilder {
    model: String,
    license_plate: String,
    arrival_date: NaiveDate,
    status: Option<Status>,
    status_override: bool,
    slot: Option<SlotId>,
    scheduled_day: Option<NaiveDate>,
    steps: StepFlags,
    extra: Vec<(String, String)>,
}

impl VehicleBuilder {
    /// Sets the status as stored.
    #[must_use]
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Marks the stored status as a manual override.
    #[must_use]
    pub fn status_override(mut self, status_override: bool) -> Self {
        self.status_override = status_override;
        self
    }

    /// Sets the parking slot.
    #[must_use]
    pub fn slot(mut self, slot: Option<SlotId>) -> Self {
        self.slot = slot;
        self
    }

    /// Sets the scheduled work day.
    #[must_use]
    pub fn scheduled_day(mut self, day: Option<NaiveDate>) -> Self {
        self.scheduled_day = day;
        self
    }

    /// Sets the checklist flags.
    #[must_use]
    pub fn steps(mut self, steps: StepFlags) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the uninterpreted columns as header and value pairs.
    #[must_use]
    pub fn extra(mut self, extra: Vec<(String, String)>) -> Self {
        self.extra = extra;
        self
    }

    /// Builds the vehicle.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is empty after trimming whitespace.
    pub fn build(mut self) -> Result<Vehicle, ValidationError> {
        // only completed steps are kept, so equal progress compares equal
        self.steps.retain(|_, done| *done);
        let model = self.model.trim().to_string();
        if model.is_empty() {
            return Err(ValidationError {
                field: "model".into(),
                message: "model must be non-empty".into(),
            });
        }

        Ok(Vehicle {
            model,
            license_plate: self.license_plate.trim().to_string(),
            arrival_date: self.arrival_date,
            status: self.status.unwrap_or(Status::Arrived),
            status_override: self.status_override,
            slot: self.slot,
            scheduled_day: self.scheduled_day,
            steps: self.steps,
            extra: self.extra,
        })
    }
}

/// Validation error for vehicle fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
