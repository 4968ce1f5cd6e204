//! Disassembly checklist and status derivation.
//!
//! Every vehicle goes through the same ordered list of disassembly steps,
//! each with a fixed effort in work-hours. A vehicle's lifecycle status is
//! not stored independently: it is derived from which steps are done.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::layout::is_reserved_header;
use crate::vehicle::Status;

/// Completion flags of one vehicle, keyed by step name.
///
/// Missing entries mean "not done". Entries for names that are not part of
/// the configured checklist are ignored.
pub type StepFlags = BTreeMap<String, bool>;

/// A single disassembly step with its effort in work-hours.
///
/// # Examples
///
/// ```
/// use yardplan::ChecklistStep;
///
/// let step = ChecklistStep::new("Drain oil", 1.0);
/// assert_eq!(step.name, "Drain oil");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecklistStep {
    /// Step name, also used as the table column header.
    pub name: String,
    /// Effort in work-hours.
    pub hours: f64,
}

impl ChecklistStep {
    /// Creates a new step.
    #[must_use]
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours,
        }
    }
}

/// The ordered, validated list of checklist steps.
///
/// # Examples
///
/// ```
/// use yardplan::{Checklist, ChecklistStep, Status, StepFlags};
///
/// let checklist = Checklist::new(vec![
///     ChecklistStep::new("Drain oil", 1.0),
///     ChecklistStep::new("Remove battery", 1.0),
///     ChecklistStep::new("Remove wheels", 1.0),
/// ])
/// .unwrap();
///
/// let mut flags = StepFlags::new();
/// flags.insert("Drain oil".to_string(), true);
///
/// let progress = checklist.progress(&flags);
/// assert_eq!(progress.status, Status::InProgress);
/// assert_eq!(progress.open_display(), "Remove battery, Remove wheels");
/// assert_eq!(progress.done_display(), "Drain oil");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Checklist {
    steps: Vec<ChecklistStep>,
}

impl Checklist {
    /// Builds a checklist from configured steps.
    ///
    /// # Errors
    ///
    /// Returns an error if a step name is empty, repeated or taken by a
    /// fixed table column, or an effort is negative or not finite.
    pub fn new(steps: Vec<ChecklistStep>) -> Result<Self> {
        let mut seen = HashSet::new();
        for step in &steps {
            let name = step.name.trim();
            if name.is_empty() {
                return Err(Error::Validation {
                    field: "checklist".into(),
                    message: "step names cannot be empty".into(),
                });
            }
            if is_reserved_header(name) {
                return Err(Error::Validation {
                    field: "checklist".into(),
                    message: format!("'{name}' is a table column and cannot name a step"),
                });
            }
            if !seen.insert(name.to_string()) {
                return Err(Error::Validation {
                    field: "checklist".into(),
                    message: format!("duplicate step '{name}'"),
                });
            }
            if !step.hours.is_finite() || step.hours < 0.0 {
                return Err(Error::Validation {
                    field: format!("checklist.{name}"),
                    message: format!("effort must be a non-negative number, got {}", step.hours),
                });
            }
        }

        let steps = steps
            .into_iter()
            .map(|step| ChecklistStep::new(step.name.trim(), step.hours))
            .collect();
        Ok(Self { steps })
    }

    /// Returns the steps in configuration order.
    #[must_use]
    pub fn steps(&self) -> &[ChecklistStep] {
        &self.steps
    }

    /// Returns the step called `name`, if configured.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&ChecklistStep> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Looks up a step, failing for names that are not configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStep`] if no step has this name.
    pub fn require_step(&self, name: &str) -> Result<&ChecklistStep> {
        self.step(name.trim()).ok_or_else(|| Error::UnknownStep {
            name: name.to_string(),
        })
    }

    /// Returns the step names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.name.as_str())
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no steps are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all step efforts.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.steps.iter().map(|s| s.hours).sum()
    }

    /// Derives the lifecycle status from completion flags.
    ///
    /// All steps done gives `done`, none done gives `arrived`, anything in
    /// between gives `in-progress`. An empty checklist yields `arrived`.
    #[must_use]
    pub fn derive_status(&self, flags: &StepFlags) -> Status {
        let done = self.steps.iter().filter(|s| is_done(flags, &s.name)).count();
        if done == 0 {
            Status::Arrived
        } else if done == self.steps.len() {
            Status::Done
        } else {
            Status::InProgress
        }
    }

    /// Work-hours still needed to finish the open steps.
    #[must_use]
    pub fn remaining_hours(&self, flags: &StepFlags) -> f64 {
        self.steps
            .iter()
            .filter(|s| !is_done(flags, &s.name))
            .map(|s| s.hours)
            .sum()
    }

    /// Computes status, open/done step lists and remaining effort.
    #[must_use]
    pub fn progress(&self, flags: &StepFlags) -> ChecklistProgress {
        let (done, open): (Vec<&ChecklistStep>, Vec<&ChecklistStep>) =
            self.steps.iter().partition(|s| is_done(flags, &s.name));

        ChecklistProgress {
            status: self.derive_status(flags),
            remaining_hours: open.iter().map(|s| s.hours).sum(),
            open: open.into_iter().map(|s| s.name.clone()).collect(),
            done: done.into_iter().map(|s| s.name.clone()).collect(),
        }
    }
}

fn is_done(flags: &StepFlags, name: &str) -> bool {
    flags.get(name).copied().unwrap_or(false)
}

/// Derived view of a vehicle's checklist.
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistProgress {
    /// Derived lifecycle status.
    pub status: Status,
    /// Open step names in configuration order.
    pub open: Vec<String>,
    /// Completed step names in configuration order.
    pub done: Vec<String>,
    /// Work-hours left on the open steps.
    pub remaining_hours: f64,
}

impl ChecklistProgress {
    /// Open steps joined for display.
    #[must_use]
    pub fn open_display(&self) -> String {
        self.open.join(", ")
    }

    /// Completed steps joined for display.
    #[must_use]
    pub fn done_display(&self) -> String {
        self.done.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> Checklist {
        Checklist::new(vec![
            ChecklistStep::new("Drain oil", 1.0),
            ChecklistStep::new("Remove battery", 1.0),
            ChecklistStep::new("Remove wheels", 1.0),
        ])
        .unwrap()
    }

    fn flags(entries: &[(&str, bool)]) -> StepFlags {
        entries
            .iter()
            .map(|(name, done)| ((*name).to_string(), *done))
            .collect()
    }

    #[test]
    fn test_status_arrived_when_nothing_done() {
        let checklist = three_steps();
        assert_eq!(checklist.derive_status(&StepFlags::new()), Status::Arrived);
        assert_eq!(
            checklist.derive_status(&flags(&[("Drain oil", false)])),
            Status::Arrived
        );
    }

    #[test]
    fn test_status_in_progress_when_some_done() {
        let checklist = three_steps();
        let progress = checklist.progress(&flags(&[("Drain oil", true)]));
        assert_eq!(progress.status, Status::InProgress);
        assert_eq!(progress.open_display(), "Remove battery, Remove wheels");
        assert_eq!(progress.done_display(), "Drain oil");
        assert!((progress.remaining_hours - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_done_when_all_done() {
        let checklist = three_steps();
        let all = flags(&[
            ("Drain oil", true),
            ("Remove battery", true),
            ("Remove wheels", true),
        ]);
        let progress = checklist.progress(&all);
        assert_eq!(progress.status, Status::Done);
        assert!(progress.open.is_empty());
        assert_eq!(progress.open_display(), "");
        assert!(progress.remaining_hours.abs() < f64::EPSILON);
    }

    #[test]
    fn test_lists_follow_configuration_order() {
        let checklist = three_steps();
        let progress = checklist.progress(&flags(&[("Remove wheels", true), ("Drain oil", true)]));
        assert_eq!(progress.done, ["Drain oil", "Remove wheels"]);
        assert_eq!(progress.open, ["Remove battery"]);
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let checklist = three_steps();
        let status = checklist.derive_status(&flags(&[("Paint roof", true)]));
        assert_eq!(status, Status::Arrived);
    }

    #[test]
    fn test_empty_checklist_is_arrived() {
        let checklist = Checklist::new(Vec::new()).unwrap();
        assert!(checklist.is_empty());
        assert_eq!(checklist.derive_status(&StepFlags::new()), Status::Arrived);
        assert!(checklist.remaining_hours(&StepFlags::new()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remaining_hours_uses_step_costs() {
        let checklist = Checklist::new(vec![
            ChecklistStep::new("Drain fluids", 1.5),
            ChecklistStep::new("Remove engine", 4.0),
        ])
        .unwrap();
        assert!((checklist.total_hours() - 5.5).abs() < f64::EPSILON);
        let remaining = checklist.remaining_hours(&flags(&[("Drain fluids", true)]));
        assert!((remaining - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_duplicate_and_empty_names() {
        assert!(Checklist::new(vec![
            ChecklistStep::new("A", 1.0),
            ChecklistStep::new(" A ", 1.0)
        ])
        .is_err());
        assert!(Checklist::new(vec![ChecklistStep::new("  ", 1.0)]).is_err());
    }

    #[test]
    fn test_rejects_table_column_names() {
        for name in ["Slot", "status", " Model ", "StatusOverride", "Parkplatz", "Kennzeichen"] {
            let result = Checklist::new(vec![ChecklistStep::new(name, 1.0)]);
            assert!(
                matches!(result, Err(Error::Validation { .. })),
                "{name} accepted"
            );
        }
        assert!(Checklist::new(vec![ChecklistStep::new("Slot cleanup", 1.0)]).is_ok());
    }

    #[test]
    fn test_rejects_bad_effort() {
        assert!(Checklist::new(vec![ChecklistStep::new("A", -1.0)]).is_err());
        assert!(Checklist::new(vec![ChecklistStep::new("A", f64::NAN)]).is_err());
        assert!(Checklist::new(vec![ChecklistStep::new("A", 0.0)]).is_ok());
    }

    #[test]
    fn test_require_step() {
        let checklist = three_steps();
        assert_eq!(checklist.require_step(" Drain oil ").unwrap().name, "Drain oil");
        assert!(matches!(
            checklist.require_step("Wash"),
            Err(Error::UnknownStep { .. })
        ));
    }
}
