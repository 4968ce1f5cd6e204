//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for yardplan:
//! grid size, checklist, staffing, the model list, the status policy, the
//! login account and list output defaults.

use serde::{Deserialize, Serialize};

use crate::checklist::{Checklist, ChecklistStep};
use crate::error::Result;
use crate::planner::StatusPolicy;
use crate::schedule::DailyCapacity;
use crate::slot::SlotGrid;

/// Default number of people working the yard.
pub const DEFAULT_HEADCOUNT: u32 = 2;

/// Default working hours per person and day.
pub const DEFAULT_HOURS_PER_PERSON: f64 = 8.0;

/// Complete configuration structure.
///
/// Every section is optional so that several sources can be layered; the
/// accessor methods fill in defaults for whatever is still missing after
/// merging.
///
/// # Examples
///
/// ```
/// use yardplan::config::{Config, GridConfig};
///
/// let config = Config {
///     grid: Some(GridConfig { rows: Some(5), columns: Some(9) }),
///     ..Default::default()
/// };
/// assert_eq!(config.grid().unwrap().to_string(), "A1-E9");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Yard grid dimensions.
    pub grid: Option<GridConfig>,

    /// Ordered disassembly steps with their effort.
    pub checklist: Option<Vec<ChecklistStep>>,

    /// Staffing used to derive the daily capacity.
    pub staffing: Option<StaffingConfig>,

    /// Accepted vehicle models. Empty or missing accepts any model.
    pub models: Option<Vec<String>>,

    /// How manual status changes survive recomputation.
    pub status_policy: Option<StatusPolicy>,

    /// Login account. Without one every user is let in.
    pub credentials: Option<CredentialsConfig>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the configured grid, 4x4 by default.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are out of range.
    pub fn grid(&self) -> Result<SlotGrid> {
        let defaults = SlotGrid::default();
        let grid = self.grid.clone().unwrap_or_default();
        SlotGrid::new(
            grid.rows.unwrap_or(defaults.rows()),
            grid.columns.unwrap_or(defaults.columns()),
        )
    }

    /// Returns the configured checklist, or the default steps.
    ///
    /// # Errors
    ///
    /// Returns an error if step names repeat or an effort is invalid.
    pub fn checklist(&self) -> Result<Checklist> {
        Checklist::new(
            self.checklist
                .clone()
                .unwrap_or_else(default_checklist_steps),
        )
    }

    /// Returns the daily capacity, headcount times hours per person.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not a positive number.
    pub fn daily_capacity(&self) -> Result<DailyCapacity> {
        let staffing = self.staffing.clone().unwrap_or_default();
        DailyCapacity::from_staffing(
            staffing.headcount.unwrap_or(DEFAULT_HEADCOUNT),
            staffing.hours_per_person.unwrap_or(DEFAULT_HOURS_PER_PERSON),
        )
    }

    /// Returns the accepted models; empty means any model.
    #[must_use]
    pub fn models(&self) -> &[String] {
        self.models.as_deref().unwrap_or_default()
    }

    /// Returns the status policy.
    #[must_use]
    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy.unwrap_or_default()
    }

    /// Returns the list output format.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// The steps used when no checklist is configured.
#[must_use]
pub fn default_checklist_steps() -> Vec<ChecklistStep> {
    vec![
        ChecklistStep::new("Drain oil", 1.0),
        ChecklistStep::new("Remove battery", 1.0),
        ChecklistStep::new("Remove wheels", 1.0),
    ]
}

/// Grid dimensions.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Number of rows, labelled `A` onwards.
    pub rows: Option<u32>,
    /// Number of columns, numbered from 1.
    pub columns: Option<u32>,
}

/// Staffing figures.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StaffingConfig {
    /// People working on a day.
    pub headcount: Option<u32>,
    /// Hours each person works on a day.
    pub hours_per_person: Option<f64>,
}

/// A single login account.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// Account name.
    pub username: String,
    /// Account password, stored in plain text.
    pub password: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use yardplan::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}
