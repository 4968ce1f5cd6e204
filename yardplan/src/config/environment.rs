//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `YARDPLAN_*` environment variables that
//! override configuration file values.

use std::env;
use std::str::FromStr;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::planner::StatusPolicy;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use yardplan::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Recognized variables: `YARDPLAN_GRID_ROWS`, `YARDPLAN_GRID_COLUMNS`,
    /// `YARDPLAN_HEADCOUNT`, `YARDPLAN_HOURS_PER_PERSON`,
    /// `YARDPLAN_STATUS_POLICY`, `YARDPLAN_MODELS` (comma-separated) and
    /// `YARDPLAN_OUTPUT_FORMAT`.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong kind.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(rows) = Self::parse_var::<u32>("YARDPLAN_GRID_ROWS", "a whole number")? {
            config.grid.get_or_insert_with(Default::default).rows = Some(rows);
        }

        if let Some(columns) = Self::parse_var::<u32>("YARDPLAN_GRID_COLUMNS", "a whole number")? {
            config.grid.get_or_insert_with(Default::default).columns = Some(columns);
        }

        if let Some(headcount) = Self::parse_var::<u32>("YARDPLAN_HEADCOUNT", "a whole number")? {
            config.staffing.get_or_insert_with(Default::default).headcount = Some(headcount);
        }

        if let Some(hours) = Self::parse_var::<f64>("YARDPLAN_HOURS_PER_PERSON", "a number")? {
            config.staffing.get_or_insert_with(Default::default).hours_per_person = Some(hours);
        }

        if let Ok(val) = env::var("YARDPLAN_STATUS_POLICY") {
            config.status_policy =
                Some(val.parse::<StatusPolicy>().map_err(|message| Error::Validation {
                    field: "YARDPLAN_STATUS_POLICY".into(),
                    message,
                })?);
        }

        if let Ok(val) = env::var("YARDPLAN_MODELS") {
            config.models = Some(Self::parse_list(&val));
        }

        if let Ok(val) = env::var("YARDPLAN_OUTPUT_FORMAT") {
            config.output_format = Some(Self::parse_output_format(&val)?);
        }

        Ok(())
    }

    fn parse_var<T: FromStr>(name: &str, expected: &str) -> Result<Option<T>> {
        match env::var(name) {
            Ok(val) => val.trim().parse().map(Some).map_err(|_| Error::Validation {
                field: name.into(),
                message: format!("expected {expected}, got '{val}'"),
            }),
            Err(_) => Ok(None),
        }
    }

    /// Split a comma-separated list, dropping empty entries.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    fn parse_output_format(s: &str) -> Result<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(Error::Validation {
                field: "YARDPLAN_OUTPUT_FORMAT".into(),
                message: format!("invalid output format '{s}' (expected table/json/csv/tsv)"),
            }),
        }
    }
}
