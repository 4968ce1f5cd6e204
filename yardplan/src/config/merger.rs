//! Configuration merging and precedence handling.
//!
//! Sections are merged field by field; lists (checklist, models) are
//! replaced as a whole so that a higher layer fully controls them.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, GridConfig, StaffingConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use yardplan::config::{Config, ConfigMerger};
///
/// let low = Config { models: Some(vec!["Golf".into()]), ..Default::default() };
/// let high = Config { models: Some(vec!["Polo".into()]), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.models(), ["Polo"]);
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`, `source` winning where it has values.
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Grid and staffing: field-by-field merge
    /// - Checklist, models and credentials: atomic replacement
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.status_policy.is_some() {
            target.status_policy = source.status_policy;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.checklist.is_some() {
            target.checklist.clone_from(&source.checklist);
        }

        if source.models.is_some() {
            target.models.clone_from(&source.models);
        }

        if source.credentials.is_some() {
            target.credentials.clone_from(&source.credentials);
        }

        if let Some(ref source_grid) = source.grid {
            target.grid = Some(match &target.grid {
                Some(target_grid) => Self::merge_grid(target_grid, source_grid),
                None => source_grid.clone(),
            });
        }

        if let Some(ref source_staffing) = source.staffing {
            target.staffing = Some(match &target.staffing {
                Some(target_staffing) => Self::merge_staffing(target_staffing, source_staffing),
                None => source_staffing.clone(),
            });
        }
    }

    fn merge_grid(target: &GridConfig, source: &GridConfig) -> GridConfig {
        GridConfig {
            rows: source.rows.or(target.rows),
            columns: source.columns.or(target.columns),
        }
    }

    fn merge_staffing(target: &StaffingConfig, source: &StaffingConfig) -> StaffingConfig {
        StaffingConfig {
            headcount: source.headcount.or(target.headcount),
            hours_per_person: source.hours_per_person.or(target.hours_per_person),
        }
    }
}
