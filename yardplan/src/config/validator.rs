//! Configuration validation.
//!
//! Runs once on the merged configuration, so that bad values are reported
//! as configuration errors before any table is touched.

use std::collections::HashSet;

use crate::config::schema::{Config, CredentialsConfig};
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use yardplan::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an unusable grid, a bad checklist,
    /// a daily capacity that is not positive, a bad model list or an
    /// incomplete account.
    pub fn validate(config: &Config) -> Result<()> {
        config.grid()?;
        config.checklist()?;

        if let Some(ref staffing) = config.staffing {
            if let Some(hours) = staffing.hours_per_person {
                if !hours.is_finite() || hours <= 0.0 {
                    return Err(Error::Validation {
                        field: "staffing.hours_per_person".into(),
                        message: format!("must be a positive number, got {hours}"),
                    });
                }
            }
            if staffing.headcount == Some(0) {
                return Err(Error::Validation {
                    field: "staffing.headcount".into(),
                    message: "at least one person is required".into(),
                });
            }
        }
        config.daily_capacity()?;

        if let Some(ref models) = config.models {
            Self::validate_models(models)?;
        }

        if let Some(ref credentials) = config.credentials {
            Self::validate_credentials(credentials)?;
        }

        Ok(())
    }

    fn validate_models(models: &[String]) -> Result<()> {
        let mut seen = HashSet::new();
        for model in models {
            let trimmed = model.trim();
            if trimmed.is_empty() {
                return Err(Error::Validation {
                    field: "models".into(),
                    message: "model names cannot be empty".into(),
                });
            }
            if !seen.insert(trimmed.to_lowercase()) {
                return Err(Error::Validation {
                    field: "models".into(),
                    message: format!("duplicate model '{trimmed}'"),
                });
            }
        }
        Ok(())
    }

    fn validate_credentials(credentials: &CredentialsConfig) -> Result<()> {
        if credentials.username.trim().is_empty() {
            return Err(Error::Validation {
                field: "credentials.username".into(),
                message: "username cannot be empty".into(),
            });
        }
        if credentials.password.is_empty() {
            return Err(Error::Validation {
                field: "credentials.password".into(),
                message: "password cannot be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::ChecklistStep;
    use crate::config::schema::{GridConfig, StaffingConfig};

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_default_config() {
        ConfigValidator::validate(&Config::default()).unwrap();
    }

    #[test]
    fn test_validate_grid_out_of_range() {
        let config = Config {
            grid: Some(GridConfig {
                rows: Some(27),
                columns: None,
            }),
            ..Default::default()
        };
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(Error::InvalidGrid { rows: 27, .. })
        ));
    }

    #[test]
    fn test_validate_grid_too_wide() {
        let config = Config {
            grid: Some(GridConfig {
                rows: Some(26),
                columns: Some(u32::MAX),
            }),
            ..Default::default()
        };
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(Error::InvalidGrid { columns: u32::MAX, .. })
        ));
    }

    #[test]
    fn test_validate_step_named_like_a_column() {
        let config = Config {
            checklist: Some(vec![
                ChecklistStep::new("Drain oil", 1.0),
                ChecklistStep::new("Slot", 1.0),
            ]),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "checklist");
    }

    #[test]
    fn test_validate_duplicate_steps() {
        let config = Config {
            checklist: Some(vec![
                ChecklistStep::new("Drain oil", 1.0),
                ChecklistStep::new("Drain oil", 2.0),
            ]),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "checklist");
    }

    #[test]
    fn test_validate_staffing() {
        let zero_people = Config {
            staffing: Some(StaffingConfig {
                headcount: Some(0),
                hours_per_person: Some(8.0),
            }),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&zero_people)),
            "staffing.headcount"
        );

        let negative_hours = Config {
            staffing: Some(StaffingConfig {
                headcount: Some(2),
                hours_per_person: Some(-1.0),
            }),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&negative_hours)),
            "staffing.hours_per_person"
        );
    }

    #[test]
    fn test_validate_models() {
        let config = Config {
            models: Some(vec!["Golf".into(), "golf ".into()]),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "models");

        let config = Config {
            models: Some(vec![" ".into()]),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "models");
    }

    #[test]
    fn test_validate_credentials() {
        let config = Config {
            credentials: Some(CredentialsConfig {
                username: String::new(),
                password: "pw".into(),
            }),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "credentials.username"
        );
    }
}
