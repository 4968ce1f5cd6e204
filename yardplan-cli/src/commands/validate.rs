//! Command to validate a yardplan configuration file.

use std::path::PathBuf;

use clap::Args;
use yardplan::config::{Config, ConfigValidator};

use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Validate a yardplan configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.config_path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.config_path.display()
            )));
        }

        let contents = std::fs::read_to_string(&self.config_path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(|e| {
            eprintln!("Parse error: {e}");
            CliError::SemanticFailure("Configuration file is invalid".to_string())
        })?;

        if let Err(e) = ConfigValidator::validate(&config) {
            eprintln!("Validation error: {e}");
            return Err(CliError::SemanticFailure(
                "Configuration validation failed".to_string(),
            ));
        }

        println!("Configuration is valid");
        if global.verbose {
            let checklist = config.checklist()?;
            eprintln!("  grid: {}", config.grid()?);
            eprintln!(
                "  checklist: {} steps, {:.1} work-hours",
                checklist.len(),
                checklist.total_hours()
            );
            eprintln!("  daily capacity: {:.1}h", config.daily_capacity()?.hours());
            eprintln!("  status policy: {}", config.status_policy());
        }
        Ok(())
    }
}
