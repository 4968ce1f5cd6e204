//! Configuration system for yardplan.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and yard config files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`YARDPLAN_*`)
//! 3. Machine-local yard config (`yardplan.local.yaml`)
//! 4. Yard config (`yardplan.yaml`)
//! 5. User config (`~/.yardplan/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use yardplan::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("grid {}, {} work-hours per day",
//!     config.grid().unwrap(),
//!     config.daily_capacity().unwrap().hours());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{
    default_checklist_steps, Config, CredentialsConfig, GridConfig, OutputFormat,
    StaffingConfig,
};
pub use validator::ConfigValidator;
