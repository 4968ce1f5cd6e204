//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Project configuration fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixed planning day so scheduled days are stable.
pub const TODAY: &str = "2024-06-03";

/// Test environment with isolated data directory.
///
/// Commands run with the temporary directory as working directory, so a
/// `yardplan.yaml` written there acts as the project configuration.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the yardplan data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the first saving command does.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("yard-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Create an environment with a project configuration file.
    pub fn with_config(yaml: &str) -> Self {
        let env = Self::new();
        env.write_config(yaml);
        env
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Only the working directory is set and inherited `YARDPLAN_*`
    /// variables are cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("yardplan").expect("Failed to find yardplan binary");
        cmd.current_dir(&self.temp_path);
        for var in [
            "YARDPLAN_DATA_DIR",
            "YARDPLAN_TODAY",
            "YARDPLAN_USER",
            "YARDPLAN_PASSWORD",
            "YARDPLAN_GRID_ROWS",
            "YARDPLAN_GRID_COLUMNS",
            "YARDPLAN_HEADCOUNT",
            "YARDPLAN_HOURS_PER_PERSON",
            "YARDPLAN_STATUS_POLICY",
            "YARDPLAN_MODELS",
            "YARDPLAN_OUTPUT_FORMAT",
            "YARDPLAN_LOG_MODE",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with data directory and planning day set.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--today")
            .arg(TODAY);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the vehicle table.
    pub fn table_path(&self) -> PathBuf {
        self.data_dir.join("vehicles.csv")
    }

    /// Write `yardplan.yaml` into the working directory.
    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.temp_path.join("yardplan.yaml"), yaml)
            .expect("Failed to write config");
    }

    /// Write the vehicle table directly.
    pub fn write_table(&self, csv: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.table_path(), csv).expect("Failed to write table");
    }

    /// Read the vehicle table back.
    pub fn read_table(&self) -> String {
        std::fs::read_to_string(self.table_path()).expect("Failed to read table")
    }

    /// Register a vehicle and return the assigned slot.
    ///
    /// # Panics
    /// Panics if the intake command fails.
    pub fn intake(&self, model: &str, plate: &str) -> String {
        let output = self
            .command()
            .arg("intake")
            .arg("--model")
            .arg(model)
            .arg("--plate")
            .arg(plate)
            .output()
            .expect("Failed to run intake command");

        assert!(
            output.status.success(),
            "Intake failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Run `list --format json` and return the parsed rows.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .command()
            .arg("list")
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("List output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
