//! Common test utilities for integration tests.
//!
//! This module provides a scratch yard: a temporary data directory with a
//! table file, a configuration, a planner and a logged-in session.

use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;
use yardplan::auth::{OpenAccess, Session};
use yardplan::config::{Config, GridConfig};
use yardplan::operations::{
    ChecklistPlan, ChecklistUpdate, ExecutionResult, IntakeOptions, IntakePlan, OperationPlan,
    PlanExecutor,
};
use yardplan::{CsvStore, Result, VehicleId, VehicleTable, YardPlanner};

/// The day all tests pretend it is.
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

/// A config with the given grid and everything else at its defaults.
#[allow(dead_code)]
pub fn grid_config(rows: u32, columns: u32) -> Config {
    Config {
        grid: Some(GridConfig {
            rows: Some(rows),
            columns: Some(columns),
        }),
        ..Default::default()
    }
}

/// A yard backed by a temporary data directory.
///
/// Every operation loads the table from disk, executes one plan and saves
/// it again, the same way a CLI invocation does.
#[allow(dead_code)]
pub struct TestYard {
    pub dir: TempDir,
    pub config: Config,
    pub planner: YardPlanner,
    pub session: Session,
    pub store: CsvStore,
}

#[allow(dead_code)]
impl TestYard {
    /// Creates an empty yard with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty yard with `config`.
    pub fn with_config(config: Config) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::in_data_dir(dir.path());
        let planner = YardPlanner::from_config(&config).unwrap();
        let session = Session::login(&OpenAccess, "tester", "").unwrap();
        Self {
            dir,
            config,
            planner,
            session,
            store,
        }
    }

    /// Returns the data directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Loads the current table.
    pub fn table(&self) -> VehicleTable {
        self.store
            .load(self.planner.checklist(), today())
            .unwrap()
            .table
    }

    /// Executes `plan` on the stored table and saves the result.
    pub fn apply(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut table = self.table();
        let result = PlanExecutor::new(&mut table, &self.planner, &self.session).execute(plan)?;
        self.store.save(&table, self.planner.checklist())?;
        Ok(result)
    }

    /// Takes in a vehicle on the first free slot.
    pub fn intake(&self, model: &str, plate: &str) -> Result<ExecutionResult> {
        let plan = IntakePlan::new(IntakeOptions::new(model, plate, today()), &self.config)
            .build_plan(&self.table(), today())?;
        self.apply(&plan)
    }

    /// Marks `steps` done on `vehicle`.
    pub fn check(&self, vehicle: VehicleId, steps: &[&str]) -> Result<ExecutionResult> {
        let update = ChecklistUpdate::new(vehicle).with_done(steps.iter().copied());
        let plan = ChecklistPlan::new(update, &self.config).build_plan(&self.table(), today())?;
        self.apply(&plan)
    }

    /// Writes raw CSV content to the table file.
    pub fn write_table(&self, content: &str) {
        std::fs::write(self.store.path(), content).unwrap();
    }

    /// Reads the raw table file.
    pub fn read_table(&self) -> String {
        std::fs::read_to_string(self.store.path()).unwrap()
    }
}
