//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, table access, login, and plan output.

use std::env;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use yardplan::auth::{CredentialVerifier, OpenAccess, Session, StaticCredentials};
use yardplan::store::{default_data_dir, CsvStore, LoadedTable, DATE_FORMAT};
use yardplan::{
    Config, ConfigBuilder, ExecutionResult, OperationPlan, PlanExecutor, VehicleId, VehicleTable,
    YardPlanner,
};

use crate::error::CliError;

/// User name recorded when no credentials are configured and none given.
const FALLBACK_USER: &str = "yard";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Day to plan from instead of the current date.
    pub today: Option<NaiveDate>,

    /// User name to log in with.
    pub user: Option<String>,

    /// Password to log in with.
    pub password: Option<String>,
}

impl GlobalOptions {
    /// The day operations count as "today".
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| format!("expected a date like 2024-06-03: {e}"))
}

/// Resolve the data directory path.
///
/// Returns `--data-dir` when given, else the default location `~/.yardplan`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. Yard configuration files, found from the working directory upwards
/// 3. User configuration in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Build the planner for a configuration.
pub fn planner(config: &Config) -> Result<YardPlanner, CliError> {
    YardPlanner::from_config(config).map_err(|e| CliError::Config(e.to_string()))
}

/// Open the table store in the data directory.
pub fn open_store(global: &GlobalOptions) -> Result<CsvStore, CliError> {
    Ok(CsvStore::in_data_dir(&resolve_data_dir(global)?))
}

/// Load the vehicle table, treating a missing file as an empty yard.
///
/// Load warnings go to stderr unless `--quiet` is set.
pub fn load_table(
    global: &GlobalOptions,
    store: &CsvStore,
    planner: &YardPlanner,
) -> Result<VehicleTable, CliError> {
    let loaded = store.load(planner.checklist(), global.today())?;
    Ok(report_warnings(global, loaded))
}

/// Load the vehicle table, failing when the file does not exist.
pub fn load_existing_table(
    global: &GlobalOptions,
    store: &CsvStore,
    planner: &YardPlanner,
) -> Result<VehicleTable, CliError> {
    let loaded = store.load_existing(planner.checklist(), global.today())?;
    Ok(report_warnings(global, loaded))
}

fn report_warnings(global: &GlobalOptions, loaded: LoadedTable) -> VehicleTable {
    if !global.quiet {
        for warning in &loaded.warnings {
            eprintln!("Warning: {warning}");
        }
    }
    loaded.table
}

/// Open a session for a mutating command.
///
/// With credentials configured, `--user` and `--password` must match them.
/// Without, anyone may change the table.
pub fn login(global: &GlobalOptions, config: &Config) -> Result<Session, CliError> {
    let username = global
        .user
        .clone()
        .or_else(|| env::var("USER").ok())
        .unwrap_or_else(|| FALLBACK_USER.to_string());
    let password = global.password.clone().unwrap_or_default();

    let verifier: Box<dyn CredentialVerifier> = match config.credentials {
        Some(ref credentials) => {
            if global.user.is_none() {
                return Err(CliError::Unauthorized(
                    "credentials are configured, pass --user and --password".into(),
                ));
            }
            Box::new(StaticCredentials::new(
                credentials.username.clone(),
                credentials.password.clone(),
            ))
        }
        None => Box::new(OpenAccess),
    };

    Session::login(verifier.as_ref(), &username, &password).map_err(CliError::from)
}

/// Find a vehicle by id (`3` or `#3`) or by license plate.
pub fn resolve_vehicle(table: &VehicleTable, reference: &str) -> Result<VehicleId, CliError> {
    if let Ok(id) = reference.parse::<VehicleId>() {
        if table.get(id).is_some() {
            return Ok(id);
        }
    }

    table.find_by_plate(reference).ok_or_else(|| {
        CliError::SemanticFailure(format!("no vehicle with id or plate '{reference}'"))
    })
}

/// Print a plan without executing it.
pub fn print_dry_run(plan: &OperationPlan, global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    eprintln!("Dry run - would perform the following actions:");
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
    }
    if !plan.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &plan.warnings {
            eprintln!("  - {warning}");
        }
    }
}

/// Everything a command needs to read or change the yard.
pub struct Yard {
    /// Merged configuration.
    pub config: Config,
    /// Planner built from the configuration.
    pub planner: YardPlanner,
    /// Table file in the data directory.
    pub store: CsvStore,
    /// The loaded vehicle table.
    pub table: VehicleTable,
}

impl Yard {
    /// Load configuration and table as stored.
    pub fn open(global: &GlobalOptions) -> Result<Self, CliError> {
        Self::load(global, load_table)
    }

    /// Like [`Yard::open`], but a missing table file is an error.
    pub fn open_existing(global: &GlobalOptions) -> Result<Self, CliError> {
        Self::load(global, load_existing_table)
    }

    /// Load configuration and table and run the recomputation pass in
    /// memory, so statuses and planned days are current for `--today`.
    ///
    /// Nothing is saved.
    pub fn view(global: &GlobalOptions) -> Result<Self, CliError> {
        let mut yard = Self::open(global)?;
        yard.planner.recompute(&mut yard.table, global.today())?;
        Ok(yard)
    }

    fn load(
        global: &GlobalOptions,
        loader: fn(&GlobalOptions, &CsvStore, &YardPlanner) -> Result<VehicleTable, CliError>,
    ) -> Result<Self, CliError> {
        let config = load_configuration(global)?;
        let planner = planner(&config)?;
        let store = open_store(global)?;
        let table = loader(global, &store, &planner)?;
        Ok(Self {
            config,
            planner,
            store,
            table,
        })
    }

    /// Execute a plan and save the table, or only show it with `dry_run`.
    ///
    /// Returns `None` for a dry run.
    pub fn apply(
        mut self,
        global: &GlobalOptions,
        plan: &OperationPlan,
        dry_run: bool,
    ) -> Result<Option<ExecutionResult>, CliError> {
        let session = login(global, &self.config)?;

        if dry_run {
            PlanExecutor::new(&mut self.table, &self.planner, &session)
                .dry_run()
                .execute(plan)?;
            print_dry_run(plan, global);
            return Ok(None);
        }

        let result = PlanExecutor::new(&mut self.table, &self.planner, &session).execute(plan)?;
        if !plan.is_empty() {
            self.store.save(&self.table, self.planner.checklist())?;
        }

        if !global.quiet {
            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
        }
        Ok(Some(result))
    }
}

/// Format an optional date for display.
pub fn format_date(day: Option<NaiveDate>) -> String {
    day.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
