//! Set-status command implementation.

use clap::Args;
use yardplan::operations::StatusPlan;
use yardplan::Status;

use crate::error::CliError;
use crate::utils::{resolve_vehicle, GlobalOptions, Yard};

/// Set a vehicle's status by hand (needs `status_policy: preserve-manual`).
#[derive(Args)]
pub struct SetStatusCommand {
    /// Vehicle id (e.g. 3 or #3) or license plate
    #[arg(value_name = "VEHICLE")]
    pub vehicle: String,

    /// New status
    #[arg(value_enum, value_name = "STATUS")]
    pub status: Status,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl SetStatusCommand {
    /// Execute the set-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let yard = Yard::open(global)?;
        let id = resolve_vehicle(&yard.table, &self.vehicle)?;
        let plan =
            StatusPlan::new(id, self.status, &yard.config).build_plan(&yard.table, global.today())?;
        yard.apply(global, &plan, self.dry_run)?;
        Ok(())
    }
}
