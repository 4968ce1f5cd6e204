//! Relocate command implementation.
//!
//! This module implements the `relocate` command, which moves a vehicle to
//! another slot and prints the slot it ends up on.

use clap::Args;
use yardplan::operations::RelocatePlan;
use yardplan::SlotId;

use crate::error::CliError;
use crate::utils::{resolve_vehicle, GlobalOptions, Yard};

/// Move a vehicle to another slot.
#[derive(Args)]
pub struct RelocateCommand {
    /// Vehicle id (e.g. 3 or #3) or license plate
    #[arg(value_name = "VEHICLE")]
    pub vehicle: String,

    /// Target slot (default: first free slot)
    #[arg(long, value_name = "SLOT")]
    pub to: Option<SlotId>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl RelocateCommand {
    /// Execute the relocate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let yard = Yard::open(global)?;
        let id = resolve_vehicle(&yard.table, &self.vehicle)?;
        let current = yard.table.require(id)?.slot();
        let plan = RelocatePlan::new(id, self.to, &yard.config).build_plan(&yard.table, global.today())?;

        if let Some(result) = yard.apply(global, &plan, self.dry_run)? {
            if let Some(slot) = result.slot.or(current) {
                println!("{slot}");
            }
        }
        Ok(())
    }
}
