//! Intake command implementation.
//!
//! This module implements the `intake` command, which registers an arriving
//! vehicle and parks it on the first free slot (or a chosen one).

use chrono::NaiveDate;
use clap::Args;
use yardplan::operations::{IntakeOptions, IntakePlan};
use yardplan::SlotId;

use crate::error::CliError;
use crate::utils::{parse_date, GlobalOptions, Yard};

/// Register an arriving vehicle.
#[derive(Args)]
pub struct IntakeCommand {
    /// Vehicle model
    #[arg(long, value_name = "MODEL")]
    pub model: String,

    /// License plate
    #[arg(long, value_name = "PLATE", default_value = "")]
    pub plate: String,

    /// Arrival date (default: today)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub arrived: Option<NaiveDate>,

    /// Park on this slot instead of the first free one
    #[arg(long, value_name = "SLOT")]
    pub slot: Option<SlotId>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl IntakeCommand {
    /// Execute the intake command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let yard = Yard::open(global)?;
        let today = global.today();

        let options = IntakeOptions::new(self.model, self.plate, self.arrived.unwrap_or(today))
            .with_preferred_slot(self.slot);
        let plan = IntakePlan::new(options, &yard.config).build_plan(&yard.table, today)?;

        // Output just the slot (shell-friendly) to stdout
        if let Some(result) = yard.apply(global, &plan, self.dry_run)? {
            if let Some(slot) = result.slot {
                println!("{slot}");
            }
            if global.verbose {
                if let Some(vehicle) = result.vehicle {
                    eprintln!("Registered vehicle {vehicle}");
                }
            }
        }

        Ok(())
    }
}
