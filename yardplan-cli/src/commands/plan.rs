//! Plan command implementation.
//!
//! This module implements the `plan` command, which shows how the open work
//! spreads over the coming days. Nothing is saved.

use clap::Args;

use crate::error::CliError;
use crate::utils::{format_date, GlobalOptions, Yard};

/// Show the day plan for open vehicles.
#[derive(Args)]
pub struct PlanCommand {
    /// Only show the first N days
    #[arg(long, value_name = "N")]
    pub days: Option<usize>,
}

impl PlanCommand {
    /// Execute the plan command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let yard = Yard::view(global)?;
        let plan = yard.planner.day_plan(&yard.table, global.today())?;

        if plan.is_empty() {
            if !global.quiet {
                eprintln!("No open work.");
            }
            return Ok(());
        }

        let shown = self.days.unwrap_or(usize::MAX);
        for bucket in plan.days().iter().take(shown) {
            let vehicles: Vec<String> = bucket
                .items()
                .iter()
                .filter_map(|id| {
                    let vehicle = yard.table.get(*id)?;
                    Some(format!(
                        "{id} {} ({})",
                        vehicle.model(),
                        vehicle.license_plate()
                    ))
                })
                .collect();
            let marker = if bucket.is_overloaded() { " !" } else { "" };
            println!(
                "{}\t{:.1}/{:.1}h{marker}\t{}",
                format_date(Some(bucket.day())),
                bucket.load_hours(),
                bucket.capacity_hours(),
                vehicles.join(", ")
            );
        }

        if global.verbose {
            eprintln!(
                "{:.1} work-hours over {} days",
                plan.total_hours(),
                plan.days().len()
            );
        }
        Ok(())
    }
}
