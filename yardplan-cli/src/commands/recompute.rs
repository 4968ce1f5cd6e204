//! Recompute command implementation.
//!
//! Runs the recomputation pass on its own, for example after the checklist
//! or the staffing changed, and rewrites the table.

use clap::Args;
use yardplan::operations::RecomputePlan;

use crate::error::CliError;
use crate::utils::{format_date, GlobalOptions, Yard};

/// Re-derive statuses and plan days for the whole table.
#[derive(Args)]
pub struct RecomputeCommand {
    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl RecomputeCommand {
    /// Execute the recompute command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let yard = Yard::open_existing(global)?;
        let plan = RecomputePlan::new(global.today()).build_plan();

        let Some(result) = yard.apply(global, &plan, self.dry_run)? else {
            return Ok(());
        };
        if let (Some(summary), false) = (result.summary, global.quiet) {
            eprintln!(
                "{} status changes, {} vehicles planned over {} days (until {})",
                summary.status_changes,
                summary.scheduled,
                summary.days,
                format_date(summary.last_day)
            );
        }
        Ok(())
    }
}
