//! Check command implementation.
//!
//! This module implements the `check` command, which ticks checklist steps
//! off (or reopens them) for one vehicle.

use clap::Args;
use yardplan::operations::{ChecklistPlan, ChecklistUpdate};

use crate::error::CliError;
use crate::utils::{resolve_vehicle, GlobalOptions, Yard};

/// Mark checklist steps done or open.
#[derive(Args)]
pub struct CheckCommand {
    /// Vehicle id (e.g. 3 or #3) or license plate
    #[arg(value_name = "VEHICLE")]
    pub vehicle: String,

    /// Step to mark done (repeatable)
    #[arg(long = "done", value_name = "STEP")]
    pub done: Vec<String>,

    /// Step to mark open again (repeatable)
    #[arg(long = "undo", value_name = "STEP")]
    pub undo: Vec<String>,

    /// Mark every step done
    #[arg(long, conflicts_with_all = ["done", "undo"])]
    pub all: bool,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let yard = Yard::open(global)?;
        let id = resolve_vehicle(&yard.table, &self.vehicle)?;

        let done: Vec<String> = if self.all {
            yard.planner.checklist().names().map(String::from).collect()
        } else {
            self.done
        };
        if done.is_empty() && self.undo.is_empty() {
            return Err(CliError::InvalidArguments(
                "give at least one --done or --undo step, or --all".into(),
            ));
        }

        let update = ChecklistUpdate::new(id).with_done(done).with_undone(self.undo);
        let plan = ChecklistPlan::new(update, &yard.config).build_plan(&yard.table, global.today())?;

        let Some(result) = yard.apply(global, &plan, self.dry_run)? else {
            return Ok(());
        };
        if !global.quiet {
            for action in &result.actions_taken {
                eprintln!("{action}");
            }
        }
        Ok(())
    }
}
