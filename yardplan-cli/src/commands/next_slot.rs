//! Command to show the next free slot without taking it.

use clap::Args;
use yardplan::slot::{AllocationResult, SlotAllocator};

use crate::error::CliError;
use crate::utils::{GlobalOptions, Yard};

/// Show the slot the next intake would get.
#[derive(Args)]
pub struct NextSlotCommand {
    /// Print every free slot instead of just the first
    #[arg(long)]
    pub all: bool,
}

impl NextSlotCommand {
    /// Execute the next-slot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let yard = Yard::view(global)?;
        let allocator = SlotAllocator::new(yard.config.grid()?);

        if self.all {
            for slot in allocator.free_slots(&yard.table) {
                println!("{slot}");
            }
            return Ok(());
        }

        match allocator.allocate(&yard.table) {
            AllocationResult::Allocated(slot) => {
                println!("{slot}");
                Ok(())
            }
            AllocationResult::Exhausted | AllocationResult::PreferredUnavailable { .. } => {
                println!("no capacity");
                Err(CliError::SemanticFailure(format!(
                    "no free slot left in the {} grid",
                    allocator.grid()
                )))
            }
        }
    }
}
