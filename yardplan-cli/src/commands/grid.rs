//! Grid command implementation.
//!
//! This module implements the `grid` command, which draws the yard as a
//! row-by-column map of occupied and free slots.

use clap::Args;
use yardplan::slot::SlotState;

use crate::error::CliError;
use crate::utils::{GlobalOptions, Yard};

/// Marker printed for a free slot.
const FREE_MARK: &str = ".";

/// Show slot occupancy.
#[derive(Args)]
pub struct GridCommand {
    /// Show the status instead of the vehicle id in each cell
    #[arg(long)]
    pub status: bool,
}

impl GridCommand {
    /// Execute the grid command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let yard = Yard::view(global)?;
        let overview = yard.table.overview(yard.config.grid()?);
        let grid = overview.grid();

        let rows = overview.rows();
        let cells: Vec<(char, Vec<String>)> = rows
            .iter()
            .filter_map(|row| {
                let label = row.first()?.0.row();
                Some((label, row.iter().map(|(_, state)| self.cell(*state)).collect()))
            })
            .collect();
        let width = cells
            .iter()
            .flat_map(|(_, row)| row)
            .map(String::len)
            .chain((1..=grid.columns()).map(|c| c.to_string().len()))
            .max()
            .unwrap_or(1);

        let header: Vec<String> = (1..=grid.columns())
            .map(|c| format!("{c:>width$}"))
            .collect();
        println!("   {}", header.join(" "));
        for (label, row) in &cells {
            let row: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
            println!("{label}  {}", row.join(" "));
        }

        if !global.quiet {
            println!();
            println!("{} of {} slots free", overview.free_count(), grid.len());
            for (vehicle, slot) in overview.outside_grid() {
                eprintln!("Warning: vehicle {vehicle} is parked on {slot}, outside the {grid} grid");
            }
            for conflict in overview.conflicts() {
                eprintln!(
                    "Warning: slot {} is claimed by {} and {}",
                    conflict.slot, conflict.kept, conflict.duplicate
                );
            }
        }

        Ok(())
    }

    fn cell(&self, state: SlotState) -> String {
        match state {
            SlotState::Free => FREE_MARK.to_string(),
            SlotState::Occupied { status, .. } if self.status => status.to_string(),
            SlotState::Occupied { vehicle, .. } => vehicle.to_string(),
        }
    }
}
