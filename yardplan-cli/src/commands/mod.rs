//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `intake`: Register an arriving vehicle on a free slot
//! - `list`: List vehicles with their checklist progress
//! - `check`: Mark checklist steps done or open
//! - `set_status`: Set a status by hand
//! - `relocate`: Move a vehicle to another slot
//! - `next_slot`: Show the next free slot
//! - `grid`: Show slot occupancy
//! - `plan`: Show the day plan
//! - `recompute`: Re-derive statuses and plan days
//! - `validate`: Validate a configuration file
//! - `show_data_dir`: Show the resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod grid;
pub mod intake;
pub mod list;
pub mod next_slot;
pub mod plan;
pub mod recompute;
pub mod relocate;
pub mod set_status;
pub mod show_data_dir;
pub mod validate;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use grid::GridCommand;
pub use intake::IntakeCommand;
pub use list::ListCommand;
pub use next_slot::NextSlotCommand;
pub use plan::PlanCommand;
pub use recompute::RecomputeCommand;
pub use relocate::RelocateCommand;
pub use set_status::SetStatusCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use validate::ValidateCommand;
