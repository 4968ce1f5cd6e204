//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands::{
    CheckCommand, CompletionsCommand, GridCommand, IntakeCommand, ListCommand, NextSlotCommand,
    PlanCommand, RecomputeCommand, RelocateCommand, SetStatusCommand, ShowDataDirCommand,
    ValidateCommand,
};
use crate::utils::parse_date;

/// Command-line tool for tracking vehicles through a dismantling yard.
#[derive(Parser)]
#[command(name = "yardplan")]
#[command(version, about = "Track vehicles through a dismantling yard", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "YARDPLAN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Plan from this day instead of the current date
    #[arg(long, value_name = "DATE", global = true, env = "YARDPLAN_TODAY", value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// User name for commands that change the table
    #[arg(long, value_name = "USER", global = true, env = "YARDPLAN_USER")]
    pub user: Option<String>,

    /// Password for commands that change the table
    #[arg(
        long,
        value_name = "PASSWORD",
        global = true,
        env = "YARDPLAN_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Register an arriving vehicle on a free slot
    Intake(IntakeCommand),

    /// List vehicles
    List(ListCommand),

    /// Mark checklist steps done or open
    Check(CheckCommand),

    /// Set a vehicle's status by hand
    SetStatus(SetStatusCommand),

    /// Move a vehicle to another slot
    Relocate(RelocateCommand),

    /// Show the next free slot
    NextSlot(NextSlotCommand),

    /// Show slot occupancy
    Grid(GridCommand),

    /// Show the day plan for open vehicles
    Plan(PlanCommand),

    /// Re-derive statuses and plan days
    Recompute(RecomputeCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
