//! Main entry point for the yardplan CLI.
//!
//! This is the command-line interface for the yardplan vehicle tracker.
//! It provides commands for running the yard:
//! - `intake`: Register an arriving vehicle on a free slot
//! - `check`: Tick off disassembly steps
//! - `list`, `grid`, `plan`: Look at vehicles, slots and the day plan
//! - `relocate`, `set-status`, `recompute`: Correct the table

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let logger = yardplan::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        eprintln!("Warning: could not install logger: {e}");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        today: cli.today,
        user: cli.user,
        password: cli.password,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Intake(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::SetStatus(cmd) => cmd.execute(&global),
        cli::Command::Relocate(cmd) => cmd.execute(&global),
        cli::Command::NextSlot(cmd) => cmd.execute(&global),
        cli::Command::Grid(cmd) => cmd.execute(&global),
        cli::Command::Plan(cmd) => cmd.execute(&global),
        cli::Command::Recompute(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::ShowDataDir(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
