//! Build script for yardplan-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("yardplan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track vehicles through a dismantling yard")
        .long_about(
            "Command-line tool for assigning yard slots, tracking disassembly checklists and planning work days",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("YARDPLAN_DATA_DIR"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .help("Plan from this day instead of the current date")
                .value_name("DATE")
                .global(true)
                .env("YARDPLAN_TODAY"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("User name for commands that change the table")
                .value_name("USER")
                .global(true)
                .env("YARDPLAN_USER"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Password for commands that change the table")
                .value_name("PASSWORD")
                .global(true)
                .env("YARDPLAN_PASSWORD")
                .hide_env_values(true),
        )
        .subcommands(vec![
            Command::new("intake")
                .about("Register an arriving vehicle on a free slot")
                .long_about("Add a vehicle to the table and assign it the first free yard slot"),
            Command::new("list")
                .about("List vehicles")
                .long_about("Display vehicles with slot, status, open steps and planned day"),
            Command::new("check")
                .about("Mark checklist steps done or open")
                .long_about("Tick off or reopen disassembly steps and re-derive the status"),
            Command::new("set-status")
                .about("Set a vehicle's status by hand")
                .long_about("Record a manual status override when the status policy allows it"),
            Command::new("relocate")
                .about("Move a vehicle to another slot")
                .long_about("Move a vehicle to a named slot or release its slot"),
            Command::new("next-slot")
                .about("Show the next free slot")
                .long_about("Display the first free slot in row-major order"),
            Command::new("grid")
                .about("Show slot occupancy")
                .long_about("Draw the yard grid with occupied and free slots"),
            Command::new("plan")
                .about("Show the day plan for open vehicles")
                .long_about("Display planned work days with load against daily capacity"),
            Command::new("recompute")
                .about("Re-derive statuses and plan days")
                .long_about("Recompute every vehicle's status and scheduled day and save the table"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a yardplan configuration file for errors"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path")
                .long_about("Display the path to the yardplan data directory"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("yardplan.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
