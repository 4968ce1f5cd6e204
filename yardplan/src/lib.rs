#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # yardplan
//!
//! A library for running a vehicle dismantling yard.
//!
//! This library tracks vehicles from intake to the end of disassembly: it
//! parks them on a fixed slot grid, derives their status from a checklist
//! of disassembly steps, and plans the open work onto calendar days with a
//! fixed daily capacity.
//!
//! ## Core Types
//!
//! - [`SlotGrid`] and [`SlotId`]: The yard grid and its slot identifiers
//! - [`Checklist`] and [`Status`]: Disassembly steps and derived status
//! - [`Vehicle`] and [`VehicleTable`]: Vehicle records, kept in a CSV file
//! - [`YardPlanner`]: The recomputation pass over the whole table
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use std::collections::HashSet;
//! use yardplan::slot::SlotAllocator;
//! use yardplan::{SlotGrid, SlotId};
//!
//! let grid = SlotGrid::new(4, 4).unwrap();
//! let occupied: HashSet<SlotId> = ["A1", "A2", "A3", "A4", "B1"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let next = SlotAllocator::new(grid).allocate(&occupied).slot().unwrap();
//! assert_eq!(next.to_string(), "B2");
//! ```

pub mod auth;
pub mod checklist;
pub mod config;
pub mod error;
pub mod logging;
pub mod operations;
pub mod planner;
pub mod schedule;
pub mod slot;
pub mod store;
pub mod table;
pub mod vehicle;

// Re-export key types at crate root for convenience
pub use checklist::{Checklist, ChecklistProgress, ChecklistStep, StepFlags};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result, SlotUnavailableReason};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{ExecutionResult, OperationPlan, PlanAction, PlanExecutor};
pub use planner::{RecomputeSummary, StatusPolicy, YardPlanner};
pub use slot::{SlotGrid, SlotId};
pub use store::{CsvStore, LoadedTable};
pub use table::VehicleTable;
pub use vehicle::{Status, Vehicle, VehicleBuilder, VehicleId};
