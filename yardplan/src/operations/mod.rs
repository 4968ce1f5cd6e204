//! Yard operations using the plan-execute pattern.
//!
//! Every change to the vehicle table goes through two phases:
//! 1. **Planning**: validates the request against the configuration and the
//!    current table, allocates slots, and builds an [`OperationPlan`]
//! 2. **Execution**: [`PlanExecutor`] applies the plan for a logged-in
//!    [`Session`](crate::auth::Session), or only simulates it in dry-run mode
//!
//! Each plan ends with a recomputation pass, so statuses and scheduled days
//! are current after every change.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use yardplan::auth::{OpenAccess, Session};
//! use yardplan::config::Config;
//! use yardplan::operations::{ChecklistPlan, ChecklistUpdate, IntakeOptions, IntakePlan, PlanExecutor};
//! use yardplan::{Status, VehicleTable, YardPlanner};
//!
//! let config = Config::default();
//! let planner = YardPlanner::from_config(&config).unwrap();
//! let session = Session::login(&OpenAccess, "yard", "").unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let mut table = VehicleTable::new();
//!
//! // Generate and execute an intake plan
//! let plan = IntakePlan::new(IntakeOptions::new("Golf", "B-1", today), &config)
//!     .build_plan(&table, today)
//!     .unwrap();
//! let id = PlanExecutor::new(&mut table, &planner, &session)
//!     .execute(&plan)
//!     .unwrap()
//!     .vehicle
//!     .unwrap();
//!
//! // Tick off the first step
//! let update = ChecklistUpdate::new(id).with_done(["Drain oil"]);
//! let plan = ChecklistPlan::new(update, &config).build_plan(&table, today).unwrap();
//! PlanExecutor::new(&mut table, &planner, &session).execute(&plan).unwrap();
//!
//! assert_eq!(table.get(id).unwrap().status(), Status::InProgress);
//! ```

pub mod executor;
pub mod intake;
pub mod plan;
pub mod update;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use executor::{ExecutionResult, PlanExecutor};
pub use intake::{IntakeOptions, IntakePlan};
pub use plan::{OperationPlan, PlanAction};
pub use update::{ChecklistPlan, ChecklistUpdate, RecomputePlan, RelocatePlan, StatusPlan};
