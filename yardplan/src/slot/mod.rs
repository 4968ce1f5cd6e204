//! Parking slots: identifiers, the yard grid, allocation and occupancy.
//!
//! - [`SlotId`] and [`SlotGrid`]: slot identifiers and the fixed grid
//! - [`SlotAllocator`]: first-free-slot allocation in row-major order
//! - [`OccupancyOverview`]: which vehicle sits where, for display

pub mod allocator;
mod grid;
pub mod occupancy;

#[cfg(test)]
mod allocator_proptests;

pub use allocator::{AllocationOptions, AllocationResult, SlotAllocator, SlotOccupancy};
pub use grid::{InvalidSlotError, SlotGrid, SlotGridIter, SlotId, MAX_COLUMNS, MAX_ROWS};
pub use occupancy::{OccupancyOverview, SlotConflict, SlotState};
