//! Slot allocation over a fixed grid.
//!
//! This module implements the slot allocation algorithm: scan the grid in
//! canonical row-major order and hand out the first slot nobody occupies.
//! The allocator keeps no state of its own; occupancy is passed in on every
//! call, so the answer is only as fresh as the occupancy it was given.

use std::collections::{BTreeSet, HashSet};

use crate::error::{Error, SlotUnavailableReason};
use crate::Result;

use super::grid::{SlotGrid, SlotId};

/// Source of truth for which slots currently hold a vehicle.
///
/// Implemented for plain slot sets and for the vehicle table, so the
/// allocator can be fed either a precomputed set or live records.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use yardplan::slot::SlotOccupancy;
/// use yardplan::SlotId;
///
/// let occupied: HashSet<SlotId> = ["A1".parse().unwrap()].into();
/// assert!(occupied.is_occupied("A1".parse().unwrap()));
/// assert!(!occupied.is_occupied("A2".parse().unwrap()));
/// ```
pub trait SlotOccupancy {
    /// Returns `true` if a vehicle is parked on `slot`.
    fn is_occupied(&self, slot: SlotId) -> bool;
}

impl SlotOccupancy for HashSet<SlotId> {
    fn is_occupied(&self, slot: SlotId) -> bool {
        self.contains(&slot)
    }
}

impl SlotOccupancy for BTreeSet<SlotId> {
    fn is_occupied(&self, slot: SlotId) -> bool {
        self.contains(&slot)
    }
}

impl SlotOccupancy for [SlotId] {
    fn is_occupied(&self, slot: SlotId) -> bool {
        self.contains(&slot)
    }
}

impl<T: SlotOccupancy + ?Sized> SlotOccupancy for &T {
    fn is_occupied(&self, slot: SlotId) -> bool {
        (**self).is_occupied(slot)
    }
}

/// Options for slot allocation.
///
/// # Examples
///
/// ```
/// use yardplan::slot::AllocationOptions;
///
/// let options = AllocationOptions {
///     preferred: Some("C2".parse().unwrap()),
/// };
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationOptions {
    /// Slot the operator asked for, used if it is free.
    pub preferred: Option<SlotId>,
}

/// Result of a slot allocation attempt.
///
/// Exhaustion is an ordinary outcome, not an error: a full yard is an
/// everyday condition that callers must handle before saving a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationResult {
    /// A free slot was found.
    Allocated(SlotId),
    /// The preferred slot cannot be used.
    PreferredUnavailable {
        /// The slot that was asked for.
        slot: SlotId,
        /// Why it cannot be used.
        reason: SlotUnavailableReason,
    },
    /// Every slot in the grid is occupied.
    Exhausted,
}

impl AllocationResult {
    /// Returns the allocated slot, if any.
    #[must_use]
    pub const fn slot(self) -> Option<SlotId> {
        match self {
            Self::Allocated(slot) => Some(slot),
            _ => None,
        }
    }
}

/// Stateless slot allocator for one grid.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use yardplan::slot::{AllocationResult, SlotAllocator};
/// use yardplan::{SlotGrid, SlotId};
///
/// let allocator = SlotAllocator::new(SlotGrid::new(4, 4).unwrap());
/// let occupied: HashSet<SlotId> = ["A1", "A2", "A3", "A4", "B1"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
///
/// assert_eq!(
///     allocator.allocate(&occupied),
///     AllocationResult::Allocated("B2".parse().unwrap())
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SlotAllocator {
    grid: SlotGrid,
}

impl SlotAllocator {
    /// Create a new allocator for `grid`.
    #[must_use]
    pub const fn new(grid: SlotGrid) -> Self {
        Self { grid }
    }

    /// Get the grid this allocator hands out slots from.
    #[must_use]
    pub const fn grid(&self) -> SlotGrid {
        self.grid
    }

    /// Allocate the first free slot in row-major order.
    ///
    /// Occupied slots that lie outside the grid are ignored.
    pub fn allocate<O: SlotOccupancy + ?Sized>(&self, occupied: &O) -> AllocationResult {
        self.allocate_with(occupied, &AllocationOptions::default())
    }

    /// Allocate a slot, honouring a preferred slot when one is given.
    ///
    /// With a preferred slot the scan is skipped entirely: the preferred
    /// slot is either granted or reported back as unavailable, never
    /// silently swapped for another one.
    pub fn allocate_with<O: SlotOccupancy + ?Sized>(
        &self,
        occupied: &O,
        options: &AllocationOptions,
    ) -> AllocationResult {
        if let Some(preferred) = options.preferred {
            let reason = if !self.grid.contains(preferred) {
                Some(SlotUnavailableReason::OutOfGrid)
            } else if occupied.is_occupied(preferred) {
                Some(SlotUnavailableReason::Occupied)
            } else {
                None
            };

            return match reason {
                Some(reason) => AllocationResult::PreferredUnavailable {
                    slot: preferred,
                    reason,
                },
                None => AllocationResult::Allocated(preferred),
            };
        }

        match self.grid.iter().find(|slot| !occupied.is_occupied(*slot)) {
            Some(slot) => {
                log::debug!("allocated slot {slot} in grid {}", self.grid);
                AllocationResult::Allocated(slot)
            }
            None => {
                log::debug!("grid {} exhausted", self.grid);
                AllocationResult::Exhausted
            }
        }
    }

    /// Allocate a slot, turning every non-allocation into an error.
    ///
    /// Use this wherever a record is about to be saved: a vehicle must
    /// never be stored with a slot that was not actually granted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SlotsExhausted`] when the grid is full and
    /// [`Error::SlotUnavailable`] when the preferred slot cannot be used.
    pub fn allocate_required<O: SlotOccupancy + ?Sized>(
        &self,
        occupied: &O,
        options: &AllocationOptions,
    ) -> Result<SlotId> {
        match self.allocate_with(occupied, options) {
            AllocationResult::Allocated(slot) => Ok(slot),
            AllocationResult::PreferredUnavailable { slot, reason } => {
                Err(Error::SlotUnavailable { slot, reason })
            }
            AllocationResult::Exhausted => Err(Error::SlotsExhausted { grid: self.grid }),
        }
    }

    /// List every free slot in canonical order.
    #[must_use]
    pub fn free_slots<O: SlotOccupancy + ?Sized>(&self, occupied: &O) -> Vec<SlotId> {
        self.grid
            .iter()
            .filter(|slot| !occupied.is_occupied(*slot))
            .collect()
    }
}
