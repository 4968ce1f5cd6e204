//! Occupancy overview of the yard grid.
//!
//! The overview maps every grid slot to the vehicle parked on it, and keeps
//! track of records that do not fit the grid: vehicles parked on slots the
//! grid no longer contains, and rows that claim a slot another row already
//! holds.

use std::collections::BTreeMap;
use std::fmt;

use crate::vehicle::{Status, Vehicle, VehicleId};

use super::allocator::SlotOccupancy;
use super::grid::{SlotGrid, SlotId};

/// What a single slot currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Nobody is parked here.
    Free,
    /// A vehicle is parked here.
    Occupied {
        /// The parked vehicle.
        vehicle: VehicleId,
        /// Its status at the time the overview was built.
        status: Status,
    },
}

impl SlotState {
    /// Returns `true` for [`SlotState::Free`].
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("free"),
            Self::Occupied { status, .. } => write!(f, "{status}"),
        }
    }
}

/// Two records claiming the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotConflict {
    /// The contested slot.
    pub slot: SlotId,
    /// The earlier record, which keeps the slot.
    pub kept: VehicleId,
    /// The later record.
    pub duplicate: VehicleId,
}

/// Snapshot of which vehicle sits where.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yardplan::slot::{OccupancyOverview, SlotState};
/// use yardplan::{SlotGrid, Vehicle, VehicleId};
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let vehicle = Vehicle::builder("Corsa", "K-AB 1", day)
///     .slot(Some("A2".parse().unwrap()))
///     .build()
///     .unwrap();
///
/// let overview = OccupancyOverview::from_vehicles(
///     SlotGrid::new(2, 2).unwrap(),
///     [(VehicleId(0), &vehicle)],
/// );
/// assert!(overview.state("A1".parse().unwrap()).unwrap().is_free());
/// assert_eq!(overview.free_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct OccupancyOverview {
    grid: SlotGrid,
    states: BTreeMap<SlotId, SlotState>,
    outside_grid: Vec<(VehicleId, SlotId)>,
    conflicts: Vec<SlotConflict>,
}

impl OccupancyOverview {
    /// Builds the overview from vehicles in table order.
    ///
    /// Vehicles without a slot are skipped. When two vehicles claim the same
    /// slot the first one keeps it and the clash is recorded as a conflict.
    pub fn from_vehicles<'a, I>(grid: SlotGrid, vehicles: I) -> Self
    where
        I: IntoIterator<Item = (VehicleId, &'a Vehicle)>,
    {
        let mut states: BTreeMap<SlotId, SlotState> =
            grid.iter().map(|slot| (slot, SlotState::Free)).collect();
        let mut outside_grid: Vec<(VehicleId, SlotId)> = Vec::new();
        let mut conflicts = Vec::new();

        for (id, vehicle) in vehicles {
            let Some(slot) = vehicle.slot() else {
                continue;
            };

            let holder = match states.get(&slot) {
                Some(SlotState::Occupied { vehicle: holder, .. }) => Some(*holder),
                Some(SlotState::Free) => None,
                None => outside_grid
                    .iter()
                    .find(|(_, s)| *s == slot)
                    .map(|(holder, _)| *holder),
            };

            if let Some(kept) = holder {
                log::warn!("slot {slot} claimed by both {kept} and {id}");
                conflicts.push(SlotConflict {
                    slot,
                    kept,
                    duplicate: id,
                });
                continue;
            }

            let state = SlotState::Occupied {
                vehicle: id,
                status: vehicle.status(),
            };
            match states.get_mut(&slot) {
                Some(entry) => *entry = state,
                None => {
                    log::warn!("{id} is parked on {slot}, outside the {grid} grid");
                    outside_grid.push((id, slot));
                }
            }
        }

        Self {
            grid,
            states,
            outside_grid,
            conflicts,
        }
    }

    /// Returns the grid the overview was built for.
    #[must_use]
    pub const fn grid(&self) -> SlotGrid {
        self.grid
    }

    /// Returns the state of a grid slot, or `None` for slots outside the grid.
    #[must_use]
    pub fn state(&self, slot: SlotId) -> Option<SlotState> {
        self.states.get(&slot).copied()
    }

    /// Returns the slots of one row with their states, left to right.
    #[must_use]
    pub fn row(&self, row_index: u32) -> Option<Vec<(SlotId, SlotState)>> {
        let slots = self.grid.row(row_index)?;
        Some(
            slots
                .into_iter()
                .map(|slot| (slot, self.states.get(&slot).copied().unwrap_or(SlotState::Free)))
                .collect(),
        )
    }

    /// Returns all rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<(SlotId, SlotState)>> {
        (0..self.grid.rows()).filter_map(|r| self.row(r)).collect()
    }

    /// Number of free grid slots.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.states.values().filter(|s| s.is_free()).count()
    }

    /// Number of occupied grid slots.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.states.len() - self.free_count()
    }

    /// Vehicles parked on slots outside the grid.
    #[must_use]
    pub fn outside_grid(&self) -> &[(VehicleId, SlotId)] {
        &self.outside_grid
    }

    /// Slot clashes found while building the overview.
    #[must_use]
    pub fn conflicts(&self) -> &[SlotConflict] {
        &self.conflicts
    }
}

impl SlotOccupancy for OccupancyOverview {
    fn is_occupied(&self, slot: SlotId) -> bool {
        match self.states.get(&slot) {
            Some(state) => !state.is_free(),
            None => self.outside_grid.iter().any(|(_, s)| *s == slot),
        }
    }
}
