//! The in-memory vehicle table.
//!
//! The table is loaded in full, changed by one operation, recomputed and
//! written back in full. Records are appended and never removed, so a
//! [`VehicleId`] stays valid for the lifetime of the table.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::slot::{OccupancyOverview, SlotGrid, SlotId, SlotOccupancy};
use crate::vehicle::{Vehicle, VehicleId};

/// All vehicle records in insertion order.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yardplan::{Vehicle, VehicleTable};
///
/// let mut table = VehicleTable::new();
/// let id = table.push(
///     Vehicle::builder("Golf", "B-1", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
///         .build()
///         .unwrap(),
/// );
/// assert_eq!(table.get(id).unwrap().model(), "Golf");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleTable {
    vehicles: Vec<Vehicle>,
    extra_columns: Vec<String>,
}

impl VehicleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from loaded records and the names of the
    /// uninterpreted columns, in file order.
    #[must_use]
    pub fn from_parts(vehicles: Vec<Vehicle>, extra_columns: Vec<String>) -> Self {
        Self {
            vehicles,
            extra_columns,
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Returns `true` if the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Names of the columns carried through without interpretation. Names
    /// may repeat, and columns past the end of the header have an empty name.
    #[must_use]
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Returns the id the next pushed record will get.
    #[must_use]
    pub fn next_id(&self) -> VehicleId {
        VehicleId(self.vehicles.len())
    }

    /// Appends a record and returns its id.
    pub fn push(&mut self, vehicle: Vehicle) -> VehicleId {
        let id = self.next_id();
        self.vehicles.push(vehicle);
        id
    }

    /// Returns the record with this id.
    #[must_use]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.0)
    }

    /// Returns the record with this id, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids.
    pub fn require(&self, id: VehicleId) -> Result<&Vehicle> {
        self.get(id).ok_or_else(|| not_found(id))
    }

    /// Mutable access to a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids.
    pub fn get_mut(&mut self, id: VehicleId) -> Result<&mut Vehicle> {
        self.vehicles.get_mut(id.0).ok_or_else(|| not_found(id))
    }

    /// Iterates over records with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &Vehicle)> {
        self.vehicles.iter().enumerate().map(|(i, v)| (VehicleId(i), v))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (VehicleId, &mut Vehicle)> {
        self.vehicles
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (VehicleId(i), v))
    }

    /// Finds the first record with this license plate.
    ///
    /// Plates are compared ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find_by_plate(&self, plate: &str) -> Option<VehicleId> {
        let plate = plate.trim();
        self.iter()
            .find(|(_, v)| v.license_plate().eq_ignore_ascii_case(plate))
            .map(|(id, _)| id)
    }

    /// Returns the id of the vehicle parked on `slot`.
    #[must_use]
    pub fn occupant(&self, slot: SlotId) -> Option<VehicleId> {
        self.iter()
            .find(|(_, v)| v.slot() == Some(slot))
            .map(|(id, _)| id)
    }

    /// Collects every slot some record claims.
    #[must_use]
    pub fn occupied_slots(&self) -> BTreeSet<SlotId> {
        self.vehicles.iter().filter_map(Vehicle::slot).collect()
    }

    /// Builds the occupancy overview for `grid`.
    #[must_use]
    pub fn overview(&self, grid: SlotGrid) -> OccupancyOverview {
        OccupancyOverview::from_vehicles(grid, self.iter())
    }

    /// Vehicles scheduled for `day`, in table order.
    ///
    /// Records without a scheduled day never match.
    #[must_use]
    pub fn scheduled_on(&self, day: NaiveDate) -> Vec<(VehicleId, &Vehicle)> {
        self.iter()
            .filter(|(_, v)| v.scheduled_day() == Some(day))
            .collect()
    }
}

impl SlotOccupancy for VehicleTable {
    fn is_occupied(&self, slot: SlotId) -> bool {
        self.vehicles.iter().any(|v| v.slot() == Some(slot))
    }
}

fn not_found(id: VehicleId) -> Error {
    Error::NotFound {
        resource: format!("vehicle {id}"),
    }
}
