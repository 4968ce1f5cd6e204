//! Reading and writing the vehicle table as CSV.
//!
//! Loading is forgiving: bad dates, slots and flags are reported as
//! warnings and the affected field falls back to "unset". Only a row
//! without a model aborts the load, since rewriting such a file would
//! silently destroy data.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::layout::{
    Column, Layout, ARRIVAL_DATE, FIXED_COLUMNS, MODEL, STATUS_OVERRIDE,
};
use crate::checklist::{Checklist, StepFlags};
use crate::error::{Error, Result};
use crate::slot::SlotId;
use crate::table::VehicleTable;
use crate::vehicle::{Status, Vehicle, VehicleId};

/// File name of the vehicle table inside the data directory.
pub const TABLE_FILE: &str = "vehicles.csv";

/// Date format used in the table file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A loaded table together with the problems found while reading it.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// The records.
    pub table: VehicleTable,
    /// Human-readable descriptions of tolerated problems.
    pub warnings: Vec<String>,
}

/// Flat-file storage for the vehicle table.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yardplan::store::CsvStore;
/// use yardplan::{Checklist, ChecklistStep, Vehicle, VehicleTable};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = CsvStore::in_data_dir(dir.path());
/// let checklist = Checklist::new(vec![ChecklistStep::new("Drain oil", 1.0)]).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
///
/// let mut table = VehicleTable::new();
/// table.push(Vehicle::builder("Golf", "B-1", today).build().unwrap());
/// store.save(&table, &checklist).unwrap();
///
/// let loaded = store.load_existing(&checklist, today).unwrap();
/// assert_eq!(loaded.table, table);
/// assert!(loaded.warnings.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store for `vehicles.csv` inside `dir`.
    #[must_use]
    pub fn in_data_dir(dir: &Path) -> Self {
        Self::new(dir.join(TABLE_FILE))
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the table file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Loads the table, treating a missing file as an empty table.
    ///
    /// Rows without a usable arrival date get `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a row has no model.
    pub fn load(&self, checklist: &Checklist, today: NaiveDate) -> Result<LoadedTable> {
        if !self.exists() {
            log::debug!("no table at {}, starting empty", self.path.display());
            return Ok(LoadedTable {
                table: VehicleTable::new(),
                warnings: Vec::new(),
            });
        }
        self.load_existing(checklist, today)
    }

    /// Loads the table, failing if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`] for a missing file, otherwise the
    /// same errors as [`CsvStore::load`].
    pub fn load_existing(&self, checklist: &Checklist, today: NaiveDate) -> Result<LoadedTable> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::TableNotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let loaded = Self::read_from(file, checklist, today)?;
        for warning in &loaded.warnings {
            log::warn!("{}: {warning}", self.path.display());
        }
        Ok(loaded)
    }

    /// Rewrites the whole table file.
    ///
    /// The table is written to a sibling file first and moved into place,
    /// so a failed write leaves the previous table intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, table: &VehicleTable, checklist: &Checklist) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        let file = fs::File::create(&tmp_path)?;
        Self::write_to(file, table, checklist)?;
        fs::rename(&tmp_path, &self.path)?;

        log::debug!("wrote {} vehicles to {}", table.len(), self.path.display());
        Ok(())
    }

    /// Parses a table from any reader.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed CSV or a row without a model.
    pub fn read_from<R: io::Read>(
        reader: R,
        checklist: &Checklist,
        today: NaiveDate,
    ) -> Result<LoadedTable> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let mut layout = Layout::from_headers(headers.iter(), checklist);
        let mut warnings = Vec::new();

        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let width = records.iter().map(csv::StringRecord::len).max().unwrap_or(0);
        layout.extend_unnamed(width);

        let has_steps = layout.columns().iter().any(|c| matches!(c, Column::Step(_)));
        let has_override = layout.has(&Column::StatusOverride);
        let has_arrival = layout.has(&Column::ArrivalDate);

        let mut vehicles = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let line = index + 2;

            if !layout.has(&Column::Model) {
                return Err(Error::Validation {
                    field: MODEL.into(),
                    message: "the table has no model column".into(),
                });
            }
            if record.len() > headers.len() {
                warnings.push(format!(
                    "line {line}: {} values for {} named columns, the rest kept in unnamed columns",
                    record.len(),
                    headers.len()
                ));
            }

            let mut row = RowParser {
                line,
                today,
                bare_status: !has_steps && !has_override,
                warnings: &mut warnings,
            };
            vehicles.push(row.parse(record, &layout)?);
        }

        if !has_arrival && !vehicles.is_empty() {
            warnings.push(format!(
                "no {ARRIVAL_DATE} column, arrival dates set to {}",
                today.format(DATE_FORMAT)
            ));
        }

        Self::report_slot_conflicts(&vehicles, &mut warnings);

        Ok(LoadedTable {
            table: VehicleTable::from_parts(vehicles, layout.extra_columns()),
            warnings,
        })
    }

    /// Serializes a table to any writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: io::Write>(
        writer: W,
        table: &VehicleTable,
        checklist: &Checklist,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        let write_override = table.iter().any(|(_, v)| v.has_status_override());
        let extras = Self::extra_columns(table);

        let mut header: Vec<&str> = FIXED_COLUMNS.to_vec();
        if write_override {
            header.push(STATUS_OVERRIDE);
        }
        header.extend(checklist.names());
        header.extend(extras.iter().map(String::as_str));
        writer.write_record(&header)?;

        for (_, vehicle) in table.iter() {
            let mut record: Vec<String> = vec![
                vehicle.model().to_string(),
                vehicle.license_plate().to_string(),
                vehicle.arrival_date().format(DATE_FORMAT).to_string(),
                vehicle.status().to_string(),
                vehicle.slot().map(|s| s.to_string()).unwrap_or_default(),
                vehicle
                    .scheduled_day()
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default(),
            ];
            if write_override {
                record.push(vehicle.has_status_override().to_string());
            }
            record.extend(checklist.names().map(|name| vehicle.is_step_done(name).to_string()));
            record.extend(Self::extra_values(vehicle, &extras));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Extra columns of the table, followed by any that only records carry.
    ///
    /// A header that a record holds more often than the table has columns
    /// for is added again, so no value is left without a column.
    fn extra_columns(table: &VehicleTable) -> Vec<String> {
        let mut names = table.extra_columns().to_vec();
        for (_, vehicle) in table.iter() {
            for (name, _) in vehicle.extra() {
                let held = vehicle.extra().iter().filter(|(n, _)| n == name).count();
                let columns = names.iter().filter(|n| *n == name).count();
                if held > columns {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    /// Values of a record for the given extra columns. The n-th column with
    /// a header takes the record's n-th value under that header.
    fn extra_values(vehicle: &Vehicle, columns: &[String]) -> Vec<String> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        columns
            .iter()
            .map(|name| {
                let occurrence = seen.entry(name.as_str()).or_insert(0);
                let value = vehicle
                    .extra()
                    .iter()
                    .filter(|(n, _)| n == name)
                    .nth(*occurrence)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default();
                *occurrence += 1;
                value
            })
            .collect()
    }

    fn report_slot_conflicts(vehicles: &[Vehicle], warnings: &mut Vec<String>) {
        let mut holders: HashMap<SlotId, VehicleId> = HashMap::new();
        for (index, vehicle) in vehicles.iter().enumerate() {
            let Some(slot) = vehicle.slot() else {
                continue;
            };
            let id = VehicleId(index);
            if let Some(holder) = holders.get(&slot) {
                warnings.push(format!(
                    "slot {slot} claimed by both {holder} and {id}, {holder} keeps it"
                ));
            } else {
                holders.insert(slot, id);
            }
        }
    }
}

struct RowParser<'a> {
    line: usize,
    today: NaiveDate,
    // A status without checklist columns behind it can only have been set by hand.
    bare_status: bool,
    warnings: &'a mut Vec<String>,
}

impl RowParser<'_> {
    fn parse(&mut self, record: &csv::StringRecord, layout: &Layout) -> Result<Vehicle> {
        let mut model = String::new();
        let mut plate = String::new();
        let mut arrival = None;
        let mut status = None;
        let mut status_override = false;
        let mut slot = None;
        let mut scheduled_day = None;
        let mut steps = StepFlags::new();
        let mut extra = Vec::new();

        for (i, column) in layout.columns().iter().enumerate() {
            let raw = record.get(i).unwrap_or("");
            let value = raw.trim();
            match column {
                Column::Model => model = value.to_string(),
                Column::LicensePlate => plate = value.to_string(),
                Column::ArrivalDate => arrival = self.date(ARRIVAL_DATE, value),
                Column::Status => status = self.status(value),
                Column::Slot => slot = self.slot(value),
                Column::ScheduledDay => scheduled_day = self.date("ScheduledDay", value),
                Column::StatusOverride => status_override = self.flag(STATUS_OVERRIDE, value),
                Column::Step(name) => {
                    if self.flag(name, value) {
                        steps.insert(name.clone(), true);
                    }
                }
                Column::Extra(name) => extra.push((name.clone(), raw.to_string())),
            }
        }

        if self.bare_status && status.is_some() {
            status_override = true;
        }

        let mut builder = Vehicle::builder(model, plate, arrival.unwrap_or(self.today))
            .status_override(status_override)
            .slot(slot)
            .scheduled_day(scheduled_day)
            .steps(steps)
            .extra(extra);
        if let Some(status) = status {
            builder = builder.status(status);
        }

        builder.build().map_err(|e| Error::Validation {
            field: format!("line {}: {}", self.line, e.field),
            message: e.message,
        })
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(format!("line {}: {message}", self.line));
    }

    fn date(&mut self, column: &str, value: &str) -> Option<NaiveDate> {
        if value.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(value, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                self.warn(format!("unreadable {column} '{value}', left unset"));
                None
            }
        }
    }

    fn slot(&mut self, value: &str) -> Option<SlotId> {
        if value.is_empty() {
            return None;
        }
        match value.parse() {
            Ok(slot) => Some(slot),
            Err(e) => {
                self.warn(format!("{e}, slot left unassigned"));
                None
            }
        }
    }

    fn status(&mut self, value: &str) -> Option<Status> {
        let status = value.parse().ok();
        if status.is_none() && !value.is_empty() {
            log::debug!("line {}: unknown status '{value}', will be derived", self.line);
        }
        status
    }

    fn flag(&mut self, column: &str, value: &str) -> bool {
        match parse_flag(value) {
            Some(flag) => flag,
            None => {
                self.warn(format!("unreadable {column} flag '{value}', counted as not done"));
                false
            }
        }
    }
}

/// Parses a checklist flag; empty cells count as not done.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "x" | "ja" => Some(true),
        "false" | "0" | "no" | "n" | "nein" | "" => Some(false),
        _ => None,
    }
}
