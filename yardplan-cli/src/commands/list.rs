//! List command implementation.
//!
//! This module implements the `list` command, which displays the vehicle
//! table with derived checklist progress in various formats (table, JSON,
//! CSV, TSV).

use std::io::Write;

use clap::Args;
use serde::Serialize;
use yardplan::config::OutputFormat;
use yardplan::{Status, Vehicle, VehicleId, YardPlanner};

use crate::error::CliError;
use crate::utils::{format_date, GlobalOptions, Yard};

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 9] = [
    "id",
    "model",
    "license_plate",
    "arrival_date",
    "status",
    "slot",
    "scheduled_day",
    "open_steps",
    "remaining_hours",
];

/// List vehicles.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (default: from configuration, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Only vehicles with this status
    #[arg(long, value_enum, value_name = "STATUS")]
    pub status: Option<Status>,

    /// Only vehicles of this model (case-insensitive)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Only vehicles planned for today
    #[arg(long)]
    pub due_today: bool,

    /// Hide finished vehicles
    #[arg(long, conflicts_with = "status")]
    pub open: bool,
}

/// One output row.
#[derive(Serialize)]
struct VehicleRow {
    id: usize,
    model: String,
    license_plate: String,
    arrival_date: String,
    status: Status,
    slot: Option<String>,
    scheduled_day: Option<String>,
    open_steps: Vec<String>,
    remaining_hours: f64,
}

impl VehicleRow {
    fn new(id: VehicleId, vehicle: &Vehicle, planner: &YardPlanner) -> Self {
        let progress = planner.progress(vehicle);
        Self {
            id: id.0,
            model: vehicle.model().to_string(),
            license_plate: vehicle.license_plate().to_string(),
            arrival_date: format_date(Some(vehicle.arrival_date())),
            status: vehicle.status(),
            slot: vehicle.slot().map(|s| s.to_string()),
            scheduled_day: vehicle.scheduled_day().map(|d| format_date(Some(d))),
            open_steps: progress.open,
            remaining_hours: progress.remaining_hours,
        }
    }

    fn fields(&self) -> [String; 9] {
        [
            self.id.to_string(),
            self.model.clone(),
            self.license_plate.clone(),
            self.arrival_date.clone(),
            self.status.to_string(),
            self.slot.clone().unwrap_or_default(),
            self.scheduled_day.clone().unwrap_or_default(),
            self.open_steps.join("; "),
            format!("{:.1}", self.remaining_hours),
        ]
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and table
        let yard = Yard::view(global)?;
        let today = global.today();

        // 2. Apply filters
        let rows: Vec<VehicleRow> = yard
            .table
            .iter()
            .filter(|(_, v)| self.status.map_or(true, |s| v.status() == s))
            .filter(|(_, v)| !self.open || v.status() != Status::Done)
            .filter(|(_, v)| {
                self.model
                    .as_deref()
                    .map_or(true, |m| v.model().eq_ignore_ascii_case(m.trim()))
            })
            .filter(|(_, v)| !self.due_today || v.scheduled_day() == Some(today))
            .map(|(id, v)| VehicleRow::new(id, v, &yard.planner))
            .collect();

        // 3. Format and output to stdout
        match self.format.unwrap_or_else(|| yard.config.output_format()) {
            OutputFormat::Table => format_as_table(&rows)?,
            OutputFormat::Json => format_as_json(&rows)?,
            OutputFormat::Csv => format_as_delimited(&rows, b',')?,
            OutputFormat::Tsv => format_as_delimited(&rows, b'\t')?,
        }

        Ok(())
    }
}

/// Format vehicles as a human-readable table.
fn format_as_table(rows: &[VehicleRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        let fields = row.fields().map(|f| if f.is_empty() { "-".into() } else { f });
        writeln!(handle, "{}", fields.join("\t"))?;
    }

    Ok(())
}

/// Format vehicles as JSON.
fn format_as_json(rows: &[VehicleRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, rows)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(handle)?;

    Ok(())
}

/// Format vehicles as delimited output (CSV or TSV).
fn format_as_delimited(rows: &[VehicleRow], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;

    Ok(())
}
