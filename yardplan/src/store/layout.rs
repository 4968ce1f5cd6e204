//! Column layout of the vehicle table file.
//!
//! Maps header names to the fields they feed. Older tables used German
//! headers; those are read as aliases of the current names.

use crate::checklist::Checklist;

pub(crate) const MODEL: &str = "Model";
pub(crate) const LICENSE_PLATE: &str = "LicensePlate";
pub(crate) const ARRIVAL_DATE: &str = "ArrivalDate";
pub(crate) const STATUS: &str = "Status";
pub(crate) const SLOT: &str = "Slot";
pub(crate) const SCHEDULED_DAY: &str = "ScheduledDay";
pub(crate) const STATUS_OVERRIDE: &str = "StatusOverride";

/// Header names read as fixed fields, including legacy aliases.
const RESERVED_HEADERS: [&str; 11] = [
    MODEL,
    LICENSE_PLATE,
    ARRIVAL_DATE,
    STATUS,
    SLOT,
    SCHEDULED_DAY,
    STATUS_OVERRIDE,
    "Modell",
    "Kennzeichen",
    "Ankunft",
    "Parkplatz",
];

/// Whether `name` is taken by a fixed column and cannot name a step.
pub(crate) fn is_reserved_header(name: &str) -> bool {
    let name = name.trim();
    RESERVED_HEADERS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Fixed leading columns, in write order.
pub(crate) const FIXED_COLUMNS: [&str; 6] =
    [MODEL, LICENSE_PLATE, ARRIVAL_DATE, STATUS, SLOT, SCHEDULED_DAY];

/// What a header column holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Column {
    Model,
    LicensePlate,
    ArrivalDate,
    Status,
    Slot,
    ScheduledDay,
    StatusOverride,
    Step(String),
    Extra(String),
}

impl Column {
    fn classify(header: &str, checklist: &Checklist) -> Self {
        let header = header.trim();
        match header {
            MODEL | "Modell" => Self::Model,
            LICENSE_PLATE | "Kennzeichen" => Self::LicensePlate,
            ARRIVAL_DATE | "Ankunft" => Self::ArrivalDate,
            STATUS => Self::Status,
            SLOT | "Parkplatz" => Self::Slot,
            SCHEDULED_DAY => Self::ScheduledDay,
            STATUS_OVERRIDE => Self::StatusOverride,
            name if checklist.step(name).is_some() => Self::Step(name.to_string()),
            name => Self::Extra(name.to_string()),
        }
    }
}

/// Header of a loaded file, one entry per column.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    columns: Vec<Column>,
}

impl Layout {
    /// Classifies each header. A repeated fixed or step header is kept as an
    /// uninterpreted column so its values survive a rewrite.
    pub(crate) fn from_headers<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        checklist: &Checklist,
    ) -> Self {
        let mut columns: Vec<Column> = Vec::new();
        for header in headers {
            let column = match Column::classify(header, checklist) {
                Column::Extra(name) => Column::Extra(name),
                column if columns.contains(&column) => Column::Extra(header.trim().to_string()),
                column => column,
            };
            columns.push(column);
        }
        Self { columns }
    }

    /// Adds unnamed columns until the layout is `width` columns wide, for
    /// rows that carry more values than the header names.
    pub(crate) fn extend_unnamed(&mut self, width: usize) {
        while self.columns.len() < width {
            self.columns.push(Column::Extra(String::new()));
        }
    }

    pub(crate) fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn has(&self, column: &Column) -> bool {
        self.columns.contains(column)
    }

    /// Names of the uninterpreted columns in file order, repeats included.
    pub(crate) fn extra_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|column| match column {
                Column::Extra(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}
