//! Slot identifier and slot grid types.
//!
//! A yard is a fixed rectangle of parking slots. Rows are labelled with
//! letters (`A`, `B`, ...) and columns are numbered from 1, so slots read
//! like `A1`, `B4` or `E9`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest number of rows a grid may have (one per letter).
pub const MAX_ROWS: u32 = 26;

/// Largest number of columns a grid may have.
pub const MAX_COLUMNS: u32 = 999;

/// A single parking slot, identified by row letter and column number.
///
/// Slots order row-major: first by row letter, then by column number,
/// which is the canonical order the allocator scans in.
///
/// # Examples
///
/// ```
/// use yardplan::SlotId;
///
/// let slot: SlotId = "B2".parse().unwrap();
/// assert_eq!(slot.row(), 'B');
/// assert_eq!(slot.column(), 2);
/// assert_eq!(slot.to_string(), "B2");
///
/// assert!("A9".parse::<SlotId>().unwrap() < slot);
/// assert!("2B".parse::<SlotId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    row: u8,
    column: u32,
}

impl SlotId {
    /// Creates a slot from a row letter and a 1-based column.
    ///
    /// Lowercase row letters are accepted and normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the row is not an ASCII letter or the column is 0.
    pub fn new(row: char, column: u32) -> Result<Self, InvalidSlotError> {
        let upper = row.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(InvalidSlotError {
                value: format!("{row}{column}"),
                reason: "row must be a letter A-Z".into(),
            });
        }
        if column == 0 {
            return Err(InvalidSlotError {
                value: format!("{row}{column}"),
                reason: "column must be at least 1".into(),
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let row = upper as u8;
        Ok(Self { row, column })
    }

    /// Returns the row letter.
    #[must_use]
    pub const fn row(self) -> char {
        self.row as char
    }

    /// Returns the zero-based row index (`A` = 0).
    #[must_use]
    pub const fn row_index(self) -> u32 {
        (self.row - b'A') as u32
    }

    /// Returns the 1-based column number.
    #[must_use]
    pub const fn column(self) -> u32 {
        self.column
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row(), self.column)
    }
}

impl FromStr for SlotId {
    type Err = InvalidSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let Some(row) = chars.next() else {
            return Err(InvalidSlotError {
                value: s.to_string(),
                reason: "slot is empty".into(),
            });
        };
        let column = chars.as_str().parse::<u32>().map_err(|_| InvalidSlotError {
            value: s.to_string(),
            reason: "expected a row letter followed by a column number".into(),
        })?;
        Self::new(row, column).map_err(|mut err| {
            err.value = s.to_string();
            err
        })
    }
}

impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for malformed slot identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSlotError {
    /// The rejected text.
    pub value: String,
    /// The reason the slot is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid slot '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidSlotError {}

/// A fixed rectangular grid of parking slots.
///
/// # Examples
///
/// ```
/// use yardplan::SlotGrid;
///
/// let grid = SlotGrid::new(4, 4).unwrap();
/// assert_eq!(grid.len(), 16);
/// assert_eq!(grid.to_string(), "A1-D4");
///
/// let slots: Vec<String> = grid.iter().take(5).map(|s| s.to_string()).collect();
/// assert_eq!(slots, ["A1", "A2", "A3", "A4", "B1"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    rows: u32,
    columns: u32,
}

impl SlotGrid {
    /// Creates a grid with the given number of rows and columns.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero, there are more rows
    /// than letters, or more than [`MAX_COLUMNS`] columns.
    pub fn new(rows: u32, columns: u32) -> crate::Result<Self> {
        let reason = if rows == 0 {
            Some("at least one row is required".to_string())
        } else if rows > MAX_ROWS {
            Some(format!("at most {MAX_ROWS} rows are supported"))
        } else if columns == 0 {
            Some("at least one column is required".to_string())
        } else if columns > MAX_COLUMNS {
            Some(format!("at most {MAX_COLUMNS} columns are supported"))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(crate::Error::InvalidGrid {
                rows,
                columns,
                reason,
            }),
            None => Ok(Self { rows, columns }),
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the total number of slots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Always `false`: a valid grid has at least one slot.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if the slot lies inside this grid.
    #[must_use]
    pub const fn contains(&self, slot: SlotId) -> bool {
        slot.row_index() < self.rows && slot.column() <= self.columns
    }

    /// Returns the first slot in canonical order (`A1`).
    #[must_use]
    pub const fn first(&self) -> SlotId {
        SlotId { row: b'A', column: 1 }
    }

    /// Returns the last slot in canonical order.
    #[must_use]
    pub const fn last(&self) -> SlotId {
        #[allow(clippy::cast_possible_truncation)]
        let row = b'A' + (self.rows - 1) as u8;
        SlotId {
            row,
            column: self.columns,
        }
    }

    /// Returns an iterator over all slots in row-major order.
    #[must_use]
    pub fn iter(self) -> SlotGridIter {
        SlotGridIter {
            grid: self,
            position: 0,
        }
    }

    /// Returns the slots of one row, or `None` if the row is not in the grid.
    #[must_use]
    pub fn row(self, row_index: u32) -> Option<Vec<SlotId>> {
        if row_index >= self.rows {
            return None;
        }
        Some(
            self.iter()
                .skip((row_index * self.columns) as usize)
                .take(self.columns as usize)
                .collect(),
        )
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self { rows: 4, columns: 4 }
    }
}

impl fmt::Display for SlotGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first(), self.last())
    }
}

impl IntoIterator for SlotGrid {
    type Item = SlotId;
    type IntoIter = SlotGridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the slots of a `SlotGrid` in row-major order.
#[derive(Debug)]
pub struct SlotGridIter {
    grid: SlotGrid,
    position: usize,
}

impl Iterator for SlotGridIter {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.grid.len() {
            return None;
        }
        let columns = self.grid.columns as usize;
        let row_index = self.position / columns;
        let column = self.position % columns + 1;
        self.position += 1;

        #[allow(clippy::cast_possible_truncation)]
        let slot = SlotId {
            row: b'A' + row_index as u8,
            column: column as u32,
        };
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotGridIter {}
