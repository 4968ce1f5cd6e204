//! Error types for the yardplan library.
//!
//! This module provides the error hierarchy for all operations in the
//! yardplan library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a yardplan error.
///
/// # Examples
///
/// ```
/// use yardplan::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(16)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the yardplan library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid slot identifier was provided.
    #[error("invalid slot '{value}': {reason}")]
    InvalidSlot {
        /// The rejected slot text.
        value: String,
        /// The reason the slot is invalid.
        reason: String,
    },

    /// The slot grid dimensions are unusable.
    #[error("invalid slot grid {rows}x{columns}: {reason}")]
    InvalidGrid {
        /// Number of rows requested.
        rows: u32,
        /// Number of columns requested.
        columns: u32,
        /// The reason the grid is invalid.
        reason: String,
    },

    /// Every slot of the grid is occupied.
    #[error("no free slot left in the {grid} grid")]
    SlotsExhausted {
        /// The grid that ran full.
        grid: crate::slot::SlotGrid,
    },

    /// A requested slot cannot be used.
    #[error("slot {slot} unavailable: {reason}")]
    SlotUnavailable {
        /// The requested slot.
        slot: crate::slot::SlotId,
        /// Why it cannot be used.
        reason: SlotUnavailableReason,
    },

    /// Daily capacity was zero, negative or not a number.
    #[error("invalid daily capacity {value}: {reason}")]
    InvalidCapacity {
        /// The rejected capacity in work-hours.
        value: f64,
        /// The reason the capacity was rejected.
        reason: String,
    },

    /// A checklist step name is not part of the configured checklist.
    #[error("unknown checklist step '{name}'")]
    UnknownStep {
        /// The unknown step name.
        name: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested vehicle does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Credentials were rejected.
    #[error("access denied for user '{username}'")]
    Unauthorized {
        /// The user that failed to authenticate.
        username: String,
    },

    /// The vehicle table file is missing and must not be created.
    #[error("vehicle table not found: {}", path.display())]
    TableNotFound {
        /// The expected path of the table file.
        path: PathBuf,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// Reading or writing the vehicle table failed.
    #[error("table error: {0}")]
    Table(#[from] csv::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason why a requested slot cannot be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUnavailableReason {
    /// Another vehicle is parked there.
    Occupied,
    /// The slot lies outside the configured grid.
    OutOfGrid,
}

impl std::fmt::Display for SlotUnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Occupied => write!(f, "occupied"),
            Self::OutOfGrid => write!(f, "outside the grid"),
        }
    }
}

impl From<crate::slot::InvalidSlotError> for Error {
    fn from(err: crate::slot::InvalidSlotError) -> Self {
        Self::InvalidSlot {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::vehicle::ValidationError> for Error {
    fn from(err: crate::vehicle::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if the error means the yard has no room left.
    ///
    /// # Examples
    ///
    /// ```
    /// use yardplan::{Error, SlotGrid};
    ///
    /// let err = Error::SlotsExhausted { grid: SlotGrid::new(4, 4).unwrap() };
    /// assert!(err.is_exhausted());
    /// ```
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::SlotsExhausted { .. })
    }
}
