//! Flat-file persistence of the vehicle table.
//!
//! The table lives in `vehicles.csv` inside the data directory, by default
//! `~/.yardplan`. Every change rewrites the whole file; there is no
//! locking, so with two concurrent writers the last one wins.

mod csv_store;
pub(crate) mod layout;

use std::path::PathBuf;

use crate::error::{Error, Result};

pub use csv_store::{CsvStore, LoadedTable, DATE_FORMAT, TABLE_FILE};

/// Name of the default data directory inside the home directory.
pub const DATA_DIR_NAME: &str = ".yardplan";

/// Returns the default data directory, `~/.yardplan`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use yardplan::store::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// println!("Data directory: {}", data_dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "cannot determine home directory".into(),
        })
}
