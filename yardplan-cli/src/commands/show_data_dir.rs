//! Command to show the resolved data directory path.

use clap::Args;

use crate::error::CliError;
use crate::utils::{open_store, resolve_data_dir, GlobalOptions};

/// Show the resolved data directory path.
#[derive(Args)]
pub struct ShowDataDirCommand {
    /// Show the table file instead of the directory
    #[arg(long)]
    pub table: bool,
}

impl ShowDataDirCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.table {
            println!("{}", open_store(global)?.path().display());
        } else {
            println!("{}", resolve_data_dir(global)?.display());
        }
        Ok(())
    }
}
