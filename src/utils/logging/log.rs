//! Log lines for exposure table input and output
//!
//! Reading and writing a table both report the file, the row and column
//! counts and the time taken, so a run's log shows what went in and out.

use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Direction of a table transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOperation {
    /// Exposure table read from disk
    Read,
    /// Harmonized table written to disk
    Write,
}

impl fmt::Display for TableOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("Read"),
            Self::Write => f.write_str("Wrote"),
        }
    }
}

/// Log that a table transfer is starting
pub fn log_table_start(operation: TableOperation, path: &Path) {
    match operation {
        TableOperation::Read => log::info!("Reading exposure table {}", path.display()),
        TableOperation::Write => log::info!("Writing harmonized table {}", path.display()),
    }
}

/// Log a finished table transfer with its shape and duration
pub fn log_table_complete(
    operation: TableOperation,
    path: &Path,
    rows: usize,
    columns: usize,
    elapsed: Duration,
) {
    log::info!(
        "{operation} {rows} subjects x {columns} columns {} {} in {elapsed:?}",
        match operation {
            TableOperation::Read => "from",
            TableOperation::Write => "to",
        },
        path.display()
    );
}

/// Warn about an input table that has a schema but no subjects
pub fn log_empty_table(path: &Path) {
    log::warn!("Exposure table {} contains no subjects", path.display());
}
