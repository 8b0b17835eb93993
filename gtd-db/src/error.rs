/// Error types for loading the incident table
use thiserror::Error;

/// Startup-fatal failures while building the incident table
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source file could not be opened or read
    #[error("Failed to read incident source: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A column the dashboard depends on is not in the header row
    #[error("Required column '{0}' is missing from the incident source")]
    MissingColumn(&'static str),

    /// A year/month/day field is not an integer
    #[error("Invalid value {value:?} for column '{column}' on line {line}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// Every row was discarded, leaving nothing to chart
    #[error("Incident source contains no rows with a complete date")]
    NoIncidents,

    /// SQLite rejected the schema or an insert
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
