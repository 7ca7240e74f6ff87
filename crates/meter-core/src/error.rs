use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the meter report tools.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader itself failed (I/O or malformed quoting).
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A row of an input file could not be turned into a typed record.
    #[error("Parse error in {path} line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A numeric field could not be parsed.
    #[error("Invalid number: {0}")]
    NumberParse(String),

    /// A date or time string did not match the expected pattern.
    #[error("Invalid date or time: {0}")]
    DateParse(String),

    /// The daily aggregator was handed zero readings.
    #[error("Cannot aggregate an empty sequence of readings")]
    EmptyInput,

    /// No week files were found under the given directory.
    #[error("No week CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// A user-supplied value is out of range or inconsistent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReportError {
    /// Attach a file path and 1-based line number to a field-level error.
    ///
    /// Errors that already carry a location are returned unchanged.
    pub fn at(self, path: impl Into<PathBuf>, line: u64) -> Self {
        match self {
            ReportError::Parse { .. } => self,
            other => ReportError::Parse {
                path: path.into(),
                line,
                reason: other.to_string(),
            },
        }
    }
}

/// Convenience alias used throughout the meter crates.
pub type Result<T> = std::result::Result<T, ReportError>;
