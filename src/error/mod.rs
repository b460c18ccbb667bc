//! Error handling for the sales dashboard.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

/// Specialized error type for loading and analysing sales data
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The input file does not exist
    #[error("Input file not found: {}", path.display())]
    MissingInputFile {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Error opening or reading a file
    #[error("IO error: {context}: {source}")]
    Io {
        /// What was being attempted
        context: String,
        #[source]
        source: io::Error,
    },

    /// Error raised by an Arrow kernel or the CSV reader
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// A required column is absent from the header row
    #[error("Required column '{0}' not found in input")]
    MissingColumn(String),

    /// Two header names normalize to the same column name
    #[error("Duplicate column '{0}' after normalizing header names")]
    DuplicateColumn(String),

    /// A required cell is empty
    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue {
        /// Column name
        column: String,
        /// Zero-based data row
        row: usize,
    },

    /// A numeric column contains a value that cannot be parsed
    #[error("Invalid number in column '{column}': {source}")]
    InvalidNumber {
        /// Column name
        column: String,
        #[source]
        source: ArrowError,
    },

    /// A date cell cannot be parsed with any configured format
    #[error("Invalid date '{value}' at row {row}")]
    InvalidDate {
        /// Zero-based data row
        row: usize,
        /// The raw cell text
        value: String,
    },

    /// A value parses but violates a domain rule
    #[error("Invalid value in column '{column}' at row {row}: {reason}")]
    InvalidValue {
        /// Column name
        column: String,
        /// Zero-based data row
        row: usize,
        /// What rule was broken
        reason: String,
    },

    /// A batch could not be converted into typed rows
    #[error("Row conversion error: {0}")]
    RowConversion(String),

    /// A column does not have the Arrow type the pipeline expects
    #[error("Column '{column}' is not a {expected} array")]
    ColumnType {
        /// Column name
        column: String,
        /// Expected Arrow type
        expected: &'static str,
    },

    /// A chart kind was paired with data it cannot draw
    #[error("Cannot render chart '{chart}': {reason}")]
    Render {
        /// Chart identifier
        chart: String,
        reason: String,
    },
}

impl DashboardError {
    /// Wrap an IO error with a short description of the operation
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether this is the "input file missing" case the UI reports specially
    #[must_use]
    pub const fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInputFile { .. })
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
