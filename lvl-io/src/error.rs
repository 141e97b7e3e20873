/// Error types for reading and writing data files
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataFileError {
    /// File extension not handled by any loader
    #[error("unsupported input file {0:?}: expected .xlsx, .xlsm, .xltx, .xltm, .xls, .ods, .dbf, .csv or .txt")]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("failed to read DBF table: {0}")]
    Dbf(#[from] dbase::Error),

    /// Workbook without any worksheet
    #[error("workbook has no worksheets")]
    NoWorksheet,

    /// Source has no header row
    #[error("input has no header row")]
    MissingHeader,

    /// A required column is not present in the header
    #[error("missing {role} column {name:?}; available columns: {available:?}")]
    MissingColumn {
        role: &'static str,
        name: String,
        available: Vec<String>,
    },

    /// Blank point name
    #[error("row {row}: empty point name")]
    EmptyPointId { row: usize },

    /// Coordinate or elevation that is not a number
    #[error("row {row}: {column} value {value:?} is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Date cell that is not a calendar date
    #[error("row {row}: cannot interpret {value} as a calendar date")]
    InvalidDate { row: usize, value: String },

    /// Output option that cannot be honored
    #[error("invalid output format: {0}")]
    InvalidOutputFormat(String),
}

/// Type alias for Results using DataFileError
pub type Result<T> = std::result::Result<T, DataFileError>;
