//! File input and output for leveling survey data.
//!
//! [`loader`] reads observations from spreadsheets, dBASE tables and
//! delimited text; [`emitter`] writes a [`lvl_data::RelativeTable`] as
//! delimited text with configurable separators and column names.

pub mod columns;
pub mod emitter;
pub mod error;
pub mod loader;

pub use columns::ColumnNames;
pub use emitter::{write_table, write_table_to_path, OutputFormat};
pub use error::{DataFileError, Result};
pub use loader::{load_observations, SourceFormat};
