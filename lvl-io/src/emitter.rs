//! Writing a [`RelativeTable`] as delimited text.
//!
//! One header line (`point`, `x`, `y`, then one column per survey date),
//! followed by one line per point. Number formatting lives here, never in
//! the table itself.

use crate::error::{DataFileError, Result};
use lvl_data::RelativeTable;
use lvl_utils::{dates::format_date_with, numbers::format_fixed};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

/// Text layout of the output table.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct OutputFormat {
    pub delimiter: u8,
    pub decimal_separator: char,
    pub precision: usize,
    pub point_header: String,
    pub x_header: String,
    pub y_header: String,
    /// chrono format string for the date column headers
    pub date_format: String,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat {
            delimiter: b';',
            decimal_separator: '.',
            precision: 3,
            point_header: "name".to_string(),
            x_header: "x".to_string(),
            y_header: "y".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl OutputFormat {
    /// Reject layouts that could not be read back unambiguously.
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() || self.delimiter == b'"' || self.delimiter == b'\n' {
            return Err(DataFileError::InvalidOutputFormat(format!(
                "delimiter {:?} cannot be used",
                self.delimiter as char
            )));
        }
        if self.decimal_separator.is_ascii_digit() || self.decimal_separator == '-' {
            return Err(DataFileError::InvalidOutputFormat(format!(
                "decimal separator {:?} cannot be used",
                self.decimal_separator
            )));
        }
        let sample = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap_or_default();
        format_date_with(&sample, &self.date_format)
            .map_err(|e| DataFileError::InvalidOutputFormat(e.to_string()))?;
        Ok(())
    }

    fn number(&self, value: f64) -> String {
        format_fixed(value, self.precision, self.decimal_separator)
    }
}

/// Write `table` to any writer.
pub fn write_table<W: Write>(table: &RelativeTable, format: &OutputFormat, writer: W) -> Result<()> {
    format.validate()?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter)
        .from_writer(writer);

    let mut header = vec![
        format.point_header.clone(),
        format.x_header.clone(),
        format.y_header.clone(),
    ];
    for date in &table.dates {
        let name = format_date_with(&date.as_naive_date(), &format.date_format)
            .map_err(|e| DataFileError::InvalidOutputFormat(e.to_string()))?;
        header.push(name);
    }
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(row.values.len() + 3);
        record.push(row.point_id.clone());
        record.push(format.number(row.x));
        record.push(format.number(row.y));
        record.extend(row.values.iter().map(|v| format.number(*v)));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Sibling of `path` that receives the table until it is complete.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

/// Write `table` to a file at `path`, replacing any existing file.
///
/// The table goes to a sibling file first and is renamed over `path` only
/// once fully written, so a failed write leaves an existing file untouched.
pub fn write_table_to_path(table: &RelativeTable, format: &OutputFormat, path: &Path) -> Result<()> {
    format.validate()?;
    let staging = staging_path(path);
    let written = File::create(&staging)
        .map_err(DataFileError::from)
        .and_then(|file| write_table(table, format, file))
        .and_then(|()| fs::rename(&staging, path).map_err(DataFileError::from));
    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    log::info!(
        "wrote {} points x {} dates to {}",
        table.point_count(),
        table.date_count(),
        path.display()
    );
    Ok(())
}
