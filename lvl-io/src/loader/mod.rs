//! Observation loading from survey source files.
//!
//! Each source format turns its rows into [`Cell`]s in header order; the
//! shared [`rows_to_observations`] then picks the five required columns and
//! validates them. A single bad row fails the whole load.
//!
//! # Supported formats
//!
//! - **Workbooks** (`.xlsx`, `.xlsm`, `.xltx`, `.xltm`, `.xls`, `.ods`): first worksheet, first row is the header
//! - **dBASE** (`.dbf`): field names are the header
//! - **Delimited text** (`.csv`, `.txt`): header line, `;` `,` or tab separated

pub mod dbf;
pub mod delimited;
pub mod spreadsheet;

use crate::{
    columns::ColumnNames,
    error::{DataFileError, Result},
};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use lvl_survey::{Observation, RawDate};
use lvl_utils::numbers::parse_decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of source file, derived from its extension.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum SourceFormat {
    Workbook,
    Dbf,
    Delimited,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<SourceFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xltx" | "xltm" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            "dbf" => Ok(SourceFormat::Dbf),
            "csv" | "txt" => Ok(SourceFormat::Delimited),
            _ => Err(DataFileError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Options shared by every loader.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    pub columns: ColumnNames,
    /// Field delimiter for delimited text; sniffed from the header when unset.
    pub delimiter: Option<u8>,
}

static EMPTY_CELL: Cell = Cell::Empty;

/// One source cell, reduced to the shapes the loaders can produce.
#[derive(Debug, PartialEq, Clone)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(t) => t.clone(),
            Cell::Date(d) => d.to_string(),
            Cell::DateTime(dt) => dt.to_string(),
        }
    }
}

/// Read every observation of `path`, choosing the loader by extension.
pub fn load_observations(path: &Path, options: &LoadOptions) -> Result<Vec<Observation>> {
    let format = SourceFormat::from_path(path)?;
    info!("loading {} as {:?}", path.display(), format);
    let (headers, rows) = match format {
        SourceFormat::Workbook => spreadsheet::read_cells(path)?,
        SourceFormat::Dbf => dbf::read_cells(path)?,
        SourceFormat::Delimited => delimited::read_cells(path, options.delimiter)?,
    };
    let observations = rows_to_observations(headers.as_slice(), rows, &options.columns)?;
    info!(
        "loaded {} observations from {}",
        observations.len(),
        path.display()
    );
    Ok(observations)
}

/// Convert header-ordered rows into observations.
///
/// Row numbers in errors count the header as row 1. Rows without any
/// content are skipped.
pub fn rows_to_observations<S: AsRef<str>>(
    headers: &[S],
    rows: Vec<Vec<Cell>>,
    columns: &ColumnNames,
) -> Result<Vec<Observation>> {
    let index = columns.resolve(headers)?;
    let mut observations = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for (i, row) in rows.into_iter().enumerate() {
        let row_number = i + 2;
        if row.iter().all(Cell::is_blank) {
            skipped += 1;
            continue;
        }
        let cell = |at: usize| row.get(at).unwrap_or(&EMPTY_CELL);
        let point_id = point_name(cell(index.point)).ok_or(DataFileError::EmptyPointId {
            row: row_number,
        })?;
        let x = number(cell(index.x), row_number, "x")?;
        let y = number(cell(index.y), row_number, "y")?;
        let z = number(cell(index.z), row_number, "z")?;
        let date = raw_date(cell(index.date));
        if date.canonicalize().is_none() {
            return Err(DataFileError::InvalidDate {
                row: row_number,
                value: date.to_string(),
            });
        }
        observations.push(Observation::new(point_id, x, y, z, date));
    }
    if skipped > 0 {
        warn!("skipped {} empty rows", skipped);
    }
    debug!("converted {} rows", observations.len());
    Ok(observations)
}

fn point_name(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        // numeric point names come out of spreadsheets as floats
        Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
        other => {
            let name = other.describe().trim().to_string();
            (!name.is_empty()).then_some(name)
        }
    }
}

fn number(cell: &Cell, row: usize, column: &'static str) -> Result<f64> {
    let value = match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Text(text) => parse_decimal(text),
        _ => None,
    };
    value.ok_or_else(|| DataFileError::InvalidNumber {
        row,
        column,
        value: cell.describe(),
    })
}

fn raw_date(cell: &Cell) -> RawDate {
    match cell {
        Cell::Date(date) => RawDate::Date(*date),
        Cell::DateTime(datetime) => RawDate::DateTime(*datetime),
        Cell::Number(serial) => RawDate::Serial(*serial),
        Cell::Text(text) => RawDate::Text(text.clone()),
        Cell::Empty => RawDate::Text(String::new()),
    }
}
