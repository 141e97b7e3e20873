//! Delimited text sources (`.csv`, `.txt`).
//!
//! Expected format (with headers), for example:
//!
//! ```text
//! name;x;y;z;date
//! P1;4512.331;5321.870;312,417;01.01.2024
//! ```

use super::Cell;
use crate::error::{DataFileError, Result};
use std::path::Path;

/// Pick the delimiter from the header line: `;` first, then tab, else `,`.
pub fn sniff_delimiter(data: &str) -> u8 {
    let header = data.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if header.contains(';') {
        b';'
    } else if header.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

/// Parse delimited text held in memory.
pub fn parse_cells(data: &str, delimiter: Option<u8>) -> Result<(Vec<String>, Vec<Vec<Cell>>)> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(data));
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataFileError::MissingHeader);
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    log::debug!(
        "delimited source: {} columns, {} rows, delimiter {:?}",
        headers.len(),
        rows.len(),
        delimiter as char
    );
    Ok((headers, rows))
}

/// Read a delimited text file.
pub fn read_cells(path: &Path, delimiter: Option<u8>) -> Result<(Vec<String>, Vec<Vec<Cell>>)> {
    let data = std::fs::read_to_string(path)?;
    parse_cells(&data, delimiter)
}
