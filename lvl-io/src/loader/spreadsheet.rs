//! Workbook sources, read through calamine.
//!
//! Only the first worksheet is used; its first row names the columns.

use super::Cell;
use crate::error::{DataFileError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Read the first worksheet of a workbook.
pub fn read_cells(path: &Path) -> Result<(Vec<String>, Vec<Vec<Cell>>)> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DataFileError::NoWorksheet)??;
    if let Some(first) = sheet_names.first() {
        log::debug!("reading worksheet {:?} of {}", first, path.display());
    }

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(DataFileError::MissingHeader)?
        .iter()
        .map(|data| data.to_string())
        .collect();
    let rows: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(cell_from).collect()).collect();
    Ok((headers, rows))
}

/// Map a workbook cell onto a loader cell.
///
/// Typed date cells keep their time of day only when it is not midnight;
/// dates the workbook cannot resolve fall back to their serial number.
pub fn cell_from(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                Cell::Date(datetime.date())
            }
            Some(datetime) => Cell::DateTime(datetime),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{cell_from, read_cells};
    use crate::loader::Cell;
    use calamine::Data;
    use std::path::Path;

    #[test]
    fn test_cell_from_plain_values() {
        assert_eq!(cell_from(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from(&Data::Int(101)), Cell::Number(101.0));
        assert_eq!(cell_from(&Data::Float(312.417)), Cell::Number(312.417));
        assert_eq!(
            cell_from(&Data::String("P1".into())),
            Cell::Text("P1".into())
        );
        assert_eq!(
            cell_from(&Data::DateTimeIso("2024-01-01T00:00:00".into())),
            Cell::Text("2024-01-01T00:00:00".into())
        );
    }

    #[test]
    fn test_load_first_worksheet() {
        use crate::loader::{load_observations, LoadOptions};
        use lvl_survey::{CanonicalDate, RawDate};
        use rust_xlsxwriter::{Format, Workbook};

        let path =
            std::env::temp_dir().join(format!("lvl-io-survey-{}.xlsx", std::process::id()));
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        {
            let sheet = workbook.add_worksheet();
            for (col, header) in ["Name", "X", "Y", "Z", "Date"].into_iter().enumerate() {
                sheet.write_string(0, col as u16, header).unwrap();
            }
            sheet.write_string(1, 0, "P1").unwrap();
            sheet.write_number(1, 1, 4512.331).unwrap();
            sheet.write_number(1, 2, 5321.87).unwrap();
            sheet.write_number(1, 3, 10.0).unwrap();
            sheet.write_number_with_format(1, 4, 45292.0, &date_format).unwrap();
            sheet.write_string(2, 0, "P1").unwrap();
            sheet.write_number(2, 1, 4512.331).unwrap();
            sheet.write_number(2, 2, 5321.87).unwrap();
            sheet.write_number(2, 3, 10.25).unwrap();
            sheet.write_string(2, 4, "01.03.2024").unwrap();
            // numeric point name with a typed date
            sheet.write_number(3, 0, 7.0).unwrap();
            sheet.write_number(3, 1, 4498.0).unwrap();
            sheet.write_number(3, 2, 5321.87).unwrap();
            sheet.write_number(3, 3, 5.0).unwrap();
            sheet.write_number_with_format(3, 4, 45323.0, &date_format).unwrap();
        }
        {
            let other = workbook.add_worksheet();
            other.write_string(0, 0, "not a survey").unwrap();
        }
        workbook.save(&path).unwrap();

        let (headers, rows) = read_cells(&path).unwrap();
        assert_eq!(headers, vec!["Name", "X", "Y", "Z", "Date"]);
        assert_eq!(rows.len(), 3);

        let observations = load_observations(&path, &LoadOptions::default()).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].point_id, "P1");
        assert_eq!(
            observations[0].date.canonicalize(),
            CanonicalDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(observations[1].z, 10.25);
        assert_eq!(observations[1].date, RawDate::Text("01.03.2024".into()));
        assert_eq!(observations[2].point_id, "7");
        assert_eq!(
            observations[2].date.canonicalize(),
            CanonicalDate::from_ymd_opt(2024, 2, 1)
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        let path = Path::new("does-not-exist/survey.xlsx");
        assert!(read_cells(path).is_err());
    }
}
