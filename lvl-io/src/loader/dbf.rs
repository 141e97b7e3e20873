//! dBASE (`.dbf`) sources.

use super::Cell;
use crate::error::Result;
use chrono::NaiveDate;
use dbase::FieldValue;
use std::path::Path;

/// Read every record of a dBASE table, ordered by the table's fields.
pub fn read_cells(path: &Path) -> Result<(Vec<String>, Vec<Vec<Cell>>)> {
    let mut reader = dbase::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();
    let records = reader.read()?;
    log::debug!(
        "dbf source {}: {} fields, {} records",
        path.display(),
        headers.len(),
        records.len()
    );
    let rows = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|name| record.get(name).map(cell_from).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();
    Ok((headers, rows))
}

fn date_cell(date: &dbase::Date) -> Cell {
    NaiveDate::from_ymd_opt(date.year() as i32, date.month(), date.day())
        .map(Cell::Date)
        .unwrap_or_else(|| {
            Cell::Text(format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            ))
        })
}

/// Map a dBASE field value onto a loader cell.
pub fn cell_from(value: &FieldValue) -> Cell {
    match value {
        FieldValue::Character(Some(text)) => Cell::Text(text.trim().to_string()),
        FieldValue::Memo(text) => Cell::Text(text.trim().to_string()),
        FieldValue::Numeric(Some(n)) => Cell::Number(*n),
        FieldValue::Float(Some(f)) => Cell::Number(f64::from(*f)),
        FieldValue::Integer(i) => Cell::Number(f64::from(*i)),
        FieldValue::Double(d) => Cell::Number(*d),
        FieldValue::Currency(c) => Cell::Number(*c),
        FieldValue::Logical(Some(b)) => Cell::Text(b.to_string()),
        FieldValue::Date(Some(date)) => date_cell(date),
        FieldValue::DateTime(datetime) => date_cell(&datetime.date()),
        _ => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::{cell_from, read_cells};
    use crate::loader::Cell;
    use chrono::NaiveDate;
    use dbase::FieldValue;
    use std::path::Path;

    #[test]
    fn test_cell_from_field_values() {
        assert_eq!(
            cell_from(&FieldValue::Character(Some("P1   ".into()))),
            Cell::Text("P1".into())
        );
        assert_eq!(cell_from(&FieldValue::Character(None)), Cell::Empty);
        assert_eq!(
            cell_from(&FieldValue::Numeric(Some(312.417))),
            Cell::Number(312.417)
        );
        assert_eq!(cell_from(&FieldValue::Numeric(None)), Cell::Empty);
        assert_eq!(cell_from(&FieldValue::Integer(7)), Cell::Number(7.0));
        assert_eq!(
            cell_from(&FieldValue::Date(Some(dbase::Date::new(15, 3, 2024)))),
            Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
    }

    #[test]
    fn test_load_written_table() {
        use crate::loader::{load_observations, LoadOptions};
        use dbase::{FieldName, Record, TableWriterBuilder};
        use lvl_survey::CanonicalDate;

        let path = std::env::temp_dir().join(format!("lvl-io-points-{}.dbf", std::process::id()));
        // field order differs from the default column order
        let writer = TableWriterBuilder::new()
            .add_date_field(FieldName::try_from("DATE").unwrap())
            .add_character_field(FieldName::try_from("NAME").unwrap(), 12)
            .add_numeric_field(FieldName::try_from("Z").unwrap(), 12, 3)
            .add_numeric_field(FieldName::try_from("X").unwrap(), 12, 3)
            .add_numeric_field(FieldName::try_from("Y").unwrap(), 12, 3)
            .build_with_file_dest(&path)
            .unwrap();
        let record = |name: &str, z: f64, date: dbase::Date| {
            let mut record = Record::default();
            record.insert("DATE".to_string(), FieldValue::Date(Some(date)));
            record.insert("NAME".to_string(), FieldValue::Character(Some(name.to_string())));
            record.insert("Z".to_string(), FieldValue::Numeric(Some(z)));
            record.insert("X".to_string(), FieldValue::Numeric(Some(4512.331)));
            record.insert("Y".to_string(), FieldValue::Numeric(Some(5321.87)));
            record
        };
        let records = vec![
            record("P1", 10.0, dbase::Date::new(1, 1, 2024)),
            record("P2", 5.25, dbase::Date::new(1, 2, 2024)),
        ];
        writer.write_records(&records).unwrap();

        let (headers, rows) = read_cells(&path).unwrap();
        assert_eq!(headers, vec!["DATE", "NAME", "Z", "X", "Y"]);
        assert_eq!(rows[0][1], Cell::Text("P1".into()));

        let observations = load_observations(&path, &LoadOptions::default()).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].point_id, "P2");
        assert_eq!(observations[1].z, 5.25);
        assert_eq!(observations[1].x, 4512.331);
        assert_eq!(
            observations[1].date.canonicalize(),
            CanonicalDate::from_ymd_opt(2024, 2, 1)
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_table_is_an_error() {
        assert!(read_cells(Path::new("does-not-exist/points.dbf")).is_err());
    }
}
