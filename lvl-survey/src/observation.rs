use crate::canonical_date::CanonicalDate;
use chrono::{NaiveDate, NaiveDateTime};
use lvl_utils::dates::{date_from_serial, parse_date_like};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A date value exactly as the source file delivered it.
///
/// - `Date` / `DateTime`: typed calendar cells
/// - `Serial`: spreadsheet serial day number (days since 1899-12-30)
/// - `Text`: anything stored as a string
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum RawDate {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Serial(f64),
    Text(String),
}

impl RawDate {
    /// Reduce to a calendar day, or `None` when the value is not date-like.
    pub fn canonicalize(&self) -> Option<CanonicalDate> {
        match self {
            RawDate::Date(date) => Some((*date).into()),
            RawDate::DateTime(datetime) => Some((*datetime).into()),
            RawDate::Serial(serial) => date_from_serial(*serial).map(CanonicalDate::from),
            RawDate::Text(text) => parse_date_like(text).map(CanonicalDate::from),
        }
    }
}

impl fmt::Display for RawDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDate::Date(date) => write!(f, "{date}"),
            RawDate::DateTime(datetime) => write!(f, "{datetime}"),
            RawDate::Serial(serial) => write!(f, "serial {serial}"),
            RawDate::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// A single elevation measurement of a survey point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub point_id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub date: RawDate,
}

impl Observation {
    pub fn new(point_id: impl Into<String>, x: f64, y: f64, z: f64, date: RawDate) -> Self {
        Observation {
            point_id: point_id.into(),
            x,
            y,
            z,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawDate;
    use crate::canonical_date::CanonicalDate;
    use chrono::NaiveDate;

    #[test]
    fn test_canonicalize_variants() {
        let expected = CanonicalDate::from_ymd_opt(2024, 1, 1);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(RawDate::Date(date).canonicalize(), expected);
        assert_eq!(
            RawDate::DateTime(date.and_hms_opt(17, 0, 0).unwrap()).canonicalize(),
            expected
        );
        assert_eq!(RawDate::Serial(45292.5).canonicalize(), expected);
        assert_eq!(RawDate::Text("01.01.2024".into()).canonicalize(), expected);
    }

    #[test]
    fn test_canonicalize_rejects_non_dates() {
        assert_eq!(RawDate::Text("n/a".into()).canonicalize(), None);
        assert_eq!(RawDate::Text(String::new()).canonicalize(), None);
        assert_eq!(RawDate::Serial(f64::INFINITY).canonicalize(), None);
        assert_eq!(RawDate::Serial(60.0).canonicalize(), None);
    }

    #[test]
    fn test_canonicalize_rejects_two_digit_years() {
        assert_eq!(RawDate::Text("01.02.24".into()).canonicalize(), None);
        assert_eq!(RawDate::Text("24-02-01".into()).canonicalize(), None);
    }
}
