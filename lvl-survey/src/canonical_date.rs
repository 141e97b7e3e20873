use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar day with any time of day stripped.
///
/// Ordering is calendar order, so sequences of `CanonicalDate` sort and
/// compare directly without any lookup table.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Create a CanonicalDate from year, month and day, if that day exists.
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<CanonicalDate> {
        NaiveDate::from_ymd_opt(year, month, day).map(CanonicalDate)
    }

    /// Convert to a NaiveDate.
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(value: NaiveDate) -> Self {
        CanonicalDate(value)
    }
}

impl From<NaiveDateTime> for CanonicalDate {
    fn from(value: NaiveDateTime) -> Self {
        CanonicalDate(value.date())
    }
}

impl From<CanonicalDate> for NaiveDate {
    fn from(value: CanonicalDate) -> Self {
        value.0
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&lvl_utils::dates::format_date(&self.0))
    }
}
