//! Shared utility functions for the leveling survey crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta};

    /// Calendar date layouts accepted in text cells.
    pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

    /// Time-of-day suffixes that may follow any of the [`DATE_FORMATS`].
    pub const TIME_SUFFIXES: [&str; 6] = [
        " %H:%M:%S%.f",
        " %H:%M:%S",
        " %H:%M",
        "T%H:%M:%S%.f",
        "T%H:%M:%S",
        "T%H:%M",
    ];

    /// Day zero of spreadsheet serial dates (1900 date system).
    pub fn serial_epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
    }

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Format a NaiveDate with a caller supplied chrono format string.
    ///
    /// Fails instead of panicking when the format string holds an
    /// unknown specifier.
    pub fn format_date_with(date: &NaiveDate, format: &str) -> anyhow::Result<String> {
        use std::fmt::Write;
        let mut out = String::new();
        write!(out, "{}", date.format(format))
            .map_err(|_| anyhow::anyhow!("invalid date format string: {format:?}"))?;
        Ok(out)
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse a date string in "YYYYMMDD" format
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!("not a compact YYYYMMDD date: {s:?}");
        }
        let year: i32 = s[0..4].parse()?;
        let month: u32 = s[4..6].parse()?;
        let day: u32 = s[6..8].parse()?;
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| anyhow::anyhow!("no such calendar day: {s:?}"))
    }

    /// Interpret free text as a calendar date, dropping any time of day.
    ///
    /// Tries the compact `YYYYMMDD` form, every entry of [`DATE_FORMATS`]
    /// alone and followed by each of [`TIME_SUFFIXES`], and finally RFC 3339.
    /// Only four-digit years are accepted: chrono's `%Y` would read
    /// `01.02.24` as the year 24.
    pub fn parse_date_like(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        parse_any_layout(s).filter(|date| (1000..=9999).contains(&date.year()))
    }

    fn parse_any_layout(s: &str) -> Option<NaiveDate> {
        if let Ok(date) = parse_date_compact(s) {
            return Some(date);
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Some(date);
            }
            for suffix in TIME_SUFFIXES {
                let full = format!("{format}{suffix}");
                if let Ok(datetime) = NaiveDateTime::parse_from_str(s, &full) {
                    return Some(datetime.date());
                }
            }
        }
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|datetime| datetime.date_naive())
    }

    /// Convert a spreadsheet serial day number into a calendar date.
    ///
    /// The fractional part (time of day) is discarded. The 1900 date system
    /// counts a 1900-02-29 that never existed as serial 60: that serial is
    /// rejected and serials 1..=59 are moved one day later so they land on
    /// the dates a spreadsheet displays. Serial 0 is not a date.
    pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
            return None;
        }
        let whole = serial.floor() as i64;
        let days = match whole {
            60 => return None,
            ..=59 => whole + 1,
            _ => whole,
        };
        serial_epoch().checked_add_signed(TimeDelta::try_days(days)?)
    }

}

/// Number parsing and fixed precision formatting
pub mod numbers {
    /// Parse a decimal number that may use a comma as decimal separator.
    ///
    /// Returns `None` for empty or non-finite input.
    pub fn parse_decimal(s: &str) -> Option<f64> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let value = if s.contains(',') && !s.contains('.') {
            s.replace(',', ".").parse::<f64>().ok()?
        } else {
            s.parse::<f64>().ok()?
        };
        value.is_finite().then_some(value)
    }

    /// Format `value` with exactly `precision` decimals using
    /// `decimal_separator`. Values that round to zero never carry a sign.
    pub fn format_fixed(value: f64, precision: usize, decimal_separator: char) -> String {
        let mut text = format!("{value:.precision$}");
        if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
            text.remove(0);
        }
        if decimal_separator != '.' {
            text = text.replace('.', &decimal_separator.to_string());
        }
        text
    }

}
