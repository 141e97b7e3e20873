use crate::error::{DataFileError, Result};
use serde::{Deserialize, Serialize};

/// Header names of the five columns every source must provide.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ColumnNames {
    pub point: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub date: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            point: "name".to_string(),
            x: "x".to_string(),
            y: "y".to_string(),
            z: "z".to_string(),
            date: "date".to_string(),
        }
    }
}

/// Positions of the required columns within a header row.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ColumnIndex {
    pub point: usize,
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub date: usize,
}

impl ColumnNames {
    /// Locate every required column in `headers`.
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> Result<ColumnIndex> {
        let find = |role: &'static str, name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.as_ref().trim().eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| DataFileError::MissingColumn {
                    role,
                    name: name.to_string(),
                    available: headers.iter().map(|h| h.as_ref().trim().to_string()).collect(),
                })
        };
        Ok(ColumnIndex {
            point: find("point", &self.point)?,
            x: find("x", &self.x)?,
            y: find("y", &self.y)?,
            z: find("z", &self.z)?,
            date: find("date", &self.date)?,
        })
    }
}
