use lvl_survey::{CanonicalDate, GlobalDateSequence, Result, SurveyError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All elevations of one survey point, keyed by survey date.
///
/// Holds raw elevations after aggregation; after [`PointSeries::relativize_and_fill`]
/// it holds one baseline-relative value per global survey date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    pub point_id: String,
    pub x: f64,
    pub y: f64,
    pub(crate) values: BTreeMap<CanonicalDate, f64>,
}

impl PointSeries {
    pub fn new(point_id: impl Into<String>, x: f64, y: f64) -> Self {
        PointSeries {
            point_id: point_id.into(),
            x,
            y,
            values: BTreeMap::new(),
        }
    }

    /// Store `z` for `date`, returning the value it replaced.
    pub fn insert(&mut self, date: CanonicalDate, z: f64) -> Option<f64> {
        self.values.insert(date, z)
    }

    pub fn get(&self, date: &CanonicalDate) -> Option<f64> {
        self.values.get(date).copied()
    }

    pub fn values(&self) -> &BTreeMap<CanonicalDate, f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flatten into a row aligned with `dates`.
    ///
    /// Only valid once the series has been filled against the same sequence.
    pub fn to_row(&self, dates: &GlobalDateSequence) -> Result<OutputRow> {
        let values = dates
            .iter()
            .map(|date| {
                self.get(date).ok_or_else(|| SurveyError::Unfilled {
                    point_id: self.point_id.clone(),
                    date: *date,
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(OutputRow {
            point_id: self.point_id.clone(),
            x: self.x,
            y: self.y,
            values,
        })
    }
}

/// One line of the output table; `values[i]` belongs to the i-th survey date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub point_id: String,
    pub x: f64,
    pub y: f64,
    pub values: Vec<f64>,
}
