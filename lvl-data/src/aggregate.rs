//! Folding observations into one [`PointSeries`] per survey point.

use crate::series::PointSeries;
use lvl_survey::{CanonicalDate, Observation, Result, SurveyError};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

/// Coordinates closer than this are the same position at output precision.
pub const COORDINATE_TOLERANCE: f64 = 0.0005;

/// What to do when a point shows up with a different X/Y.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatePolicy {
    /// The latest observation's coordinates replace earlier ones.
    #[default]
    Overwrite,
    /// Diverging coordinates abort the run.
    Strict,
}

/// What to do when a point has two elevations on the same day.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The later observation wins.
    #[default]
    Overwrite,
    /// Mean of every elevation recorded that day.
    Average,
    /// A second elevation aborts the run.
    Strict,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
pub struct AggregatePolicy {
    pub coordinates: CoordinatePolicy,
    pub duplicates: DuplicatePolicy,
}

impl FromStr for CoordinatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CoordinatePolicy::Overwrite),
            "strict" => Ok(CoordinatePolicy::Strict),
            other => Err(format!(
                "unknown coordinate policy {other:?} (expected overwrite or strict)"
            )),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "average" => Ok(DuplicatePolicy::Average),
            "strict" => Ok(DuplicatePolicy::Strict),
            other => Err(format!(
                "unknown duplicate policy {other:?} (expected overwrite, average or strict)"
            )),
        }
    }
}

impl fmt::Display for CoordinatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinatePolicy::Overwrite => f.write_str("overwrite"),
            CoordinatePolicy::Strict => f.write_str("strict"),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Overwrite => f.write_str("overwrite"),
            DuplicatePolicy::Average => f.write_str("average"),
            DuplicatePolicy::Strict => f.write_str("strict"),
        }
    }
}

/// Group observations by point id.
///
/// `dates` must be aligned with `observations` (as returned by
/// [`lvl_survey::normalize_dates`]). Points keep the order in which their
/// id first appears.
pub fn aggregate(
    observations: &[Observation],
    dates: &[CanonicalDate],
    policy: AggregatePolicy,
) -> Result<Vec<PointSeries>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<PointSeries> = Vec::new();
    // observations seen per (point, date), only needed for averaging
    let mut tallies: HashMap<(usize, CanonicalDate), u32> = HashMap::new();

    for (obs, date) in observations.iter().zip(dates.iter().copied()) {
        let slot = match index.get(obs.point_id.as_str()) {
            Some(&slot) => {
                update_coordinates(&mut series[slot], obs, policy.coordinates)?;
                slot
            }
            None => {
                series.push(PointSeries::new(obs.point_id.clone(), obs.x, obs.y));
                index.insert(obs.point_id.as_str(), series.len() - 1);
                series.len() - 1
            }
        };
        let point = &mut series[slot];
        match point.get(&date) {
            None => {
                point.insert(date, obs.z);
                tallies.insert((slot, date), 1);
            }
            Some(previous) => match policy.duplicates {
                DuplicatePolicy::Overwrite => {
                    log::debug!(
                        "point {}: {} observed again, {} replaces {}",
                        obs.point_id,
                        date,
                        obs.z,
                        previous
                    );
                    point.insert(date, obs.z);
                }
                DuplicatePolicy::Average => {
                    let count = tallies.entry((slot, date)).or_insert(1);
                    *count += 1;
                    let mean = previous + (obs.z - previous) / f64::from(*count);
                    point.insert(date, mean);
                }
                DuplicatePolicy::Strict => {
                    return Err(SurveyError::DuplicateObservation {
                        point_id: obs.point_id.clone(),
                        date,
                    });
                }
            },
        }
    }

    log::info!(
        "aggregated {} observations into {} points",
        observations.len(),
        series.len()
    );
    Ok(series)
}

fn update_coordinates(
    point: &mut PointSeries,
    obs: &Observation,
    policy: CoordinatePolicy,
) -> Result<()> {
    let moved = (point.x - obs.x).abs() > COORDINATE_TOLERANCE
        || (point.y - obs.y).abs() > COORDINATE_TOLERANCE;
    match policy {
        CoordinatePolicy::Strict if moved => Err(SurveyError::CoordinateMismatch {
            point_id: point.point_id.clone(),
            x0: point.x,
            y0: point.y,
            x1: obs.x,
            y1: obs.y,
        }),
        CoordinatePolicy::Strict => Ok(()),
        CoordinatePolicy::Overwrite => {
            if moved {
                log::debug!(
                    "point {}: coordinates ({}, {}) replaced by ({}, {})",
                    point.point_id,
                    point.x,
                    point.y,
                    obs.x,
                    obs.y
                );
            }
            point.x = obs.x;
            point.y = obs.y;
            Ok(())
        }
    }
}
