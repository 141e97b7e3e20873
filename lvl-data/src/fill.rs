//! Baseline relativization and forward fill.
//!
//! Every point is rewritten relative to its earliest observation and then
//! given a value for every global survey date:
//!
//! - dates before the point's baseline are zero (no displacement yet)
//! - other missing dates carry the value of the nearest observed date at or
//!   before them

use crate::series::PointSeries;
use lvl_survey::{CanonicalDate, GlobalDateSequence, Result, SurveyError};
use std::collections::BTreeMap;

impl PointSeries {
    /// Earliest observed date and its elevation.
    pub fn baseline(&self) -> Option<(CanonicalDate, f64)> {
        self.values
            .first_key_value()
            .map(|(date, value)| (*date, *value))
    }

    /// Replace raw elevations by baseline-relative ones and fill every date
    /// of `dates` the point was not observed on.
    ///
    /// Afterwards the series' dates are exactly `dates`. Returns the
    /// absolute baseline elevation.
    pub fn relativize_and_fill(&mut self, dates: &GlobalDateSequence) -> Result<f64> {
        let (baseline_date, baseline_value) =
            self.baseline().ok_or_else(|| SurveyError::EmptySeries {
                point_id: self.point_id.clone(),
            })?;

        let observed: BTreeMap<CanonicalDate, f64> = self
            .values
            .iter()
            .map(|(date, z)| (*date, z - baseline_value))
            .collect();
        if let Some(stray) = observed.keys().find(|date| !dates.contains(date)) {
            return Err(SurveyError::MissingGlobalDate {
                point_id: self.point_id.clone(),
                date: *stray,
            });
        }

        let mut filled = BTreeMap::new();
        for date in dates {
            let value = if *date < baseline_date {
                0.0
            } else {
                // greatest observed date <= target
                observed
                    .range(..=*date)
                    .next_back()
                    .map(|(_, value)| *value)
                    .ok_or_else(|| SurveyError::NoPriorObservation {
                        point_id: self.point_id.clone(),
                        date: *date,
                    })?
            };
            filled.insert(*date, value);
        }

        log::debug!(
            "point {}: baseline {} at {}, {} observed, {} filled",
            self.point_id,
            baseline_value,
            baseline_date,
            observed.len(),
            filled.len() - observed.len()
        );
        self.values = filled;
        Ok(baseline_value)
    }
}

/// Run [`PointSeries::relativize_and_fill`] on every point.
///
/// Returns the absolute baseline elevation of each point, in order.
pub fn fill_all(series: &mut [PointSeries], dates: &GlobalDateSequence) -> Result<Vec<f64>> {
    series
        .iter_mut()
        .map(|point| point.relativize_and_fill(dates))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::fill_all;
    use crate::series::PointSeries;
    use lvl_survey::{CanonicalDate, GlobalDateSequence, SurveyError};

    fn day(y: i32, m: u32, d: u32) -> CanonicalDate {
        CanonicalDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(id: &str, points: &[(CanonicalDate, f64)]) -> PointSeries {
        let mut s = PointSeries::new(id, 0.0, 0.0);
        for (date, z) in points {
            s.insert(*date, *z);
        }
        s
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_reference_scenario() {
        let (jan, feb, mar) = (day(2024, 1, 1), day(2024, 2, 1), day(2024, 3, 1));
        let dates = GlobalDateSequence::from_dates(vec![jan, feb, mar]);
        let mut points = vec![
            series("P1", &[(jan, 10.0), (mar, 10.25)]),
            series("P2", &[(feb, 5.0)]),
        ];
        let baselines = fill_all(&mut points, &dates).unwrap();
        assert_eq!(baselines, vec![10.0, 5.0]);

        let p1 = points[0].to_row(&dates).unwrap().values;
        assert_close(p1[0], 0.0);
        assert_close(p1[1], 0.0);
        assert_close(p1[2], 0.25);

        let p2 = points[1].to_row(&dates).unwrap().values;
        assert_eq!(p2, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_forward_fill_uses_nearest_prior_observation() {
        let d: Vec<CanonicalDate> = (1..=6).map(|m| day(2024, m, 1)).collect();
        let dates = GlobalDateSequence::from_dates(d.clone());
        // observed on months 2, 3 and 5; 4 and 6 must copy 3 and 5
        let mut point = series("P", &[(d[1], 100.0), (d[2], 99.5), (d[4], 101.0)]);
        point.relativize_and_fill(&dates).unwrap();
        let row = point.to_row(&dates).unwrap().values;
        assert_eq!(row[0], 0.0);
        assert_eq!(row[1], 0.0);
        assert_close(row[2], -0.5);
        assert_close(row[3], -0.5);
        assert_close(row[4], 1.0);
        assert_close(row[5], 1.0);
    }

    #[test]
    fn test_single_observation_point() {
        let d: Vec<CanonicalDate> = (1..=4).map(|m| day(2023, m, 15)).collect();
        let dates = GlobalDateSequence::from_dates(d.clone());
        let mut point = series("P", &[(d[2], 42.0)]);
        let baseline = point.relativize_and_fill(&dates).unwrap();
        assert_eq!(baseline, 42.0);
        assert_eq!(point.to_row(&dates).unwrap().values, vec![0.0; 4]);
    }

    #[test]
    fn test_key_set_equals_global_sequence() {
        let d: Vec<CanonicalDate> = (1..=5).map(|m| day(2022, m, 1)).collect();
        let dates = GlobalDateSequence::from_dates(d.clone());
        let mut point = series("P", &[(d[3], 3.0), (d[1], 1.0)]);
        point.relativize_and_fill(&dates).unwrap();
        let keys: Vec<CanonicalDate> = point.values().keys().copied().collect();
        assert_eq!(keys, dates.as_slice());
    }

    #[test]
    fn test_relativity_round_trip() {
        let d: Vec<CanonicalDate> = (1..=4).map(|m| day(2021, m, 1)).collect();
        let dates = GlobalDateSequence::from_dates(d.clone());
        let raw = [(d[0], 312.417), (d[1], 312.409), (d[3], 312.431)];
        let mut point = series("P", &raw);
        let baseline = point.relativize_and_fill(&dates).unwrap();
        for (date, z) in raw {
            assert_close(point.get(&date).unwrap() + baseline, z);
        }
    }

    #[test]
    fn test_empty_series_is_invariant_violation() {
        let dates = GlobalDateSequence::from_dates(vec![day(2024, 1, 1)]);
        let mut point = PointSeries::new("ghost", 0.0, 0.0);
        assert_eq!(
            point.relativize_and_fill(&dates).unwrap_err(),
            SurveyError::EmptySeries {
                point_id: "ghost".into()
            }
        );
    }

    #[test]
    fn test_date_outside_sequence_is_invariant_violation() {
        let dates = GlobalDateSequence::from_dates(vec![day(2024, 1, 1)]);
        let mut point = series("P", &[(day(2024, 1, 1), 1.0), (day(2024, 6, 1), 2.0)]);
        assert_eq!(
            point.relativize_and_fill(&dates).unwrap_err(),
            SurveyError::MissingGlobalDate {
                point_id: "P".into(),
                date: day(2024, 6, 1),
            }
        );
    }
}
