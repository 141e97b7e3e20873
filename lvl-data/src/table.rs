//! The full normalization pipeline, from observations to output rows.

use crate::{
    aggregate::{aggregate, AggregatePolicy},
    fill::fill_all,
    series::OutputRow,
};
use lvl_survey::{normalize_dates, CanonicalDate, GlobalDateSequence, Observation, Result, SurveyError};
use serde::Serialize;

/// How well a single point is covered by real observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointCoverage {
    pub point_id: String,
    pub observed_dates: usize,
    pub baseline_date: CanonicalDate,
    pub baseline_elevation: f64,
}

/// Baseline-relative, gap-filled values of every point on every survey date.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeTable {
    pub dates: GlobalDateSequence,
    pub rows: Vec<OutputRow>,
    pub coverage: Vec<PointCoverage>,
}

impl RelativeTable {
    pub fn point_count(&self) -> usize {
        self.rows.len()
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }
}

/// Normalize dates, group by point, relativize and forward fill.
pub fn build_relative_table(
    observations: &[Observation],
    policy: AggregatePolicy,
) -> Result<RelativeTable> {
    if observations.is_empty() {
        return Err(SurveyError::EmptyInput);
    }
    let (dates, sequence) = normalize_dates(observations)?;
    let mut series = aggregate(observations, &dates, policy)?;

    let mut coverage = Vec::with_capacity(series.len());
    for point in &series {
        let (baseline_date, baseline_elevation) =
            point.baseline().ok_or_else(|| SurveyError::EmptySeries {
                point_id: point.point_id.clone(),
            })?;
        coverage.push(PointCoverage {
            point_id: point.point_id.clone(),
            observed_dates: point.len(),
            baseline_date,
            baseline_elevation,
        });
    }

    fill_all(&mut series, &sequence)?;
    let rows = series
        .iter()
        .map(|point| point.to_row(&sequence))
        .collect::<Result<Vec<OutputRow>>>()?;

    log::info!(
        "built table of {} points over {} survey dates",
        rows.len(),
        sequence.len()
    );
    Ok(RelativeTable {
        dates: sequence,
        rows,
        coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::build_relative_table;
    use crate::aggregate::AggregatePolicy;
    use chrono::NaiveDate;
    use lvl_survey::{CanonicalDate, Observation, RawDate, SurveyError};

    fn obs(id: &str, z: f64, y: i32, m: u32, d: u32) -> Observation {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Observation::new(id, 1000.0, 2000.0, z, RawDate::Date(date))
    }

    #[test]
    fn test_reference_scenario() {
        let observations = vec![
            obs("P1", 10.0, 2024, 1, 1),
            obs("P1", 10.25, 2024, 3, 1),
            obs("P2", 5.0, 2024, 2, 1),
        ];
        let table = build_relative_table(&observations, AggregatePolicy::default()).unwrap();
        assert_eq!(table.date_count(), 3);
        assert_eq!(table.point_count(), 2);
        assert_eq!(table.rows[0].point_id, "P1");
        assert_eq!(table.rows[0].values[0], 0.0);
        assert_eq!(table.rows[0].values[1], 0.0);
        assert!((table.rows[0].values[2] - 0.25).abs() < 1e-9);
        assert_eq!(table.rows[1].values, vec![0.0, 0.0, 0.0]);
        assert_eq!(table.coverage[1].observed_dates, 1);
        assert_eq!(
            table.coverage[1].baseline_date,
            CanonicalDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_every_row_is_complete_and_zero_before_baseline() {
        let observations = vec![
            obs("A", 1.0, 2020, 5, 1),
            obs("B", 2.0, 2021, 5, 1),
            obs("C", 3.0, 2022, 5, 1),
            obs("A", 1.5, 2022, 5, 1),
            obs("C", 2.5, 2023, 5, 1),
        ];
        let table = build_relative_table(&observations, AggregatePolicy::default()).unwrap();
        for (row, cov) in table.rows.iter().zip(&table.coverage) {
            assert_eq!(row.values.len(), table.dates.len());
            let base = table.dates.position(&cov.baseline_date).unwrap();
            assert!(row.values[..base].iter().all(|v| *v == 0.0));
            assert_eq!(row.values[base], 0.0);
        }
        // C drops by 0.5 after its baseline
        assert!((table.rows[2].values[3] + 0.5).abs() < 1e-9);
        // A keeps its 2022 rise through 2023
        assert!((table.rows[0].values[3] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            build_relative_table(&[], AggregatePolicy::default()).unwrap_err(),
            SurveyError::EmptyInput
        );
    }
}
