//! Survey report without writing a table.

use crate::{InputArgs, PolicyArgs};
use anyhow::Context;
use log::info;
use lvl_data::{build_relative_table, table::PointCoverage, RelativeTable};
use lvl_io::load_observations;
use lvl_survey::CanonicalDate;
use serde::Serialize;
use std::path::Path;

/// What `inspect` reports about a survey.
#[derive(Debug, Serialize)]
pub struct SurveySummary {
    pub observations: usize,
    pub points: usize,
    pub survey_dates: Vec<CanonicalDate>,
    pub first_date: Option<CanonicalDate>,
    pub last_date: Option<CanonicalDate>,
    pub coverage: Vec<PointCoverage>,
}

impl SurveySummary {
    pub fn new(observations: usize, table: &RelativeTable) -> Self {
        SurveySummary {
            observations,
            points: table.point_count(),
            survey_dates: table.dates.as_slice().to_vec(),
            first_date: table.dates.first(),
            last_date: table.dates.last(),
            coverage: table.coverage.clone(),
        }
    }

    /// Plain text rendering, one line per point.
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} observations, {} points, {} survey dates",
            self.observations,
            self.points,
            self.survey_dates.len()
        );
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            out.push_str(&format!(" ({first} .. {last})"));
        }
        out.push('\n');
        for point in &self.coverage {
            out.push_str(&format!(
                "{}: {}/{} dates observed, baseline {} at {}\n",
                point.point_id,
                point.observed_dates,
                self.survey_dates.len(),
                point.baseline_elevation,
                point.baseline_date
            ));
        }
        out
    }
}

pub fn run_inspect(
    file: &Path,
    input: &InputArgs,
    policy: &PolicyArgs,
    json: bool,
) -> anyhow::Result<()> {
    let options = input.load_options()?;
    let observations = load_observations(file, &options)
        .with_context(|| format!("failed to load {}", file.display()))?;
    let table = build_relative_table(&observations, policy.aggregate_policy())
        .with_context(|| format!("failed to normalize {}", file.display()))?;
    let summary = SurveySummary::new(observations.len(), &table);
    info!(
        "Inspected {}: {} points over {} survey dates",
        file.display(),
        summary.points,
        summary.survey_dates.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render());
    }
    Ok(())
}
