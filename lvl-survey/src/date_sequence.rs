use crate::{
    canonical_date::CanonicalDate,
    error::{Result, SurveyError},
    observation::Observation,
};
use std::collections::BTreeSet;

/// Every distinct survey date across all points, strictly ascending.
///
/// Built once per run and only read afterwards; its order is the column
/// order of the output table.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct GlobalDateSequence(Vec<CanonicalDate>);

impl GlobalDateSequence {
    /// Deduplicate and sort any collection of dates.
    pub fn from_dates<I: IntoIterator<Item = CanonicalDate>>(dates: I) -> Self {
        let unique: BTreeSet<CanonicalDate> = dates.into_iter().collect();
        GlobalDateSequence(unique.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[CanonicalDate] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalDate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<CanonicalDate> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<CanonicalDate> {
        self.0.last().copied()
    }

    pub fn contains(&self, date: &CanonicalDate) -> bool {
        self.position(date).is_some()
    }

    /// Column index of `date`, if it is part of the sequence.
    pub fn position(&self, date: &CanonicalDate) -> Option<usize> {
        self.0.binary_search(date).ok()
    }
}

impl<'a> IntoIterator for &'a GlobalDateSequence {
    type Item = &'a CanonicalDate;
    type IntoIter = std::slice::Iter<'a, CanonicalDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Canonicalize the date of every observation and derive the global sequence.
///
/// The returned dates are aligned with `observations`. A single value that
/// is not a calendar date aborts the whole run, since the sequence every
/// point is filled against would be wrong without it.
pub fn normalize_dates(
    observations: &[Observation],
) -> Result<(Vec<CanonicalDate>, GlobalDateSequence)> {
    let dates = observations
        .iter()
        .enumerate()
        .map(|(index, obs)| {
            obs.date
                .canonicalize()
                .ok_or_else(|| SurveyError::UnparseableDate {
                    index,
                    point_id: obs.point_id.clone(),
                    value: obs.date.to_string(),
                })
        })
        .collect::<Result<Vec<CanonicalDate>>>()?;
    let sequence = GlobalDateSequence::from_dates(dates.iter().copied());
    log::debug!(
        "normalized {} observation dates into {} survey dates",
        dates.len(),
        sequence.len()
    );
    Ok((dates, sequence))
}
