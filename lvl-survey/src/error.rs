/// Error types for the survey core
use crate::canonical_date::CanonicalDate;
use thiserror::Error;

/// Main error type for the normalization pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurveyError {
    /// A raw date value could not be read as a calendar date
    #[error("observation #{index} (point {point_id:?}): cannot interpret {value} as a calendar date")]
    UnparseableDate {
        index: usize,
        point_id: String,
        value: String,
    },

    /// Nothing to normalize
    #[error("no observations to process")]
    EmptyInput,

    /// Strict coordinate policy found two different positions for one point
    #[error("point {point_id:?} has diverging coordinates: ({x0}, {y0}) vs ({x1}, {y1})")]
    CoordinateMismatch {
        point_id: String,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },

    /// Strict duplicate policy found a second elevation for one point and date
    #[error("point {point_id:?} was observed more than once on {date}")]
    DuplicateObservation {
        point_id: String,
        date: CanonicalDate,
    },

    /// Internal invariant violated: a point series without observations
    #[error("internal invariant violated: point {point_id:?} has no observations")]
    EmptySeries { point_id: String },

    /// Internal invariant violated: a point holds a date the global sequence lacks
    #[error("internal invariant violated: date {date} of point {point_id:?} is missing from the global date sequence")]
    MissingGlobalDate {
        point_id: String,
        date: CanonicalDate,
    },

    /// Internal invariant violated: a filled point lacks a value for a survey date
    #[error("internal invariant violated: point {point_id:?} has no value for survey date {date}")]
    Unfilled {
        point_id: String,
        date: CanonicalDate,
    },

    /// Internal invariant violated: no observation precedes a date at or after baseline
    #[error("internal invariant violated: no observation of point {point_id:?} at or before {date}")]
    NoPriorObservation {
        point_id: String,
        date: CanonicalDate,
    },
}

/// Type alias for Results using SurveyError
pub type Result<T> = std::result::Result<T, SurveyError>;
