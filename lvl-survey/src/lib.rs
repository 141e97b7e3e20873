//! Core types for leveling survey observations.
//!
//! An [`observation::Observation`] is one measured elevation of a survey
//! point on some date. Dates arrive in whatever shape the source file
//! stored them ([`observation::RawDate`]) and are reduced to a
//! [`canonical_date::CanonicalDate`] before anything is compared or sorted.

pub mod canonical_date;
pub mod date_sequence;
pub mod error;
pub mod observation;

pub use canonical_date::CanonicalDate;
pub use date_sequence::{normalize_dates, GlobalDateSequence};
pub use error::{Result, SurveyError};
pub use observation::{Observation, RawDate};
