//! Data processing for leveling observations.
//!
//! This crate turns a flat list of observations into the wide,
//! baseline-relative table: observations are grouped per point
//! ([`aggregate`]), each point is rewritten relative to its first
//! observation and filled forward across every survey date ([`fill`]),
//! and the result is flattened into positionally aligned rows ([`table`]).

pub mod aggregate;
pub mod fill;
pub mod series;
pub mod table;

pub use aggregate::{aggregate, AggregatePolicy, CoordinatePolicy, DuplicatePolicy};
pub use series::{OutputRow, PointSeries};
pub use table::{build_relative_table, RelativeTable};
