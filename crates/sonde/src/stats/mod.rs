//! Statistic helpers used by the leaf analyzers.

mod continuous;
mod frequency;
mod temporal;

pub use continuous::{ContinuousStats, QUANTILES, quantile};
pub use frequency::{null_count, unique_row_count, value_counts};
pub use temporal::TemporalPeriod;
