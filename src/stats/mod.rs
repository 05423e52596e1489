//! Stats module - quantile summaries

mod calculator;

pub use calculator::{GroupSummary, StatsCalculator};
