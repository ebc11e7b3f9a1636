//! Reporting utilities: aggregation, rankings, and formatted terminal output.

pub mod format;
pub mod ranking;

pub use format::{format_ranking, format_run_summary};
pub use ranking::{HorizonCoverage, aggregate, coverage, rank, rank_with_order};
