//! Domain types used throughout the pipeline.
//!
//! - `Horizon`: the three fixed measurement windows
//! - `OperatorDirectory`: which operators are reported, in display order
//! - `OperatorReturnRecord` / `RankedResultSet`: aggregated and ranked output

pub mod types;

pub use types::*;
