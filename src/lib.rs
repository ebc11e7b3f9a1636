//! `supen-rank` library crate.
//!
//! The binary (`supen`) is a thin wrapper around this library so that the
//! fetch/aggregate/rank pipeline is testable without spawning processes or
//! touching the network.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
