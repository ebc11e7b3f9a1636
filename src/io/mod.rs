//! Input/output helpers.
//!
//! - ranking export to CSV (`export`)

pub mod export;

pub use export::*;
