//! Command-line parsing for the pension-return ranking tool.
//!
//! Argument parsing stays separate from fetching and ranking.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{Horizon, RankOrder};

/// Rank pension operators by nominal return (SUPEN statistics API).
#[derive(Debug, Parser, Clone)]
#[command(name = "supen", version, about = "Analyse SUPEN pension operator returns")]
pub struct Cli {
    /// Optional path to a CSV file where the ranking will be saved.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// JSON file with the operator directory (`[{"name": ..., "code": ...}]`).
    #[arg(long, value_name = "JSON")]
    pub operators: Option<PathBuf>,

    /// Horizon used for ranking.
    #[arg(long, value_enum, default_value_t = Horizon::Long)]
    pub rank_by: Horizon,

    /// Rank lowest return first (operators without data still go last).
    #[arg(long)]
    pub ascending: bool,

    /// Seconds to wait between API calls (overrides SUPEN_CALL_DELAY_SECS).
    #[arg(long)]
    pub delay_secs: Option<u64>,

    /// API base URL (overrides SUPEN_BASE_URL).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Log debug detail (skipped records, ignored codes) to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn rank_order(&self) -> RankOrder {
        if self.ascending {
            RankOrder::Ascending
        } else {
            RankOrder::Descending
        }
    }
}
