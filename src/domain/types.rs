//! Shared domain types.
//!
//! Everything here is a plain value: built once (directory, horizons) or produced
//! by one pipeline step (return maps, records) and never mutated afterwards.

use std::collections::{HashMap, HashSet};

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::AppError;

/// One of the three fixed measurement windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Horizon {
    /// Last 12 months.
    Short,
    /// Last 36 months.
    Medium,
    /// Last 60 months.
    Long,
}

impl Horizon {
    /// Fetch order used by the pipeline.
    pub const ALL: [Horizon; 3] = [Horizon::Short, Horizon::Medium, Horizon::Long];

    pub fn months(self) -> u32 {
        match self {
            Horizon::Short => 12,
            Horizon::Medium => 36,
            Horizon::Long => 60,
        }
    }

    /// Column label used in console and CSV output.
    pub fn label(self) -> &'static str {
        match self {
            Horizon::Short => "Short term",
            Horizon::Medium => "Medium term",
            Horizon::Long => "Long term",
        }
    }
}

/// Provider operator code -> nominal return (percent) for one horizon.
pub type HorizonReturnMap = HashMap<String, f64>;

/// A single (display name, provider code) entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperatorEntry {
    pub name: String,
    pub code: String,
}

/// Ordered operator name -> code table.
///
/// Defines which rows appear in the output and in which order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDirectory {
    entries: Vec<OperatorEntry>,
}

impl OperatorDirectory {
    /// Build a directory, rejecting empty tables, blank fields and duplicate names.
    pub fn new(entries: Vec<OperatorEntry>) -> Result<Self, AppError> {
        if entries.is_empty() {
            return Err(AppError::config("Operator directory is empty."));
        }
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.name.trim().to_string();
            let code = entry.code.trim().to_string();
            if name.is_empty() || code.is_empty() {
                return Err(AppError::config("Operator directory entries need a non-empty name and code."));
            }
            if !seen.insert(name.clone()) {
                return Err(AppError::config(format!("Duplicate operator name '{name}' in directory.")));
            }
            out.push(OperatorEntry { name, code });
        }
        Ok(Self { entries: out })
    }

    /// Convenience constructor from `(name, code)` pairs.
    pub fn from_pairs<N, C>(pairs: impl IntoIterator<Item = (N, C)>) -> Result<Self, AppError>
    where
        N: Into<String>,
        C: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, code)| OperatorEntry {
                name: name.into(),
                code: code.into(),
            })
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[OperatorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.code == code)
    }
}

/// Combined per-operator returns. `None` means the horizon had no value for the code.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorReturnRecord {
    pub operator: String,
    pub short: Option<f64>,
    pub medium: Option<f64>,
    pub long: Option<f64>,
}

impl OperatorReturnRecord {
    pub fn get(&self, horizon: Horizon) -> Option<f64> {
        match horizon {
            Horizon::Short => self.short,
            Horizon::Medium => self.medium,
            Horizon::Long => self.long,
        }
    }
}

/// Direction applied to present values. Absent values sort last either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankOrder {
    #[default]
    Descending,
    Ascending,
}

/// Final, ordered output of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResultSet {
    pub key: Horizon,
    pub order: RankOrder,
    pub records: Vec<OperatorReturnRecord>,
}

impl RankedResultSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by operator display name.
    pub fn find(&self, operator: &str) -> Option<&OperatorReturnRecord> {
        self.records.iter().find(|r| r.operator == operator)
    }
}
