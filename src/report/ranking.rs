//! Aggregation of per-horizon maps and the ranking sort.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::{
    Horizon, HorizonReturnMap, OperatorDirectory, OperatorReturnRecord, RankOrder, RankedResultSet,
};

/// One record per directory entry, in directory order.
///
/// Codes returned by the API that are not in the directory are dropped here.
pub fn aggregate(
    directory: &OperatorDirectory,
    short: &HorizonReturnMap,
    medium: &HorizonReturnMap,
    long: &HorizonReturnMap,
) -> Vec<OperatorReturnRecord> {
    for (horizon, map) in [(Horizon::Short, short), (Horizon::Medium, medium), (Horizon::Long, long)] {
        for code in map.keys().filter(|c| !directory.contains_code(c)) {
            debug!(horizon = horizon.label(), code = %code, "dropping unknown operator code");
        }
    }

    directory
        .entries()
        .iter()
        .map(|entry| OperatorReturnRecord {
            operator: entry.name.clone(),
            short: short.get(&entry.code).copied(),
            medium: medium.get(&entry.code).copied(),
            long: long.get(&entry.code).copied(),
        })
        .collect()
}

/// Rank records by `key`, descending, absent values last.
pub fn rank(records: Vec<OperatorReturnRecord>, key: Horizon) -> RankedResultSet {
    rank_with_order(records, key, RankOrder::Descending)
}

/// Rank records by `key` in the given order.
///
/// Absent values always come after every present value. The sort is stable:
/// records that compare equal (same value, or both absent) keep their input order.
pub fn rank_with_order(mut records: Vec<OperatorReturnRecord>, key: Horizon, order: RankOrder) -> RankedResultSet {
    // `sort_by` is a stable sort; equal elements are never reordered.
    records.sort_by(|a, b| compare_by(a.get(key), b.get(key), order));
    RankedResultSet { key, order, records }
}

fn compare_by(a: Option<f64>, b: Option<f64>, order: RankOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            match order {
                RankOrder::Descending => ord.reverse(),
                RankOrder::Ascending => ord,
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// How well one horizon's response covered the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizonCoverage {
    pub horizon: Horizon,
    /// Directory operators with a value for this horizon.
    pub matched: usize,
    /// Operators in the directory.
    pub expected: usize,
    /// Codes returned by the API that matched no directory entry, sorted.
    pub unknown_codes: Vec<String>,
}

pub fn coverage(directory: &OperatorDirectory, horizon: Horizon, map: &HorizonReturnMap) -> HorizonCoverage {
    let matched = directory
        .entries()
        .iter()
        .filter(|e| map.contains_key(&e.code))
        .count();
    let mut unknown_codes: Vec<String> = map
        .keys()
        .filter(|c| !directory.contains_code(c))
        .cloned()
        .collect();
    unknown_codes.sort();

    HorizonCoverage {
        horizon,
        matched,
        expected: directory.len(),
        unknown_codes,
    }
}
