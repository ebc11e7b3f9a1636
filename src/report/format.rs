//! Formatted terminal output.
//!
//! The ranking table uses `"; "` as the delimiter so that it never collides
//! with decimal commas when pasted into a spreadsheet.

use chrono::{DateTime, Utc};

use crate::app::pipeline::RunOutput;
use crate::domain::{Horizon, OperatorReturnRecord, RankOrder, RankedResultSet};

const DELIMITER: &str = "; ";

/// Short header describing the run: ranking key, coverage per horizon.
pub fn format_run_summary(run: &RunOutput, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("=== supen - pension operator returns ===\n");
    out.push_str(&format!("Generated: {}\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
    let direction = match run.ranking.order {
        RankOrder::Descending => "descending",
        RankOrder::Ascending => "ascending",
    };
    out.push_str(&format!(
        "Ranked by: {} ({} months, {direction})\n",
        run.ranking.key.label(),
        run.ranking.key.months()
    ));
    out.push_str(&format!("Operators: {}\n", run.ranking.len()));

    for cov in &run.coverage {
        out.push_str(&format!(
            "- {:<12} {}/{} operators",
            format!("{}:", cov.horizon.label()),
            cov.matched,
            cov.expected
        ));
        if !cov.unknown_codes.is_empty() {
            out.push_str(&format!(" (ignored codes: {})", cov.unknown_codes.join(", ")));
        }
        out.push('\n');
    }

    out
}

/// Delimited ranking table: header plus one line per operator.
pub fn format_ranking(ranking: &RankedResultSet) -> String {
    let mut out = String::new();

    let header: Vec<&str> = std::iter::once("Operator")
        .chain(Horizon::ALL.iter().map(|h| h.label()))
        .collect();
    out.push_str(&header.join(DELIMITER));
    out.push('\n');

    for r in &ranking.records {
        out.push_str(&format_row(r));
        out.push('\n');
    }

    out
}

fn format_row(r: &OperatorReturnRecord) -> String {
    let mut cells = vec![r.operator.clone()];
    cells.extend(Horizon::ALL.iter().map(|h| fmt_pct(r.get(*h))));
    cells.join(DELIMITER)
}

fn fmt_pct(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::report::HorizonCoverage;

    fn ranking() -> RankedResultSet {
        RankedResultSet {
            key: Horizon::Long,
            order: RankOrder::Descending,
            records: vec![
                OperatorReturnRecord {
                    operator: "BCR Pensiones".to_string(),
                    short: Some(8.9),
                    medium: Some(8.05),
                    long: Some(7.2),
                },
                OperatorReturnRecord {
                    operator: "Vida Plena".to_string(),
                    short: None,
                    medium: Some(6.0),
                    long: None,
                },
            ],
        }
    }

    #[test]
    fn ranking_table_layout() {
        let text = format_ranking(&ranking());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Operator; Short term; Medium term; Long term");
        assert_eq!(lines[1], "BCR Pensiones; 8.90; 8.05; 7.20");
        assert_eq!(lines[2], "Vida Plena; ; 6.00; ");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn summary_mentions_key_and_coverage() {
        let run = RunOutput {
            ranking: ranking(),
            coverage: vec![HorizonCoverage {
                horizon: Horizon::Short,
                matched: 1,
                expected: 2,
                unknown_codes: vec!["ZZZ".to_string()],
            }],
        };
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let text = format_run_summary(&run, at);
        assert!(text.contains("Generated: 2025-03-01 12:00:00 UTC"));
        assert!(text.contains("Ranked by: Long term (60 months, descending)"));
        assert!(text.contains("1/2 operators (ignored codes: ZZZ)"));
    }
}
