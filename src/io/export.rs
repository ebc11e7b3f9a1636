//! Export the ranking to CSV.
//!
//! Values are written with full precision so the file round-trips exactly;
//! absent values are empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Horizon, RankedResultSet};
use crate::error::AppError;

/// Write the ranking to a CSV file at `path`.
pub fn write_ranking_csv(path: &Path, ranking: &RankedResultSet) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_ranking(file, ranking)
}

/// Write the ranking as CSV to any writer.
pub fn write_ranking<W: Write>(writer: W, ranking: &RankedResultSet) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Operator"];
    header.extend(Horizon::ALL.iter().map(|h| h.label()));
    wtr.write_record(&header)
        .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for r in &ranking.records {
        let mut row = vec![r.operator.clone()];
        row.extend(
            Horizon::ALL
                .iter()
                .map(|h| r.get(*h).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&row)
            .map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::config(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OperatorReturnRecord, RankOrder};

    #[test]
    fn writes_header_rows_and_empty_cells() {
        let ranking = RankedResultSet {
            key: Horizon::Long,
            order: RankOrder::Descending,
            records: vec![
                OperatorReturnRecord {
                    operator: "BAC San José".to_string(),
                    short: Some(8.125),
                    medium: None,
                    long: Some(7.0),
                },
                OperatorReturnRecord {
                    operator: "Popular, Pensiones".to_string(),
                    short: None,
                    medium: None,
                    long: None,
                },
            ],
        };

        let mut buf = Vec::new();
        write_ranking(&mut buf, &ranking).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Operator,Short term,Medium term,Long term");
        assert_eq!(lines[1], "BAC San José,8.125,,7");
        assert_eq!(lines[2], "\"Popular, Pensiones\",,,");
    }

    #[test]
    fn exported_values_parse_back_exactly() {
        let value = 0.1 + 0.2;
        let ranking = RankedResultSet {
            key: Horizon::Long,
            order: RankOrder::Descending,
            records: vec![OperatorReturnRecord {
                operator: "X".to_string(),
                short: None,
                medium: None,
                long: Some(value),
            }],
        };

        let mut buf = Vec::new();
        write_ranking(&mut buf, &ranking).unwrap();
        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(row[3].parse::<f64>().unwrap(), value);
    }
}
