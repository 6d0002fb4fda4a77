use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::guide::GuideRecord;
use crate::utils::dna::is_dna;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}' (input needs guide_name and guide_seq)")]
    MissingColumn(&'static str),

    #[error("no guide records found in input")]
    Empty,
}

/// Parsed guide table: usable guides plus rows rejected during validation.
///
/// A missing required column fails the whole parse; a bad value in one row
/// only rejects that row, so one typo does not abort a batch.
#[derive(Debug, Default)]
pub struct GuideTable {
    pub guides: Vec<GuideRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// One input row that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the input file
    pub line: u64,

    /// Guide name, when the row got far enough to have one
    pub name: Option<String>,

    pub reason: String,
}

/// Raw row shape as deserialized by the csv crate; extra columns are ignored.
#[derive(Debug, Deserialize)]
struct GuideRow {
    guide_name: String,
    guide_seq: String,
}

/// Read a tab-separated guide table from a file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `MissingColumn` if a
/// required header is absent, or `Empty` if the table has no data rows.
pub fn read_guides_file(path: &Path) -> Result<GuideTable, ParseError> {
    let file = std::fs::File::open(path)?;
    read_guides(file)
}

/// Read a tab-separated guide table from any reader.
///
/// # Errors
///
/// Same conditions as [`read_guides_file`], minus file-open failures.
pub fn read_guides(input: impl Read) -> Result<GuideTable, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    for required in ["guide_name", "guide_seq"] {
        if !headers.iter().any(|h| h == required) {
            return Err(ParseError::MissingColumn(required));
        }
    }

    let mut table = GuideTable::default();
    for (i, record) in reader.records().enumerate() {
        // Data starts on line 2; fall back to arithmetic if the reader has
        // no position (e.g. for in-memory inputs after an error)
        let fallback_line = i as u64 + 2;
        match record {
            Err(e) => {
                let line = e.position().map_or(fallback_line, csv::Position::line);
                table.rejected.push(RejectedRow {
                    line,
                    name: None,
                    reason: e.to_string(),
                });
            }
            Ok(record) => {
                let line = record.position().map_or(fallback_line, csv::Position::line);
                match record.deserialize::<GuideRow>(Some(&headers)) {
                    Err(e) => table.rejected.push(RejectedRow {
                        line,
                        name: None,
                        reason: e.to_string(),
                    }),
                    Ok(row) => match validate_row(row) {
                        Ok(guide) => table.guides.push(guide),
                        Err((name, reason)) => table.rejected.push(RejectedRow {
                            line,
                            name,
                            reason,
                        }),
                    },
                }
            }
        }
    }

    if table.guides.is_empty() && table.rejected.is_empty() {
        return Err(ParseError::Empty);
    }

    Ok(table)
}

fn validate_row(row: GuideRow) -> Result<GuideRecord, (Option<String>, String)> {
    if row.guide_name.is_empty() {
        return Err((None, "empty guide_name".to_string()));
    }
    if row.guide_seq.is_empty() {
        return Err((Some(row.guide_name), "empty guide_seq".to_string()));
    }
    if !is_dna(&row.guide_seq) {
        return Err((
            Some(row.guide_name),
            format!("guide_seq '{}' is not a DNA sequence", row.guide_seq),
        ));
    }
    Ok(GuideRecord::new(row.guide_name, row.guide_seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_guides() {
        let tsv = "guide_name\tguide_seq\nguide1\tACGTACGTACGTACGTACGT\nguide2\tTTTTACGTACGTACGTCCCC\n";
        let table = read_guides(tsv.as_bytes()).unwrap();
        assert_eq!(table.guides.len(), 2);
        assert!(table.rejected.is_empty());
        assert_eq!(table.guides[0].name, "guide1");
        assert_eq!(table.guides[1].sequence, "TTTTACGTACGTACGTCCCC");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let tsv = "guide_name\tguide_seq\tnotes\ng1\tACGT\tedited clone\n";
        let table = read_guides(tsv.as_bytes()).unwrap();
        assert_eq!(table.guides.len(), 1);
        assert_eq!(table.guides[0].sequence, "ACGT");
    }

    #[test]
    fn test_missing_column() {
        let tsv = "guide_name\tsequence\ng1\tACGT\n";
        let err = read_guides(tsv.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn("guide_seq")));
    }

    #[test]
    fn test_bad_row_rejected_not_fatal() {
        let tsv = "guide_name\tguide_seq\ng1\tACGTQQQQ\ng2\tACGTACGT\n";
        let table = read_guides(tsv.as_bytes()).unwrap();
        assert_eq!(table.guides.len(), 1);
        assert_eq!(table.guides[0].name, "g2");
        assert_eq!(table.rejected.len(), 1);
        assert_eq!(table.rejected[0].line, 2);
        assert_eq!(table.rejected[0].name.as_deref(), Some("g1"));
        assert!(table.rejected[0].reason.contains("not a DNA sequence"));
    }

    #[test]
    fn test_empty_input() {
        let tsv = "guide_name\tguide_seq\n";
        let err = read_guides(tsv.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Empty));
    }

    #[test]
    fn test_empty_name_rejected() {
        let tsv = "guide_name\tguide_seq\n\tACGT\ng2\t\n";
        let table = read_guides(tsv.as_bytes()).unwrap();
        assert!(table.guides.is_empty());
        assert_eq!(table.rejected.len(), 2);
        assert!(table.rejected[0].reason.contains("guide_name"));
        assert_eq!(table.rejected[1].name.as_deref(), Some("g2"));
    }
}
