//! CSV decoding into raw records

use crate::error::EtlError;
use crate::model::RawRecord;
use eyre::Result;
use std::collections::HashSet;

/// Decode a UTF-8 CSV table with a header row.
///
/// Column names come from the header; every data row becomes a
/// [`RawRecord`] numbered from 1. Fields are trimmed. Ragged rows, invalid
/// UTF-8, a missing header and a repeated column name fail with
/// [`EtlError::MalformedInput`].
///
/// # Example
/// ```
/// use customer_tier_loader::source::parse_tabular;
///
/// let records = parse_tabular(b"customerID,tenure\n7590-VHVEG,1\n").unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("tenure"), Some("1"));
/// ```
pub fn parse_tabular(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers().map_err(malformed)?.clone();
    if headers.is_empty() {
        return Err(EtlError::MalformedInput {
            line: None,
            reason: "missing header row".to_string(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    if let Some(name) = headers.iter().find(|name| !seen.insert(*name)) {
        return Err(EtlError::MalformedInput {
            line: Some(1),
            reason: format!("duplicate column '{}'", name),
        }
        .into());
    }

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(malformed)?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        records.push(RawRecord::new(index + 1, fields));
    }

    Ok(records)
}

fn malformed(err: ::csv::Error) -> eyre::Report {
    let line = err.position().map(|p| p.line());
    let reason = match err.kind() {
        ::csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("found {} field(s), expected {}", len, expected_len),
        ::csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {}", err),
        _ => err.to_string(),
    };
    EtlError::MalformedInput { line, reason }.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_header_and_rows() {
        let input = b"customerID,gender,tenure\n7590-VHVEG,Female,1\n5575-GNVDE, Male ,34\n";
        let records = parse_tabular(input).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 1);
        assert_eq!(records[0].get("customerID"), Some("7590-VHVEG"));
        assert_eq!(records[1].row, 2);
        assert_eq!(records[1].get("gender"), Some("Male"));
        assert_eq!(records[1].get("tenure"), Some("34"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let records = parse_tabular(b"customerID,tenure\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = parse_tabular(b"").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = parse_tabular(b"a,b,c\n1,2,3\n4,5\n").unwrap_err();
        match err.downcast_ref::<EtlError>() {
            Some(EtlError::MalformedInput { line, reason }) => {
                assert_eq!(*line, Some(3));
                assert!(reason.contains("expected 3"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_column_is_malformed() {
        let err = parse_tabular(b"customerID,tenure,tenure\nA,1,99\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<EtlError>(),
            Some(&EtlError::MalformedInput {
                line: Some(1),
                reason: "duplicate column 'tenure'".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_column_after_trim_is_malformed() {
        let err = parse_tabular(b"tenure, tenure\n1,99\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::MalformedInput { line: Some(1), .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = parse_tabular(b"a,b\n\xff\xfe,1\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::MalformedInput { .. })
        ));
    }
}
