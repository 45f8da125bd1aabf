//! Tabular ingester

use emotion_core::{Error, Result};
use std::io::Read;

/// Column that must be present in every uploaded CSV
pub const TEXT_COLUMN: &str = "text";

/// Operator-facing message for a CSV without the text column
pub const MISSING_TEXT_COLUMN: &str = "CSV must have a 'text' column.";

/// Read the `text` column of a CSV document.
///
/// One classification unit per row. Rows whose text cell is blank are
/// skipped. A header without a column literally named `text` is a validation
/// error, raised before any row is read.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| Error::document(format!("failed to read CSV header: {e}")))?;
    let column = headers
        .iter()
        .position(|h| h == TEXT_COLUMN)
        .ok_or_else(|| Error::validation(MISSING_TEXT_COLUMN))?;

    let mut texts = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record.map_err(|e| Error::document(format!("failed to read CSV row: {e}")))?;
        match record.get(column) {
            Some(value) if !value.trim().is_empty() => texts.push(value.to_string()),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Skipped CSV rows with blank text");
    }

    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_text_column_in_row_order() {
        let csv = "id,text,source\n1,I love this new phone!,web\n2,\"Wow, I can't believe it!\",app\n";
        let texts = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(texts, vec!["I love this new phone!", "Wow, I can't believe it!"]);
    }

    #[test]
    fn test_missing_text_column_is_validation_error() {
        let csv = "message,label\nhello,joy\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), MISSING_TEXT_COLUMN);
    }

    #[test]
    fn test_column_name_must_match_exactly() {
        let csv = "Text\nhello\n";
        assert!(matches!(parse_csv(csv.as_bytes()), Err(Error::Validation(_))));
    }

    #[test]
    fn test_empty_upload_is_validation_error() {
        assert!(matches!(parse_csv("".as_bytes()), Err(Error::Validation(_))));
    }

    #[test]
    fn test_blank_cells_and_short_rows_are_skipped() {
        let csv = "id,text\n1,first\n2,\n3,   \n4\n5,last\n";
        let texts = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(texts, vec!["first", "last"]);
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let texts = parse_csv("text\n".as_bytes()).unwrap();
        assert!(texts.is_empty());
    }
}
