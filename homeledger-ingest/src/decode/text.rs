//! Line-extracted statement text (for example the text layer of a PDF).
//!
//! There is no column structure, so each non-empty line becomes a single-column row
//! and all field extraction is left to the normalizer.

use homeledger_core::RawRow;
pub use homeledger_core::RAW_TEXT_COLUMN;

use super::strip_bom;
use crate::error::{DecodeError, Result};
use crate::types::DecodedTable;

/// Split on `\r\n`, `\n` or `\r`, trimming lines and dropping empty ones.
pub fn decode_lines(text: &str) -> DecodedTable {
    let rows = text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| RawRow::single(RAW_TEXT_COLUMN, line))
        .collect();

    DecodedTable {
        columns: vec![RAW_TEXT_COLUMN.to_string()],
        rows,
    }
}

/// Decode UTF-8 bytes as free text.
pub fn decode_text(bytes: &[u8]) -> Result<DecodedTable> {
    let bytes = strip_bom(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::Encoding {
        line: Some(bytes[..e.valid_up_to()].iter().filter(|b| **b == b'\n').count() as u64 + 1),
        message: e.to_string(),
    })?;
    Ok(decode_lines(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_line_endings() {
        let text = "10/24/2023 NETFLIX.COM 15.99\r\n\r\n   \n10/25/2023 SHELL OIL 40.00-\rPage 2 of 3\n";
        let table = decode_lines(text);

        assert_eq!(table.columns, vec![RAW_TEXT_COLUMN]);
        let lines: Vec<_> = table.rows.iter().map(|r| r.get(RAW_TEXT_COLUMN).unwrap()).collect();
        assert_eq!(
            lines,
            vec!["10/24/2023 NETFLIX.COM 15.99", "10/25/2023 SHELL OIL 40.00-", "Page 2 of 3"]
        );
        assert!(table.rows.iter().all(|r| r.len() == 1));
    }

    #[test]
    fn test_no_header_consumed() {
        let table = decode_lines("Date Description Amount\nJan 15 COFFEE 4.50");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let err = decode_text(b"ok line\nbad \xFF line\n").unwrap_err();
        match err {
            DecodeError::Encoding { line, .. } => assert_eq!(line, Some(2)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
