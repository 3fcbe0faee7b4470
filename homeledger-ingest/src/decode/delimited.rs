//! CSV exports with a header row.
//!
//! Bank exports disagree on column names, so nothing here interprets values:
//!   Date,Description,Amount
//!   10/23/2023,"TRADER JOE'S #552, AUSTIN TX",$84.23

use homeledger_core::RawRow;
use tracing::{debug, trace, warn};

use super::strip_bom;
use crate::error::{DecodeError, Result};
use crate::types::DecodedTable;

/// Decode comma-delimited bytes, keying every record by the trimmed header names.
///
/// Fully blank records are dropped. Records shorter than the header lack the
/// missing keys; fields past the header are ignored. A quoted field left open
/// at end of input fails the whole decode.
pub fn decode_delimited(bytes: &[u8]) -> Result<DecodedTable> {
    let bytes = strip_bom(bytes);
    if let Some(line) = unterminated_quote_line(bytes) {
        return Err(DecodeError::Csv {
            line: Some(line),
            message: "quoted field is never closed".to_string(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();

    // (field index, column name); first occurrence of a name wins
    let mut keyed: Vec<(usize, String)> = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.iter().enumerate() {
        let name = raw.trim().to_string();
        if keyed.iter().any(|(_, existing)| *existing == name) {
            warn!(column = %name, position = idx, "duplicate header ignored");
            continue;
        }
        keyed.push((idx, name));
    }

    if keyed.is_empty() {
        return Ok(DecodedTable::default());
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line());

        if record.len() > headers.len() {
            debug!(?line, extra = record.len() - headers.len(), "fields past header ignored");
        }

        let row: RawRow = keyed
            .iter()
            .filter_map(|(idx, name)| record.get(*idx).map(|v| (name.as_str(), v)))
            .collect();

        if row.is_blank() {
            trace!(?line, "blank record dropped");
            continue;
        }
        rows.push(row);
    }

    Ok(DecodedTable {
        columns: keyed.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

#[derive(Clone, Copy, PartialEq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Line on which a still-open quoted field started, if input ends inside one.
///
/// The csv reader accepts such input and swallows the rest of the file into a
/// single field. Quotes follow its rules: a quote opens a field only at the
/// field start, and `""` inside a quoted field is an escape.
fn unterminated_quote_line(bytes: &[u8]) -> Option<u64> {
    let mut state = QuoteState::FieldStart;
    let mut line: u64 = 1;
    let mut opened_at = 1;

    for &b in bytes {
        state = match (state, b) {
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::FieldStart, b'"') => {
                opened_at = line;
                QuoteState::Quoted
            }
            (_, b',' | b'\n' | b'\r') => QuoteState::FieldStart,
            _ => QuoteState::Unquoted,
        };
        if b == b'\n' {
            line += 1;
        }
    }

    (state == QuoteState::Quoted).then_some(opened_at)
}
