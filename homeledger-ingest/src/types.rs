use homeledger_core::RawRow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::decode::{decode_delimited, decode_text};
use crate::error::{DecodeError, Result};

/// Decoder mode for an uploaded statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Comma-delimited text with a header row
    Delimited,
    /// Free text, one transaction candidate per line
    Text,
}

impl SourceKind {
    /// Pick a decoder from the file name and an optional MIME type.
    pub fn detect(file_name: &str, mime: Option<&str>) -> Result<Self> {
        let lower = file_name.to_ascii_lowercase();
        let mime = mime.map(|m| m.to_ascii_lowercase()).unwrap_or_default();

        if mime.contains("csv") || lower.ends_with(".csv") {
            return Ok(SourceKind::Delimited);
        }
        if mime == "application/pdf" || lower.ends_with(".pdf") {
            return Err(DecodeError::NeedsTextExtraction {
                name: file_name.to_string(),
            });
        }
        if mime.starts_with("text/plain") || lower.ends_with(".txt") {
            return Ok(SourceKind::Text);
        }
        Err(DecodeError::UnsupportedSource {
            name: file_name.to_string(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::detect(&name, None)
    }

    /// Run the matching decoder over raw file bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedTable> {
        match self {
            SourceKind::Delimited => decode_delimited(bytes),
            SourceKind::Text => decode_text(bytes),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Delimited => f.write_str("CSV"),
            SourceKind::Text => f.write_str("text"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "delimited" => Ok(SourceKind::Delimited),
            "text" | "txt" | "lines" => Ok(SourceKind::Text),
            other => Err(format!("unknown source kind: {other} (expected csv or text)")),
        }
    }
}

/// Decoder output: column names plus rows in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl DecodedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
