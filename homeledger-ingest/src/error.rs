//! Error types for statement decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an import at the decode stage.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Content is not valid delimited text.
    #[error("malformed CSV{}: {message}", at_line(.line))]
    Csv { line: Option<u64>, message: String },

    /// Content is not UTF-8.
    #[error("file is not valid UTF-8 text{}: {message}", at_line(.line))]
    Encoding { line: Option<u64>, message: String },

    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PDFs carry no text layer we can read directly.
    #[error("{name} is a PDF; extract its text to a .txt file and import that")]
    NeedsTextExtraction { name: String },

    /// Neither CSV nor plain text.
    #[error("unsupported file type: {name} (expected .csv or .txt)")]
    UnsupportedSource { name: String },
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl From<csv::Error> for DecodeError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.kind() {
            csv::ErrorKind::Utf8 { .. } => DecodeError::Encoding {
                line,
                message: err.to_string(),
            },
            _ => DecodeError::Csv {
                line,
                message: err.to_string(),
            },
        }
    }
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
