//! homeledger-ingest: statement decoding (CSV exports and extracted text lines).

pub mod decode;
pub mod error;
pub mod load;
pub mod types;

pub use decode::{decode_delimited, decode_lines, decode_text, RAW_TEXT_COLUMN};
pub use error::{DecodeError, Result};
pub use load::load_table;
pub use types::{DecodedTable, SourceKind};
