//! Decoders turning raw file content into ordered raw rows.

mod delimited;
mod text;

pub use delimited::decode_delimited;
pub use text::{decode_lines, decode_text, RAW_TEXT_COLUMN};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}
