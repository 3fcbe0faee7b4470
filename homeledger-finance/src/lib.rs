//! homeledger-finance: transaction normalizer, column-role detection, and import summaries

pub mod amount;
pub mod column_detect;
pub mod date;
pub mod line_extract;
pub mod normalizer;
pub mod structured;
pub mod summary;

pub use amount::parse_amount;
pub use column_detect::{detect_mapping, MappingSuggestion};
pub use date::parse_date_permissive;
pub use normalizer::{normalize, preview, DEFAULT_PREVIEW_ROWS};
pub use summary::ImportSummary;
