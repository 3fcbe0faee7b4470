//! homeledger-core: shared data model for statement imports

pub mod mapping;
pub mod row;
pub mod time;
pub mod transaction;

pub use mapping::{ColumnMapping, FieldRole, MappingError, StructuredMapping};
pub use row::{RawRow, RAW_TEXT_COLUMN};
pub use time::{Clock, FixedClock, SystemClock, DEFAULT_TIMEZONE};
pub use transaction::{ImportedTransaction, NO_DESCRIPTION};
