//! Raw rows -> typed transactions.

use homeledger_core::{Clock, ColumnMapping, ImportedTransaction, NO_DESCRIPTION, RawRow};
use tracing::{debug_span, info};

use crate::line_extract::normalize_line;
use crate::structured::normalize_row;

/// Rows shown while a mapping is being confirmed.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Normalize decoded rows under `mapping`.
///
/// Each row is handled on its own; a bad row yields defaults (today, zero)
/// instead of failing the batch. Rows left without a description are dropped.
/// Output keeps input order.
pub fn normalize(
    rows: impl IntoIterator<Item = RawRow>,
    mapping: &ColumnMapping,
    clock: &dyn Clock,
) -> Vec<ImportedTransaction> {
    let mode = if mapping.is_unstructured() { "unstructured" } else { "structured" };
    let _span = debug_span!("normalize", mode).entered();

    let mut rows_in = 0usize;
    let out: Vec<ImportedTransaction> = rows
        .into_iter()
        .inspect(|_| rows_in += 1)
        .map(|row| match mapping {
            ColumnMapping::Structured(m) => normalize_row(row, m, clock),
            ColumnMapping::Unstructured { source_column } => normalize_line(row, source_column, clock),
        })
        .filter(|txn| txn.description != NO_DESCRIPTION)
        .collect();

    info!(rows_in, kept = out.len(), dropped = rows_in - out.len(), "normalized rows");
    out
}

/// Normalize only the first `limit` rows.
pub fn preview(
    rows: &[RawRow],
    mapping: &ColumnMapping,
    clock: &dyn Clock,
    limit: usize,
) -> Vec<ImportedTransaction> {
    normalize(rows.iter().take(limit).cloned(), mapping, clock)
}
