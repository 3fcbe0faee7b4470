//! Async file loading; the only place decoding waits on I/O.

use std::path::Path;
use tracing::info;

use crate::error::{DecodeError, Result};
use crate::types::{DecodedTable, SourceKind};

/// Read `path` and decode it as `kind`.
pub async fn load_table(path: impl AsRef<Path>, kind: SourceKind) -> Result<DecodedTable> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DecodeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let table = kind.decode(&bytes)?;
    info!(
        path = %path.display(),
        %kind,
        columns = table.columns.len(),
        rows = table.rows.len(),
        "decoded statement"
    );
    Ok(table)
}
