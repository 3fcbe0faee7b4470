//! Raw decoded rows: column name -> untouched string value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Synthetic column holding a whole line of unstructured text.
pub const RAW_TEXT_COLUMN: &str = "raw_text";

/// One decoded input record.
///
/// Keys are unique within a row and carry no ordering meaning; the map is
/// sorted only so serialized audit copies are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(BTreeMap<String, String>);

impl RawRow {
    /// A row holding exactly one column.
    pub fn single(column: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(column.into(), value.into());
        Self(map)
    }

    /// Raw value for `column`, exactly as decoded.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Raw value for `column`, treating blank strings as absent.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.trim().is_empty())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every value is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
