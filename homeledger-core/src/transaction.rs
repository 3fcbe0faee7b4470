//! Normalized transaction records handed to persistence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::row::RawRow;

/// Placeholder description for rows without one; such rows never leave the normalizer.
pub const NO_DESCRIPTION: &str = "No Description";

/// A typed transaction produced from one raw row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedTransaction {
    /// Calendar date, time-of-day already discarded
    pub date: NaiveDate,
    /// Signed amount with the source's sign convention preserved
    pub amount: f64,
    pub description: String,
    /// Label copied from the mapped category column, if any
    pub category: Option<String>,
    /// The raw row this record came from
    pub original_data: RawRow,
}

impl ImportedTransaction {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        description: impl Into<String>,
        category: Option<String>,
        original_data: RawRow,
    ) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
            category,
            original_data,
        }
    }

    /// Returns true for negative amounts
    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true for positive amounts
    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}
