//! Review summary for a normalized batch.

use chrono::NaiveDate;
use homeledger_core::ImportedTransaction;
use serde::Serialize;
use std::fmt;

/// Totals shown before a batch is handed to persistence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub rows_in: usize,
    pub transactions: usize,
    pub dropped: usize,
    /// Sum of positive amounts
    pub inflow_total: f64,
    /// Sum of negative amounts (<= 0)
    pub outflow_total: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl ImportSummary {
    pub fn from_batch(rows_in: usize, txns: &[ImportedTransaction]) -> Self {
        let inflow_total: f64 = txns.iter().filter(|t| t.is_inflow()).map(|t| t.amount).sum();
        let outflow_total: f64 = txns.iter().filter(|t| t.is_outflow()).map(|t| t.amount).sum();

        Self {
            rows_in,
            transactions: txns.len(),
            dropped: rows_in.saturating_sub(txns.len()),
            inflow_total,
            outflow_total,
            first_date: txns.iter().map(|t| t.date).min(),
            last_date: txns.iter().map(|t| t.date).max(),
        }
    }

    pub fn net(&self) -> f64 {
        self.inflow_total + self.outflow_total
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ready to import {} transactions ({} of {} rows dropped) | in ${:.2} | out ${:.2}",
            self.transactions,
            self.dropped,
            self.rows_in,
            self.inflow_total,
            self.outflow_total.abs()
        )?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            write!(f, " | {first} .. {last}")?;
        }
        Ok(())
    }
}
