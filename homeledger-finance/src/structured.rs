//! Rows with one mapped column per field (CSV exports).

use homeledger_core::{Clock, ImportedTransaction, NO_DESCRIPTION, RawRow, StructuredMapping};
use tracing::debug;

use crate::amount::parse_amount;
use crate::date::parse_date_permissive;

/// Normalize one structured row. Never fails; bad fields fall back to defaults.
///
/// The description and category are trimmed of surrounding whitespace. A
/// description that is blank after trimming becomes the placeholder, so the
/// row is dropped later.
pub fn normalize_row(row: RawRow, mapping: &StructuredMapping, clock: &dyn Clock) -> ImportedTransaction {
    let date = match row.value(&mapping.date).and_then(parse_date_permissive) {
        Some(d) => d,
        None => {
            debug!(column = %mapping.date, "unparseable date, using today");
            clock.today()
        }
    };

    let amount = resolve_amount(&row, mapping);

    // trimmed, unlike the raw column value
    let description = row
        .value(&mapping.description)
        .map(str::trim)
        .unwrap_or(NO_DESCRIPTION)
        .to_string();

    let category = mapping
        .category
        .as_deref()
        .and_then(|c| row.value(c))
        .map(|v| v.trim().to_string());

    ImportedTransaction::new(date, amount, description, category, row)
}

fn resolve_amount(row: &RawRow, mapping: &StructuredMapping) -> f64 {
    let signed = parse_amount(row.value(&mapping.amount).unwrap_or("0"));

    match &mapping.credit {
        None => signed,
        // Split columns: amount holds the debit, credit holds the inflow.
        Some(credit) => {
            let inflow = parse_amount(row.value(credit).unwrap_or("0")).abs();
            inflow - signed.abs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use homeledger_core::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn mapping() -> StructuredMapping {
        StructuredMapping {
            date: "Date".into(),
            amount: "Debit".into(),
            description: "Memo".into(),
            category: None,
            credit: None,
        }
    }

    #[test]
    fn test_trader_joes_row() {
        let row: RawRow = [("Date", "10/23/2023"), ("Debit", "$84.23"), ("Memo", "Trader Joe's")]
            .into_iter()
            .collect();
        let txn = normalize_row(row.clone(), &mapping(), &clock());

        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2023, 10, 23).unwrap());
        assert_eq!(txn.amount, 84.23);
        assert_eq!(txn.description, "Trader Joe's");
        assert_eq!(txn.category, None);
        assert_eq!(txn.original_data, row);
    }

    #[test]
    fn test_fallbacks() {
        let row: RawRow = [("Date", "sometime"), ("Debit", "N/A")].into_iter().collect();
        let txn = normalize_row(row, &mapping(), &clock());

        assert_eq!(txn.date, clock().today());
        assert_eq!(txn.amount, 0.0);
        assert_eq!(txn.description, NO_DESCRIPTION);
    }

    #[test]
    fn test_category_copied_or_unset() {
        let mut m = mapping();
        m.category = Some("Type".into());

        let row: RawRow = [("Date", "10/23/2023"), ("Debit", "1.00"), ("Memo", "x"), ("Type", "Groceries")]
            .into_iter()
            .collect();
        assert_eq!(normalize_row(row, &m, &clock()).category.as_deref(), Some("Groceries"));

        let blank: RawRow = [("Date", "10/23/2023"), ("Debit", "1.00"), ("Memo", "x"), ("Type", "")]
            .into_iter()
            .collect();
        assert_eq!(normalize_row(blank, &m, &clock()).category, None);
    }

    #[test]
    fn test_description_and_category_trimmed() {
        let mut m = mapping();
        m.category = Some("Type".into());

        let row: RawRow = [("Date", "10/23/2023"), ("Debit", "1.00"), ("Memo", "  Grocer \t"), ("Type", " Food ")]
            .into_iter()
            .collect();
        let txn = normalize_row(row, &m, &clock());
        assert_eq!(txn.description, "Grocer");
        assert_eq!(txn.category.as_deref(), Some("Food"));
        assert_eq!(txn.original_data.get("Memo"), Some("  Grocer \t"));

        let spaces: RawRow = [("Date", "10/23/2023"), ("Debit", "1.00"), ("Memo", "   ")]
            .into_iter()
            .collect();
        assert_eq!(normalize_row(spaces, &m, &clock()).description, NO_DESCRIPTION);
    }

    #[test]
    fn test_split_debit_credit_columns() {
        let mut m = mapping();
        m.credit = Some("Credit".into());

        let debit: RawRow = [("Date", "10/23/2023"), ("Debit", "84.23"), ("Credit", ""), ("Memo", "Grocer")]
            .into_iter()
            .collect();
        assert_eq!(normalize_row(debit, &m, &clock()).amount, -84.23);

        let credit: RawRow = [("Date", "10/24/2023"), ("Debit", ""), ("Credit", "$1,500.00"), ("Memo", "Payroll")]
            .into_iter()
            .collect();
        assert_eq!(normalize_row(credit, &m, &clock()).amount, 1500.0);
    }
}
