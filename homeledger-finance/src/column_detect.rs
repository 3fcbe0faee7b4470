//! Header-keyword detection of column roles.
//!
//! Substring matching on lowercased headers; within a role the first matching
//! header (in file order) wins.

use homeledger_core::{ColumnMapping, FieldRole, MappingError, RAW_TEXT_COLUMN};

/// Partially resolved mapping, open to per-role overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSuggestion {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub credit: Option<String>,
    /// Set when the table is a single free-text column.
    pub source: Option<String>,
}

/// Guess column roles from header names.
pub fn detect_mapping<S: AsRef<str>>(columns: &[S]) -> MappingSuggestion {
    let mut s = MappingSuggestion::default();

    if let [only] = columns {
        s.source = Some(only.as_ref().to_string());
        return s;
    }
    if columns.iter().any(|c| c.as_ref() == RAW_TEXT_COLUMN) {
        s.source = Some(RAW_TEXT_COLUMN.to_string());
        return s;
    }

    for column in columns {
        let column = column.as_ref();
        let h = column.to_lowercase();

        if s.date.is_none() && (h.contains("date") || h.contains("day")) {
            s.date = Some(column.to_string());
        }
        if s.amount.is_none() && (h.contains("amount") || h.contains("debit") || h.contains("cost")) {
            s.amount = Some(column.to_string());
        }
        if s.description.is_none()
            && (h.contains("desc") || h.contains("memo") || h.contains("merchant"))
        {
            s.description = Some(column.to_string());
        }
        if s.category.is_none() && (h.contains("category") || h.contains("type")) {
            s.category = Some(column.to_string());
        }
        if s.credit.is_none() && h.contains("credit") {
            s.credit = Some(column.to_string());
        }
    }

    // A credit column only makes sense next to a distinct debit column.
    let has_debit = s
        .amount
        .as_deref()
        .is_some_and(|a| a.to_lowercase().contains("debit"));
    if !has_debit || s.credit == s.amount {
        s.credit = None;
    }

    s
}

impl MappingSuggestion {
    /// Assign `column` to `role`, replacing any guess.
    ///
    /// Assigning a structured role clears a free-text source guess and vice versa.
    pub fn set(&mut self, role: FieldRole, column: impl Into<String>) {
        let column = Some(column.into());
        match role {
            FieldRole::Source => {
                *self = MappingSuggestion {
                    source: column,
                    ..Default::default()
                };
                return;
            }
            FieldRole::Date => self.date = column,
            FieldRole::Amount => self.amount = column,
            FieldRole::Description => self.description = column,
            FieldRole::Category => self.category = column,
            FieldRole::Credit => self.credit = column,
        }
        self.source = None;
    }

    /// Resolve into a mapping; date, amount and description must all be assigned.
    pub fn into_mapping(self) -> Result<ColumnMapping, MappingError> {
        if let Some(source) = self.source {
            return Ok(ColumnMapping::unstructured(source));
        }
        let date = self.date.ok_or(MappingError::Unassigned(FieldRole::Date))?;
        let amount = self.amount.ok_or(MappingError::Unassigned(FieldRole::Amount))?;
        let description = self
            .description
            .ok_or(MappingError::Unassigned(FieldRole::Description))?;

        let mut mapping = ColumnMapping::from_fields(date, amount, description, self.category);
        if let Some(credit) = self.credit {
            mapping = mapping.with_credit(credit);
        }
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeledger_core::StructuredMapping;

    #[test]
    fn test_chase_style_headers() {
        let cols = ["Transaction Date", "Post Date", "Description", "Category", "Type", "Amount", "Memo"];
        let s = detect_mapping(&cols[..]);
        assert_eq!(s.date.as_deref(), Some("Transaction Date"));
        assert_eq!(s.amount.as_deref(), Some("Amount"));
        assert_eq!(s.description.as_deref(), Some("Description"));
        assert_eq!(s.category.as_deref(), Some("Category"));
        assert_eq!(s.credit, None);
    }

    #[test]
    fn test_split_debit_credit_headers() {
        let cols = ["Posting Date", "Merchant", "Debit", "Credit", "Balance"];
        let mapping = detect_mapping(&cols[..]).into_mapping().unwrap();
        assert_eq!(
            mapping,
            ColumnMapping::Structured(StructuredMapping {
                date: "Posting Date".into(),
                amount: "Debit".into(),
                description: "Merchant".into(),
                category: None,
                credit: Some("Credit".into()),
            })
        );
    }

    #[test]
    fn test_raw_text_table_is_unstructured() {
        let s = detect_mapping(&[RAW_TEXT_COLUMN][..]);
        assert_eq!(s.into_mapping().unwrap(), ColumnMapping::unstructured(RAW_TEXT_COLUMN));
    }

    #[test]
    fn test_missing_role_is_reported() {
        let cols = ["Date", "Amount", "Notes"];
        let err = detect_mapping(&cols[..]).into_mapping().unwrap_err();
        assert_eq!(err, MappingError::Unassigned(FieldRole::Description));
    }

    #[test]
    fn test_override_fills_missing_role() {
        let cols = ["Date", "Amount", "Notes"];
        let mut s = detect_mapping(&cols[..]);
        s.set(FieldRole::Description, "Notes");
        assert_eq!(s.into_mapping().unwrap(), ColumnMapping::structured("Date", "Amount", "Notes"));
    }

    #[test]
    fn test_source_override_wins() {
        let cols = ["Date", "Amount", "Memo"];
        let mut s = detect_mapping(&cols[..]);
        s.set(FieldRole::Source, "Memo");
        assert_eq!(s.into_mapping().unwrap(), ColumnMapping::unstructured("Memo"));
    }
}
