//! Column mappings: which raw column feeds which transaction field.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Semantic field a column can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    Date,
    Amount,
    Description,
    Category,
    Credit,
    Source,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldRole::Date => "date",
            FieldRole::Amount => "amount",
            FieldRole::Description => "description",
            FieldRole::Category => "category",
            FieldRole::Credit => "credit",
            FieldRole::Source => "source",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A mapped column does not exist in the decoded table.
    #[error("{role} column '{column}' not found (available: {available})")]
    UnknownColumn {
        role: FieldRole,
        column: String,
        available: String,
    },

    /// A required role has no column assigned.
    #[error("no column assigned for {0}")]
    Unassigned(FieldRole),
}

/// One column per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredMapping {
    pub date: String,
    /// Signed amount column, or the debit column when `credit` is set.
    pub amount: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Separate credit (inflow) column for statements that split debits and credits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

/// How raw rows are read during normalization.
///
/// The mode is chosen once per import by the caller; normalization never
/// re-derives it from row contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColumnMapping {
    Structured(StructuredMapping),
    /// Every field is extracted from one free-text column.
    Unstructured { source_column: String },
}

impl ColumnMapping {
    pub fn structured(
        date: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        ColumnMapping::Structured(StructuredMapping {
            date: date.into(),
            amount: amount.into(),
            description: description.into(),
            category: None,
            credit: None,
        })
    }

    pub fn unstructured(source_column: impl Into<String>) -> Self {
        ColumnMapping::Unstructured {
            source_column: source_column.into(),
        }
    }

    /// Build a mapping from flat field assignments.
    ///
    /// Date, amount and description naming the same column selects
    /// unstructured extraction from that column.
    pub fn from_fields(
        date: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
        category: Option<String>,
    ) -> Self {
        let (date, amount, description) = (date.into(), amount.into(), description.into());
        if date == amount && amount == description {
            return ColumnMapping::Unstructured {
                source_column: date,
            };
        }
        ColumnMapping::Structured(StructuredMapping {
            date,
            amount,
            description,
            category,
            credit: None,
        })
    }

    /// Set the category column. No-op for unstructured mappings.
    pub fn with_category(mut self, column: impl Into<String>) -> Self {
        if let ColumnMapping::Structured(m) = &mut self {
            m.category = Some(column.into());
        }
        self
    }

    /// Set a separate credit column. No-op for unstructured mappings.
    pub fn with_credit(mut self, column: impl Into<String>) -> Self {
        if let ColumnMapping::Structured(m) = &mut self {
            m.credit = Some(column.into());
        }
        self
    }

    pub fn is_unstructured(&self) -> bool {
        matches!(self, ColumnMapping::Unstructured { .. })
    }

    /// Every (role, column) pair this mapping reads.
    pub fn assignments(&self) -> Vec<(FieldRole, &str)> {
        match self {
            ColumnMapping::Structured(m) => {
                let mut out = vec![
                    (FieldRole::Date, m.date.as_str()),
                    (FieldRole::Amount, m.amount.as_str()),
                    (FieldRole::Description, m.description.as_str()),
                ];
                if let Some(c) = &m.category {
                    out.push((FieldRole::Category, c.as_str()));
                }
                if let Some(c) = &m.credit {
                    out.push((FieldRole::Credit, c.as_str()));
                }
                out
            }
            ColumnMapping::Unstructured { source_column } => {
                vec![(FieldRole::Source, source_column.as_str())]
            }
        }
    }

    /// Check that every mapped column exists in `columns`.
    pub fn validate<S: AsRef<str>>(&self, columns: &[S]) -> Result<(), MappingError> {
        for (role, column) in self.assignments() {
            if !columns.iter().any(|c| c.as_ref() == column) {
                return Err(MappingError::UnknownColumn {
                    role,
                    column: column.to_string(),
                    available: columns
                        .iter()
                        .map(|c| c.as_ref())
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
        }
        Ok(())
    }
}
