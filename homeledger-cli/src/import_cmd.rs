//! `homeledger import | preview | columns`

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use homeledger_core::{Clock, ColumnMapping, FieldRole, FixedClock, ImportedTransaction};
use homeledger_finance::{ImportSummary, detect_mapping, normalize, preview};
use homeledger_ingest::{DecodedTable, SourceKind, load_table};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Comma-delimited export with a header row
    Csv,
    /// Extracted statement text, one transaction per line
    Text,
}

impl From<KindArg> for SourceKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Csv => SourceKind::Delimited,
            KindArg::Text => SourceKind::Text,
        }
    }
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Statement file (.csv, or .txt holding extracted text)
    pub file: PathBuf,

    /// Decode as this kind instead of guessing from the extension
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
}

#[derive(Args, Debug, Default)]
pub struct ColumnArgs {
    /// Column holding the transaction date
    #[arg(long)]
    pub date: Option<String>,

    /// Column holding the signed amount (or the debit, with --credit)
    #[arg(long)]
    pub amount: Option<String>,

    /// Column holding the description
    #[arg(long)]
    pub description: Option<String>,

    /// Column whose value is copied as the category label
    #[arg(long)]
    pub category: Option<String>,

    /// Separate credit column for statements with split debit/credit
    #[arg(long)]
    pub credit: Option<String>,

    /// Extract every field from this single free-text column
    #[arg(long, conflicts_with_all = ["date", "amount", "description", "category", "credit"])]
    pub raw_column: Option<String>,

    /// Date used for fallbacks and yearless dates (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Decode the statement, failing on empty input.
pub async fn load_source(source: &SourceArgs) -> Result<(DecodedTable, SourceKind)> {
    let kind = match source.kind {
        Some(k) => k.into(),
        None => SourceKind::from_path(&source.file)?,
    };

    let table = load_table(&source.file, kind)
        .await
        .with_context(|| format!("could not read {} as {}", source.file.display(), kind))?;

    if table.is_empty() {
        match kind {
            SourceKind::Delimited => bail!("{} appears to be empty", source.file.display()),
            SourceKind::Text => bail!("no text lines found in {}", source.file.display()),
        }
    }
    Ok((table, kind))
}

/// Detected mapping with command-line overrides applied, checked against the columns.
pub fn resolve_mapping(columns: &[String], args: &ColumnArgs) -> Result<ColumnMapping> {
    let mut suggestion = detect_mapping(columns);

    if let Some(c) = &args.raw_column {
        suggestion.set(FieldRole::Source, c.clone());
    }
    let overrides = [
        (FieldRole::Date, &args.date),
        (FieldRole::Amount, &args.amount),
        (FieldRole::Description, &args.description),
        (FieldRole::Category, &args.category),
        (FieldRole::Credit, &args.credit),
    ];
    for (role, column) in overrides {
        if let Some(c) = column {
            suggestion.set(role, c.clone());
        }
    }

    let mapping = suggestion
        .into_mapping()
        .context("could not assign columns; pass --date, --amount and --description")?;
    mapping.validate(columns)?;
    debug!(?mapping, "column mapping");
    Ok(mapping)
}

pub fn clock_for(cfg: &Config, today: Option<NaiveDate>) -> Result<Box<dyn Clock>> {
    Ok(match today {
        Some(d) => Box::new(FixedClock(d)),
        None => Box::new(cfg.clock()?),
    })
}

pub async fn run_import(
    cfg: &Config,
    source: &SourceArgs,
    columns: &ColumnArgs,
    out: Option<PathBuf>,
) -> Result<()> {
    let (table, kind) = load_source(source).await?;
    let mapping = resolve_mapping(&table.columns, columns)?;
    let clock = clock_for(cfg, columns.today)?;

    let rows_in = table.rows.len();
    let txns = normalize(table.rows, &mapping, clock.as_ref());
    let summary = ImportSummary::from_batch(rows_in, &txns);
    info!(file = %source.file.display(), %kind, transactions = txns.len(), "import ready");

    eprintln!("{summary}");
    for t in txns.iter().take(cfg.import.preview_rows) {
        eprintln!("  {}", format_row(t));
    }
    if txns.len() > cfg.import.preview_rows {
        eprintln!("  ...and {} more", txns.len() - cfg.import.preview_rows);
    }

    let json = serde_json::to_string_pretty(&txns).context("serialize transactions")?;
    match out {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub async fn run_preview(
    cfg: &Config,
    source: &SourceArgs,
    columns: &ColumnArgs,
    rows: Option<usize>,
) -> Result<()> {
    let (table, _) = load_source(source).await?;
    let mapping = resolve_mapping(&table.columns, columns)?;
    let clock = clock_for(cfg, columns.today)?;

    let limit = rows.unwrap_or(cfg.import.preview_rows);
    let txns = preview(&table.rows, &mapping, clock.as_ref(), limit);

    println!("{:<13} {:<40} {:>12}  {}", "Date", "Description", "Amount", "Category");
    if txns.is_empty() {
        println!("(no rows with a description in the first {limit})");
    }
    for t in &txns {
        println!("{}", format_row(t));
    }
    println!("\nContinue with {} rows: homeledger import {}", table.rows.len(), source.file.display());
    Ok(())
}

pub async fn run_columns(source: &SourceArgs) -> Result<()> {
    let (table, kind) = load_source(source).await?;

    println!("{} ({}, {} rows)", source.file.display(), kind, table.rows.len());
    println!("\nColumns:");
    for c in &table.columns {
        println!("- {c}");
    }

    println!("\nDetected mapping:");
    match detect_mapping(&table.columns).into_mapping() {
        Ok(mapping) => {
            for (role, column) in mapping.assignments() {
                println!("  {role:<12} {column}");
            }
        }
        Err(e) => println!("  incomplete: {e}"),
    }
    Ok(())
}

/// One review line: date, description, amount, category.
pub fn format_row(t: &ImportedTransaction) -> String {
    format!(
        "{:<13} {:<40} {:>12}  {}",
        t.date.format("%b %-d, %Y").to_string(),
        truncate(&t.description, 40),
        format_amount(t.amount),
        t.category.as_deref().unwrap_or("-")
    )
}

pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeledger_core::{RAW_TEXT_COLUMN, RawRow};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_detected_mapping() {
        let mapping = resolve_mapping(&cols(&["Date", "Amount", "Memo"]), &ColumnArgs::default()).unwrap();
        assert_eq!(mapping, ColumnMapping::structured("Date", "Amount", "Memo"));
    }

    #[test]
    fn test_overrides_fill_and_replace() {
        let args = ColumnArgs {
            description: Some("Notes".into()),
            category: Some("Kind".into()),
            ..Default::default()
        };
        let mapping = resolve_mapping(&cols(&["Date", "Amount", "Notes", "Kind"]), &args).unwrap();
        assert_eq!(
            mapping,
            ColumnMapping::structured("Date", "Amount", "Notes").with_category("Kind")
        );
    }

    #[test]
    fn test_override_to_unknown_column_fails() {
        let args = ColumnArgs {
            amount: Some("Total".into()),
            ..Default::default()
        };
        let err = resolve_mapping(&cols(&["Date", "Amount", "Memo"]), &args).unwrap_err();
        assert!(err.to_string().contains("'Total' not found"), "{err}");
    }

    #[test]
    fn test_raw_column_selects_line_extraction() {
        let args = ColumnArgs {
            raw_column: Some("Memo".into()),
            ..Default::default()
        };
        let mapping = resolve_mapping(&cols(&["Date", "Amount", "Memo"]), &args).unwrap();
        assert_eq!(mapping, ColumnMapping::unstructured("Memo"));
    }

    #[test]
    fn test_incomplete_mapping_message() {
        let err = resolve_mapping(&cols(&["When", "Value", "Text"]), &ColumnArgs::default()).unwrap_err();
        assert!(err.to_string().contains("pass --date"), "{err}");
    }

    #[test]
    fn test_format_row() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 23).unwrap();
        let t = ImportedTransaction::new(date, -84.23, "Trader Joe's", None, RawRow::single(RAW_TEXT_COLUMN, "x"));
        let line = format_row(&t);
        assert!(line.starts_with("Oct 23, 2023"));
        assert!(line.contains("Trader Joe's"));
        assert!(line.contains("-$84.23"));
        assert!(line.ends_with('-'));
    }

    #[test]
    fn test_truncate_long_description() {
        let long = "A".repeat(50);
        assert_eq!(truncate(&long, 10), "AAAAAAA...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[tokio::test]
    async fn test_load_source_rejects_empty_csv() {
        let path = std::env::temp_dir().join(format!("homeledger-empty-{}.csv", std::process::id()));
        std::fs::write(&path, "Date,Amount,Memo\n").unwrap();
        let source = SourceArgs { file: path.clone(), kind: None };
        let err = load_source(&source).await.unwrap_err();
        assert!(err.to_string().contains("appears to be empty"), "{err}");
        std::fs::remove_file(path).ok();
    }
}
