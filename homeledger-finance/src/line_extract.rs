//! Field extraction from free-text statement lines.
//!
//! Expected lines after text extraction:
//!   10/24/2023 NETFLIX.COM 15.99
//!   2023-10-25 SHELL OIL 5744 40.00-
//!   Jan 15 TRANSFER TO SAVINGS -$200.00
//!
//! The date is found first and cut out, then an amount anchored to the end of
//! what remains; the leftover text is the description.

use chrono::NaiveDate;
use homeledger_core::{Clock, ImportedTransaction, NO_DESCRIPTION, RawRow};
use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::amount::parse_line_amount;
use crate::date::{correct_implausible_year, date_in_year, month_from_name, parse_date_permissive};

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\b\d{1,2}/\d{1,2}/\d{2,4}\b",
            r"|\b\d{4}-\d{1,2}-\d{1,2}\b",
            r"|\b(?P<month>(?i:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?",
            r"|aug(?:ust)?|sep(?:t|tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?))\.?",
            r"\s+(?P<day>\d{1,2})(?:,\s*(?P<year>\d{4}))?\b",
        ))
        .expect("date regex")
    })
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\$?-?\d[\d,]*\.\d{2}-?\s*$").expect("amount regex"))
}

/// Normalize one free-text row read from `source_column`.
pub fn normalize_line(row: RawRow, source_column: &str, clock: &dyn Clock) -> ImportedTransaction {
    let line = row.value(source_column).unwrap_or_default().to_string();

    let (date, rest) = extract_date(&line, clock);
    let (amount, rest) = extract_amount(&rest);

    let leftover = rest.trim();
    let description = if !leftover.is_empty() {
        leftover.to_string()
    } else if !line.is_empty() {
        line.clone()
    } else {
        NO_DESCRIPTION.to_string()
    };

    trace!(%line, %date, amount, %description, "extracted line");
    ImportedTransaction::new(date, amount, description, None, row)
}

/// Find the leftmost date, returning it and the line with that date removed.
fn extract_date(line: &str, clock: &dyn Clock) -> (NaiveDate, String) {
    let Some(caps) = date_re().captures(line) else {
        debug!(%line, "no date found, using today");
        return (clock.today(), line.to_string());
    };
    let Some(matched) = caps.get(0) else {
        return (clock.today(), line.to_string());
    };

    let date = match parse_matched_date(&caps, clock) {
        Some(d) => correct_implausible_year(d, clock),
        None => {
            debug!(matched = matched.as_str(), "date-like text is not a valid date, using today");
            clock.today()
        }
    };

    let rest = format!("{}{}", &line[..matched.start()], &line[matched.end()..]);
    (date, rest)
}

fn parse_matched_date(caps: &Captures<'_>, clock: &dyn Clock) -> Option<NaiveDate> {
    let Some(month) = caps.name("month") else {
        return parse_date_permissive(caps.get(0)?.as_str());
    };
    let month = month_from_name(month.as_str())?;
    let day: u32 = caps.name("day")?.as_str().parse().ok()?;
    let year = match caps.name("year") {
        Some(y) => y.as_str().parse().ok()?,
        None => return date_in_year(clock.current_year(), month, day),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Find an amount at the end of the line, returning it and the line without it.
fn extract_amount(rest: &str) -> (f64, String) {
    match amount_re().find(rest) {
        Some(m) => (
            parse_line_amount(m.as_str()),
            format!("{}{}", &rest[..m.start()], &rest[m.end()..]),
        ),
        None => (0.0, rest.to_string()),
    }
}
