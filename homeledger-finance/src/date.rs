//! Permissive date parsing for statement exports.
//!
//! Banks emit anything from `10/23/2023` to `2023-10-23T00:00:00Z` to
//! `Oct 23, 2023`. Time-of-day is always discarded.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use homeledger_core::Clock;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

// %y must precede %Y, and month-first shapes must precede year-first ones:
// %Y happily reads "23" as the year 23.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m.%d.%Y",
    // %B also accepts the three-letter abbreviation when parsing
    "%B %d, %Y",
    "%B %d %Y",
    "%B. %d, %Y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%A %B %d %Y",
    "%A, %B %d, %Y",
];

/// Parse a date written in any of the common statement shapes.
pub fn parse_date_permissive(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Month number for an English month name or its abbreviation.
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.trim_end_matches('.').to_ascii_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Years before 2000 come from yearless or two-digit matches; move them to the clock's year.
pub fn correct_implausible_year(date: NaiveDate, clock: &dyn Clock) -> NaiveDate {
    if date.year() >= 2000 {
        return date;
    }
    date_in_year(clock.current_year(), date.month(), date.day()).unwrap_or_else(|| clock.today())
}

/// Build a date, moving Feb 29 to Feb 28 when `year` is not a leap year.
pub fn date_in_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| match (month, day) {
        (2, 29) => NaiveDate::from_ymd_opt(year, 2, 28),
        _ => None,
    })
}
