//! Amount cleaning for USD-style statement values.
//!
//!   "$1,200.50" -> 1200.50
//!   "(50.00)"   -> -50.00
//!   "50.00-"    -> -50.00   (trailing-negative, line extraction only)

use regex::Regex;
use std::sync::OnceLock;

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("leading number regex")
    })
}

/// Parse the longest numeric prefix, ignoring leading whitespace.
///
/// `"84.23 USD"` parses as 84.23; text with no numeric prefix gives `None`.
pub fn parse_leading_decimal(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let m = leading_number_re().find(s)?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Drop `$` and thousands separators, and turn `(x)` into `-x`.
pub fn clean_amount(raw: &str) -> String {
    let cleaned = raw.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    match cleaned.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => format!("-{inner}"),
        None => cleaned.to_string(),
    }
}

/// Structured-column amount: cleaned and parsed, `0` when unparseable.
pub fn parse_amount(raw: &str) -> f64 {
    parse_leading_decimal(&clean_amount(raw)).unwrap_or(0.0)
}

/// Amount matched at the end of a statement line, which may use a trailing minus.
pub fn parse_line_amount(matched: &str) -> f64 {
    let cleaned = matched.trim().replace(['$', ','], "");
    let signed = match cleaned.strip_suffix('-') {
        Some(body) if body.starts_with('-') => body.to_string(),
        Some(body) => format!("-{body}"),
        None => cleaned,
    };
    parse_leading_decimal(&signed).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_amounts() {
        assert_eq!(parse_amount("123.45"), 123.45);
        assert_eq!(parse_amount("$1,200.50"), 1200.50);
        assert_eq!(parse_amount("(50.00)"), -50.00);
        assert_eq!(parse_amount("($1,000.00)"), -1000.00);
        assert_eq!(parse_amount(" -15.00 "), -15.00);
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
        assert_eq!(parse_amount("()"), 0.0);
        assert_eq!(parse_amount("- 5.00"), 0.0);
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(parse_leading_decimal("84.23 USD"), Some(84.23));
        assert_eq!(parse_leading_decimal(".5"), Some(0.5));
        assert_eq!(parse_leading_decimal("12."), Some(12.0));
        assert_eq!(parse_leading_decimal("USD 84.23"), None);
    }

    #[test]
    fn test_line_amount_trailing_minus() {
        assert_eq!(parse_line_amount("50.00-"), -50.00);
        assert_eq!(parse_line_amount("$1,234.56-"), -1234.56);
        assert_eq!(parse_line_amount("-$15.99"), -15.99);
        assert_eq!(parse_line_amount("$-15.99"), -15.99);
        assert_eq!(parse_line_amount("-15.99-"), -15.99);
        assert_eq!(parse_line_amount("15.99"), 15.99);
    }
}
