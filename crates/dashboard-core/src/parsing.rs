//! Cell-level parsing helpers for tabular input.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Markers that spreadsheet and dataframe exports use for an absent value.
const NULL_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "<NA>",
];

/// `true` when the cell carries no value: empty, whitespace, or a null marker.
pub fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || NULL_MARKERS.contains(&trimmed)
}

/// Parse a calendar date, dropping any time-of-day component.
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.date());
        }
    }

    // RFC 3339 keeps the local calendar date of the given offset.
    let normalised = match s.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => s.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalised)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse a decimal amount such as `"19.99"`, `"1e3"` or `"-4"`.
pub fn parse_decimal(cell: &str) -> Option<Decimal> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parse a whole number. Integral decimals like `"2.0"` are accepted, since
/// dataframe exports write integer columns with missing values that way.
pub fn parse_integer(cell: &str) -> Option<i64> {
    let s = cell.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let value = parse_decimal(s)?;
    if value.fract().is_zero() {
        i64::try_from(value.trunc()).ok()
    } else {
        None
    }
}
