//! Date parsing for extracted invoice dates.

use chrono::NaiveDate;
use tracing::warn;

/// Date formats tried in order, most common on eTIMS documents first.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d/%m/%y",
    "%d-%m-%y",
];

/// Parse an extracted date string.
///
/// A trailing time component is dropped first (`"2025-12-17 21:50:06"`
/// parses identically to `"2025-12-17"`), then the format list is tried in
/// order and the first successful parse wins. Unparseable input yields
/// `None`, never an error.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let token = raw.split_whitespace().next()?;

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return Some(date);
        }
    }

    warn!("Failed to parse date '{}'", raw);
    None
}
