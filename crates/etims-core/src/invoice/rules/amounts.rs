//! Amount parsing for extracted invoice totals.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

/// Parse an extracted amount string to an exact decimal.
///
/// Thousands separators and stray whitespace are stripped first
/// (`"1,234.56"` and `"1 234.56"` both parse to `1234.56`). Decimals avoid
/// the rounding drift a float would introduce on currency values.
/// Unparseable input yields `None`, never an error.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != ' ').collect();

    if cleaned.is_empty() {
        return None;
    }

    match Decimal::from_str(&cleaned) {
        Ok(amount) => Some(amount),
        Err(e) => {
            warn!("Failed to parse amount '{}': {}", raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_thousands_separators_stripped_exactly() {
        assert_eq!(
            parse_amount("1,234.56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(
            parse_amount("60,000.00"),
            Some(Decimal::from_str("60000.00").unwrap())
        );
        assert_eq!(
            parse_amount("1 234 567.89"),
            Some(Decimal::from_str("1234567.89").unwrap())
        );
    }

    #[test]
    fn test_exact_decimal_no_float_artifact() {
        // 0.1 + 0.2 style drift must not appear.
        let amount = parse_amount("1234.56").unwrap();
        assert_eq!(amount.to_string(), "1234.56");
    }

    #[test]
    fn test_integer_amount() {
        assert_eq!(parse_amount("500"), Some(Decimal::from(500)));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("KES"), None);
        assert_eq!(parse_amount("12.34.56"), None);
    }
}
