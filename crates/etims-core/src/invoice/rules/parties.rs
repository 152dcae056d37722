//! Buyer and seller name extraction.
//!
//! Same ordered-pattern, first-match policy as the scalar fields, but the
//! result is a name-only party record rather than a scalar.

use regex::Regex;

use super::patterns::{BUYER_NAME_PATTERNS, SELLER_NAME_PATTERNS};
use crate::models::fields::PartyDetails;

fn extract_name(text: &str, patterns: &[Regex]) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

/// Extract buyer details from recognized invoice text.
pub fn extract_buyer_details(text: &str) -> PartyDetails {
    PartyDetails {
        name: extract_name(text, &BUYER_NAME_PATTERNS),
    }
}

/// Extract seller details from recognized invoice text.
pub fn extract_seller_details(text: &str) -> PartyDetails {
    PartyDetails {
        name: extract_name(text, &SELLER_NAME_PATTERNS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buyer_name_before_kras_marker() {
        let text = "Invoice 12345\nACME TECH SOLUTIONS KRASN0000123/456";
        let details = extract_buyer_details(text);
        assert_eq!(details.name.as_deref(), Some("ACME TECH SOLUTIONS"));
    }

    #[test]
    fn test_buyer_name_from_label() {
        let text = "Buyer Details:\nUPLANDS DAIRY LIMITED\nPIN: A123456789B";
        let details = extract_buyer_details(text);
        assert_eq!(details.name.as_deref(), Some("UPLANDS DAIRY LIMITED"));
    }

    #[test]
    fn test_seller_name_after_cu_invoice_label() {
        let text = "CU Invoice Number:\nJANE AKINYI ODHIAMBO\nother text";
        let details = extract_seller_details(text);
        assert_eq!(details.name.as_deref(), Some("JANE AKINYI ODHIAMBO"));
    }

    #[test]
    fn test_absent_names_are_none() {
        assert_eq!(extract_buyer_details("no names here").name, None);
        assert_eq!(extract_seller_details("").name, None);
    }
}
