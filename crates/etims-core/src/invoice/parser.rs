//! eTIMS invoice field parser.

use tracing::{debug, warn};

use super::confidence::score_fields;
use super::rules::{
    cleanup_kra_pin, extract_buyer_details, extract_seller_details, parse_amount, parse_date, Field,
};
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::fields::ExtractionResult;

/// Parser for extracting structured data from eTIMS invoice OCR text.
pub struct EtimsParser {
    /// Apply the O/0 correction pass to extracted KRA PINs.
    correct_pin_ocr_errors: bool,
    /// Minimum trimmed text length before pattern matching runs.
    min_text_len: usize,
}

impl EtimsParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            correct_pin_ocr_errors: true,
            min_text_len: 10,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            correct_pin_ocr_errors: config.correct_pin_ocr_errors,
            min_text_len: config.min_text_len,
        }
    }

    /// Set whether extracted PINs get the OCR-error correction pass.
    pub fn with_pin_correction(mut self, correct: bool) -> Self {
        self.correct_pin_ocr_errors = correct;
        self
    }

    /// Extract a single field using its ordered pattern list.
    ///
    /// The first matching pattern wins. When a pattern has several capture
    /// groups, the last participating group is the value: later groups are
    /// the more specific nested captures. A pattern none of whose groups
    /// participated falls through to the next one. No match over the whole
    /// list is a normal outcome, not an error.
    pub fn extract_field(&self, text: &str, field: Field) -> Option<String> {
        for pattern in field.patterns() {
            if let Some(caps) = pattern.captures(text) {
                let matched = (1..caps.len()).rev().find_map(|i| caps.get(i));
                if let Some(m) = matched {
                    let value = m.as_str().trim().to_string();
                    debug!(
                        "Extracted {}: {} using pattern {}",
                        field.name(),
                        value,
                        pattern.as_str()
                    );
                    return Some(value);
                }
            }
        }

        warn!("Could not extract {}", field.name());
        None
    }

    /// Parse all invoice fields out of recognized text.
    ///
    /// Never fails: missing fields stay `None`, problems accumulate in
    /// `extraction_errors`, and `extraction_success` reports whether both
    /// core fields (invoice number and amount) came out.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::default();

        if text.trim().chars().count() < self.min_text_len {
            result
                .extraction_errors
                .push(ExtractionError::TextTooShort.to_string());
            return result;
        }

        result.fields.invoice_number = self.extract_field(text, Field::InvoiceNumber);

        if let Some(raw) = self.extract_field(text, Field::InvoiceAmount) {
            result.fields.invoice_amount = parse_amount(&raw);
            if result.fields.invoice_amount.is_none() {
                warn!(
                    "{}",
                    ExtractionError::Parse {
                        field: Field::InvoiceAmount.name().to_string(),
                        value: raw,
                    }
                );
            }
        }

        if let Some(raw) = self.extract_field(text, Field::InvoiceDate) {
            result.fields.invoice_date = parse_date(&raw);
        }
        if let Some(raw) = self.extract_field(text, Field::DueDate) {
            result.fields.due_date = parse_date(&raw);
        }

        result.fields.supplier_kra_pin = self
            .extract_field(text, Field::SupplierKraPin)
            .map(|pin| self.correct_pin(pin));
        result.fields.buyer_kra_pin = self
            .extract_field(text, Field::BuyerKraPin)
            .map(|pin| self.correct_pin(pin));

        result.fields.buyer_details = extract_buyer_details(text);
        result.fields.seller_details = extract_seller_details(text);

        result.confidence_scores = score_fields(&result.fields);

        let core_fields_extracted =
            result.fields.invoice_number.is_some() && result.fields.invoice_amount.is_some();
        result.extraction_success = core_fields_extracted;

        if !core_fields_extracted {
            let mut missing = Vec::new();
            if result.fields.invoice_number.is_none() {
                missing.push(Field::InvoiceNumber.name());
            }
            if result.fields.invoice_amount.is_none() {
                missing.push(Field::InvoiceAmount.name());
            }
            result.extraction_errors.push(format!(
                "Failed to extract core fields: {}",
                missing.join(", ")
            ));
        }

        if result.fields.invoice_date.is_none() {
            warn!("Optional field 'invoice_date' not extracted");
        }
        if result.fields.due_date.is_none() {
            warn!("Optional field 'due_date' not extracted");
        }
        if result.fields.supplier_kra_pin.is_none() {
            warn!("Optional field 'supplier_kra_pin' not extracted");
        }
        if result.fields.buyer_kra_pin.is_none() {
            warn!("Optional field 'buyer_kra_pin' not extracted");
        }

        result
    }

    fn correct_pin(&self, pin: String) -> String {
        if self.correct_pin_ocr_errors {
            cleanup_kra_pin(&pin)
        } else {
            pin
        }
    }
}

impl Default for EtimsParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_parse_full_invoice() {
        let text = r#"
            KENYA REVENUE AUTHORITY
            TAX INVOICE

            Sale From: WESTLANDS BRANCH
            PIN: A123456789B
            muasya@gmail.com PIN: PO52006107N

            Date Created: 2025-12-17 21:50:06
            Due Date: 2026-01-16

            Item: Office supplies
            Total Amount: KES 60,000.00

            SCU ID: KRACU0100000001
        "#;

        let result = EtimsParser::new().parse(text);

        assert!(result.extraction_success);
        assert_eq!(result.fields.invoice_number.as_deref(), Some("KRACU0100000001"));
        assert_eq!(
            result.fields.invoice_amount,
            Some(Decimal::from_str("60000.00").unwrap())
        );
        assert_eq!(
            result.fields.invoice_date,
            NaiveDate::from_ymd_opt(2025, 12, 17)
        );
        assert_eq!(result.fields.due_date, NaiveDate::from_ymd_opt(2026, 1, 16));
        assert_eq!(result.fields.supplier_kra_pin.as_deref(), Some("A123456789B"));
        // The buyer PIN had an O misread; the correction pass fixed it.
        assert_eq!(result.fields.buyer_kra_pin.as_deref(), Some("P052006107N"));
    }

    #[test]
    fn test_scenario_core_fields_only() {
        let text = "SCU ID: ABC12345\nTotal Amount: KES 60,000.00\nDate Created: 2025-12-17";
        let result = EtimsParser::new().parse(text);

        assert!(result.extraction_success);
        assert_eq!(result.fields.invoice_number.as_deref(), Some("ABC12345"));
        assert_eq!(
            result.fields.invoice_amount,
            Some(Decimal::from_str("60000.00").unwrap())
        );
        assert_eq!(
            result.fields.invoice_date,
            NaiveDate::from_ymd_opt(2025, 12, 17)
        );
        assert_eq!(result.confidence_scores.invoice_amount, 0.95);
        assert!(result.extraction_errors.is_empty());
    }

    #[test]
    fn test_short_text_skips_pattern_matching() {
        let result = EtimsParser::new().parse("scan");

        assert!(!result.extraction_success);
        assert_eq!(result.extraction_errors.len(), 1);
        assert!(result.extraction_errors[0].contains("too short"));
        assert_eq!(result.fields.invoice_number, None);
    }

    #[test]
    fn test_empty_text_reports_error_not_panic() {
        let result = EtimsParser::new().parse("");
        assert!(!result.extraction_success);
        assert!(!result.extraction_errors.is_empty());
    }

    #[test]
    fn test_missing_core_fields_reported() {
        let result = EtimsParser::new().parse("some scanned page with no invoice markers at all");

        assert!(!result.extraction_success);
        assert!(result.extraction_errors[0].contains("invoice_number"));
        assert!(result.extraction_errors[0].contains("invoice_amount"));
    }

    #[test]
    fn test_missing_optional_fields_do_not_fail() {
        let text = "SCU ID: ABC12345\nTotal Amount: 500.00";
        let result = EtimsParser::new().parse(text);

        assert!(result.extraction_success);
        assert_eq!(result.fields.invoice_date, None);
        assert_eq!(result.fields.supplier_kra_pin, None);
        assert!(result.extraction_errors.is_empty());
    }

    #[test]
    fn test_extract_field_returns_none_without_match() {
        let parser = EtimsParser::new();
        for field in Field::ALL {
            assert_eq!(parser.extract_field("", field), None);
            assert_eq!(parser.extract_field("nothing relevant here", field), None);
        }
    }

    #[test]
    fn test_specific_pattern_outranks_generic_total() {
        // Both a subtotal-ish bare Total and a labeled Total Amount: the
        // labeled pattern is earlier in the list and wins.
        let text = "SCU ID: X1\nTotal: 100.00\nTotal Amount: 999.00\npadding";
        let parser = EtimsParser::new();
        assert_eq!(
            parser.extract_field(text, Field::InvoiceAmount).as_deref(),
            Some("999.00")
        );
    }

    #[test]
    fn test_unparseable_amount_yields_none_amount() {
        // Amount label present but the capture is separators only, so the
        // decimal parse fails: core-field success flips off, no panic.
        let text = "SCU ID: ABC12345\nTotal Amount: ,,, extra padding";
        let result = EtimsParser::new().parse(text);
        assert!(!result.extraction_success);
        assert_eq!(result.fields.invoice_amount, None);
    }

    #[test]
    fn test_pin_correction_can_be_disabled() {
        let text = "SCU ID: ABC12345\nTotal Amount: 500.00\nmuasya@gmail.com PIN: PO52006107N";
        let result = EtimsParser::new().with_pin_correction(false).parse(text);
        assert_eq!(result.fields.buyer_kra_pin.as_deref(), Some("PO52006107N"));
    }
}
