//! Per-field confidence scoring.
//!
//! Scores are a format heuristic for downstream human review, computed
//! purely from the extracted values. They deliberately ignore the
//! recognition engine's own confidence signal; tests assert the exact
//! constants.

use super::rules::validate_kra_pin;
use crate::models::fields::{ConfidenceScores, InvoiceFields};

/// Score every extracted field. Absent fields score 0.0.
pub fn score_fields(fields: &InvoiceFields) -> ConfidenceScores {
    ConfidenceScores {
        invoice_number: invoice_number_score(fields.invoice_number.as_deref()),
        invoice_amount: if fields.invoice_amount.is_some() { 0.95 } else { 0.0 },
        invoice_date: if fields.invoice_date.is_some() { 0.9 } else { 0.0 },
        due_date: if fields.due_date.is_some() { 0.9 } else { 0.0 },
        supplier_kra_pin: pin_score(fields.supplier_kra_pin.as_deref()),
        buyer_kra_pin: pin_score(fields.buyer_kra_pin.as_deref()),
    }
}

/// 0.9 for a plausibly shaped invoice number (5-30 chars with at least one
/// alphanumeric), 0.6 for anything else that was extracted.
fn invoice_number_score(number: Option<&str>) -> f32 {
    match number {
        Some(n) => {
            let len = n.chars().count();
            if (5..=30).contains(&len) && n.chars().any(|c| c.is_ascii_alphanumeric()) {
                0.9
            } else {
                0.6
            }
        }
        None => 0.0,
    }
}

/// 0.95 for a format-valid PIN, 0.5 for a present-but-invalid one.
fn pin_score(pin: Option<&str>) -> f32 {
    match pin {
        Some(p) if validate_kra_pin(p) => 0.95,
        Some(_) => 0.5,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_absent_fields_score_zero() {
        let scores = score_fields(&InvoiceFields::default());
        assert_eq!(scores.invoice_number, 0.0);
        assert_eq!(scores.invoice_amount, 0.0);
        assert_eq!(scores.invoice_date, 0.0);
        assert_eq!(scores.due_date, 0.0);
        assert_eq!(scores.supplier_kra_pin, 0.0);
        assert_eq!(scores.buyer_kra_pin, 0.0);
    }

    #[test]
    fn test_invoice_number_shape() {
        let mut fields = InvoiceFields {
            invoice_number: Some("KRACU0100000001".to_string()),
            ..Default::default()
        };
        assert_eq!(score_fields(&fields).invoice_number, 0.9);

        // Present but outside the plausible shape.
        fields.invoice_number = Some("AB1".to_string());
        assert_eq!(score_fields(&fields).invoice_number, 0.6);
    }

    #[test]
    fn test_amount_and_dates() {
        let fields = InvoiceFields {
            invoice_amount: Some(Decimal::new(6000000, 2)),
            invoice_date: chrono::NaiveDate::from_ymd_opt(2025, 12, 17),
            ..Default::default()
        };
        let scores = score_fields(&fields);
        assert_eq!(scores.invoice_amount, 0.95);
        assert_eq!(scores.invoice_date, 0.9);
        assert_eq!(scores.due_date, 0.0);
    }

    #[test]
    fn test_pin_validity_tiers() {
        let fields = InvoiceFields {
            supplier_kra_pin: Some("P052006107N".to_string()),
            buyer_kra_pin: Some("P0052006107N".to_string()), // 12 chars
            ..Default::default()
        };
        let scores = score_fields(&fields);
        assert_eq!(scores.supplier_kra_pin, 0.95);
        assert_eq!(scores.buyer_kra_pin, 0.5);
    }
}
