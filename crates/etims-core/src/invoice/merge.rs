//! OCR-assist merge for the invoice creation flow.
//!
//! The request layer collects user-entered fields and runs OCR on the
//! uploaded document; this merge fills the gaps. User-provided non-empty
//! values always take precedence over OCR values, field by field.

use crate::models::fields::{InvoiceFields, UserInvoiceFields};

/// Merge OCR output into user-supplied fields.
///
/// OCR keys map onto the persisted record's names: `buyer_details.name` →
/// `buyer_name`, `seller_details.name` → `supplier_name`; the rest map
/// one-to-one.
pub fn apply_ocr_assist(user: &UserInvoiceFields, ocr: &InvoiceFields) -> UserInvoiceFields {
    UserInvoiceFields {
        invoice_number: prefer_user(&user.invoice_number, &ocr.invoice_number),
        invoice_amount: user.invoice_amount.or(ocr.invoice_amount),
        invoice_date: user.invoice_date.or(ocr.invoice_date),
        due_date: user.due_date.or(ocr.due_date),
        supplier_kra_pin: prefer_user(&user.supplier_kra_pin, &ocr.supplier_kra_pin),
        buyer_kra_pin: prefer_user(&user.buyer_kra_pin, &ocr.buyer_kra_pin),
        buyer_name: prefer_user(&user.buyer_name, &ocr.buyer_details.name),
        supplier_name: prefer_user(&user.supplier_name, &ocr.seller_details.name),
    }
}

/// A user string wins unless it is absent or blank.
fn prefer_user(user: &Option<String>, ocr: &Option<String>) -> Option<String> {
    match user {
        Some(value) if !value.trim().is_empty() => Some(value.clone()),
        _ => ocr.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn ocr_fields() -> InvoiceFields {
        InvoiceFields {
            invoice_number: Some("KRACU0100000001".to_string()),
            invoice_amount: Some(Decimal::new(6000000, 2)),
            buyer_details: crate::models::fields::PartyDetails {
                name: Some("ACME SOLUTIONS".to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_user_values_win() {
        let user = UserInvoiceFields {
            invoice_number: Some("INV-001".to_string()),
            invoice_amount: Some(Decimal::new(100, 0)),
            ..Default::default()
        };

        let merged = apply_ocr_assist(&user, &ocr_fields());
        assert_eq!(merged.invoice_number.as_deref(), Some("INV-001"));
        assert_eq!(merged.invoice_amount, Some(Decimal::new(100, 0)));
    }

    #[test]
    fn test_ocr_fills_missing_fields() {
        let merged = apply_ocr_assist(&UserInvoiceFields::default(), &ocr_fields());
        assert_eq!(merged.invoice_number.as_deref(), Some("KRACU0100000001"));
        assert_eq!(merged.invoice_amount, Some(Decimal::new(6000000, 2)));
        assert_eq!(merged.buyer_name.as_deref(), Some("ACME SOLUTIONS"));
    }

    #[test]
    fn test_blank_user_string_treated_as_missing() {
        let user = UserInvoiceFields {
            invoice_number: Some("   ".to_string()),
            ..Default::default()
        };

        let merged = apply_ocr_assist(&user, &ocr_fields());
        assert_eq!(merged.invoice_number.as_deref(), Some("KRACU0100000001"));
    }

    #[test]
    fn test_party_names_map_to_record_fields() {
        let ocr = InvoiceFields {
            seller_details: crate::models::fields::PartyDetails {
                name: Some("JANE AKINYI".to_string()),
            },
            ..Default::default()
        };

        let merged = apply_ocr_assist(&UserInvoiceFields::default(), &ocr);
        assert_eq!(merged.supplier_name.as_deref(), Some("JANE AKINYI"));
        assert_eq!(merged.buyer_name, None);
    }
}
