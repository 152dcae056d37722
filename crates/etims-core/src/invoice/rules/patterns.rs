//! Ordered regex pattern lists for eTIMS field extraction.
//!
//! Lists run most-specific first: structural markers like the SCU ID label
//! outrank generic totals that could match the wrong number on a dense
//! page. OCR output reflows layout freely, so every pattern matches
//! case-insensitively across lines with `.` spanning newlines.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

fn rx(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .dot_matches_new_line(true)
        .build()
        .expect("invalid extraction pattern")
}

lazy_static! {
    /// Invoice number: SCU ID is the most reliable marker on eTIMS
    /// documents; the KRAS-prefixed CU invoice number and the receipt
    /// signature are progressively weaker fallbacks.
    pub static ref INVOICE_NUMBER_PATTERNS: Vec<Regex> = vec![
        rx(r"SCU\s+ID\s*:?\s*([A-Z0-9]+)"),
        rx(r"(KRAS[RN][NO0]+\d+/\d+)"),
        rx(r"Receipt\s+Signature\s*:?\s*([A-Z0-9]{10,})"),
        rx(r"CU\s+Invoice\s+Number\s*:?\s*\n.*?([A-Z0-9]+/\d+)"),
    ];

    /// Gross amount: labeled totals first. The bare `Total` fallback can
    /// match a subtotal line above the real grand total on a densely
    /// formatted page; kept last as a recall backstop.
    pub static ref INVOICE_AMOUNT_PATTERNS: Vec<Regex> = vec![
        rx(r"Total\s+Amount\s*:?\s*(?:KES|KSH)?\s*([0-9,]+\.?\d*)"),
        rx(r"Grand\s*Total\s*:?\s*(?:KES|KSH)?\s*([0-9,]+\.?\d*)"),
        rx(r"Amount\s*(?:Due|Payable)\s*:?\s*(?:KES|KSH)?\s*([0-9,]+\.?\d*)"),
        rx(r"Total\s*:?\s*(?:KES|KSH)?\s*([0-9,]+\.?\d*)"),
    ];

    /// Invoice date: the eTIMS `Date Created` label in ISO form first,
    /// then other labels and day-first forms.
    pub static ref INVOICE_DATE_PATTERNS: Vec<Regex> = vec![
        rx(r"Date\s+Created\s*:?\s*(\d{4}-\d{2}-\d{2})"),
        rx(r"Invoice\s*Date\s*:?\s*(\d{4}-\d{2}-\d{2})"),
        rx(r"Date\s*:?\s*(\d{4}-\d{2}-\d{2})"),
        rx(r"Date\s+Created\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"),
        rx(r"Invoice\s*Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"),
    ];

    pub static ref DUE_DATE_PATTERNS: Vec<Regex> = vec![
        rx(r"Due\s*Date\s*:?\s*(\d{4}-\d{2}-\d{2})"),
        rx(r"Payment\s*Due\s*:?\s*(\d{4}-\d{2}-\d{2})"),
        rx(r"Due\s*Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"),
        rx(r"Payment\s*Due\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"),
    ];

    /// Supplier PIN: the seller section's PIN, or the first PIN on the
    /// page (eTIMS prints the seller before the buyer).
    pub static ref SUPPLIER_KRA_PIN_PATTERNS: Vec<Regex> = vec![
        rx(r"(?:Sale\s+From|Seller|Supplier).*?PIN\s*:?\s*([A-Z][0-9]{9}[A-Z])"),
        rx(r"(?:^|\n)PIN\s*:?\s*([A-Z][0-9]{9}[A-Z])"),
    ];

    /// Buyer PIN: anchored after the buyer's email where possible, else
    /// the second PIN occurrence. The digit block tolerates `O` misreads;
    /// the correction pass maps them back to `0`.
    pub static ref BUYER_KRA_PIN_PATTERNS: Vec<Regex> = vec![
        rx(r"gmail\.com\s+PIN\s*:?\s*([A-Z]{1,2}[O0-9]{9}[A-Z])"),
        rx(r"@\w+\.\w+\s+PIN\s*:?\s*([A-Z]{1,2}[O0-9]{9}[A-Z])"),
        rx(r"email.*?PIN\s*:?\s*([A-Z]{1,2}[O0-9]{9}[A-Z])"),
        rx(r"PIN\s*:?\s*[A-Z][0-9]{9}[A-Z].*?PIN\s*:?\s*([A-Z]{1,2}[O0-9]{9}[A-Z])"),
    ];

    /// Buyer company name, printed before the KRAS invoice number or
    /// under a buyer label.
    pub static ref BUYER_NAME_PATTERNS: Vec<Regex> = vec![
        rx(r"Buyer\s*(?:Name|Details)?\s*:?\s*\n?\s*([A-Z][A-Z\s]+(?:LIMITED|LTD|SOLUTIONS))"),
        rx(r"\s([A-Z]{2,}(?:\s+[A-Z]+)*\s+(?:LIMITED|LTD|SOLUTIONS))\s+KRAS"),
    ];

    /// Seller name, printed immediately after the CU invoice number label.
    pub static ref SELLER_NAME_PATTERNS: Vec<Regex> = vec![
        rx(r"CU\s+Invoice\s+Number\s*:?\s*\n([A-Z]+\s+[A-Z]+\s+[A-Z]+)"),
        rx(r"Invoice\s+Number\s*:?\s*\n([A-Z]+(?:\s+[A-Z]+){1,3})\s+[A-Z]+(?:\s+[A-Z]+)*\s+(?:LIMITED|SOLUTIONS)"),
    ];
}
