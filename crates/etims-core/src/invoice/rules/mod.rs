//! Rule-based field extractors for eTIMS invoices.

pub mod amounts;
pub mod dates;
pub mod parties;
pub mod patterns;
pub mod pin;

pub use amounts::parse_amount;
pub use dates::parse_date;
pub use parties::{extract_buyer_details, extract_seller_details};
pub use pin::{cleanup_kra_pin, validate_kra_pin};

use regex::Regex;

use patterns::{
    BUYER_KRA_PIN_PATTERNS, DUE_DATE_PATTERNS, INVOICE_AMOUNT_PATTERNS, INVOICE_DATE_PATTERNS,
    INVOICE_NUMBER_PATTERNS, SUPPLIER_KRA_PIN_PATTERNS,
};

/// Scalar fields extracted by the ordered-rule evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    InvoiceNumber,
    InvoiceAmount,
    InvoiceDate,
    DueDate,
    SupplierKraPin,
    BuyerKraPin,
}

impl Field {
    /// All scalar fields, in extraction order.
    pub const ALL: [Field; 6] = [
        Field::InvoiceNumber,
        Field::InvoiceAmount,
        Field::InvoiceDate,
        Field::DueDate,
        Field::SupplierKraPin,
        Field::BuyerKraPin,
    ];

    /// The ordered pattern list for this field, most reliable first.
    pub fn patterns(self) -> &'static [Regex] {
        match self {
            Field::InvoiceNumber => &INVOICE_NUMBER_PATTERNS,
            Field::InvoiceAmount => &INVOICE_AMOUNT_PATTERNS,
            Field::InvoiceDate => &INVOICE_DATE_PATTERNS,
            Field::DueDate => &DUE_DATE_PATTERNS,
            Field::SupplierKraPin => &SUPPLIER_KRA_PIN_PATTERNS,
            Field::BuyerKraPin => &BUYER_KRA_PIN_PATTERNS,
        }
    }

    /// Field name as used in results and logs.
    pub fn name(self) -> &'static str {
        match self {
            Field::InvoiceNumber => "invoice_number",
            Field::InvoiceAmount => "invoice_amount",
            Field::InvoiceDate => "invoice_date",
            Field::DueDate => "due_date",
            Field::SupplierKraPin => "supplier_kra_pin",
            Field::BuyerKraPin => "buyer_kra_pin",
        }
    }
}
