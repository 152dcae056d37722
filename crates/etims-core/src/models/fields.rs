//! Value objects produced by the extraction pipeline.
//!
//! Everything here is scoped to a single extraction call. Nothing is cached
//! or shared across calls; persistence belongs to the calling service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fields extracted from an eTIMS invoice. Every field is optional; absence
/// is a valid terminal state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFields {
    /// Invoice identifier (SCU ID, CU invoice number, or receipt signature).
    pub invoice_number: Option<String>,

    /// Gross invoice amount in KES.
    pub invoice_amount: Option<Decimal>,

    /// Invoice creation date.
    pub invoice_date: Option<NaiveDate>,

    /// Payment due date.
    pub due_date: Option<NaiveDate>,

    /// Supplier's KRA PIN (11-character tax identifier).
    pub supplier_kra_pin: Option<String>,

    /// Buyer's KRA PIN.
    pub buyer_kra_pin: Option<String>,

    /// Buyer details (name only).
    pub buyer_details: PartyDetails,

    /// Seller details (name only).
    pub seller_details: PartyDetails,
}

/// Name-only party record extracted from invoice text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyDetails {
    /// Party name as printed on the invoice.
    pub name: Option<String>,
}

/// Per-field reliability scores in [0, 1].
///
/// A struct rather than a map so every field is populated once extraction
/// runs; absent fields score 0.0. These are format heuristics for human
/// review, decoupled from the recognition engine's own confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScores {
    pub invoice_number: f32,
    pub invoice_amount: f32,
    pub invoice_date: f32,
    pub due_date: f32,
    pub supplier_kra_pin: f32,
    pub buyer_kra_pin: f32,
}

/// Result of parsing invoice fields out of recognized text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted field values.
    #[serde(flatten)]
    pub fields: InvoiceFields,

    /// Per-field confidence scores.
    pub confidence_scores: ConfidenceScores,

    /// True iff both invoice_number and invoice_amount were extracted.
    /// All other fields are best-effort.
    pub extraction_success: bool,

    /// Errors and warnings accumulated during extraction, in order.
    pub extraction_errors: Vec<String>,
}

/// Result of document-level text recognition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextExtraction {
    /// True iff at least one page yielded text.
    pub success: bool,

    /// Recognized text, pages joined with a blank line in page order.
    pub text: String,

    /// Mean confidence over pages that succeeded (0.0 when none did).
    pub confidence: f32,

    /// Number of source pages processed.
    pub pages: usize,

    /// Per-page and document-level errors, in order.
    pub errors: Vec<String>,
}

/// Invoice fields as supplied by the user in the "create with OCR assist"
/// flow. Field names follow the persisted record, not the OCR output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInvoiceFields {
    pub invoice_number: Option<String>,
    pub invoice_amount: Option<Decimal>,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub supplier_kra_pin: Option<String>,
    pub buyer_kra_pin: Option<String>,
    pub buyer_name: Option<String>,
    pub supplier_name: Option<String>,
}
