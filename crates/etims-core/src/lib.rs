//! Core library for eTIMS invoice OCR processing.
//!
//! This crate provides:
//! - Upload validation (format, size, magic bytes)
//! - PDF/image normalization into OCR-ready pages
//! - Text recognition behind a swappable backend trait
//! - eTIMS invoice field extraction (invoice number, amounts, dates, KRA PINs)
//! - Format-heuristic confidence scoring for human review

pub mod error;
pub mod invoice;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod validate;

pub use error::{EtimsError, Result};
pub use invoice::{apply_ocr_assist, score_fields, EtimsParser, Field};
pub use models::config::ExtractorConfig;
pub use models::fields::{
    ConfidenceScores, ExtractionResult, InvoiceFields, PartyDetails, TextExtraction,
    UserInvoiceFields,
};
pub use ocr::{PageText, RecognizedDocument, RecognizedPage, TextRecognizer};
pub use pdf::PageRasterizer;
pub use pipeline::ExtractionPipeline;

#[cfg(feature = "native")]
pub use ocr::TesseractRecognizer;
#[cfg(feature = "native")]
pub use pdf::PdfiumRasterizer;
#[cfg(feature = "native")]
pub use pipeline::native_pipeline;
