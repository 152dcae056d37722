//! Error types for the etims-core library.

use thiserror::Error;

/// Main error type for the etims library.
#[derive(Error, Debug)]
pub enum EtimsError {
    /// Upload/input validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// PDF or image decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Invoice field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors detected before any OCR work starts.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The file does not exist on disk.
    #[error("File does not exist")]
    Missing,

    /// The file extension is not in the supported set.
    #[error("Unsupported format '.{extension}'. Supported formats: {supported}")]
    UnsupportedFormat { extension: String, supported: String },

    /// The declared MIME type does not match the extension.
    #[error("File MIME type '{mime}' does not match extension '.{extension}'")]
    MimeMismatch { mime: String, extension: String },

    /// The file exceeds the configured size limit.
    #[error("File size ({actual_mb:.2} MB) exceeds maximum allowed size ({max_mb:.1} MB)")]
    TooLarge { actual_mb: f64, max_mb: f64 },

    /// The file has no content.
    #[error("File is empty")]
    Empty,

    /// Leading bytes do not match the declared kind's magic signature.
    #[error("File does not appear to be a valid {kind}")]
    BadMagic { kind: &'static str },
}

/// Errors raised while turning a file into bitmap pages.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Failed to parse/rasterize the PDF.
    #[error("failed to decode PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to load an image file.
    #[error("failed to load image: {0}")]
    Image(String),
}

/// Errors raised by the text recognition backend.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR backend failed to initialize.
    #[error("failed to initialize OCR backend: {0}")]
    Init(String),

    /// Text recognition failed on a page.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),
}

/// Errors related to invoice field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Input text is unusable for pattern matching.
    #[error("OCR text is empty or too short")]
    TextTooShort,

    /// Failed to parse an extracted value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Result type for the etims library.
pub type Result<T> = std::result::Result<T, EtimsError>;
