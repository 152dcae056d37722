//! PDF normalization: page counting, embedded-text probing, rasterization.

use lopdf::Document;
use tracing::debug;

use crate::error::DecodeError;

#[cfg(feature = "native")]
mod rasterizer;

#[cfg(feature = "native")]
pub use rasterizer::PdfiumRasterizer;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Capability trait for turning PDF bytes into bitmap pages.
///
/// Implementations render each page at the requested DPI, in page order.
/// Any concrete rasterizer can be substituted or faked in tests without
/// touching pipeline logic.
pub trait PageRasterizer {
    /// Rasterize every page of the PDF to a bitmap.
    fn rasterize(&self, data: &[u8], dpi: u32) -> Result<Vec<image::DynamicImage>>;
}

/// Structural facts about a PDF, read before any rendering happens.
#[derive(Debug, Clone, Copy)]
pub struct PdfInfo {
    /// Number of pages.
    pub pages: usize,
}

/// Parse the PDF structure and reject documents that cannot be processed.
pub fn inspect(data: &[u8]) -> Result<PdfInfo> {
    let doc = Document::load_mem(data).map_err(|e| DecodeError::Pdf(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(DecodeError::Encrypted);
    }

    let pages = doc.get_pages().len();
    if pages == 0 {
        return Err(DecodeError::NoPages);
    }

    debug!("PDF has {} pages", pages);
    Ok(PdfInfo { pages })
}

/// Extract embedded text from a born-digital PDF.
///
/// Returns `None` when the document carries less than `min_len` characters
/// of text, which is the scanned-document case that needs OCR instead.
pub fn probe_embedded_text(data: &[u8], min_len: usize) -> Option<String> {
    match pdf_extract::extract_text_from_mem(data) {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.len() >= min_len {
                debug!("Using {} chars of embedded PDF text", trimmed.len());
                Some(trimmed.to_string())
            } else {
                debug!(
                    "Embedded text too short ({} chars), falling back to OCR",
                    trimmed.len()
                );
                None
            }
        }
        Err(e) => {
            debug!("Embedded text probe failed: {}", e);
            None
        }
    }
}
