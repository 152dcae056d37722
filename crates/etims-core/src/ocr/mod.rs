//! Text recognition: page model and backend seam.

mod preprocessing;

#[cfg(feature = "native")]
mod tesseract;

pub use preprocessing::ImagePreprocessor;

#[cfg(feature = "native")]
pub use tesseract::TesseractRecognizer;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Raw recognition output for one bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    /// Recognized text, possibly empty.
    pub text: String,
    /// Confidence in [0, 1], mean of usable per-word confidences.
    pub confidence: f32,
}

/// Capability trait for the text recognition backend.
///
/// Any OCR library or service can stand behind this seam; tests substitute
/// a fake without touching pipeline logic.
pub trait TextRecognizer {
    /// Recognize text in a single bitmap.
    fn recognize(&self, image: &DynamicImage) -> Result<PageText>;
}

/// Recognition outcome for one source page. Immutable once created and
/// owned exclusively by the pipeline run that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedPage {
    /// 1-based page index.
    pub page: usize,
    /// Recognized text (empty on failure).
    pub text: String,
    /// Confidence in [0, 1] (0.0 on failure).
    pub confidence: f32,
    /// Backend error message, when recognition failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecognizedPage {
    /// Whether this page contributes text to the document.
    pub fn produced_text(&self) -> bool {
        self.error.is_none() && !self.text.trim().is_empty()
    }
}

/// Ordered recognition results for a whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizedDocument {
    /// One entry per source page, in page order.
    pub pages: Vec<RecognizedPage>,
}

impl RecognizedDocument {
    /// Page texts joined with a blank line, preserving page order.
    /// Pages that failed or recognized nothing are skipped.
    pub fn combined_text(&self) -> String {
        self.pages
            .iter()
            .filter(|p| p.produced_text())
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Mean confidence over pages that produced text; 0.0 when none did.
    pub fn average_confidence(&self) -> f32 {
        let contributing: Vec<f32> = self
            .pages
            .iter()
            .filter(|p| p.produced_text())
            .map(|p| p.confidence)
            .collect();

        if contributing.is_empty() {
            0.0
        } else {
            contributing.iter().sum::<f32>() / contributing.len() as f32
        }
    }
}
