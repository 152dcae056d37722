//! Tesseract recognition backend via leptess.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use leptess::{LepTess, Variable};
use tracing::debug;

use super::{PageText, Result, TextRecognizer};
use crate::error::OcrError;

/// Text recognizer backed by the Tesseract OCR engine.
///
/// A fresh Tesseract handle is created per call, so `recognize` stays
/// `&self` and the recognizer can be shared across threads.
pub struct TesseractRecognizer {
    language: String,
    page_seg_mode: String,
}

impl TesseractRecognizer {
    /// Create a recognizer with the default language and segmentation mode.
    pub fn new() -> Self {
        Self {
            language: "eng".to_string(),
            page_seg_mode: "6".to_string(),
        }
    }

    /// Set the Tesseract language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the Tesseract page segmentation mode.
    pub fn with_page_seg_mode(mut self, mode: impl Into<String>) -> Self {
        self.page_seg_mode = mode.into();
        self
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<PageText> {
        let mut tess = LepTess::new(None, &self.language)
            .map_err(|e| OcrError::Init(e.to_string()))?;

        tess.set_variable(Variable::TesseditPagesegMode, &self.page_seg_mode)
            .map_err(|e| OcrError::Init(e.to_string()))?;

        // leptess takes encoded image data, not raw pixels.
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::Preprocessing(e.to_string()))?;

        tess.set_image_from_mem(&png)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        tess.set_source_resolution(300);

        let text = tess
            .get_utf8_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        let tsv = tess
            .get_tsv_text(0)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        let confidence = mean_word_confidence(&tsv);

        debug!(
            "Recognized {} chars at confidence {:.2}",
            text.len(),
            confidence
        );

        Ok(PageText {
            text: text.trim().to_string(),
            confidence,
        })
    }
}

/// Mean of the per-word `conf` column of Tesseract's TSV output,
/// normalized to [0, 1].
///
/// Structural rows (page, block, line) carry the -1 sentinel and are
/// excluded; 0.0 when no word has a usable confidence.
fn mean_word_confidence(tsv: &str) -> f32 {
    let confidences: Vec<f32> = tsv
        .lines()
        .filter_map(|line| {
            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() < 12 {
                return None;
            }
            columns[10].parse::<f32>().ok().filter(|c| *c >= 0.0)
        })
        .collect();

    if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f32>() / confidences.len() as f32 / 100.0
    }
}
