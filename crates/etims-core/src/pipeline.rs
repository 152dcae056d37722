//! Extraction pipeline orchestration.
//!
//! The sole entry point the request layer consumes: file in, structured
//! result out. Every failure mode is recovered locally and turned into
//! result fields; nothing propagates as an unhandled fault.

use std::fs;
use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{DecodeError, ValidationError};
use crate::invoice::EtimsParser;
use crate::models::config::ExtractorConfig;
use crate::models::fields::{ExtractionResult, TextExtraction};
use crate::ocr::{ImagePreprocessor, RecognizedDocument, RecognizedPage, TextRecognizer};
use crate::pdf::{self, PageRasterizer};
use crate::validate::{self, FileKind};

/// End-to-end extraction pipeline over pluggable rasterizer and
/// recognizer backends.
///
/// Synchronous and single-threaded per invocation; each call owns its
/// bitmaps exclusively and shares nothing with concurrent calls.
pub struct ExtractionPipeline<R, T> {
    rasterizer: R,
    recognizer: T,
    preprocessor: ImagePreprocessor,
    parser: EtimsParser,
    config: ExtractorConfig,
}

impl<R: PageRasterizer, T: TextRecognizer> ExtractionPipeline<R, T> {
    /// Create a pipeline with default configuration.
    pub fn new(rasterizer: R, recognizer: T) -> Self {
        Self::with_config(rasterizer, recognizer, ExtractorConfig::default())
    }

    /// Create a pipeline with the given configuration.
    pub fn with_config(rasterizer: R, recognizer: T, config: ExtractorConfig) -> Self {
        Self {
            rasterizer,
            recognizer,
            preprocessor: ImagePreprocessor::new()
                .with_contrast_factor(config.ocr.contrast_factor)
                .with_min_dimension(config.ocr.min_dimension),
            parser: EtimsParser::from_config(&config.extraction),
            config,
        }
    }

    /// Validate a file without running any extraction.
    pub fn validate_file(&self, path: &Path) -> Result<FileKind, ValidationError> {
        validate::validate_file(path, &self.config.file)
    }

    /// Recognize text in a validated file.
    ///
    /// Pages are processed independently: a page whose recognition fails
    /// contributes an error entry but never aborts its siblings.
    pub fn extract_text(&self, path: &Path) -> TextExtraction {
        let mut result = TextExtraction::default();

        let kind = match self.validate_file(path) {
            Ok(kind) => kind,
            Err(e) => {
                result.errors.push(e.to_string());
                return result;
            }
        };

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                result.errors.push(format!("Failed to read file: {e}"));
                return result;
            }
        };

        if kind == FileKind::Pdf {
            let info = match pdf::inspect(&data) {
                Ok(info) => info,
                Err(e) => {
                    result.errors.push(e.to_string());
                    return result;
                }
            };

            if self.config.pdf.prefer_embedded_text {
                if let Some(text) =
                    pdf::probe_embedded_text(&data, self.config.pdf.min_embedded_text_len)
                {
                    // Born-digital PDF: the text carries no recognition
                    // uncertainty, so no OCR pass is needed.
                    result.success = true;
                    result.text = text;
                    result.confidence = 1.0;
                    result.pages = info.pages;
                    return result;
                }
            }
        }

        let pages = match self.decode_pages(kind, &data) {
            Ok(pages) => pages,
            Err(e) => {
                result.errors.push(e.to_string());
                return result;
            }
        };
        result.pages = pages.len();

        let document = self.recognize_pages(&pages, &mut result.errors);

        let combined = document.combined_text();
        if combined.trim().is_empty() {
            result.errors.push("No text could be extracted".to_string());
            warn!("OCR completed but no text extracted from {}", path.display());
        } else {
            result.confidence = document.average_confidence();
            result.text = combined;
            result.success = true;
            info!(
                "OCR completed: {} pages, avg confidence {:.2}",
                result.pages, result.confidence
            );
        }

        result
    }

    /// Parse invoice fields out of recognized text.
    pub fn parse_invoice(&self, text: &str) -> ExtractionResult {
        self.parser.parse(text)
    }

    /// Full pipeline: file → recognized text → extracted fields.
    ///
    /// Document-level errors (bad pages, validation failures) are carried
    /// into the final result ahead of any parse errors.
    pub fn extract(&self, path: &Path) -> ExtractionResult {
        let text_result = self.extract_text(path);

        if !text_result.success {
            return ExtractionResult {
                extraction_errors: text_result.errors,
                ..Default::default()
            };
        }

        let mut result = self.parse_invoice(&text_result.text);
        if !text_result.errors.is_empty() {
            let mut errors = text_result.errors;
            errors.append(&mut result.extraction_errors);
            result.extraction_errors = errors;
        }
        result
    }

    fn decode_pages(
        &self,
        kind: FileKind,
        data: &[u8],
    ) -> Result<Vec<DynamicImage>, DecodeError> {
        match kind {
            FileKind::Pdf => {
                let pages = self.rasterizer.rasterize(data, self.config.pdf.render_dpi)?;
                debug!("Rasterized PDF into {} pages", pages.len());
                Ok(pages)
            }
            FileKind::Jpeg | FileKind::Png => image::load_from_memory(data)
                .map(|img| vec![img])
                .map_err(|e| DecodeError::Image(e.to_string())),
        }
    }

    fn recognize_pages(
        &self,
        pages: &[DynamicImage],
        errors: &mut Vec<String>,
    ) -> RecognizedDocument {
        let mut document = RecognizedDocument::default();

        for (index, page) in pages.iter().enumerate() {
            let page_number = index + 1;
            debug!("Processing page {}/{}", page_number, pages.len());

            let processed = DynamicImage::ImageLuma8(self.preprocessor.preprocess(page));

            match self.recognizer.recognize(&processed) {
                Ok(recognized) => document.pages.push(RecognizedPage {
                    page: page_number,
                    text: recognized.text,
                    confidence: recognized.confidence,
                    error: None,
                }),
                Err(e) => {
                    errors.push(format!("Page {page_number}: {e}"));
                    document.pages.push(RecognizedPage {
                        page: page_number,
                        text: String::new(),
                        confidence: 0.0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        document
    }
}

/// Build the production pipeline over pdfium and Tesseract.
#[cfg(feature = "native")]
pub fn native_pipeline(
    config: ExtractorConfig,
) -> crate::error::Result<
    ExtractionPipeline<crate::pdf::PdfiumRasterizer, crate::ocr::TesseractRecognizer>,
> {
    let rasterizer = crate::pdf::PdfiumRasterizer::new().map_err(crate::error::EtimsError::from)?;
    let recognizer = crate::ocr::TesseractRecognizer::new()
        .with_language(config.ocr.language.clone())
        .with_page_seg_mode(config.ocr.page_seg_mode.clone());
    Ok(ExtractionPipeline::with_config(rasterizer, recognizer, config))
}
