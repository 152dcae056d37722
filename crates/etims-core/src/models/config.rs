//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the etims pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Upload/file validation configuration.
    pub file: FileConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR backend configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Upload validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Accepted file extensions (lowercase, no dot).
    pub supported_formats: Vec<String>,

    /// Maximum file size in bytes.
    pub max_file_size: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec![
                "pdf".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
            ],
            max_file_size: 10 * 1024 * 1024,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// DPI for rasterizing PDF pages. 300 keeps small print legible.
    pub render_dpi: u32,

    /// Use embedded PDF text instead of OCR when enough is present.
    pub prefer_embedded_text: bool,

    /// Minimum embedded text length to skip the OCR pass.
    pub min_embedded_text_len: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            render_dpi: 300,
            prefer_embedded_text: true,
            min_embedded_text_len: 50,
        }
    }
}

/// OCR backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code.
    pub language: String,

    /// Tesseract page segmentation mode.
    pub page_seg_mode: String,

    /// Contrast boost factor applied during preprocessing.
    pub contrast_factor: f32,

    /// Minimum dimension in pixels; smaller pages are upscaled to this.
    pub min_dimension: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_seg_mode: "6".to_string(),
            contrast_factor: 2.0,
            min_dimension: 1000,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum trimmed text length before pattern matching is attempted.
    pub min_text_len: usize,

    /// Apply the O/0 correction pass to extracted KRA PINs.
    pub correct_pin_ocr_errors: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_len: 10,
            correct_pin_ocr_errors: true,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.file.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.pdf.render_dpi, 300);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.min_dimension, 1000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ExtractorConfig =
            serde_json::from_str(r#"{"ocr": {"language": "swa"}}"#).unwrap();
        assert_eq!(config.ocr.language, "swa");
        assert_eq!(config.ocr.page_seg_mode, "6");
        assert_eq!(config.file.supported_formats.len(), 4);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = ExtractorConfig::default();
        config.save(&path).unwrap();

        let loaded = ExtractorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.pdf.render_dpi, config.pdf.render_dpi);
    }
}
