//! CLI subcommands.

pub mod batch;
pub mod process;
pub mod text;

use std::path::Path;

use etims_core::{
    native_pipeline, ExtractionPipeline, ExtractorConfig, PdfiumRasterizer, TesseractRecognizer,
};

/// Load the extractor configuration, falling back to defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<ExtractorConfig> {
    match config_path {
        Some(path) => Ok(ExtractorConfig::from_file(Path::new(path))?),
        None => Ok(ExtractorConfig::default()),
    }
}

/// Build the production pipeline over pdfium and Tesseract.
pub(crate) fn build_pipeline(
    config: ExtractorConfig,
) -> anyhow::Result<ExtractionPipeline<PdfiumRasterizer, TesseractRecognizer>> {
    native_pipeline(config).map_err(Into::into)
}
