//! PDF rasterization via pdfium.

use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

use super::{PageRasterizer, Result};
use crate::error::DecodeError;

/// Rasterizes PDF pages through the pdfium library.
///
/// Binds to a bundled pdfium build next to the executable when present,
/// otherwise to the system library.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind to the pdfium library.
    pub fn new() -> Result<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| DecodeError::Pdf(format!("failed to bind pdfium: {e}")))?,
        );
        Ok(Self { pdfium })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, data: &[u8], dpi: u32) -> Result<Vec<DynamicImage>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| DecodeError::Pdf(e.to_string()))?;

        let page_count = document.pages().len();
        debug!("Rasterizing {} pages at {} dpi", page_count, dpi);

        // PDF points are 72 per inch.
        let scale = dpi as f32 / 72.0;

        let mut pages = Vec::with_capacity(page_count as usize);
        for page in document.pages().iter() {
            let pixel_width = (page.width().value * scale) as i32;
            let pixel_height = (page.height().value * scale) as i32;

            let bitmap = page
                .render_with_config(
                    &PdfRenderConfig::new()
                        .set_target_width(pixel_width)
                        .set_target_height(pixel_height)
                        .render_form_data(true)
                        .render_annotations(true),
                )
                .map_err(|e| DecodeError::Pdf(e.to_string()))?;

            pages.push(bitmap.as_image());
        }

        if pages.is_empty() {
            return Err(DecodeError::NoPages);
        }

        Ok(pages)
    }
}
