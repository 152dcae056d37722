//! Image preprocessing for OCR.
//!
//! The chain is deterministic and side-effect-free: grayscale, contrast
//! boost, sharpen, then an upscale pass for small scans. Applied to every
//! bitmap before it reaches the recognition backend.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use tracing::debug;

/// Preprocessor applied to each page bitmap before recognition.
pub struct ImagePreprocessor {
    /// Multiplicative contrast factor, anchored at the image mean.
    contrast_factor: f32,
    /// Pages whose smaller dimension is below this are upscaled to it.
    min_dimension: u32,
}

impl ImagePreprocessor {
    /// Create a preprocessor with the default settings.
    pub fn new() -> Self {
        Self {
            contrast_factor: 2.0,
            min_dimension: 1000,
        }
    }

    /// Set the contrast boost factor.
    pub fn with_contrast_factor(mut self, factor: f32) -> Self {
        self.contrast_factor = factor;
        self
    }

    /// Set the minimum dimension threshold for upscaling.
    pub fn with_min_dimension(mut self, dimension: u32) -> Self {
        self.min_dimension = dimension;
        self
    }

    /// Run the full preprocessing chain on one page bitmap.
    pub fn preprocess(&self, image: &DynamicImage) -> GrayImage {
        let gray = image.to_luma8();
        let boosted = self.boost_contrast(&gray);
        let sharpened = sharpen(&boosted);
        self.upscale_if_small(sharpened)
    }

    /// Stretch pixel values away from the image mean by the configured
    /// factor, clamping to the valid range.
    fn boost_contrast(&self, image: &GrayImage) -> GrayImage {
        let total: u64 = image.pixels().map(|p| p.0[0] as u64).sum();
        let count = (image.width() as u64 * image.height() as u64).max(1);
        let mean = (total / count) as f32;

        let mut out = image.clone();
        for pixel in out.pixels_mut() {
            let value = mean + self.contrast_factor * (pixel.0[0] as f32 - mean);
            pixel.0[0] = value.clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Upscale isotropically so the smaller dimension reaches the
    /// configured floor. Small scans recognize poorly at native size.
    fn upscale_if_small(&self, image: GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let smaller = width.min(height);

        if smaller >= self.min_dimension || smaller == 0 {
            return image;
        }

        let scale = self.min_dimension as f32 / smaller as f32;
        let new_width = (width as f32 * scale) as u32;
        let new_height = (height as f32 * scale) as u32;

        debug!(
            "Upscaling {}x{} -> {}x{} for OCR",
            width, height, new_width, new_height
        );

        imageops::resize(&image, new_width, new_height, FilterType::Lanczos3)
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// 3x3 sharpening convolution.
fn sharpen(image: &GrayImage) -> GrayImage {
    #[rustfmt::skip]
    const KERNEL: [f32; 9] = [
        -0.125, -0.125, -0.125,
        -0.125,  2.0,   -0.125,
        -0.125, -0.125, -0.125,
    ];
    imageops::filter3x3(image, &KERNEL)
}
