//! Preprocessing adapter: turns a raw receipt photo into binarized PNG
//! bytes ready for an OCR backend. The extraction core depends only on
//! this module's output, never on the incoming image format.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Load an image file, binarize it, and return PNG bytes ready for OCR.
pub fn prepare_for_ocr(path: &Path) -> Result<Vec<u8>, PreprocessError> {
    let img = image::open(path)?;
    encode_as_png(binarize_for_ocr(img))
}

/// Process raw image bytes (JPEG / PNG / WEBP / …) into binarized PNG bytes.
pub fn prepare_for_ocr_from_bytes(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    encode_as_png(binarize_for_ocr(img))
}

/// Downscale + grayscale + contrast stretch + mean-threshold binarize.
fn binarize_for_ocr(img: DynamicImage) -> DynamicImage {
    // Phone photos are routinely 4000 px wide; Tesseract peaks well below
    // that, so cap the long edge.
    let img = if img.width() > 2800 || img.height() > 2800 {
        img.resize(2800, 2800, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };

    let gray: GrayImage = img.to_luma8();

    let (min_px, max_px) = gray
        .pixels()
        .fold((255u8, 0u8), |(mn, mx), p| (mn.min(p[0]), mx.max(p[0])));

    if max_px == min_px {
        // Uniform image: nothing to stretch or threshold.
        return DynamicImage::ImageLuma8(gray);
    }

    let range = (max_px - min_px) as u32;
    let stretched: GrayImage = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let p = gray.get_pixel(x, y)[0];
        Luma([((p - min_px) as u32 * 255 / range) as u8])
    });

    DynamicImage::ImageLuma8(threshold_at_mean(&stretched))
}

/// Paper is bright and dense; ink is dark and sparse. The mean luminance
/// splits the two reliably on receipt photos.
fn threshold_at_mean(gray: &GrayImage) -> GrayImage {
    let count = (gray.width() as u64) * (gray.height() as u64);
    let sum: u64 = gray.pixels().map(|p| p[0] as u64).sum();
    let threshold = (sum / count.max(1)) as u8;
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
