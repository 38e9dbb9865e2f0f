//! MuPDF page rasterizer
//!
//! Renders pages to PNG for the text detector.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, RgbImage};
use mupdf::{Colorspace, Matrix};

use super::SafeDocument;
use crate::document::{DocumentError, DocumentResult};
use crate::raster::{RasterImage, Rasterizer};

/// Upper bound on the render scale; a 2x letter page is ~1224x1584 pixels
const MAX_SCALE: f32 = 4.0;

/// Rasterizer backed by MuPDF
pub struct MupdfRasterizer {
    doc: SafeDocument,
}

impl MupdfRasterizer {
    /// Create a rasterizer over PDF bytes
    pub fn from_shared(data: Arc<Vec<u8>>) -> DocumentResult<Self> {
        Ok(Self {
            doc: SafeDocument::from_shared(data)?,
        })
    }
}

impl Rasterizer for MupdfRasterizer {
    fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    fn rasterize(&self, page_index: usize, scale: f32) -> DocumentResult<RasterImage> {
        if page_index >= self.doc.page_count() {
            return Err(DocumentError::PageNotFound(page_index));
        }
        let scale = scale.clamp(0.1, MAX_SCALE);

        self.doc.with_doc(|mupdf_doc| {
            let page = mupdf_doc.load_page(page_index as i32)?;

            let matrix = Matrix::new_scale(scale, scale);
            let colorspace = Colorspace::device_rgb();
            let pixmap = page.to_pixmap(&matrix, &colorspace, false, true)?;

            let (data, width, height) = encode_pixmap(&pixmap)?;
            tracing::trace!(
                "Rendered page {} at {}x to {}x{} ({} bytes)",
                page_index,
                scale,
                width,
                height,
                data.len()
            );

            Ok(RasterImage {
                data,
                width,
                height,
            })
        })
    }
}

fn encode_pixmap(pixmap: &mupdf::Pixmap) -> DocumentResult<(Vec<u8>, u32, u32)> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let img = pack_rgb(samples, width, height, n)
        .ok_or_else(|| DocumentError::ImageError("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| DocumentError::ImageError(e.to_string()))?;

    Ok((output, width, height))
}

/// Repack interleaved samples with `n` components per pixel into RGB.
///
/// Single-component (gray) samples are expanded; missing samples read as black.
fn pack_rgb(samples: &[u8], width: u32, height: u32, n: usize) -> Option<RgbImage> {
    if n == 0 {
        return None;
    }

    let pixels = width as usize * height as usize;
    let mut rgb = Vec::with_capacity(pixels * 3);

    for i in 0..pixels {
        let offset = i * n;
        if n < 3 {
            let v = samples.get(offset).copied().unwrap_or(0);
            rgb.extend_from_slice(&[v, v, v]);
        } else {
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    RgbImage::from_raw(width, height, rgb)
}
