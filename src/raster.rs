//! Page rasterization
//!
//! A raster is a transient PNG rendering of one page, produced only to be
//! handed to the text detector.

use crate::document::DocumentResult;
use crate::geometry::ImageSize;

/// Scale applied to both axes when rendering pages for detection
pub const DEFAULT_RASTER_SCALE: f32 = 2.0;

/// An encoded page image
#[derive(Debug, Clone)]
pub struct RasterImage {
    /// PNG bytes
    pub data: Vec<u8>,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
}

impl RasterImage {
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}

/// Renders pages of a document to images
pub trait Rasterizer: Send + Sync {
    /// Number of pages the rasterizer can render
    fn page_count(&self) -> usize;

    /// Render one page at `scale`
    fn rasterize(&self, page_index: usize, scale: f32) -> DocumentResult<RasterImage>;
}
