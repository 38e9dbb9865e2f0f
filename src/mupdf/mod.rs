//! Low-level MuPDF wrapper
//!
//! MuPDF renders pages for detection. It only ever sees the original file
//! bytes; edits go through [`crate::document::PdfDocument`].
//!
//! # Thread Safety
//!
//! MuPDF's `fz_context` is **NOT thread-safe**. [`SafeDocument`] opens a
//! fresh document per operation and serializes operations behind a mutex.
//!
//! # Usage
//!
//! ```rust,ignore
//! use searchable_pdf::mupdf::MupdfRasterizer;
//! use searchable_pdf::raster::Rasterizer;
//!
//! let rasterizer = MupdfRasterizer::from_shared(document.source_bytes())?;
//! let image = rasterizer.rasterize(0, 2.0)?;
//! ```

mod raster;
mod safe;

pub use raster::MupdfRasterizer;
pub use safe::SafeDocument;
