//! Searchable PDF
//!
//! Turns scanned PDFs into searchable ones. Each page is rendered to an
//! image, sent to a text detector, and the detected words are written back
//! as invisible text positioned over the scan. The visible page is left
//! untouched.
//!
//! # Modules
//!
//! - `document`: lopdf-backed reading, text-layer editing and saving
//! - `mupdf`: page rendering via MuPDF
//! - `ocr`: text detectors (AWS Textract) and the overlay writer
//! - `geometry`: normalized box to page coordinate mapping
//! - `pipeline`: page-by-page orchestration and run reports

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod mupdf;
pub mod ocr;
pub mod pipeline;
pub mod raster;

pub use config::Config;
pub use error::{ConvertError, Result};
pub use pipeline::{ConversionReport, Pipeline, PipelineOptions};
