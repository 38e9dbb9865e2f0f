//! OCR Module
//!
//! Word detection on page images and injection of the detected words as an
//! invisible text layer.
//!
//! Backends implement [`TextDetector`]:
//! - AWS Textract (`DetectDocumentText`)
//! - A scripted detector replaying fixed results
//!
//! ## Usage
//!
//! ```rust,ignore
//! use searchable_pdf::ocr::{OverlayWriter, TextDetector, TextractDetector};
//!
//! let detector = TextractDetector::new(&config.aws).await;
//! let words = detector.detect(&image).await?;
//!
//! OverlayWriter::default().write(&mut document, 0, &words, image.size())?;
//! ```

mod injector;
mod provider;
mod textract;
mod types;

pub use injector::{OverlayOptions, OverlayWriter, DEFAULT_BASELINE_OFFSET, DEFAULT_MIN_FONT_SIZE};
pub use provider::{StaticDetector, TextDetector};
pub use textract::{classify, TextractDetector, MAX_DOCUMENT_BYTES};
pub use types::{DetectError, DetectedWord, OcrProvider};
