//! PDF document model
//!
//! The document being made searchable: page geometry, the invisible text
//! runs injected into pages, and persistence of the edited file.
//!
//! # Usage
//!
//! ```rust,ignore
//! use searchable_pdf::document::{PdfDocument, TextRun};
//!
//! let mut doc = PdfDocument::open("scan.pdf")?;
//! let size = doc.page_size(0)?;
//!
//! doc.append_text_runs(0, &[TextRun::invisible("Invoice", 72.0, 90.0, 11.0)])?;
//! doc.save("scan_searchable.pdf")?;
//! ```

mod encoding;
mod error;
mod pdf;
mod types;

pub use encoding::{decode_text, encode_text, overlay_font_dictionary, REPLACEMENT};
pub use error::{DocumentError, DocumentResult};
pub use pdf::{PdfDocument, OVERLAY_FONT};
pub use types::{PageBox, RenderMode, TextRun};
