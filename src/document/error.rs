//! Document error types
//!
//! Errors raised while loading, rendering, editing, or saving a PDF.

use thiserror::Error;

/// Document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Page index outside the document
    #[error("Page not found: index {0}")]
    PageNotFound(usize),

    /// Failed to parse the PDF object model
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Encrypted documents cannot be edited in place
    #[error("Document is encrypted")]
    Encrypted,

    /// Not a PDF
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Page tree object is malformed (missing box, bad contents)
    #[error("Invalid page structure: {0}")]
    InvalidPage(String),

    /// Failed to render a page
    #[error("Render error: {0}")]
    RenderError(String),

    /// MuPDF context error
    #[error("MuPDF context error: {0}")]
    ContextError(String),

    /// Failed to encode the rendered image
    #[error("Image error: {0}")]
    ImageError(String),

    /// Failed to serialize the edited document
    #[error("Write error: {0}")]
    WriteError(String),

    /// IO error (std::io::Error), kept as the source
    #[error("IO error")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::ContextError(err.to_string())
    }
}

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        DocumentError::ParseError(err.to_string())
    }
}
