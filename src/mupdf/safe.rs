//! Thread-safe document wrapper for MuPDF
//!
//! MuPDF documents are not thread-safe. This wrapper:
//!
//! 1. Stores the document bytes
//! 2. Opens a fresh document for each operation
//! 3. Uses `parking_lot::Mutex` to serialize access
//!
//! No `mupdf::Document` outlives the closure it was opened for, so the
//! wrapper itself only holds plain data and is `Send + Sync` without any
//! unsafe impls.

use std::sync::Arc;

use mupdf::Document;
use parking_lot::Mutex;

use crate::document::{DocumentError, DocumentResult};

const PDF_MIME: &str = "application/pdf";

/// Serialized access to a PDF held in memory
pub struct SafeDocument {
    /// Document bytes
    data: Arc<Vec<u8>>,
    /// Cached page count
    page_count: usize,
    /// Mutex for serializing access
    lock: Mutex<()>,
}

impl SafeDocument {
    /// Create a SafeDocument from shared bytes, validating that MuPDF can open them
    pub fn from_shared(data: Arc<Vec<u8>>) -> DocumentResult<Self> {
        if !data.starts_with(b"%PDF") {
            return Err(DocumentError::UnsupportedFormat(
                "missing %PDF header".to_string(),
            ));
        }

        let doc = Document::from_bytes(&data, PDF_MIME)?;
        let page_count = usize::try_from(doc.page_count()?).unwrap_or(0);

        Ok(Self {
            data,
            page_count,
            lock: Mutex::new(()),
        })
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Execute a closure with access to a freshly opened document
    ///
    /// # Example
    ///
    /// ```ignore
    /// let bounds = safe_doc.with_doc(|doc| {
    ///     let page = doc.load_page(0)?;
    ///     Ok(page.bounds()?)
    /// })?;
    /// ```
    pub fn with_doc<F, R>(&self, f: F) -> DocumentResult<R>
    where
        F: FnOnce(&Document) -> DocumentResult<R>,
    {
        let _guard = self.lock.lock();
        let doc = Document::from_bytes(&self.data, PDF_MIME)?;
        f(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = SafeDocument::from_shared(Arc::new(b"GIF89a".to_vec()));
        assert!(matches!(result, Err(DocumentError::UnsupportedFormat(_))));
    }
}
