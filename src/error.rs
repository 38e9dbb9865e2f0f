//! Error types for a conversion run

use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;

/// Conversion result type
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Conversion error type
///
/// Variants wrapping a [`DocumentError`] keep it as the error source and leave
/// it out of their own message; print the chain (`{:#}` with anyhow) to see it.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Source missing, unreadable, corrupt, or encrypted
    #[error("Failed to open {}", .path.display())]
    DocumentOpen {
        path: PathBuf,
        #[source]
        cause: DocumentError,
    },

    /// Detection failed for one page; recorded and skipped, never returned by a run
    #[error("Detection failed on page {}: {cause}", .page_index + 1)]
    DetectionFailed { page_index: usize, cause: String },

    /// Credentials rejected by the detection service; the run is aborted
    #[error("Authentication failed: {cause}. Reconfigure the credentials for the selected profile (aws configure --profile <name>) and retry")]
    Authentication { cause: String },

    /// Failed to write the output
    #[error("Failed to write {}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        cause: DocumentError,
    },

    /// Page geometry or content could not be edited
    #[error("Failed to update page {}", .page_index + 1)]
    Overlay {
        page_index: usize,
        #[source]
        cause: DocumentError,
    },
}

impl ConvertError {
    /// Whether the error came from the detection service rejecting credentials
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
