//! Conversion report
//!
//! Per-page outcome of a run. Lets callers tell a fully searchable output
//! from one where some pages were skipped.

use std::path::PathBuf;

use serde::Serialize;

/// Why a page received no text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "cause", rename_all = "lowercase")]
pub enum SkipReason {
    /// The page could not be rendered
    Raster(String),
    /// The detector failed transiently
    Detection(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raster(cause) => write!(f, "render failed: {}", cause),
            Self::Detection(cause) => write!(f, "detection failed: {}", cause),
        }
    }
}

/// Outcome of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PageStatus {
    /// Text runs were written (possibly zero, for a blank page)
    Overlaid { words: usize },
    /// The page was left unmodified
    Skipped { reason: SkipReason },
}

/// Summary of one processed page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// Zero-based page index
    pub index: usize,
    #[serde(flatten)]
    pub status: PageStatus,
    /// Detected words joined by spaces, when text collection is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PageSummary {
    pub fn overlaid(index: usize, words: usize) -> Self {
        Self {
            index,
            status: PageStatus::Overlaid { words },
            text: None,
        }
    }

    pub fn skipped(index: usize, reason: SkipReason) -> Self {
        Self {
            index,
            status: PageStatus::Skipped { reason },
            text: None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, PageStatus::Skipped { .. })
    }

    /// Number of text runs written to the page
    pub fn words(&self) -> usize {
        match self.status {
            PageStatus::Overlaid { words } => words,
            PageStatus::Skipped { .. } => 0,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// Where the document was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// One entry per page, in page order
    pub pages: Vec<PageSummary>,
}

impl ConversionReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total text runs written across all pages
    pub fn words_injected(&self) -> usize {
        self.pages.iter().map(PageSummary::words).sum()
    }

    /// Pages that were left without text
    pub fn skipped(&self) -> impl Iterator<Item = &PageSummary> {
        self.pages.iter().filter(|p| p.is_skipped())
    }

    /// Whether every page went through detection successfully
    pub fn is_complete(&self) -> bool {
        self.skipped().next().is_none()
    }
}
