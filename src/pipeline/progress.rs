//! Progress observers
//!
//! The pipeline reports page events to an observer and never looks at what
//! the observer does with them.

use indicatif::{ProgressBar, ProgressStyle};

use super::report::{ConversionReport, PageSummary};
use crate::error::ConvertError;

/// Receives page events from a running pipeline
pub trait ProgressObserver: Send + Sync {
    /// The document is open and has `total_pages` pages
    fn on_start(&self, _total_pages: usize) {}

    /// Page `index` is about to be rasterized
    fn on_page_start(&self, _index: usize) {}

    /// Page `index` is finished (overlaid or skipped)
    fn on_page_done(&self, _summary: &PageSummary) {}

    /// The output was saved
    fn on_finish(&self, _report: &ConversionReport) {}

    /// The run stopped without writing output
    fn on_abort(&self, _error: &ConvertError) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Terminal progress bar
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pages {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    /// A bar that draws nothing (`--quiet`, non-interactive output)
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_start(&self, total_pages: usize) {
        self.bar.set_length(total_pages as u64);
    }

    fn on_page_start(&self, index: usize) {
        self.bar.set_message(format!("rendering page {}", index + 1));
    }

    fn on_page_done(&self, summary: &PageSummary) {
        if summary.is_skipped() {
            self.bar
                .println(format!("page {} skipped", summary.index + 1));
        }
        self.bar.inc(1);
    }

    fn on_finish(&self, report: &ConversionReport) {
        self.bar.finish_with_message(format!(
            "done, {} words injected",
            report.words_injected()
        ));
    }

    fn on_abort(&self, _error: &ConvertError) {
        self.bar.abandon_with_message("aborted");
    }
}
