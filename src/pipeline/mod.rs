//! Document pipeline
//!
//! Drives one document through rasterize → detect → overlay, page by page,
//! and saves the result once at the end.
//!
//! # States
//!
//! ```text
//! Opened ──► Processing(0) ──► … ──► Processing(N-1) ──► Saved
//!                 │  ▲
//!                 ▼  │ transient detection / render failure
//!              Skipped(i)
//!
//! any Processing(i) ── authentication failure ──► Aborted (nothing written)
//! ```
//!
//! Pages are processed strictly in order and one at a time: each detection
//! call is awaited before the next page is rendered.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use searchable_pdf::pipeline::{Pipeline, PipelineOptions};
//!
//! let pipeline = Pipeline::new(Arc::new(detector), PipelineOptions::default());
//! let report = pipeline.convert("scan.pdf".as_ref(), "scan_searchable.pdf".as_ref()).await?;
//! ```

mod progress;
mod report;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::document::PdfDocument;
use crate::error::{ConvertError, Result};
use crate::mupdf::MupdfRasterizer;
use crate::ocr::{DetectError, DetectedWord, OverlayOptions, OverlayWriter, TextDetector};
use crate::raster::{RasterImage, Rasterizer, DEFAULT_RASTER_SCALE};

pub use progress::{NoProgress, ProgressBarObserver, ProgressObserver};
pub use report::{ConversionReport, PageStatus, PageSummary, SkipReason};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Render scale for detection (default: 2.0)
    pub raster_scale: f32,
    /// Extra attempts after a transient detection failure (default: 0)
    pub detection_retries: u32,
    /// Delay before retry `n` is `n * retry_backoff` (default: 500ms)
    pub retry_backoff: Duration,
    /// Keep each page's detected text in the report (default: false)
    pub collect_text: bool,
    /// Text run placement
    pub overlay: OverlayOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            raster_scale: DEFAULT_RASTER_SCALE,
            detection_retries: 0,
            retry_backoff: Duration::from_millis(500),
            collect_text: false,
            overlay: OverlayOptions::default(),
        }
    }
}

/// Converts scanned PDFs into searchable ones
pub struct Pipeline {
    detector: Arc<dyn TextDetector>,
    writer: OverlayWriter,
    options: PipelineOptions,
    observer: Arc<dyn ProgressObserver>,
}

impl Pipeline {
    /// Create a pipeline around a detector
    pub fn new(detector: Arc<dyn TextDetector>, options: PipelineOptions) -> Self {
        Self {
            detector,
            writer: OverlayWriter::new(options.overlay),
            options,
            observer: Arc::new(NoProgress),
        }
    }

    /// Report page events to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Convert `input` and write the searchable document to `output`.
    ///
    /// Nothing is written unless every page was either overlaid or skipped.
    pub async fn convert(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        let mut document = PdfDocument::open(input).map_err(|cause| ConvertError::DocumentOpen {
            path: input.to_path_buf(),
            cause,
        })?;

        tracing::info!(
            provider = ?self.detector.provider_type(),
            "Opened {} ({} pages)",
            input.display(),
            document.page_count()
        );

        let result = if document.page_count() == 0 {
            self.observer.on_start(0);
            Ok(ConversionReport::default())
        } else {
            match MupdfRasterizer::from_shared(document.source_bytes()) {
                Ok(rasterizer) => self.process(&mut document, &rasterizer).await,
                Err(cause) => Err(ConvertError::DocumentOpen {
                    path: input.to_path_buf(),
                    cause,
                }),
            }
        };

        let mut report = match result {
            Ok(report) => report,
            Err(err) => {
                self.observer.on_abort(&err);
                return Err(err);
            }
        };

        if let Err(cause) = document.save(output) {
            let err = ConvertError::Persistence {
                path: output.to_path_buf(),
                cause,
            };
            self.observer.on_abort(&err);
            return Err(err);
        }

        report.output = Some(output.to_path_buf());
        tracing::info!(
            "Saved {} ({} words on {} pages, {} skipped)",
            output.display(),
            report.words_injected(),
            report.page_count(),
            report.skipped().count()
        );
        self.observer.on_finish(&report);

        Ok(report)
    }

    /// Run detection and overlay over every page of an open document.
    ///
    /// Mutates `document` in place and does not save it. Returns
    /// [`ConvertError::Authentication`] as soon as the detector rejects the
    /// credentials; pages after that one are never rendered.
    pub async fn process(
        &self,
        document: &mut PdfDocument,
        rasterizer: &dyn Rasterizer,
    ) -> Result<ConversionReport> {
        let total = document.page_count();
        if rasterizer.page_count() != total {
            tracing::warn!(
                "Renderer sees {} pages, document has {}",
                rasterizer.page_count(),
                total
            );
        }

        self.observer.on_start(total);
        let mut report = ConversionReport {
            output: None,
            pages: Vec::with_capacity(total),
        };

        for index in 0..total {
            self.observer.on_page_start(index);
            tracing::debug!("Processing page {}/{}", index + 1, total);

            let summary = self.process_page(document, rasterizer, index).await?;

            self.observer.on_page_done(&summary);
            report.pages.push(summary);
        }

        Ok(report)
    }

    async fn process_page(
        &self,
        document: &mut PdfDocument,
        rasterizer: &dyn Rasterizer,
        index: usize,
    ) -> Result<PageSummary> {
        let image = match rasterizer.rasterize(index, self.options.raster_scale) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!("Failed to render page {}: {}. Skipping", index + 1, e);
                return Ok(PageSummary::skipped(index, SkipReason::Raster(e.to_string())));
            }
        };

        let words = match self.detect(index, &image).await {
            Ok(words) => words,
            Err(DetectError::Authentication { cause }) => {
                tracing::error!("Detector rejected credentials on page {}: {}", index + 1, cause);
                return Err(ConvertError::Authentication { cause });
            }
            Err(DetectError::Transient { cause }) => {
                let failure = ConvertError::DetectionFailed {
                    page_index: index,
                    cause: cause.clone(),
                };
                tracing::warn!("{}. Skipping", failure);
                return Ok(PageSummary::skipped(index, SkipReason::Detection(cause)));
            }
        };

        let written = self
            .writer
            .write(document, index, &words, image.size())
            .map_err(|cause| ConvertError::Overlay {
                page_index: index,
                cause,
            })?;
        tracing::debug!("Page {}: {} words detected, {} written", index + 1, words.len(), written);

        let mut summary = PageSummary::overlaid(index, written);
        if self.options.collect_text {
            summary.text = Some(join_words(&words));
        }
        Ok(summary)
    }

    /// One detection call, plus up to `detection_retries` more on transient failure
    async fn detect(
        &self,
        index: usize,
        image: &RasterImage,
    ) -> std::result::Result<Vec<DetectedWord>, DetectError> {
        let mut attempt = 0;
        loop {
            match self.detector.detect(image).await {
                Err(e) if !e.is_fatal() && attempt < self.options.detection_retries => {
                    attempt += 1;
                    tracing::info!(
                        "Detection on page {} failed ({}), retry {}/{}",
                        index + 1,
                        e,
                        attempt,
                        self.options.detection_retries
                    );
                    tokio::time::sleep(self.options.retry_backoff * attempt).await;
                }
                result => return result,
            }
        }
    }
}

fn join_words(words: &[DetectedWord]) -> String {
    words
        .iter()
        .map(|w| w.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
