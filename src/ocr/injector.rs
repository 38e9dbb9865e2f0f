//! OCR Text Layer Injector
//!
//! Turns detected words into invisible text runs positioned over the words
//! in the scanned image, so the page becomes searchable and selectable
//! without changing how it looks.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use searchable_pdf::ocr::{OverlayOptions, OverlayWriter};
//!
//! let writer = OverlayWriter::new(OverlayOptions::default());
//! let written = writer.write(&mut document, 0, &words, image.size())?;
//! ```

use crate::document::{DocumentResult, PdfDocument, TextRun};
use crate::geometry::{map_box, ImageSize, PageRect, PageSize, Rotation, DEFAULT_FONT_SCALE};

use super::types::DetectedWord;

/// Distance (points) between a word box's bottom edge and the run baseline
pub const DEFAULT_BASELINE_OFFSET: f32 = 2.0;

/// Smallest font size given to a run (points)
pub const DEFAULT_MIN_FONT_SIZE: f32 = 1.0;

/// Configuration for the overlay writer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayOptions {
    /// Font size as a fraction of the word box height (default: 0.8)
    pub font_scale: f32,
    /// Baseline is placed this far above the box bottom (default: 2.0)
    pub baseline_offset: f32,
    /// Floor for the font size, so words whose box collapses when clamped to
    /// the page still get a run (default: 1.0)
    pub min_font_size: f32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            font_scale: DEFAULT_FONT_SCALE,
            baseline_offset: DEFAULT_BASELINE_OFFSET,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
        }
    }
}

/// Writes detected words onto pages as invisible text
#[derive(Debug, Clone, Default)]
pub struct OverlayWriter {
    options: OverlayOptions,
}

impl OverlayWriter {
    pub fn new(options: OverlayOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    /// Map words to text runs for a page of the given size.
    ///
    /// `image` is the raster the words were detected on; when the page is
    /// displayed with `rotation`, that raster is turned and boxes are rotated
    /// back before mapping.
    ///
    /// Every word with visible text yields exactly one run, in detector order.
    /// Words whose text is blank carry nothing to search for and are dropped.
    /// Boxes outside the image are clamped onto the page, and a box that
    /// collapses to nothing still gets a run at `min_font_size`.
    pub fn build_runs(
        &self,
        words: &[DetectedWord],
        image: ImageSize,
        page: PageSize,
        rotation: Rotation,
    ) -> Vec<TextRun> {
        let image = image.unrotate(rotation);

        words
            .iter()
            .filter_map(|word| {
                let text = word.text.trim();
                if text.is_empty() {
                    tracing::trace!("Dropping blank word");
                    return None;
                }

                let bbox = word.bounds.clamped().unrotate(rotation);
                let rect = map_box(&bbox, image, page);
                let font_size = rect
                    .font_size_along(rotation, self.options.font_scale)
                    .max(self.options.min_font_size);
                let (x, y) = self.baseline_origin(&rect, rotation);

                Some(TextRun::invisible(text, x, y, font_size).rotated(rotation))
            })
            .collect()
    }

    /// Start of the baseline: the displayed bottom-left corner of the box,
    /// moved up (as displayed) by the baseline offset
    fn baseline_origin(&self, rect: &PageRect, rotation: Rotation) -> (f32, f32) {
        let offset = self.options.baseline_offset;
        match rotation {
            Rotation::None => (rect.x0, rect.y1 - offset),
            Rotation::Clockwise90 => (rect.x1 - offset, rect.y1),
            Rotation::Clockwise180 => (rect.x1, rect.y0 + offset),
            Rotation::Clockwise270 => (rect.x0 + offset, rect.y0),
        }
    }

    /// Append runs for `words` to a page; returns the number of runs written
    pub fn write(
        &self,
        document: &mut PdfDocument,
        page_index: usize,
        words: &[DetectedWord],
        image: ImageSize,
    ) -> DocumentResult<usize> {
        let page = document.page_size(page_index)?;
        let rotation = document.page_rotation(page_index)?;
        let runs = self.build_runs(words, image, page, rotation);
        document.append_text_runs(page_index, &runs)?;
        Ok(runs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RenderMode;
    use crate::geometry::NormalizedBox;

    fn word(text: &str, left: f32, top: f32, width: f32, height: f32) -> DetectedWord {
        DetectedWord::new(text, NormalizedBox::new(left, top, width, height))
    }

    #[test]
    fn test_runs_anchor_at_box_bottom_minus_offset() {
        let page = PageSize::new(600.0, 800.0);
        let writer = OverlayWriter::default();

        let runs = writer.build_runs(
            &[word("Total", 0.1, 0.5, 0.2, 0.025)],
            page.scaled(2.0),
            page,
            Rotation::None,
        );

        assert_eq!(runs.len(), 1);
        let run = &runs[0];
        assert_eq!(run.text, "Total");
        assert!((run.x - 60.0).abs() < 1e-3);
        // box spans y 400..420, baseline 2pt above the bottom
        assert!((run.y - 418.0).abs() < 1e-3);
        assert!((run.font_size - 16.0).abs() < 1e-3);
        assert_eq!(run.render_mode, RenderMode::Invisible);
    }

    #[test]
    fn test_one_run_per_word_in_detector_order() {
        let page = PageSize::new(612.0, 792.0);
        let words = vec![
            word("b", 0.5, 0.1, 0.1, 0.02),
            word("a", 0.1, 0.1, 0.1, 0.02),
            word("c", 0.1, 0.9, 0.1, 0.02),
        ];

        let runs = OverlayWriter::default().build_runs(
            &words,
            page.scaled(2.0),
            page,
            Rotation::None,
        );
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["b", "a", "c"]);
    }

    #[test]
    fn test_blank_words_dropped_flat_words_kept() {
        let page = PageSize::new(612.0, 792.0);
        let words = vec![
            word("  ", 0.1, 0.1, 0.1, 0.02),
            word("flat", 0.1, 0.1, 0.1, 0.0),
            word("outside", 0.2, 1.3, 0.1, 0.02),
            word("ok", 0.1, 0.1, 0.1, 0.02),
        ];

        let runs = OverlayWriter::default().build_runs(
            &words,
            page.scaled(2.0),
            page,
            Rotation::None,
        );
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["flat", "outside", "ok"]);
        assert!((runs[0].font_size - DEFAULT_MIN_FONT_SIZE).abs() < 1e-3);
        assert!(runs[1].y <= page.height);
    }

    #[test]
    fn test_quarter_turn_page_runs_follow_display() {
        // Letter page with /Rotate 90, rendered as a 1584x1224 landscape raster
        let page = PageSize::new(612.0, 792.0);
        let image = ImageSize::new(1584, 1224);
        let writer = OverlayWriter::default();

        let runs = writer.build_runs(
            &[word("Title", 0.1, 0.2, 0.5, 0.05)],
            image,
            page,
            Rotation::Clockwise90,
        );

        // displayed box maps to x 122.4..153, y 316.8..712.8 on the unrotated page
        let run = &runs[0];
        assert_eq!(run.rotation, Rotation::Clockwise90);
        assert!((run.font_size - 30.6 * 0.8).abs() < 1e-3);
        assert!((run.x - (153.0 - 2.0)).abs() < 1e-3);
        assert!((run.y - 712.8).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_range_boxes_stay_on_page() {
        let page = PageSize::new(612.0, 792.0);
        let runs = OverlayWriter::default().build_runs(
            &[word("edge", 0.95, 0.97, 0.2, 0.05)],
            page.scaled(2.0),
            page,
            Rotation::None,
        );

        let run = &runs[0];
        assert!(run.x >= 0.0 && run.x <= page.width);
        assert!(run.y >= 0.0 && run.y <= page.height);
    }

    #[test]
    fn test_custom_options() {
        let page = PageSize::new(100.0, 100.0);
        let writer = OverlayWriter::new(OverlayOptions {
            font_scale: 1.0,
            baseline_offset: 0.0,
            min_font_size: 0.5,
        });

        let runs = writer.build_runs(
            &[word("x", 0.0, 0.0, 0.5, 0.1)],
            page.scaled(2.0),
            page,
            Rotation::None,
        );
        assert!((runs[0].y - 10.0).abs() < 1e-3);
        assert!((runs[0].font_size - 10.0).abs() < 1e-3);
    }
}
