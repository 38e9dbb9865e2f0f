//! Coordinate mapping
//!
//! Maps word boxes reported in normalized raster-image coordinates onto
//! absolute page coordinates.
//!
//! The raster is rendered from the page at a fixed scale, so its pixel size
//! is the page size times that scale. A normalized box is a fraction of the
//! image, which is the same fraction of the page: the mapping multiplies the
//! box by the page dimensions and never chains through pixel sizes.
//!
//! Pages carrying `/Rotate` are rendered turned, so boxes are first rotated
//! back into the page's own (unrotated) frame with [`NormalizedBox::unrotate`].

use serde::{Deserialize, Serialize};

/// Ratio between a word box's height and the font size used for its text run
pub const DEFAULT_FONT_SCALE: f32 = 0.8;

/// Normalized rectangle (0-1 coordinates, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl NormalizedBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The whole image
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Clamp the box to the unit square.
    ///
    /// Detectors occasionally report boxes that poke slightly outside the
    /// image; clamping keeps every mapped run inside its page.
    pub fn clamped(&self) -> Self {
        let left = clamp_unit(self.left);
        let top = clamp_unit(self.top);
        let right = clamp_unit(self.left + self.width.max(0.0));
        let bottom = clamp_unit(self.top + self.height.max(0.0));
        Self::new(left, top, right - left, bottom - top)
    }

    /// Express a box measured on a page displayed with `rotation` in the
    /// page's unrotated frame.
    pub fn unrotate(&self, rotation: Rotation) -> Self {
        let Self {
            left,
            top,
            width,
            height,
        } = *self;
        match rotation {
            Rotation::None => *self,
            Rotation::Clockwise90 => Self::new(top, 1.0 - left - width, height, width),
            Rotation::Clockwise180 => Self::new(1.0 - left - width, 1.0 - top - height, width, height),
            Rotation::Clockwise270 => Self::new(1.0 - top - height, left, height, width),
        }
    }

    /// Whether every edge lies in [0, 1]
    pub fn is_within_unit(&self) -> bool {
        let edges = [
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        ];
        self.width >= 0.0 && self.height >= 0.0 && edges.iter().all(|v| (0.0..=1.0).contains(v))
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Display rotation of a page (`/Rotate`), clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Normalize a `/Rotate` value. Values that are not multiples of 90 are invalid.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        match degrees.rem_euclid(360) {
            0 => Some(Self::None),
            90 => Some(Self::Clockwise90),
            180 => Some(Self::Clockwise180),
            _ => Some(Self::Clockwise270),
        }
    }

    pub fn degrees(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 90,
            Self::Clockwise180 => 180,
            Self::Clockwise270 => 270,
        }
    }

    /// Whether the displayed page has width and height swapped
    pub fn is_sideways(self) -> bool {
        matches!(self, Self::Clockwise90 | Self::Clockwise270)
    }

    /// `(cos, sin)` of the text direction in PDF user space.
    ///
    /// Text that reads left to right on the displayed page runs
    /// counter-clockwise by the display rotation in user space.
    pub fn direction(self) -> (i64, i64) {
        match self {
            Self::None => (1, 0),
            Self::Clockwise90 => (0, 1),
            Self::Clockwise180 => (-1, 0),
            Self::Clockwise270 => (0, -1),
        }
    }

    /// Inverse of [`Rotation::direction`]
    pub fn from_direction(cos: f32, sin: f32) -> Self {
        if cos.abs() >= sin.abs() {
            if cos >= 0.0 {
                Self::None
            } else {
                Self::Clockwise180
            }
        } else if sin > 0.0 {
            Self::Clockwise90
        } else {
            Self::Clockwise270
        }
    }
}

/// Pixel dimensions of a raster image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of the same raster turned back by `rotation`
    pub fn unrotate(self, rotation: Rotation) -> Self {
        if rotation.is_sideways() {
            Self::new(self.height, self.width)
        } else {
            self
        }
    }
}

/// Page dimensions in PDF points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel size of this page rendered at `scale`
    pub fn scaled(&self, scale: f32) -> ImageSize {
        ImageSize {
            width: (self.width * scale).round().max(0.0) as u32,
            height: (self.height * scale).round().max(0.0) as u32,
        }
    }
}

/// Absolute rectangle in page space (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl PageRect {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Font size for text filling this rectangle's height
    pub fn font_size(&self, font_scale: f32) -> f32 {
        self.height() * font_scale
    }

    /// Font size for text read along `rotation`: the box extent across the
    /// reading direction
    pub fn font_size_along(&self, rotation: Rotation, font_scale: f32) -> f32 {
        if rotation.is_sideways() {
            self.width() * font_scale
        } else {
            self.font_size(font_scale)
        }
    }
}

/// Map a normalized raster box onto the page.
///
/// `image` is only consulted to log a mismatch: a raster whose aspect ratio
/// differs from the page's still maps correctly because both axes are
/// normalized independently.
pub fn map_box(bbox: &NormalizedBox, image: ImageSize, page: PageSize) -> PageRect {
    if image.width > 0 && image.height > 0 && page.width > 0.0 && page.height > 0.0 {
        let sx = image.width as f32 / page.width;
        let sy = image.height as f32 / page.height;
        if (sx - sy).abs() > 0.05 * sx.max(sy) {
            tracing::trace!(
                "Raster {}x{} is not a uniform scale of page {}x{}",
                image.width,
                image.height,
                page.width,
                page.height
            );
        }
    }

    PageRect {
        x0: bbox.left * page.width,
        y0: bbox.top * page.height,
        x1: (bbox.left + bbox.width) * page.width,
        y1: (bbox.top + bbox.height) * page.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_full_box_maps_to_page() {
        let page = PageSize::new(612.0, 792.0);
        let rect = map_box(&NormalizedBox::full(), page.scaled(2.0), page);

        assert_eq!(
            rect,
            PageRect {
                x0: 0.0,
                y0: 0.0,
                x1: 612.0,
                y1: 792.0
            }
        );
    }

    #[test]
    fn test_mapping_is_scale_invariant() {
        let bbox = NormalizedBox::new(0.1, 0.25, 0.3, 0.05);
        let small = PageSize::new(300.0, 400.0);
        let large = PageSize::new(600.0, 800.0);

        let a = map_box(&bbox, small.scaled(2.0), small);
        let b = map_box(&bbox, large.scaled(2.0), large);

        assert!(approx(b.x0, a.x0 * 2.0));
        assert!(approx(b.y0, a.y0 * 2.0));
        assert!(approx(b.x1, a.x1 * 2.0));
        assert!(approx(b.y1, a.y1 * 2.0));
    }

    #[test]
    fn test_non_square_page_has_no_scale_compounding() {
        // A4 landscape rendered at 2x: the raster scale must not leak into page space
        let page = PageSize::new(842.0, 595.0);
        let image = page.scaled(2.0);
        assert_eq!(image, ImageSize::new(1684, 1190));

        let bbox = NormalizedBox::new(0.5, 0.5, 0.25, 0.1);
        let rect = map_box(&bbox, image, page);

        assert!(approx(rect.x0, 421.0));
        assert!(approx(rect.y0, 297.5));
        assert!(approx(rect.x1, 631.5));
        assert!(approx(rect.y1, 357.0));
    }

    #[test]
    fn test_mismatched_raster_still_maps_by_page() {
        let page = PageSize::new(100.0, 200.0);
        let rect = map_box(
            &NormalizedBox::new(0.2, 0.5, 0.2, 0.1),
            ImageSize::new(1000, 1000),
            page,
        );

        assert!(approx(rect.x0, 20.0));
        assert!(approx(rect.y0, 100.0));
        assert!(approx(rect.x1, 40.0));
        assert!(approx(rect.y1, 120.0));
    }

    #[test]
    fn test_font_size_follows_box_height() {
        let rect = PageRect {
            x0: 10.0,
            y0: 100.0,
            x1: 60.0,
            y1: 115.0,
        };
        assert!(approx(rect.font_size(DEFAULT_FONT_SCALE), 12.0));
        assert!(approx(rect.font_size(1.0), 15.0));
    }

    #[test]
    fn test_rotate_values_normalize() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::None));
        assert_eq!(Rotation::from_degrees(90), Some(Rotation::Clockwise90));
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Clockwise270));
        assert_eq!(Rotation::from_degrees(540), Some(Rotation::Clockwise180));
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn test_unrotate_quarter_turn() {
        // Letter page shown with /Rotate 90: the raster is landscape. A word in
        // the displayed top-left corner sits at the unrotated page's bottom-left.
        let page = PageSize::new(612.0, 792.0);
        let shown = NormalizedBox::new(0.0, 0.0, 0.25, 0.1);

        let rect = map_box(&shown.unrotate(Rotation::Clockwise90), page.scaled(2.0), page);

        assert!(approx(rect.x0, 0.0));
        assert!(approx(rect.x1, 61.2));
        assert!(approx(rect.y0, 594.0));
        assert!(approx(rect.y1, 792.0));
        assert!(approx(rect.font_size_along(Rotation::Clockwise90, 1.0), 61.2));
    }

    #[test]
    fn test_unrotate_half_and_three_quarter_turns() {
        let shown = NormalizedBox::new(0.1, 0.2, 0.3, 0.05);

        let half = shown.unrotate(Rotation::Clockwise180);
        assert!(approx(half.left, 0.6));
        assert!(approx(half.top, 0.75));
        assert!(approx(half.width, 0.3));
        assert!(approx(half.height, 0.05));

        let three = shown.unrotate(Rotation::Clockwise270);
        assert!(approx(three.left, 0.75));
        assert!(approx(three.top, 0.1));
        assert!(approx(three.width, 0.05));
        assert!(approx(three.height, 0.3));

        assert_eq!(shown.unrotate(Rotation::None), shown);
    }

    #[test]
    fn test_direction_round_trips() {
        for rotation in [
            Rotation::None,
            Rotation::Clockwise90,
            Rotation::Clockwise180,
            Rotation::Clockwise270,
        ] {
            let (cos, sin) = rotation.direction();
            assert_eq!(Rotation::from_direction(cos as f32, sin as f32), rotation);
        }
    }

    #[test]
    fn test_clamped_box_stays_in_unit_square() {
        let bbox = NormalizedBox::new(-0.02, 0.95, 0.5, 0.1).clamped();
        assert!(bbox.is_within_unit());
        assert!(approx(bbox.left, 0.0));
        assert!(approx(bbox.width, 0.48));
        assert!(approx(bbox.top, 0.95));
        assert!(approx(bbox.height, 0.05));

        let nan = NormalizedBox::new(f32::NAN, 0.0, 0.1, 0.1).clamped();
        assert!(nan.is_within_unit());
    }
}
