//! Core document types

use serde::{Deserialize, Serialize};

use crate::geometry::{PageSize, Rotation};

/// PDF text rendering mode (the `Tr` operator)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Fill glyphs (mode 0)
    Visible,
    /// Neither fill nor stroke (mode 3): selectable and searchable, never drawn
    #[default]
    Invisible,
}

impl RenderMode {
    /// Operand for the `Tr` operator
    pub fn operand(self) -> i64 {
        match self {
            Self::Visible => 0,
            Self::Invisible => 3,
        }
    }
}

/// A positioned piece of text injected into a page
///
/// Position is the text baseline origin in page space: points from the
/// top-left corner of the page's visible box, y growing downward. On a page
/// displayed with `/Rotate`, `rotation` turns the run so it reads left to
/// right on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub render_mode: RenderMode,
    #[serde(default)]
    pub rotation: Rotation,
}

impl TextRun {
    /// Create an invisible run
    pub fn invisible(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            render_mode: RenderMode::Invisible,
            rotation: Rotation::None,
        }
    }

    /// Turn the run to follow a page's display rotation
    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Visible page box in PDF user space (CropBox, falling back to MediaBox)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl PageBox {
    /// Build from the four numbers of a PDF rectangle, normalizing corner order
    pub fn from_corners(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self {
            llx: a.min(c),
            lly: b.min(d),
            urx: a.max(c),
            ury: b.max(d),
        }
    }

    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    pub fn size(&self) -> PageSize {
        PageSize::new(self.width(), self.height())
    }

    /// Convert a top-left page-space point into PDF user space
    pub fn to_user_space(&self, x: f32, y: f32) -> (f32, f32) {
        (self.llx + x, self.ury - y)
    }
}
