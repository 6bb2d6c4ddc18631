//! Minimal PresentationML writer.
//!
//! A `.pptx` file is an Office Open XML package: a zip archive of XML parts
//! tied together by relationship parts and a content-types manifest. This
//! module models only what a picture deck with speaker notes needs:
//!
//! ```text
//! SlideDeck ──► slide size (EMU), layouts, core properties
//!    │
//!    └── Slide × N ──► layout index, full-bleed Picture, optional notes text
//!
//! package::write ──► [Content_Types].xml, _rels, docProps, ppt/presentation.xml,
//!                    master + 11 layouts + theme, notes master, slides,
//!                    notes slides, media
//! ```

pub mod deck;
pub mod package;
pub mod parts;
pub mod template;
pub mod xml;

pub use deck::{CoreProperties, LayoutChoice, Picture, Slide, SlideDeck};
pub use template::{LayoutType, SlideLayout, BLANK_LAYOUT_NAME};

use serde::{Deserialize, Serialize};

/// English Metric Units, the DrawingML length unit.
pub type Emu = i64;

pub const EMU_PER_INCH: Emu = 914_400;
pub const EMU_PER_POINT: Emu = 12_700;

/// Smallest slide edge PowerPoint accepts (1 in).
pub const MIN_SLIDE_EMU: Emu = 914_400;
/// Largest slide edge PowerPoint accepts (56 in).
pub const MAX_SLIDE_EMU: Emu = 51_206_400;

/// Convert PDF points (1/72 in) to EMU, rounding to the nearest unit.
pub fn points_to_emu(points: f32) -> Emu {
    (f64::from(points) * EMU_PER_POINT as f64).round() as Emu
}

/// Position and extent of a shape, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl Frame {
    /// A frame covering the whole slide.
    pub fn full(size: SlideSize) -> Self {
        Self {
            x: 0,
            y: 0,
            cx: size.cx,
            cy: size.cy,
        }
    }
}

/// Slide width and height in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub cx: Emu,
    pub cy: Emu,
}

impl Default for SlideSize {
    /// 10 × 7.5 in, the classic 4:3 deck.
    fn default() -> Self {
        Self {
            cx: 9_144_000,
            cy: 6_858_000,
        }
    }
}

impl SlideSize {
    /// Slide size matching a page of `width` × `height` points.
    pub fn from_points(width: f32, height: f32) -> Self {
        Self {
            cx: points_to_emu(width),
            cy: points_to_emu(height),
        }
    }

    pub fn is_within_limits(self) -> bool {
        (MIN_SLIDE_EMU..=MAX_SLIDE_EMU).contains(&self.cx)
            && (MIN_SLIDE_EMU..=MAX_SLIDE_EMU).contains(&self.cy)
    }

    /// Clamp each edge into the accepted range.
    pub fn clamped(self) -> Self {
        Self {
            cx: self.cx.clamp(MIN_SLIDE_EMU, MAX_SLIDE_EMU),
            cy: self.cy.clamp(MIN_SLIDE_EMU, MAX_SLIDE_EMU),
        }
    }

    pub fn width_inches(self) -> f64 {
        self.cx as f64 / EMU_PER_INCH as f64
    }

    pub fn height_inches(self) -> f64 {
        self.cy as f64 / EMU_PER_INCH as f64
    }
}
