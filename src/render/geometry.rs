//! Shared geometry for flattening
//!
//! Constants are preview-space sizes; helpers turn them into source-space
//! rectangles and widths for a given set of scale factors.

use crate::domain::{Point, ScaleFactors, to_source, to_source_len};

/// Sticker footprint constants
pub mod sticker {
    /// Edge of the square every sticker occupies in the preview
    pub const SIZE: f32 = 100.0;
    /// Distance from center to edge of the footprint
    pub const HALF_EXTENT: f32 = SIZE / 2.0;
}

/// Freehand stroke constants
pub mod stroke {
    /// Ink width in preview units
    pub const WIDTH: f32 = 4.0;
}

/// Caption constants
pub mod caption {
    /// Caption size in points. Multiplied by the capture's device scale only,
    /// never by the preview-to-source scale.
    pub const FONT_SIZE: f32 = 24.0;
}

/// Axis-aligned rectangle in source space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SourceRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Source-space rectangle of a sticker centered at `center` (preview space).
/// Each axis scales on its own, so stickers stretch with a non-uniform preview.
pub fn sticker_footprint(center: Point, scale: ScaleFactors) -> SourceRect {
    let center = to_source(center, scale.x, scale.y);
    let half_w = to_source_len(sticker::HALF_EXTENT, scale.x);
    let half_h = to_source_len(sticker::HALF_EXTENT, scale.y);
    SourceRect {
        left: center.x - half_w,
        top: center.y - half_h,
        width: half_w * 2.0,
        height: half_h * 2.0,
    }
}

/// Stroke width in source pixels, using the mean of both axis scales
#[inline]
pub fn stroke_width(scale: ScaleFactors) -> f32 {
    stroke::WIDTH * scale.average()
}

/// Caption font size in source pixels
#[inline]
pub fn caption_font_px(device_scale: f32) -> f32 {
    caption::FONT_SIZE * device_scale
}
