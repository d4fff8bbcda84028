//! Preview and source coordinate spaces
//!
//! Points captured while editing live in preview space: the photo scaled to
//! fit the display width. Flattening happens in source space, the pixel grid
//! of the captured photo. Which space a `Point` belongs to is tracked by
//! context only.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// A 2D coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair, never negative
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a size, clamping negative dimensions to zero
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// True when either dimension cannot be divided by
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.height / self.width
    }

    fn check(self) -> Result<Self, EditorError> {
        if self.is_degenerate() {
            return Err(EditorError::DegenerateGeometry {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Per-axis multipliers from preview space to source space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f32,
    pub y: f32,
}

impl ScaleFactors {
    /// Mean of both axes, used for lengths that have no direction
    pub fn average(self) -> f32 {
        (self.x + self.y) / 2.0
    }
}

/// Relationship between the displayed preview and the captured photo
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewGeometry {
    source: Size,
    preview: Size,
}

impl PreviewGeometry {
    /// Pair a source size with an arbitrary preview size.
    ///
    /// Fails with `DegenerateGeometry` if either size has a zero dimension.
    pub fn new(source: Size, preview: Size) -> Result<Self, EditorError> {
        Ok(Self {
            source: source.check()?,
            preview: preview.check()?,
        })
    }

    /// Scale `source` to `display_width`, keeping its aspect ratio
    pub fn fit_to_width(source: Size, display_width: f32) -> Result<Self, EditorError> {
        let source = source.check()?;
        let preview = Size::new(display_width, display_width * source.height / source.width);
        Self::new(source, preview)
    }

    pub fn source_size(&self) -> Size {
        self.source
    }

    pub fn preview_size(&self) -> Size {
        self.preview
    }

    /// Multipliers for each axis. They match for aspect-fit previews but
    /// callers must treat them independently.
    pub fn scale_factors(&self) -> ScaleFactors {
        ScaleFactors {
            x: self.source.width / self.preview.width,
            y: self.source.height / self.preview.height,
        }
    }

    /// Map a source-space point back onto the preview
    pub fn to_preview(&self, point: Point) -> Point {
        let scale = self.scale_factors();
        Point::new(point.x / scale.x, point.y / scale.y)
    }

    /// Map a preview-space point into source space
    pub fn point_to_source(&self, point: Point) -> Point {
        let scale = self.scale_factors();
        to_source(point, scale.x, scale.y)
    }
}

/// Elementwise multiply of a preview point into source space
#[inline]
pub fn to_source(point: Point, x_scale: f32, y_scale: f32) -> Point {
    Point::new(point.x * x_scale, point.y * y_scale)
}

/// Scale a preview-space length along one axis
#[inline]
pub fn to_source_len(length: f32, scale: f32) -> f32 {
    length * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_fit_to_width_preserves_aspect_ratio() {
        let sizes = [
            Size::new(4032.0, 3024.0),
            Size::new(3024.0, 4032.0),
            Size::new(2000.0, 1000.0),
            Size::new(17.0, 3.0),
        ];
        for source in sizes {
            for display_width in [320.0, 390.0, 1024.0] {
                let geometry = PreviewGeometry::fit_to_width(source, display_width).unwrap();
                let preview = geometry.preview_size();
                assert_eq!(preview.width, display_width);
                assert!(approx(preview.aspect_ratio(), source.aspect_ratio()));
            }
        }
    }

    #[test]
    fn test_scale_factors() {
        let geometry =
            PreviewGeometry::fit_to_width(Size::new(2000.0, 1000.0), 1000.0).unwrap();
        assert_eq!(geometry.preview_size(), Size::new(1000.0, 500.0));
        assert_eq!(geometry.scale_factors(), ScaleFactors { x: 2.0, y: 2.0 });
    }

    #[test]
    fn test_non_uniform_scale_factors() {
        let geometry =
            PreviewGeometry::new(Size::new(1200.0, 600.0), Size::new(400.0, 300.0)).unwrap();
        let scale = geometry.scale_factors();
        assert_eq!(scale, ScaleFactors { x: 3.0, y: 2.0 });
        assert_eq!(scale.average(), 2.5);
        assert_eq!(
            geometry.point_to_source(Point::new(10.0, 10.0)),
            Point::new(30.0, 20.0)
        );
    }

    #[test]
    fn test_round_trip() {
        let geometry =
            PreviewGeometry::fit_to_width(Size::new(4032.0, 3024.0), 390.0).unwrap();
        let scale = geometry.scale_factors();
        for point in [
            Point::new(0.0, 0.0),
            Point::new(123.5, 77.25),
            Point::new(4032.0, 3024.0),
            Point::new(-12.0, 5000.0),
        ] {
            let back = to_source(geometry.to_preview(point), scale.x, scale.y);
            assert!(approx(back.x, point.x), "{back:?} vs {point:?}");
            assert!(approx(back.y, point.y), "{back:?} vs {point:?}");
        }
    }

    #[test]
    fn test_to_source_len() {
        assert_eq!(to_source_len(50.0, 2.5), 125.0);
    }

    #[test]
    fn test_zero_preview_is_degenerate() {
        let result = PreviewGeometry::new(Size::new(100.0, 100.0), Size::new(0.0, 50.0));
        assert!(matches!(
            result,
            Err(EditorError::DegenerateGeometry { width, .. }) if width == 0.0
        ));

        let result = PreviewGeometry::fit_to_width(Size::new(100.0, 100.0), 0.0);
        assert!(matches!(result, Err(EditorError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_zero_source_is_degenerate() {
        let result = PreviewGeometry::fit_to_width(Size::new(0.0, 0.0), 390.0);
        assert!(matches!(result, Err(EditorError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_negative_size_clamps_to_zero() {
        let size = Size::new(-4.0, 10.0);
        assert_eq!(size.width, 0.0);
        assert!(size.is_degenerate());
    }
}
