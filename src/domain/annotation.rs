//! Annotation model for a photo being edited
//!
//! All stored coordinates are in preview space. Sticker and caption
//! positions are centers, never origins.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::geometry::Point;
use crate::config::ShapeColor;
use crate::error::EditorError;

/// Catalog identifier of a sticker image
pub type AssetId = u32;

/// Stable identity of a placed sticker
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StickerId(u64);

impl StickerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One continuous freehand gesture
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    /// Whether the stroke produces a visible line (needs at least one segment)
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// A sticker placed on the canvas
#[derive(Clone, Debug)]
pub struct Sticker {
    pub id: StickerId,
    /// Catalog entry the image came from
    pub asset: AssetId,
    pub image: Arc<RgbaImage>,
    /// Center of the sticker's footprint
    pub center: Point,
}

/// The single caption; it is drawn in the model's active color
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Caption {
    pub text: String,
    pub center: Point,
}

/// Editable annotation state for one session
#[derive(Clone, Debug)]
pub struct AnnotationModel {
    strokes: Vec<Stroke>,
    current: Stroke,
    stickers: Vec<Sticker>,
    caption: Option<Caption>,
    color: ShapeColor,
    /// Where new captions start, normally the preview center
    home: Point,
    next_id: u64,
    point_count: usize,
    max_points: usize,
}

impl Default for AnnotationModel {
    fn default() -> Self {
        Self::new(Point::default(), ShapeColor::default(), usize::MAX)
    }
}

impl AnnotationModel {
    pub fn new(home: Point, color: ShapeColor, max_points: usize) -> Self {
        Self {
            strokes: Vec::new(),
            current: Stroke::default(),
            stickers: Vec::new(),
            caption: None,
            color,
            home,
            next_id: 1,
            point_count: 0,
            max_points,
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The stroke being drawn right now, possibly empty
    pub fn current_stroke(&self) -> &Stroke {
        &self.current
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn sticker(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|sticker| sticker.id == id)
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    pub fn home(&self) -> Point {
        self.home
    }

    /// Points held across committed and live strokes
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn begin_stroke(&mut self) {
        self.point_count -= self.current.len();
        self.current.points.clear();
    }

    /// Append a point to the live stroke.
    ///
    /// Returns false if the per-session point budget is spent.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        if self.point_count >= self.max_points {
            log::debug!(
                "Stroke point budget of {} reached, dropping point",
                self.max_points
            );
            return false;
        }
        self.current.points.push(point);
        self.point_count += 1;
        true
    }

    /// Move the live stroke into the committed list and start a new one.
    ///
    /// Empty strokes are dropped. Returns whether a stroke was stored.
    pub fn commit_stroke(&mut self) -> bool {
        let stroke = std::mem::take(&mut self.current);
        if stroke.is_empty() {
            return false;
        }
        self.strokes.push(stroke);
        true
    }

    pub fn add_sticker(
        &mut self,
        asset: AssetId,
        image: Arc<RgbaImage>,
        center: Point,
    ) -> StickerId {
        let id = StickerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.stickers.push(Sticker {
            id,
            asset,
            image,
            center,
        });
        id
    }

    pub fn move_sticker(&mut self, id: StickerId, center: Point) -> Result<(), EditorError> {
        let sticker = self
            .stickers
            .iter_mut()
            .find(|sticker| sticker.id == id)
            .ok_or(EditorError::StickerNotFound(id))?;
        sticker.center = center;
        Ok(())
    }

    pub fn set_caption_text(&mut self, text: impl Into<String>) {
        let home = self.home;
        self.caption
            .get_or_insert_with(|| Caption {
                text: String::new(),
                center: home,
            })
            .text = text.into();
    }

    pub fn set_caption_position(&mut self, center: Point) {
        self.caption.get_or_insert_with(Caption::default).center = center;
    }

    /// Change the active color. It applies to every stroke and the caption at
    /// render time; strokes do not remember their own color.
    pub fn set_color(&mut self, color: ShapeColor) {
        self.color = color;
    }

    /// Clear strokes, stickers and caption text. The color survives.
    pub fn reset(&mut self) {
        self.strokes.clear();
        self.current.points.clear();
        self.stickers.clear();
        if let Some(caption) = self.caption.as_mut() {
            caption.text.clear();
        }
        self.point_count = 0;
    }
}
