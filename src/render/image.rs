//! Flattening annotations onto the captured photo
//!
//! Layers are composited in a fixed order: photo, stickers, caption, then
//! freehand ink on top of everything.

use std::path::Path;

use ab_glyph::FontArc;
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pattern, Pixmap, SpreadMode,
    Stroke as SkStroke, Transform,
};

use super::geometry::{self, sticker_footprint};
use super::text;
use crate::capture::CapturedImage;
use crate::config::ShapeColor;
use crate::domain::{
    AnnotationModel, Caption, PreviewGeometry, ScaleFactors, Size, Sticker, Stroke, to_source,
};
use crate::error::EditorError;

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

/// Build an open polyline through `points` in source space
fn build_polyline_path(stroke: &Stroke, scale: ScaleFactors) -> Option<tiny_skia::Path> {
    if !stroke.is_drawable() {
        return None;
    }
    let mut points = stroke
        .points
        .iter()
        .map(|p| to_source(*p, scale.x, scale.y));
    let first = points.next()?;

    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for point in points {
        pb.line_to(point.x, point.y);
    }
    pb.finish()
}

/// Premultiplied copy of a sticker image
fn sticker_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Draw stickers, stretched to their scaled square footprint.
/// Only the part of a footprint that lands on the canvas is rasterised.
pub fn draw_stickers_on_image(img: &mut RgbaImage, stickers: &[Sticker], scale: ScaleFactors) {
    let sprites: Vec<(Pixmap, geometry::SourceRect)> = stickers
        .iter()
        .filter_map(|sticker| {
            let Some(pixmap) = sticker_pixmap(&sticker.image) else {
                log::warn!("Skipping empty sticker image {}", sticker.id);
                return None;
            };
            Some((pixmap, sticker_footprint(sticker.center, scale)))
        })
        .collect();
    if sprites.is_empty() {
        return;
    }

    with_pixmap(img, |canvas| {
        for (sprite, rect) in &sprites {
            let Some(area) = tiny_skia::Rect::from_xywh(rect.left, rect.top, rect.width, rect.height)
            else {
                continue;
            };
            let stretch = Transform::from_row(
                rect.width / sprite.width() as f32,
                0.0,
                0.0,
                rect.height / sprite.height() as f32,
                rect.left,
                rect.top,
            );
            let mut paint = Paint::default();
            paint.shader = Pattern::new(
                sprite.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bicubic,
                1.0,
                stretch,
            );
            paint.anti_alias = true;
            canvas.fill_rect(area, &paint, Transform::identity(), None);
        }
    });
}

/// Draw the caption centered on its anchor, if it has any text
pub fn draw_caption_on_image(
    img: &mut RgbaImage,
    font: &FontArc,
    caption: &Caption,
    color: ShapeColor,
    scale: ScaleFactors,
    device_scale: f32,
) {
    if caption.text.is_empty() {
        return;
    }
    let center = to_source(caption.center, scale.x, scale.y);
    text::draw_centered_text(
        img,
        font,
        &caption.text,
        center,
        geometry::caption_font_px(device_scale),
        color.to_rgba_u8(),
    );
}

/// Draw freehand strokes as straight-segment polylines
pub fn draw_strokes_on_image<'a>(
    img: &mut RgbaImage,
    strokes: impl IntoIterator<Item = &'a Stroke>,
    color: ShapeColor,
    scale: ScaleFactors,
) {
    let paths: Vec<tiny_skia::Path> = strokes
        .into_iter()
        .filter_map(|stroke| build_polyline_path(stroke, scale))
        .collect();
    if paths.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        let [r, g, b, a] = color.to_rgba_u8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = SkStroke {
            width: geometry::stroke_width(scale),
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            ..Default::default()
        };

        for path in &paths {
            pixmap.stroke_path(path, &paint, &stroke, Transform::identity(), None);
        }
    });
}

/// The compositing engine
#[derive(Clone, Default)]
pub struct Compositor {
    font: Option<FontArc>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl Compositor {
    pub fn new(font: Option<FontArc>) -> Self {
        Self { font }
    }

    /// Build a compositor with the caption font at `font_path` or a system font
    pub fn with_font_path(font_path: Option<&Path>) -> Self {
        Self::new(text::load_caption_font(font_path))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Flatten `model` onto `source` at the photo's native resolution.
    ///
    /// `preview` is the size of the surface the annotations were drawn on.
    /// Neither the model nor the photo is modified.
    pub fn flatten(
        &self,
        source: &CapturedImage,
        model: &AnnotationModel,
        preview: Size,
    ) -> Result<RgbaImage, EditorError> {
        let geometry = PreviewGeometry::new(source.size(), preview)?;
        let scale = geometry.scale_factors();
        log::debug!(
            "Flattening {} strokes, {} stickers onto {}x{} (scale {:.3}x{:.3})",
            model.strokes().len(),
            model.stickers().len(),
            source.width(),
            source.height(),
            scale.x,
            scale.y
        );

        let mut canvas = source.rgba.clone();

        draw_stickers_on_image(&mut canvas, model.stickers(), scale);

        if let Some(caption) = model.caption() {
            match &self.font {
                Some(font) => draw_caption_on_image(
                    &mut canvas,
                    font,
                    caption,
                    model.color(),
                    scale,
                    source.scale_factor,
                ),
                None if !caption.text.is_empty() => {
                    log::warn!("No caption font available, skipping caption");
                }
                None => {}
            }
        }

        let live = model.current_stroke();
        draw_strokes_on_image(
            &mut canvas,
            model.strokes().iter().chain(std::iter::once(live)),
            model.color(),
            scale,
        );

        Ok(canvas)
    }
}
