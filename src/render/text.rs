//! Caption text rasterisation via imageproc

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, Rect, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::domain::Point;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/SFNS.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Load the caption font, preferring `preferred` and falling back to
/// well-known system fonts
pub fn load_caption_font(preferred: Option<&Path>) -> Option<FontArc> {
    if let Some(path) = preferred {
        match read_font(path) {
            Some(font) => return Some(font),
            None => log::warn!("Could not load caption font {}", path.display()),
        }
    }

    let font = SYSTEM_FONTS
        .iter()
        .find_map(|path| read_font(Path::new(path)));
    if font.is_none() {
        log::warn!("No caption font found; captions will not be rendered");
    }
    font
}

fn read_font(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}

/// Pixel bounds of the inked glyphs, relative to the origin `draw_text_mut`
/// is given. Follows the same caret and kerning walk as imageproc.
fn ink_bounds(font: &FontArc, scale: PxScale, text: &str) -> Option<Rect> {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0;
    let mut last: Option<GlyphId> = None;
    let mut bounds: Option<Rect> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue;
        };
        if let Some(last) = last {
            caret += scaled.kern(id, last);
        }
        last = Some(id);

        let bb = outlined.px_bounds();
        bounds = Some(match bounds {
            None => bb,
            Some(b) => Rect {
                min: point(b.min.x.min(bb.min.x), b.min.y.min(bb.min.y)),
                max: point(b.max.x.max(bb.max.x), b.max.y.max(bb.max.y)),
            },
        });
    }

    bounds
}

/// Draw `text` so its inked bounding box is centered on `center`
pub fn draw_centered_text(
    img: &mut RgbaImage,
    font: &FontArc,
    text: &str,
    center: Point,
    px_size: f32,
    color: [u8; 4],
) {
    let scale = PxScale::from(px_size);
    let Some(bounds) = ink_bounds(font, scale, text) else {
        return;
    };
    let x = (center.x - (bounds.min.x + bounds.max.x) / 2.0).round() as i32;
    let y = (center.y - (bounds.min.y + bounds.max.y) / 2.0).round() as i32;
    draw_text_mut(img, Rgba(color), x, y, scale, font, text);
}
