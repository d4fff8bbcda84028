//! Annotation message handlers
//!
//! Handles EditMsg for strokes, stickers and the caption.

use crate::assets::StickerCatalog;
use crate::domain::{AssetId, Point};
use crate::error::EditorError;
use crate::session::messages::EditMsg;
use crate::session::state::EditSession;

/// Apply one edit to the session.
///
/// A missing sticker asset is returned as `AssetNotFound` with the model
/// untouched. A move aimed at a sticker that no longer exists is logged and
/// ignored.
pub fn handle_edit_msg<C: StickerCatalog + ?Sized>(
    session: &mut EditSession,
    catalog: &C,
    msg: EditMsg,
) -> Result<(), EditorError> {
    match msg {
        EditMsg::BeginStroke => session.model.begin_stroke(),
        EditMsg::ExtendStroke(point) => {
            session.model.extend_stroke(point);
        }
        EditMsg::CommitStroke => {
            if !session.model.commit_stroke() {
                log::debug!("Dropped empty stroke");
            }
        }
        EditMsg::OpenStickerPicker => session.picker_open = true,
        EditMsg::CloseStickerPicker => session.picker_open = false,
        EditMsg::PlaceSticker(asset) => {
            let center = session.geometry.preview_size().center();
            place_sticker(session, catalog, asset, center)?;
            session.picker_open = false;
        }
        EditMsg::AddSticker { asset, center } => place_sticker(session, catalog, asset, center)?,
        EditMsg::MoveSticker { id, to } => {
            if let Err(err) = session.model.move_sticker(id, to) {
                log::warn!("Ignoring sticker move: {err}");
            }
        }
        EditMsg::SetCaptionText(text) => session.model.set_caption_text(text),
        EditMsg::SetCaptionPosition(center) => session.model.set_caption_position(center),
        EditMsg::SetColor(color) => session.model.set_color(color),
        EditMsg::Reset => session.model.reset(),
    }
    Ok(())
}

fn place_sticker<C: StickerCatalog + ?Sized>(
    session: &mut EditSession,
    catalog: &C,
    asset: AssetId,
    center: Point,
) -> Result<(), EditorError> {
    let image = catalog.fetch_sticker(asset)?;
    let id = session.model.add_sticker(asset, image, center);
    log::debug!("Placed sticker {id} (asset {asset}) at ({}, {})", center.x, center.y);
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;
    use crate::assets::MemoryCatalog;
    use crate::capture::CapturedImage;
    use crate::config::ShapeColor;
    use crate::domain::StickerId;

    fn session() -> EditSession {
        let image = CapturedImage::new(RgbaImage::new(2000, 1000), 1.0);
        EditSession::new(image, 1000.0, ShapeColor::RED, 1000).unwrap()
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new().with(1, RgbaImage::from_pixel(4, 4, image::Rgba([0, 255, 0, 255])))
    }

    fn apply(session: &mut EditSession, msgs: Vec<EditMsg>) {
        for msg in msgs {
            handle_edit_msg(session, &catalog(), msg).unwrap();
        }
    }

    #[test]
    fn test_drag_sequence_builds_strokes() {
        let mut session = session();
        apply(
            &mut session,
            vec![
                EditMsg::BeginStroke,
                EditMsg::ExtendStroke(Point::new(1.0, 1.0)),
                EditMsg::ExtendStroke(Point::new(2.0, 2.0)),
                EditMsg::CommitStroke,
                EditMsg::BeginStroke,
                EditMsg::CommitStroke,
                EditMsg::BeginStroke,
                EditMsg::ExtendStroke(Point::new(3.0, 3.0)),
                EditMsg::CommitStroke,
            ],
        );
        assert_eq!(session.model.strokes().len(), 2);
        assert!(session.model.current_stroke().is_empty());
    }

    #[test]
    fn test_place_sticker_from_picker() {
        let mut session = session();
        apply(
            &mut session,
            vec![EditMsg::OpenStickerPicker, EditMsg::PlaceSticker(1)],
        );
        assert!(!session.picker_open);
        let sticker = &session.model.stickers()[0];
        assert_eq!(sticker.center, Point::new(500.0, 250.0));
        assert_eq!(sticker.asset, 1);
    }

    #[test]
    fn test_missing_asset_leaves_model_untouched() {
        let mut session = session();
        session.picker_open = true;
        let result = handle_edit_msg(&mut session, &catalog(), EditMsg::PlaceSticker(39));
        assert!(matches!(result, Err(EditorError::AssetNotFound(39))));
        assert!(session.model.stickers().is_empty());
        assert!(session.picker_open);

        let result = handle_edit_msg(
            &mut session,
            &catalog(),
            EditMsg::AddSticker {
                asset: 99,
                center: Point::new(1.0, 1.0),
            },
        );
        assert!(matches!(result, Err(EditorError::AssetNotFound(99))));
        assert!(session.model.stickers().is_empty());
    }

    #[test]
    fn test_move_stale_sticker_is_ignored() {
        let mut session = session();
        apply(&mut session, vec![EditMsg::PlaceSticker(1), EditMsg::Reset]);
        let result = handle_edit_msg(
            &mut session,
            &catalog(),
            EditMsg::MoveSticker {
                id: StickerId::new(1),
                to: Point::new(5.0, 5.0),
            },
        );
        assert!(result.is_ok());
        assert!(session.model.stickers().is_empty());
    }

    #[test]
    fn test_move_sticker() {
        let mut session = session();
        apply(
            &mut session,
            vec![
                EditMsg::AddSticker {
                    asset: 1,
                    center: Point::new(10.0, 10.0),
                },
                EditMsg::MoveSticker {
                    id: StickerId::new(1),
                    to: Point::new(70.0, 80.0),
                },
            ],
        );
        assert_eq!(session.model.stickers()[0].center, Point::new(70.0, 80.0));
    }

    #[test]
    fn test_caption_and_color() {
        let mut session = session();
        apply(
            &mut session,
            vec![
                EditMsg::SetCaptionText("sunset".into()),
                EditMsg::SetColor(ShapeColor::WHITE),
                EditMsg::SetCaptionPosition(Point::new(100.0, 400.0)),
            ],
        );
        let caption = session.model.caption().unwrap();
        assert_eq!(caption.text, "sunset");
        assert_eq!(caption.center, Point::new(100.0, 400.0));
        assert_eq!(session.model.color(), ShapeColor::WHITE);
    }

    #[test]
    fn test_caption_defaults_to_canvas_center() {
        let mut session = session();
        apply(&mut session, vec![EditMsg::SetCaptionText("hi".into())]);
        assert_eq!(
            session.model.caption().unwrap().center,
            Point::new(500.0, 250.0)
        );
    }
}
