//! Message types for an editing session
//!
//! Pointer and tap events arrive as discrete commands and are applied to the
//! annotation model one at a time, in order.

use serde::{Deserialize, Serialize};

use crate::capture::CapturedImage;
use crate::config::ShapeColor;
use crate::domain::{AssetId, Point, StickerId};

/// Edits to the annotation state. All points are in preview space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMsg {
    /// Pointer went down: start a fresh stroke
    BeginStroke,
    /// Pointer moved while drawing
    ExtendStroke(Point),
    /// Pointer released
    CommitStroke,
    OpenStickerPicker,
    CloseStickerPicker,
    /// Pick a sticker from the picker; it lands at the canvas center
    PlaceSticker(AssetId),
    /// Place a sticker at an explicit position
    AddSticker { asset: AssetId, center: Point },
    /// Drag a placed sticker
    MoveSticker { id: StickerId, to: Point },
    SetCaptionText(String),
    SetCaptionPosition(Point),
    SetColor(ShapeColor),
    /// Clear strokes, stickers and caption text
    Reset,
}

/// Commands that drive the session lifecycle
#[derive(Debug, Clone)]
pub enum SessionMsg {
    Begin(CapturedImage),
    Cancel,
    Reset,
    Export,
    Edit(EditMsg),
}

impl SessionMsg {
    pub fn edit(msg: EditMsg) -> Self {
        Self::Edit(msg)
    }
}

impl From<EditMsg> for SessionMsg {
    fn from(msg: EditMsg) -> Self {
        Self::Edit(msg)
    }
}
