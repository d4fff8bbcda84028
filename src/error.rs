//! Error taxonomy for the editing core
//!
//! Geometry and export failures end the current operation and are reported.
//! Asset and sticker lookups fail softly: callers log them and carry on.

use thiserror::Error;

use crate::domain::StickerId;

#[derive(Debug, Error)]
pub enum EditorError {
    /// Preview or source size has a zero, negative or non-finite dimension
    #[error("degenerate geometry: {width}x{height}")]
    DegenerateGeometry { width: f32, height: f32 },

    /// The sticker catalog has no image for this identifier
    #[error("sticker asset {0} not found")]
    AssetNotFound(u32),

    /// A command referenced a sticker that is no longer on the canvas
    #[error("sticker {0} not found")]
    StickerNotFound(StickerId),

    /// The export sink rejected the finished image
    #[error("export failed: {0}")]
    ExportFailure(String),

    /// A session command arrived while no photo is being edited
    #[error("no editing session is active")]
    NoSession,

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// Whether the failure is a benign race between UI and model state
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EditorError::AssetNotFound(_) | EditorError::StickerNotFound(_)
        )
    }
}
