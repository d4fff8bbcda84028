//! Photo annotation and flattening
//!
//! Freehand strokes, stickers and a caption are edited in preview space and
//! composited onto the full-resolution photo for export.

pub mod annotations;
pub mod assets;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod render;
pub mod session;

pub use error::EditorError;
