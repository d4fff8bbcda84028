//! Sticker catalog
//!
//! Stickers are looked up by small integer identifiers. A missing asset is a
//! typed failure the caller skips over.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::domain::AssetId;
use crate::error::EditorError;

/// Identifiers offered by the sticker picker
pub const STICKER_IDS: std::ops::RangeInclusive<AssetId> = 1..=40;

/// Supplies sticker images by identifier
pub trait StickerCatalog {
    fn fetch_sticker(&self, id: AssetId) -> Result<Arc<RgbaImage>, EditorError>;

    /// Identifiers that currently resolve to an image
    fn available(&self) -> Vec<AssetId> {
        STICKER_IDS
            .filter(|id| self.fetch_sticker(*id).is_ok())
            .collect()
    }
}

/// Stickers stored as `sticker_<n>.png` in a directory
#[derive(Clone, Debug)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: AssetId) -> PathBuf {
        self.dir.join(format!("sticker_{id}.png"))
    }
}

impl StickerCatalog for DirectoryCatalog {
    fn fetch_sticker(&self, id: AssetId) -> Result<Arc<RgbaImage>, EditorError> {
        if !STICKER_IDS.contains(&id) {
            return Err(EditorError::AssetNotFound(id));
        }
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(EditorError::AssetNotFound(id));
        }
        match image::open(&path) {
            Ok(img) => Ok(Arc::new(img.to_rgba8())),
            Err(err) => {
                log::warn!("Failed to decode sticker {}: {}", path.display(), err);
                Err(EditorError::AssetNotFound(id))
            }
        }
    }

    fn available(&self) -> Vec<AssetId> {
        STICKER_IDS.filter(|id| self.path_for(*id).is_file()).collect()
    }
}

/// In-memory catalog, used for embedded sticker packs and tests
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    stickers: BTreeMap<AssetId, Arc<RgbaImage>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AssetId, image: RgbaImage) {
        self.stickers.insert(id, Arc::new(image));
    }

    pub fn with(mut self, id: AssetId, image: RgbaImage) -> Self {
        self.insert(id, image);
        self
    }
}

impl StickerCatalog for MemoryCatalog {
    fn fetch_sticker(&self, id: AssetId) -> Result<Arc<RgbaImage>, EditorError> {
        self.stickers
            .get(&id)
            .cloned()
            .ok_or(EditorError::AssetNotFound(id))
    }

    fn available(&self) -> Vec<AssetId> {
        self.stickers.keys().copied().collect()
    }
}
