//! Captured photo handed to the editor

use std::path::Path;

use image::RgbaImage;

use crate::domain::Size;
use crate::error::EditorError;

/// A captured photo with its device pixel ratio
#[derive(Clone, Debug)]
pub struct CapturedImage {
    pub rgba: RgbaImage,
    /// Device pixels per point at capture time
    pub scale_factor: f32,
}

impl CapturedImage {
    pub fn new(rgba: RgbaImage, scale_factor: f32) -> Self {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            log::warn!("Invalid capture scale factor {scale_factor}, using 1.0");
            1.0
        };
        Self { rgba, scale_factor }
    }

    /// Decode a photo from disk
    pub fn open(path: &Path, scale_factor: f32) -> Result<Self, EditorError> {
        let rgba = image::open(path)?.to_rgba8();
        log::debug!(
            "CapturedImage loaded from {}: {}x{} pixels",
            path.display(),
            rgba.width(),
            rgba.height()
        );
        Ok(Self::new(rgba, scale_factor))
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Native pixel size, the source space of every export
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_matches_pixels() {
        let image = CapturedImage::new(RgbaImage::new(640, 480), 3.0);
        assert_eq!(image.size(), Size::new(640.0, 480.0));
        assert_eq!(image.scale_factor, 3.0);
    }

    #[test]
    fn test_invalid_scale_factor_falls_back() {
        let image = CapturedImage::new(RgbaImage::new(2, 2), 0.0);
        assert_eq!(image.scale_factor, 1.0);
        let image = CapturedImage::new(RgbaImage::new(2, 2), f32::NAN);
        assert_eq!(image.scale_factor, 1.0);
    }

    #[test]
    fn test_open_missing_file() {
        let result = CapturedImage::open(Path::new("/nonexistent/photo.png"), 1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_open_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        RgbaImage::from_pixel(12, 8, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let image = CapturedImage::open(&path, 2.0).unwrap();
        assert_eq!((image.width(), image.height()), (12, 8));
        assert_eq!(image.rgba.get_pixel(3, 3).0, [10, 20, 30, 255]);
    }
}
