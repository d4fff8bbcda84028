//! Export sinks for flattened photos
//!
//! The compositor knows nothing about where images go. A sink receives the
//! finished image and either accepts it or reports `ExportFailure`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::config::SaveLocation;
use crate::error::EditorError;

/// Destination for finished images
pub trait ExportSink {
    fn publish(&mut self, image: &RgbaImage) -> Result<(), EditorError>;
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()
}

/// Write a file through `write`.
///
/// Regular files are written to a sibling temp file and renamed into place,
/// so a failed export never leaves a truncated image behind. Devices and
/// pipes are written in place.
fn write_file(
    path: &Path,
    write: impl FnOnce(&mut File) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    if let Ok(meta) = std::fs::metadata(path)
        && !meta.is_file()
        && !meta.is_dir()
    {
        let mut file = OpenOptions::new().write(true).open(path)?;
        return write(&mut file);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut file = tempfile::Builder::new()
        .prefix(".inkpea-")
        .suffix(".png")
        .tempfile_in(dir)?;
    write(file.as_file_mut())?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, EditorError> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image).map_err(|err| EditorError::ExportFailure(err.to_string()))?;
    Ok(buffer)
}

/// Timestamped file path inside the chosen folder
pub fn get_img_path(location: SaveLocation) -> Option<PathBuf> {
    let mut path = match location {
        SaveLocation::Pictures => {
            dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
        }
        SaveLocation::Documents => {
            dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
        }
    }?;
    let name = chrono::Local::now()
        .format("Photo_%Y-%m-%d_%H-%M-%S.png")
        .to_string();
    path.push(name);

    Some(path)
}

#[derive(Clone, Debug)]
enum FileTarget {
    Path(PathBuf),
    Location(SaveLocation),
}

/// Writes PNG files to disk
#[derive(Clone, Debug)]
pub struct FileSink {
    target: FileTarget,
    last_path: Option<PathBuf>,
}

impl FileSink {
    /// Always write to `path`
    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self {
            target: FileTarget::Path(path.into()),
            last_path: None,
        }
    }

    /// Write a new timestamped file in `location` on every export
    pub fn to_location(location: SaveLocation) -> Self {
        Self {
            target: FileTarget::Location(location),
            last_path: None,
        }
    }

    /// Path of the most recent successful export
    pub fn last_path(&self) -> Option<&PathBuf> {
        self.last_path.as_ref()
    }

    fn resolve(&self) -> Result<PathBuf, EditorError> {
        match &self.target {
            FileTarget::Path(path) => Ok(path.clone()),
            FileTarget::Location(location) => get_img_path(*location).ok_or_else(|| {
                EditorError::ExportFailure(format!("no {location:?} directory available"))
            }),
        }
    }
}

impl ExportSink for FileSink {
    fn publish(&mut self, image: &RgbaImage) -> Result<(), EditorError> {
        let path = self.resolve()?;
        write_file(&path, |file| Ok(write_png(file, image)?)).map_err(|err| {
            EditorError::ExportFailure(format!("{}: {err:#}", path.display()))
        })?;

        log::info!(
            "Exported {}x{} image to {}",
            image.width(),
            image.height(),
            path.display()
        );
        self.last_path = Some(path);
        Ok(())
    }
}

/// Keeps the encoded PNG in memory, e.g. for handing to a share sheet
#[derive(Clone, Debug, Default)]
pub struct BufferSink {
    bytes: Option<Vec<u8>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    pub fn take(&mut self) -> Option<Vec<u8>> {
        self.bytes.take()
    }
}

impl ExportSink for BufferSink {
    fn publish(&mut self, image: &RgbaImage) -> Result<(), EditorError> {
        self.bytes = Some(encode_png(image)?);
        Ok(())
    }
}
