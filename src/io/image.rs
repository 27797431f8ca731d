//! PNG import and export of pixel buffers

use crate::io::error::{Result, SynthError};
use crate::raster::PixelBuffer;
use image::RgbaImage;
use std::path::Path;

/// Load any image format supported by `image` as an RGBA buffer
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image exceeds the maximum supported dimension
pub fn load_png(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| SynthError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Save `buffer` as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SynthError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let img = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .ok_or_else(|| SynthError::BufferSizeMismatch {
            width: buffer.width(),
            height: buffer.height(),
            expected: buffer.width() as usize * buffer.height() as usize * 4,
            actual: buffer.len(),
        })?;

    img.save(path).map_err(|e| SynthError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "image written");
    Ok(())
}
