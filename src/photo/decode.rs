//! Image decoding, run off the main thread by the photo plugin.

use std::path::{Path, PathBuf};

/// Extensions offered by the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff", "tif"];

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    /// The file could not be read
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not an image the decoder understands
    #[error("Could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded raster in tightly packed RGBA8.
#[derive(Debug, Clone)]
pub struct DecodedPhoto {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn decode_photo(path: &Path) -> Result<DecodedPhoto, PhotoError> {
    let bytes = std::fs::read(path).map_err(|source| PhotoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_bytes(path, &bytes)
}

/// Decode in-memory bytes; `path` is only used for reporting.
pub fn decode_bytes(path: &Path, bytes: &[u8]) -> Result<DecodedPhoto, PhotoError> {
    let decoded = image::load_from_memory(bytes).map_err(|source| PhotoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedPhoto {
        path: path.to_path_buf(),
        width,
        height,
        pixels: rgba.into_raw(),
    })
}
