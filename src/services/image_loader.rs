//! Image loading and saving.
//!
//! Reads a file fully into memory, sniffs its pixel dimensions with the
//! `image` crate and packs everything into an [`ImagePayload`]. Saving does
//! the reverse: decode the data URL and write the bytes verbatim.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use crate::types::errors::ImageError;
use crate::types::image::{decode_data_url, encode_data_url, mime_for_path, ImagePayload};

/// Extensions offered by the open dialog.
pub const OPEN_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];
/// Extensions offered by the save dialog.
pub const SAVE_EXTENSIONS: [&str; 3] = ["png", "jpg", "webp"];
/// File name the save dialog starts with.
pub const DEFAULT_SAVE_NAME: &str = "image.png";

/// Pixel dimensions from the file header, without decoding the image.
pub fn sniff_dimensions(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageError::Io(e.to_string()))?;
    if reader.format().is_none() {
        return Err(ImageError::UnsupportedFormat(
            "unrecognised image header".to_string(),
        ));
    }
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ImageError::UnsupportedFormat(e.to_string()))?;
    if width == 0 || height == 0 {
        return Err(ImageError::UnsupportedFormat(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }
    Ok((width, height))
}

/// Build a payload from bytes already in memory.
pub fn payload_from_bytes(
    file_name: &str,
    mime: &str,
    bytes: &[u8],
) -> Result<ImagePayload, ImageError> {
    let (pixel_width, pixel_height) = sniff_dimensions(bytes)?;
    Ok(ImagePayload {
        encoded_image: encode_data_url(mime, bytes),
        file_name: file_name.to_string(),
        byte_size: bytes.len() as u64,
        pixel_width,
        pixel_height,
    })
}

/// Read `path` and turn it into an [`ImagePayload`].
///
/// Encoding runs on the blocking pool so large files do not stall the runtime.
pub async fn load_image(path: &Path) -> Result<ImagePayload, ImageError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ImageError::Io(format!("{}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = mime_for_path(path);

    let payload = tokio::task::spawn_blocking(move || payload_from_bytes(&file_name, &mime, &bytes))
        .await
        .map_err(|e| ImageError::Task(e.to_string()))??;

    tracing::info!(
        file = %payload.file_name,
        bytes = payload.byte_size,
        width = payload.pixel_width,
        height = payload.pixel_height,
        "image loaded"
    );
    Ok(payload)
}

/// Decode `encoded_image` and write its bytes to `path`. Returns the byte count.
pub async fn save_image(path: &Path, encoded_image: &str) -> Result<u64, ImageError> {
    let (_, bytes) = decode_data_url(encoded_image)?;
    tokio::fs::write(path, &bytes)
        .await
        .map_err(|e| ImageError::Io(format!("{}: {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "image saved");
    Ok(bytes.len() as u64)
}
