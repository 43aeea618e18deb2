use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use super::errors::ImageError;

/// One opened image as delivered to a display surface.
///
/// `encoded_image` is a self-describing data URL; the remaining fields are
/// the metadata shown next to the image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub encoded_image: String,
    pub file_name: String,
    pub byte_size: u64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl ImagePayload {
    /// Size in KiB with two decimals, e.g. `"12.50 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.byte_size as f64 / 1024.0)
    }

    /// Pixel dimensions as `"W x H"`.
    pub fn dimensions_label(&self) -> String {
        format!("{} x {}", self.pixel_width, self.pixel_height)
    }
}

/// MIME type for an image path, derived from its extension only.
pub fn mime_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "gif" => "image/gif".to_string(),
        "webp" => "image/webp".to_string(),
        "" => "application/octet-stream".to_string(),
        other => format!("image/{}", other),
    }
}

/// Build a `data:<mime>;base64,<payload>` string.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = BASE64.encode(bytes);
    let mut out = String::with_capacity(payload.len() + mime.len() + 13);
    out.push_str("data:");
    out.push_str(mime);
    out.push_str(";base64,");
    out.push_str(&payload);
    out
}

/// Split a base64 data URL into its MIME type and decoded bytes.
pub fn decode_data_url(input: &str) -> Result<(String, Vec<u8>), ImageError> {
    let rest = input
        .strip_prefix("data:")
        .ok_or_else(|| ImageError::InvalidDataUrl("missing 'data:' scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageError::InvalidDataUrl("missing ',' separator".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| ImageError::InvalidDataUrl("payload is not base64".to_string()))?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| ImageError::InvalidDataUrl(format!("base64 decode error: {}", e)))?;
    Ok((mime.to_string(), bytes))
}
