//! Loading and saving images through the async loader on real files.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage, RgbaImage};
use photoview::app::App;
use photoview::services::image_loader::{load_image, payload_from_bytes, save_image};
use photoview::types::errors::ImageError;
use photoview::types::image::{decode_data_url, mime_for_path};
use rstest::rstest;
use tempfile::TempDir;

/// Writes a `width` x `height` image in `format` and returns its path.
fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]))
        .save_with_format(&path, format)
        .unwrap();
    path
}

#[tokio::test]
async fn test_load_png_reports_metadata() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "photo.png", 37, 21, ImageFormat::Png);
    let on_disk = std::fs::metadata(&path).unwrap().len();

    let payload = load_image(&path).await.unwrap();

    assert_eq!(payload.file_name, "photo.png");
    assert_eq!(payload.byte_size, on_disk);
    assert_eq!((payload.pixel_width, payload.pixel_height), (37, 21));
    assert!(payload.encoded_image.starts_with("data:image/png;base64,"));
    assert_eq!(payload.dimensions_label(), "37 x 21");
}

#[tokio::test]
async fn test_load_jpeg_uses_jpeg_mime() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "shot.JPG", 8, 8, ImageFormat::Jpeg);

    let payload = load_image(&path).await.unwrap();

    assert!(payload.encoded_image.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn test_encoded_bytes_match_file() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "a.png", 4, 4, ImageFormat::Png);

    let payload = load_image(&path).await.unwrap();
    let (_, bytes) = decode_data_url(&payload.encoded_image).unwrap();

    assert_eq!(bytes, std::fs::read(&path).unwrap());
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_image(&dir.path().join("nope.png")).await;
    assert!(matches!(result, Err(ImageError::Io(_))));
}

#[tokio::test]
async fn test_corrupt_file_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"this is only text").unwrap();

    let result = load_image(&path).await;
    assert!(matches!(result, Err(ImageError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_cancelled_open_yields_none() {
    assert_eq!(App::open_image(None).await, Ok(None));
}

#[tokio::test]
async fn test_cancelled_save_writes_nothing() {
    assert_eq!(App::save_image_as(None, "data:image/png;base64,AAAA").await, Ok(None));
}

#[tokio::test]
async fn test_save_writes_original_bytes_regardless_of_extension() {
    let dir = TempDir::new().unwrap();
    let source = write_image(dir.path(), "in.png", 5, 3, ImageFormat::Png);
    let payload = load_image(&source).await.unwrap();

    let target = dir.path().join("copy.webp");
    let written = save_image(&target, &payload.encoded_image).await.unwrap();

    assert_eq!(written, payload.byte_size);
    assert_eq!(std::fs::read(&target).unwrap(), std::fs::read(&source).unwrap());
}

#[tokio::test]
async fn test_save_rejects_non_data_url() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out.png");

    let result = save_image(&target, "file:///etc/passwd").await;

    assert!(matches!(result, Err(ImageError::InvalidDataUrl(_))));
    assert!(!target.exists());
}

#[test]
fn test_payload_from_gif_bytes() {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(3, 2, image::Rgba([0, 0, 0, 255]))
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Gif)
        .unwrap();

    let payload = payload_from_bytes("anim.gif", "image/gif", &bytes).unwrap();

    assert_eq!((payload.pixel_width, payload.pixel_height), (3, 2));
    assert_eq!(payload.byte_size, bytes.len() as u64);
}

#[rstest]
#[case("a.jpg", "image/jpeg")]
#[case("a.JPEG", "image/jpeg")]
#[case("a.png", "image/png")]
#[case("a.gif", "image/gif")]
#[case("a.webp", "image/webp")]
#[case("a.bmp", "image/bmp")]
#[case("noext", "application/octet-stream")]
fn test_mime_for_path(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(mime_for_path(Path::new(name)), expected);
}
