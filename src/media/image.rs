// SPDX-License-Identifier: MPL-2.0
//! Full-size image loading and decoding (WebP, PNG, JPEG, GIF, ...).

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Decoded size in bytes (RGBA).
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Load an image from the given path and return its data.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The image format is invalid or unsupported ([`Error::Image`])
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let img = image_rs::load_from_memory(&bytes)?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Image(format!("{} has empty dimensions", path.display())));
    }
    Ok(ImageData::from_rgba(width, height, img.to_rgba8().into_vec()))
}

/// Decodes an image on the blocking thread pool.
///
/// Returns the path back alongside the result so callers can match it to
/// the request.
pub async fn load_image_async(path: PathBuf) -> (PathBuf, Result<ImageData>) {
    let path_clone = path.clone();
    let result = tokio::task::spawn_blocking(move || load_image(&path_clone))
        .await
        .unwrap_or_else(|e| Err(Error::Io(format!("Image load task failed: {e}"))));
    (path, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn load_png_image_returns_expected_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image_path = temp_dir.path().join("sample.png");

        let image = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        image
            .save(&image_path)
            .expect("failed to write temporary png");

        let data = load_image(&image_path).expect("png should load successfully");
        assert_eq!(data.width, 4);
        assert_eq!(data.height, 2);
        assert_eq!(data.size_bytes(), 32);
    }

    #[test]
    fn load_missing_image_returns_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing_path = temp_dir.path().join("does_not_exist.webp");

        match load_image(&missing_path) {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_invalid_bytes_returns_image_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let bad_path = temp_dir.path().join("invalid.webp");
        fs::write(&bad_path, b"not a webp").expect("failed to write invalid data");

        match load_image(&bad_path) {
            Err(Error::Image(message)) => assert!(!message.is_empty()),
            other => panic!("expected Image error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn async_load_returns_requested_path() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("missing.png");
        let (returned, result) = load_image_async(path.clone()).await;
        assert_eq!(returned, path);
        assert!(result.is_err());
    }
}
