// SPDX-License-Identifier: MPL-2.0
//! Media infrastructure: catalog file, asset resolution, image decoding and
//! the neighbour prefetch cache.

pub mod asset;
pub mod catalog;
pub mod image;
pub mod prefetch;

// Re-export commonly used types
pub use asset::AssetResolver;
pub use catalog::Catalog;
pub use extensions::IMAGE_EXTENSIONS;
pub use image::{load_image, load_image_async, ImageData};
pub use prefetch::{ImagePrefetchCache, PrefetchConfig};

pub mod extensions {
    /// Source image extensions accepted by the importer (lowercase).
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

    /// Extension of every generated gallery asset.
    pub const GALLERY_EXTENSION: &str = "webp";
}

/// Returns `true` if `path` has one of the [`IMAGE_EXTENSIONS`].
#[must_use]
pub fn is_supported_image(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn supported_image_check_is_case_insensitive() {
        assert!(is_supported_image(Path::new("team.JPG")));
        assert!(is_supported_image(Path::new("a/b/c.webp")));
        assert!(!is_supported_image(Path::new("clip.mp4")));
        assert!(!is_supported_image(Path::new("noext")));
    }
}
