// SPDX-License-Identifier: MPL-2.0
//! Resolution of catalog asset addresses to files on disk.
//!
//! The catalog stores site addresses such as
//! `/static/Images/Gallery/Season6/full/s6_image_1.webp`. The desktop app
//! serves them from a local copy of the site's `static/` directory, the
//! *asset root*. Remote (`http`/`https`) addresses are never fetched.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Prefix of site addresses served from the asset root.
pub const STATIC_PREFIX: &str = "/static/";

/// Maps catalog addresses to local paths under an asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Guesses the asset root from the catalog location.
    ///
    /// The site keeps the catalog at `static/data/gallery.json`, so the root
    /// is two levels up. Falls back to the catalog's own directory.
    #[must_use]
    pub fn for_catalog(catalog_path: &Path) -> Self {
        let parent = catalog_path.parent().unwrap_or_else(|| Path::new("."));
        let root = match parent.file_name().and_then(|n| n.to_str()) {
            Some("data") => parent.parent().unwrap_or(parent),
            _ => parent,
        };
        Self::new(root)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves an address to a local path.
    ///
    /// Returns `None` for remote addresses, empty addresses and anything
    /// that would escape the asset root.
    #[must_use]
    pub fn resolve(&self, address: &str) -> Option<PathBuf> {
        let address = address.trim();
        if address.is_empty() || is_remote(address) {
            return None;
        }

        let relative = address
            .strip_prefix(STATIC_PREFIX)
            .unwrap_or_else(|| address.trim_start_matches('/'));
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// Copies the asset behind `address` into `destination_dir` as `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] when the address cannot be resolved locally,
    /// or an I/O error when the copy fails.
    pub fn save_copy(&self, address: &str, destination_dir: &Path, filename: &str) -> Result<PathBuf> {
        let source = self
            .resolve(address)
            .ok_or_else(|| Error::Image(format!("Asset '{address}' is not available locally")))?;
        fs::create_dir_all(destination_dir)?;
        let target = destination_dir.join(filename);
        fs::copy(&source, &target)?;
        tracing::info!(from = %source.display(), to = %target.display(), "asset saved");
        Ok(target)
    }
}

fn is_remote(address: &str) -> bool {
    let lower = address.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}
