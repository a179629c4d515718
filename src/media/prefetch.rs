// SPDX-License-Identifier: MPL-2.0
//! Prefetch cache for lightbox neighbours.
//!
//! When the lightbox opens an item, the full-size images just before and
//! after it in the Visible-Set are decoded in the background and kept here,
//! so navigating to them shows the image without waiting for a decode.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used images are evicted first
//! - **Memory-bounded**: Total decoded size limited by a byte budget
//! - **Path-keyed**: Images indexed by their resolved file path

use crate::media::ImageData;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Default prefetch cache size in megabytes.
pub const DEFAULT_PREFETCH_CACHE_MB: u32 = 32;

/// Minimum prefetch cache size in megabytes.
pub const MIN_PREFETCH_CACHE_MB: u32 = 8;

/// Maximum prefetch cache size in megabytes.
pub const MAX_PREFETCH_CACHE_MB: u32 = 128;

/// Upper bound on cached entries, whatever their size.
const MAX_ENTRIES: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchConfig {
    pub max_bytes: usize,
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self::new(true, DEFAULT_PREFETCH_CACHE_MB)
    }
}

impl PrefetchConfig {
    /// Builds a configuration from a megabyte budget, clamped to the
    /// supported range.
    #[must_use]
    pub fn new(enabled: bool, cache_mb: u32) -> Self {
        let mb = cache_mb.clamp(MIN_PREFETCH_CACHE_MB, MAX_PREFETCH_CACHE_MB) as usize;
        Self {
            max_bytes: mb * 1024 * 1024,
            enabled,
        }
    }
}

/// LRU cache of decoded full-size images.
pub struct ImagePrefetchCache {
    cache: LruCache<PathBuf, ImageData>,
    config: PrefetchConfig,
    current_bytes: usize,
}

impl ImagePrefetchCache {
    #[must_use]
    pub fn new(config: PrefetchConfig) -> Self {
        Self {
            cache: LruCache::new(MAX_ENTRIES),
            config,
            current_bytes: 0,
        }
    }

    /// Inserts a decoded image.
    ///
    /// Returns `false` if caching is disabled or the image would take more
    /// than half of the budget.
    pub fn insert(&mut self, path: PathBuf, image: ImageData) -> bool {
        if !self.config.enabled {
            return false;
        }

        let size = image.size_bytes();
        if size > self.config.max_bytes / 2 {
            return false;
        }

        if let Some(existing) = self.cache.pop(&path) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        while self.current_bytes + size > self.config.max_bytes {
            let Some((_, evicted)) = self.cache.pop_lru() else {
                break;
            };
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
        }

        // Entry-count eviction done by `push` must be reflected in the byte count.
        if let Some((_, evicted)) = self.cache.push(path, image) {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
        }
        self.current_bytes += size;
        true
    }

    /// Gets a cached image, updating its recency.
    pub fn get(&mut self, path: &Path) -> Option<ImageData> {
        if !self.config.enabled {
            return None;
        }
        self.cache.get(path).cloned()
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.config.enabled && self.cache.contains(path)
    }

    /// Filters `paths` down to those not cached yet.
    #[must_use]
    pub fn paths_to_prefetch(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        if !self.config.enabled {
            return Vec::new();
        }
        paths
            .iter()
            .filter(|p| !self.cache.contains(p.as_path()))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }
}

impl std::fmt::Debug for ImagePrefetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePrefetchCache")
            .field("enabled", &self.config.enabled)
            .field("image_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .finish()
    }
}
