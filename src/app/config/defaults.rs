// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Filtering**: Search debounce and fade durations
//! - **Lightbox**: Swipe threshold and deferred focus delay
//! - **Prefetch**: Neighbour cache budget

// ==========================================================================
// Filtering Defaults
// ==========================================================================

/// Default delay between the last keystroke and the search recompute (ms).
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Minimum search debounce (ms).
pub const MIN_SEARCH_DEBOUNCE_MS: u64 = 0;

/// Maximum search debounce (ms).
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 2_000;

/// Default grid fade duration before each recompute (ms).
pub const DEFAULT_FADE_MS: u64 = 300;

/// Minimum fade duration (ms).
pub const MIN_FADE_MS: u64 = 0;

/// Maximum fade duration (ms).
pub const MAX_FADE_MS: u64 = 1_000;

// ==========================================================================
// Lightbox Defaults
// ==========================================================================

/// Default horizontal swipe distance that triggers navigation (px).
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Minimum swipe threshold (px).
pub const MIN_SWIPE_THRESHOLD_PX: f32 = 10.0;

/// Maximum swipe threshold (px).
pub const MAX_SWIPE_THRESHOLD_PX: f32 = 400.0;

/// Default delay before focus moves into or out of the lightbox (ms).
pub const DEFAULT_FOCUS_DELAY_MS: u64 = 50;

/// Maximum focus delay (ms).
pub const MAX_FOCUS_DELAY_MS: u64 = 1_000;

// ==========================================================================
// Prefetch Defaults
// ==========================================================================

pub use crate::media::prefetch::{
    DEFAULT_PREFETCH_CACHE_MB, MAX_PREFETCH_CACHE_MB, MIN_PREFETCH_CACHE_MB,
};

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SEARCH_DEBOUNCE_MS >= MIN_SEARCH_DEBOUNCE_MS);
    assert!(DEFAULT_SEARCH_DEBOUNCE_MS <= MAX_SEARCH_DEBOUNCE_MS);

    assert!(DEFAULT_FADE_MS >= MIN_FADE_MS);
    assert!(DEFAULT_FADE_MS <= MAX_FADE_MS);

    assert!(MIN_SWIPE_THRESHOLD_PX > 0.0);
    assert!(DEFAULT_SWIPE_THRESHOLD_PX >= MIN_SWIPE_THRESHOLD_PX);
    assert!(DEFAULT_SWIPE_THRESHOLD_PX <= MAX_SWIPE_THRESHOLD_PX);

    assert!(DEFAULT_FOCUS_DELAY_MS <= MAX_FOCUS_DELAY_MS);

    assert!(MIN_PREFETCH_CACHE_MB > 0);
    assert!(DEFAULT_PREFETCH_CACHE_MB >= MIN_PREFETCH_CACHE_MB);
    assert!(DEFAULT_PREFETCH_CACHE_MB <= MAX_PREFETCH_CACHE_MB);
};
