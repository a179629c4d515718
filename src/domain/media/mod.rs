// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains catalog entry types and the filter model, both
//! independent of any presentation or infrastructure concerns.

pub mod filter;
pub mod types;

// Re-export commonly used types
pub use filter::{FilterChoice, FilterDimension, FilterState, ItemMirror, ALL};
pub use types::{MediaId, MediaItem, MediaKind, Season, SeasonId};
