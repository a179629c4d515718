// SPDX-License-Identifier: MPL-2.0
//! Gallery filtering types for the domain layer.
//!
//! This module contains pure filter types without I/O operations.
//!
//! # Available Filters
//!
//! - [`FilterChoice`]: "all" or a single selected value (season, tag, player)
//! - [`FilterState`]: The four independent criteria combined with AND logic
//! - [`ItemMirror`]: Per-item attributes the predicates are evaluated against

use super::types::{MediaItem, SeasonId};

/// Value sentinel used by dropdowns for "no restriction".
pub const ALL: &str = "all";

// =============================================================================
// Filter Choice
// =============================================================================

/// Either no restriction, or one selected value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterChoice {
    /// Every item passes.
    #[default]
    All,
    /// Only items carrying this exact value pass.
    Only(String),
}

impl FilterChoice {
    /// Builds a choice from a raw control value, treating `"all"` and the
    /// empty string as no restriction.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Returns the raw control value (`"all"` for no restriction).
    #[must_use]
    pub fn as_value(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(value) => value,
        }
    }

    /// Returns `true` if this choice restricts anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    /// Returns `true` if `value` equals the selected value.
    #[must_use]
    pub fn matches_value(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }

    /// Returns `true` if any of `values` equals the selected value.
    #[must_use]
    pub fn matches_any<S: AsRef<str>>(&self, values: &[S]) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => values.iter().any(|v| v.as_ref() == selected),
        }
    }
}

/// The dropdown-backed filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Season,
    Tag,
    Player,
}

// =============================================================================
// Item Mirror
// =============================================================================

/// Filterable attributes of one item, precomputed once at catalog load.
///
/// Re-filtering reads only mirrors, so it never walks item metadata again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMirror {
    pub season: SeasonId,
    pub tags: Vec<String>,
    pub players: Vec<String>,
    /// Lowercased caption, match, tags and players.
    pub search_text: String,
}

impl ItemMirror {
    #[must_use]
    pub fn new(season: SeasonId, item: &MediaItem) -> Self {
        Self {
            season,
            tags: item.tags.clone(),
            players: item.players.clone(),
            search_text: item.search_text(),
        }
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// Combined gallery filter with AND logic.
///
/// All four criteria must match for an item to be visible.
/// When no criterion is active, every item matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Free-text query as typed; trimmed and lowercased when matching.
    pub search_query: String,
    pub season: FilterChoice,
    pub tag: FilterChoice,
    pub player: FilterChoice,
}

impl FilterState {
    /// Creates a filter with no active criteria (matches all items).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized query used for matching.
    #[must_use]
    pub fn normalized_query(&self) -> String {
        self.search_query.trim().to_lowercase()
    }

    #[must_use]
    pub fn matches_season(&self, mirror: &ItemMirror) -> bool {
        self.season.matches_value(mirror.season.as_str())
    }

    #[must_use]
    pub fn matches_tag(&self, mirror: &ItemMirror) -> bool {
        self.tag.matches_any(&mirror.tags)
    }

    #[must_use]
    pub fn matches_player(&self, mirror: &ItemMirror) -> bool {
        self.player.matches_any(&mirror.players)
    }

    /// `query` must already be normalized (see [`Self::normalized_query`]).
    #[must_use]
    pub fn matches_search(query: &str, mirror: &ItemMirror) -> bool {
        query.is_empty() || mirror.search_text.contains(query)
    }

    /// Evaluates all four predicates.
    #[must_use]
    pub fn matches(&self, mirror: &ItemMirror) -> bool {
        let query = self.normalized_query();
        self.matches_with_query(&query, mirror)
    }

    /// Same as [`Self::matches`] with a query normalized once by the caller.
    #[must_use]
    pub fn matches_with_query(&self, query: &str, mirror: &ItemMirror) -> bool {
        self.matches_season(mirror)
            && self.matches_tag(mirror)
            && self.matches_player(mirror)
            && Self::matches_search(query, mirror)
    }

    /// Updates one dropdown dimension from a raw control value.
    pub fn set(&mut self, dimension: FilterDimension, value: &str) {
        let choice = FilterChoice::from_value(value);
        match dimension {
            FilterDimension::Season => self.season = choice,
            FilterDimension::Tag => self.tag = choice,
            FilterDimension::Player => self.player = choice,
        }
    }

    /// Returns the current choice for a dimension.
    #[must_use]
    pub fn get(&self, dimension: FilterDimension) -> &FilterChoice {
        match dimension {
            FilterDimension::Season => &self.season,
            FilterDimension::Tag => &self.tag,
            FilterDimension::Player => &self.player,
        }
    }

    /// Returns `true` if any criterion is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.season.is_active()
            || self.tag.is_active()
            || self.player.is_active()
            || !self.normalized_query().is_empty()
    }

    /// Resets all criteria to their default (inactive) state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Tests
// =============================================================================
