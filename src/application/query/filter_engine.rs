// SPDX-License-Identifier: MPL-2.0
//! Filter engine deriving the gallery's Visible-Set.
//!
//! The engine owns the [`FilterState`] and the ordered list of visible ids.
//! Recomputing is a pure function of (catalog, filter state): every entry is
//! tested against its precomputed [`ItemMirror`](crate::domain::media::ItemMirror)
//! in catalog order.
//!
//! # Timing
//!
//! - Dropdown changes (season, tag, player) start the fade right away.
//! - Search input is debounced; each keystroke reschedules the debounce.
//! - Every recompute waits for the fade duration first, so it never lands
//!   before the fade-out has started.
//!
//! The UI layer sleeps on the returned [`Ticket`]s and reports back through
//! [`FilterEngine::search_debounce_elapsed`] and [`FilterEngine::fade_elapsed`].

use crate::application::timer::{Ticket, TimerSlot};
use crate::domain::media::{FilterDimension, FilterState, MediaId};
use crate::media::catalog::Catalog;
use std::time::Duration;

/// Default delay between the last keystroke and the search recompute.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default duration of the fade-out played before each recompute.
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

/// Delays used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterTiming {
    pub search_debounce: Duration,
    pub fade: Duration,
}

impl Default for FilterTiming {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            fade: DEFAULT_FADE,
        }
    }
}

/// Result of a recompute, consumed by the grid and count badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible_count: usize,
    pub total_count: usize,
}

impl FilterOutcome {
    /// Whether the "no results" state should be shown.
    #[must_use]
    pub fn no_results(&self) -> bool {
        self.visible_count == 0
    }
}

/// Owns filter state, the Visible-Set and the debounce/fade timers.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    state: FilterState,
    visible: Vec<MediaId>,
    timing: FilterTiming,
    search_timer: TimerSlot,
    fade_timer: TimerSlot,
}

impl FilterEngine {
    /// Creates an engine with every item visible.
    #[must_use]
    pub fn new(catalog: &Catalog, timing: FilterTiming) -> Self {
        let mut engine = Self {
            state: FilterState::new(),
            visible: Vec::new(),
            timing,
            search_timer: TimerSlot::new(),
            fade_timer: TimerSlot::new(),
        };
        engine.apply_filters(catalog);
        engine
    }

    /// Recomputes the Visible-Set immediately from the current state.
    pub fn apply_filters(&mut self, catalog: &Catalog) -> FilterOutcome {
        let query = self.state.normalized_query();
        self.visible = catalog
            .entries()
            .iter()
            .filter(|entry| self.state.matches_with_query(&query, &entry.mirror))
            .map(|entry| entry.item.id.clone())
            .collect();

        tracing::debug!(
            visible = self.visible.len(),
            total = catalog.len(),
            "filters applied"
        );

        FilterOutcome {
            visible_count: self.visible.len(),
            total_count: catalog.len(),
        }
    }

    /// Updates a dropdown dimension and starts the fade before recomputing.
    pub fn set_filter(&mut self, dimension: FilterDimension, value: &str) -> Ticket {
        self.state.set(dimension, value);
        self.begin_fade()
    }

    /// Records the typed query and (re)starts the search debounce.
    pub fn set_search_query(&mut self, query: &str) -> Ticket {
        self.state.search_query = query.to_string();
        self.search_timer.schedule(self.timing.search_debounce)
    }

    /// Clears the query and recomputes without waiting for the debounce.
    pub fn clear_search(&mut self) -> Ticket {
        self.state.search_query.clear();
        self.search_timer.cancel();
        self.begin_fade()
    }

    /// Puts every dimension back to "all" and the query to empty.
    pub fn reset(&mut self) -> Ticket {
        self.state.clear();
        self.search_timer.cancel();
        self.begin_fade()
    }

    /// Called when a debounce ticket elapses. Starts the fade if the ticket
    /// is still the latest one.
    pub fn search_debounce_elapsed(&mut self, generation: u64) -> Option<Ticket> {
        self.search_timer
            .fire(generation)
            .then(|| self.begin_fade())
    }

    /// Called when a fade ticket elapses. Recomputes if the ticket is still
    /// the latest one.
    pub fn fade_elapsed(&mut self, generation: u64, catalog: &Catalog) -> Option<FilterOutcome> {
        self.fade_timer
            .fire(generation)
            .then(|| self.apply_filters(catalog))
    }

    fn begin_fade(&mut self) -> Ticket {
        self.fade_timer.schedule(self.timing.fade)
    }

    /// Whether grid items should render faded out.
    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fade_timer.is_pending()
    }

    /// Current filter state.
    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Ordered ids currently passing every filter.
    #[must_use]
    pub fn visible_set(&self) -> &[MediaId] {
        &self.visible
    }

    /// 0-based position of `id` in the Visible-Set.
    #[must_use]
    pub fn position_of(&self, id: &MediaId) -> Option<usize> {
        self.visible.iter().position(|v| v == id)
    }

    #[must_use]
    pub fn is_visible(&self, id: &MediaId) -> bool {
        self.position_of(id).is_some()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{MediaItem, MediaKind, Season, SeasonId};

    fn image(id: &str, caption: &str, tags: &[&str], players: &[&str]) -> MediaItem {
        MediaItem {
            id: MediaId::new(id),
            kind: MediaKind::Image,
            full: format!("/static/full/{id}.webp"),
            thumbnail: None,
            alt: id.to_string(),
            caption: (!caption.is_empty()).then(|| caption.to_string()),
            match_label: None,
            date: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            players: players.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn derby_catalog() -> Catalog {
        Catalog::from_seasons(vec![
            Season {
                id: SeasonId::new("1"),
                items: vec![
                    image("s1_a", "Opening derby", &["derby"], &["Sam"]),
                    image("s1_b", "Derby rematch", &["derby"], &["Alex"]),
                ],
            },
            Season {
                id: SeasonId::new("2"),
                items: vec![image("s2_a", "Cup final", &["final"], &["Sam"])],
            },
        ])
    }

    fn ids(engine: &FilterEngine) -> Vec<&str> {
        engine.visible_set().iter().map(MediaId::as_str).collect()
    }

    /// Applies a dropdown change by letting its fade ticket elapse.
    fn set_and_apply(engine: &mut FilterEngine, catalog: &Catalog, dim: FilterDimension, v: &str) {
        let ticket = engine.set_filter(dim, v);
        engine.fade_elapsed(ticket.generation, catalog);
    }

    #[test]
    fn new_engine_shows_everything_in_catalog_order() {
        let catalog = derby_catalog();
        let engine = FilterEngine::new(&catalog, FilterTiming::default());
        assert_eq!(ids(&engine), vec!["s1_a", "s1_b", "s2_a"]);
    }

    #[test]
    fn season_filter_selects_only_that_season() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        set_and_apply(&mut engine, &catalog, FilterDimension::Season, "2");
        assert_eq!(ids(&engine), vec!["s2_a"]);
    }

    #[test]
    fn dropdown_change_waits_for_fade() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        let ticket = engine.set_filter(FilterDimension::Tag, "final");
        assert_eq!(ticket.delay, DEFAULT_FADE);
        assert!(engine.is_fading());
        // Not recomputed yet
        assert_eq!(engine.visible_count(), 3);

        let outcome = engine.fade_elapsed(ticket.generation, &catalog).expect("applied");
        assert_eq!(outcome.visible_count, 1);
        assert!(!engine.is_fading());
    }

    #[test]
    fn search_matches_case_insensitively_across_fields() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        let debounce = engine.set_search_query("DERBY");
        let fade = engine
            .search_debounce_elapsed(debounce.generation)
            .expect("debounce fired");
        engine.fade_elapsed(fade.generation, &catalog);
        assert_eq!(ids(&engine), vec!["s1_a", "s1_b"]);
    }

    #[test]
    fn each_keystroke_reschedules_the_debounce() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        let first = engine.set_search_query("d");
        let second = engine.set_search_query("de");
        assert!(engine.search_debounce_elapsed(first.generation).is_none());
        assert!(engine.search_debounce_elapsed(second.generation).is_some());
    }

    #[test]
    fn stale_fade_ticket_is_ignored() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        let first = engine.set_filter(FilterDimension::Season, "1");
        let second = engine.set_filter(FilterDimension::Season, "2");
        assert!(engine.fade_elapsed(first.generation, &catalog).is_none());
        engine.fade_elapsed(second.generation, &catalog);
        assert_eq!(ids(&engine), vec!["s2_a"]);
    }

    #[test]
    fn apply_filters_is_idempotent() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        set_and_apply(&mut engine, &catalog, FilterDimension::Player, "Sam");
        let first = engine.visible_set().to_vec();
        engine.apply_filters(&catalog);
        assert_eq!(engine.visible_set(), first.as_slice());
    }

    #[test]
    fn no_match_reports_no_results() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        let ticket = engine.set_filter(FilterDimension::Tag, "preseason");
        let outcome = engine.fade_elapsed(ticket.generation, &catalog).expect("applied");
        assert!(outcome.no_results());
        assert_eq!(outcome.total_count, 3);
    }

    #[test]
    fn reset_restores_full_set_and_cancels_debounce() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        set_and_apply(&mut engine, &catalog, FilterDimension::Season, "2");
        let debounce = engine.set_search_query("cup");
        let fade = engine.reset();
        assert!(engine.search_debounce_elapsed(debounce.generation).is_none());
        engine.fade_elapsed(fade.generation, &catalog);
        assert_eq!(engine.visible_count(), 3);
        assert_eq!(engine.state(), &FilterState::default());
    }

    #[test]
    fn clear_search_skips_debounce() {
        let catalog = derby_catalog();
        let mut engine = FilterEngine::new(&catalog, FilterTiming::default());
        engine.set_search_query("final");
        let fade = engine.clear_search();
        engine.fade_elapsed(fade.generation, &catalog);
        assert_eq!(engine.visible_count(), 3);
        assert!(engine.state().search_query.is_empty());
    }

    #[test]
    fn empty_catalog_has_empty_visible_set() {
        let engine = FilterEngine::new(&Catalog::empty(), FilterTiming::default());
        assert_eq!(engine.visible_count(), 0);
        assert_eq!(engine.position_of(&MediaId::new("x")), None);
    }
}
