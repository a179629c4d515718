// SPDX-License-Identifier: MPL-2.0
//! Gallery session: the single owner of gallery state for one window.
//!
//! [`GallerySession`] ties the catalog, the [`FilterEngine`], the
//! [`Lightbox`] and the [`FocusTrap`] together behind a command interface.
//! Every entry point returns the [`Command`]s the presentation layer must
//! run (sleep on a timer, load an image, move keyboard focus, ...). No
//! method blocks or performs I/O, so the whole flow is testable without a
//! window.
//!
//! Keyboard focus is tracked as a [`FocusTarget`]. While the lightbox is
//! open its controls form the trapped container.

use crate::application::focus_trap::{
    traverse, FocusContainer, FocusTrap, Focusable, Role, TrapKey, TrapOutcome,
    DEFAULT_FOCUS_DELAY,
};
use crate::application::lightbox::{
    Direction, Download, Lightbox, LightboxEffect, LoadRequest, LoadToken, Presentation,
    SwipeTracker, DEFAULT_SWIPE_THRESHOLD,
};
use crate::application::query::filter_engine::{FilterEngine, FilterOutcome, FilterTiming};
use crate::application::timer::Ticket;
use crate::domain::media::{FilterDimension, MediaId, SeasonId};
use crate::media::catalog::Catalog;
use std::time::Duration;

/// Tunables taken from the user configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GallerySettings {
    pub timing: FilterTiming,
    pub swipe_threshold: f32,
    pub focus_delay: Duration,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            timing: FilterTiming::default(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            focus_delay: DEFAULT_FOCUS_DELAY,
        }
    }
}

/// Element that can hold keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Search,
    ClearSearch,
    Filter(FilterKind),
    ResetFilters,
    Thumbnail(MediaId),
    LightboxClose,
    LightboxPrevious,
    LightboxNext,
    LightboxDownload,
}

/// Hashable mirror of [`FilterDimension`] for focus targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Season,
    Tag,
    Player,
}

impl From<FilterKind> for FilterDimension {
    fn from(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Season => FilterDimension::Season,
            FilterKind::Tag => FilterDimension::Tag,
            FilterKind::Player => FilterDimension::Player,
        }
    }
}

/// Keys the gallery reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKey {
    Tab { shift: bool },
    Escape,
    ArrowLeft,
    ArrowRight,
    /// Enter or Space on the focused element.
    Activate,
    Other,
}

/// Work the presentation layer performs on behalf of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sleep, then report back with `search_debounce_elapsed`.
    ScheduleSearch(Ticket),
    /// Sleep, then report back with `fade_elapsed`.
    ScheduleFade(Ticket),
    /// Sleep, then report back with `focus_elapsed`.
    ScheduleFocus(Ticket),
    LoadImage(LoadRequest),
    Preload(Vec<String>),
    Download(Download),
}

/// The lightbox controls, as seen by the focus trap.
struct LightboxControls<'a> {
    presentation: Option<&'a Presentation>,
}

impl FocusContainer for LightboxControls<'_> {
    type Id = FocusTarget;

    fn descendants(&self) -> Vec<Focusable<FocusTarget>> {
        let Some(presentation) = self.presentation else {
            return Vec::new();
        };
        let button = |id| Focusable {
            id,
            role: Role::Button,
            disabled: false,
            tab_index: None,
            visible: true,
        };
        vec![
            button(FocusTarget::LightboxClose),
            button(FocusTarget::LightboxPrevious),
            button(FocusTarget::LightboxNext),
            Focusable {
                id: FocusTarget::LightboxDownload,
                role: Role::Link { has_target: true },
                disabled: false,
                tab_index: None,
                visible: presentation.stage.download().is_some(),
            },
        ]
    }
}

#[derive(Debug, Clone)]
pub struct GallerySession {
    catalog: Catalog,
    filters: FilterEngine,
    lightbox: Lightbox,
    focus_trap: FocusTrap<FocusTarget>,
    swipe: SwipeTracker,
    backdrop: BackdropGesture,
    focused: Option<FocusTarget>,
    scroll_locked: bool,
    tag_options: Vec<String>,
    player_options: Vec<String>,
}

/// A touch on the backdrop and the swipe it may belong to arrive as two
/// separate messages in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackdropGesture {
    Idle,
    /// Released on the backdrop while the touch is still tracked.
    Pending,
    /// The last touch navigated; its backdrop release must not close.
    Swiped,
}

impl GallerySession {
    #[must_use]
    pub fn new(catalog: Catalog, settings: GallerySettings) -> Self {
        let filters = FilterEngine::new(&catalog, settings.timing);
        Self {
            tag_options: catalog.tags(),
            player_options: catalog.players(),
            catalog,
            filters,
            lightbox: Lightbox::new(),
            focus_trap: FocusTrap::new(settings.focus_delay),
            swipe: SwipeTracker::new(settings.swipe_threshold),
            backdrop: BackdropGesture::Idle,
            focused: None,
            scroll_locked: false,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn filters(&self) -> &FilterEngine {
        &self.filters
    }

    #[must_use]
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    #[must_use]
    pub fn focused(&self) -> Option<&FocusTarget> {
        self.focused.as_ref()
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    #[must_use]
    pub fn season_options(&self) -> &[SeasonId] {
        self.catalog.season_ids()
    }

    /// Sorted tags for the tag dropdown (without the "All" entry).
    #[must_use]
    pub fn tag_options(&self) -> &[String] {
        &self.tag_options
    }

    /// Sorted player names for the player dropdown (without the "All" entry).
    #[must_use]
    pub fn player_options(&self) -> &[String] {
        &self.player_options
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    pub fn set_filter(&mut self, dimension: FilterDimension, value: &str) -> Vec<Command> {
        vec![Command::ScheduleFade(self.filters.set_filter(dimension, value))]
    }

    pub fn set_search_query(&mut self, query: &str) -> Vec<Command> {
        vec![Command::ScheduleSearch(self.filters.set_search_query(query))]
    }

    pub fn clear_search(&mut self) -> Vec<Command> {
        vec![Command::ScheduleFade(self.filters.clear_search())]
    }

    pub fn reset_filters(&mut self) -> Vec<Command> {
        vec![Command::ScheduleFade(self.filters.reset())]
    }

    pub fn search_debounce_elapsed(&mut self, generation: u64) -> Vec<Command> {
        self.filters
            .search_debounce_elapsed(generation)
            .map(Command::ScheduleFade)
            .into_iter()
            .collect()
    }

    pub fn fade_elapsed(&mut self, generation: u64) -> Option<FilterOutcome> {
        let outcome = self.filters.fade_elapsed(generation, &self.catalog)?;
        if let Some(FocusTarget::Thumbnail(id)) = &self.focused {
            if !self.filters.is_visible(id) {
                self.focused = None;
            }
        }
        Some(outcome)
    }

    // =========================================================================
    // Lightbox
    // =========================================================================

    /// Opens the lightbox on `id`. Unknown ids are logged and ignored.
    pub fn open(&mut self, id: &MediaId) -> Vec<Command> {
        match self
            .lightbox
            .open(id, &self.catalog, self.filters.visible_set())
        {
            Ok(effects) => self.run_effects(effects),
            Err(_) => Vec::new(),
        }
    }

    /// Opens from a thumbnail click; the thumbnail becomes the focus to
    /// restore on close.
    pub fn open_thumbnail(&mut self, id: &MediaId) -> Vec<Command> {
        if !self.lightbox.is_open() {
            self.focused = Some(FocusTarget::Thumbnail(id.clone()));
        }
        self.open(id)
    }

    pub fn close(&mut self) -> Vec<Command> {
        let effects = self.lightbox.close();
        self.swipe.cancel();
        self.backdrop = BackdropGesture::Idle;
        self.run_effects(effects)
    }

    pub fn navigate(&mut self, direction: Direction) -> Vec<Command> {
        let effects = self
            .lightbox
            .navigate(direction, &self.catalog, self.filters.visible_set());
        self.run_effects(effects)
    }

    /// Applies an image load result; stale results are ignored.
    pub fn image_loaded(&mut self, token: LoadToken, succeeded: bool) -> bool {
        self.lightbox.finish_image_load(token, succeeded)
    }

    /// A click on the overlay outside the content closes the lightbox.
    ///
    /// A swipe is never a click: a release that belongs to a swipe past the
    /// threshold is ignored.
    pub fn backdrop_clicked(&mut self) -> Vec<Command> {
        if !self.lightbox.is_open() {
            return Vec::new();
        }
        match std::mem::replace(&mut self.backdrop, BackdropGesture::Idle) {
            BackdropGesture::Swiped => Vec::new(),
            _ if self.swipe.is_tracking() => {
                self.backdrop = BackdropGesture::Pending;
                Vec::new()
            }
            _ => self.close(),
        }
    }

    pub fn touch_started(&mut self, x: f32) {
        self.backdrop = BackdropGesture::Idle;
        if self.lightbox.is_open() {
            self.swipe.begin(x);
        }
    }

    pub fn touch_ended(&mut self, x: f32) -> Vec<Command> {
        if !self.lightbox.is_open() {
            self.swipe.cancel();
            return Vec::new();
        }
        let pending = self.backdrop == BackdropGesture::Pending;
        match self.swipe.end(x) {
            Some(direction) => {
                self.backdrop = if pending {
                    BackdropGesture::Idle
                } else {
                    BackdropGesture::Swiped
                };
                self.navigate(direction)
            }
            None if pending => self.close(),
            None => {
                self.backdrop = BackdropGesture::Idle;
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Keyboard & focus
    // =========================================================================

    /// Records focus set by pointer interaction.
    pub fn focus(&mut self, target: FocusTarget) {
        self.focused = Some(target);
    }

    /// Resolves a deferred focus move scheduled by the focus trap.
    pub fn focus_elapsed(&mut self, generation: u64) -> Option<&FocusTarget> {
        let controls = LightboxControls {
            presentation: self.lightbox.presentation(),
        };
        let target = self.focus_trap.deferred_elapsed(generation, &controls)?;
        self.focused = Some(target);
        self.focused.as_ref()
    }

    pub fn key_pressed(&mut self, key: GalleryKey) -> Vec<Command> {
        if self.lightbox.is_open() {
            self.lightbox_key(key)
        } else {
            self.page_key(key)
        }
    }

    fn lightbox_key(&mut self, key: GalleryKey) -> Vec<Command> {
        let trap_key = match key {
            GalleryKey::Tab { shift } => TrapKey::Tab { shift },
            GalleryKey::Escape => TrapKey::Escape,
            _ => TrapKey::Other,
        };
        let controls = LightboxControls {
            presentation: self.lightbox.presentation(),
        };
        let outcome = self
            .focus_trap
            .handle_key(trap_key, self.focused.as_ref(), &controls);
        let order = controls.focusable_ids();

        match outcome {
            TrapOutcome::EscapeRequested => self.close(),
            TrapOutcome::MoveFocus(target) => {
                self.focused = Some(target);
                Vec::new()
            }
            TrapOutcome::Suppressed => Vec::new(),
            TrapOutcome::PassThrough => match key {
                GalleryKey::Tab { shift } => {
                    self.focused = traverse(&order, self.focused.as_ref(), shift);
                    Vec::new()
                }
                GalleryKey::Escape => self.close(),
                GalleryKey::ArrowLeft => self.navigate(Direction::Previous),
                GalleryKey::ArrowRight => self.navigate(Direction::Next),
                GalleryKey::Activate => self.activate_focused(),
                GalleryKey::Other => Vec::new(),
            },
        }
    }

    fn page_key(&mut self, key: GalleryKey) -> Vec<Command> {
        match key {
            GalleryKey::Tab { shift } => {
                let order = self.page_focus_order();
                self.focused = traverse(&order, self.focused.as_ref(), shift);
                Vec::new()
            }
            GalleryKey::Activate => self.activate_focused(),
            // Escape and arrows only act while the lightbox is open
            _ => Vec::new(),
        }
    }

    /// Focus order of the page behind the lightbox.
    #[must_use]
    pub fn page_focus_order(&self) -> Vec<FocusTarget> {
        let mut order = vec![FocusTarget::Search];
        if !self.filters.state().search_query.is_empty() {
            order.push(FocusTarget::ClearSearch);
        }
        order.extend([
            FocusTarget::Filter(FilterKind::Season),
            FocusTarget::Filter(FilterKind::Tag),
            FocusTarget::Filter(FilterKind::Player),
            FocusTarget::ResetFilters,
        ]);
        order.extend(
            self.filters
                .visible_set()
                .iter()
                .cloned()
                .map(FocusTarget::Thumbnail),
        );
        order
    }

    fn activate_focused(&mut self) -> Vec<Command> {
        let Some(target) = self.focused.clone() else {
            return Vec::new();
        };
        match target {
            FocusTarget::Thumbnail(id) => self.open(&id),
            FocusTarget::ClearSearch => self.clear_search(),
            FocusTarget::ResetFilters => self.reset_filters(),
            FocusTarget::LightboxClose => self.close(),
            FocusTarget::LightboxPrevious => self.navigate(Direction::Previous),
            FocusTarget::LightboxNext => self.navigate(Direction::Next),
            FocusTarget::LightboxDownload => self
                .lightbox
                .presentation()
                .and_then(|p| p.stage.download())
                .cloned()
                .map(Command::Download)
                .into_iter()
                .collect(),
            FocusTarget::Search | FocusTarget::Filter(_) => Vec::new(),
        }
    }

    /// Download command for the image currently shown, if any.
    #[must_use]
    pub fn download(&self) -> Option<Command> {
        self.lightbox
            .presentation()
            .and_then(|p| p.stage.download())
            .cloned()
            .map(Command::Download)
    }

    fn run_effects(&mut self, effects: Vec<LightboxEffect>) -> Vec<Command> {
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                LightboxEffect::LoadImage(request) => commands.push(Command::LoadImage(request)),
                LightboxEffect::Preload(urls) => commands.push(Command::Preload(urls)),
                LightboxEffect::LockScroll => self.scroll_locked = true,
                LightboxEffect::UnlockScroll => self.scroll_locked = false,
                LightboxEffect::ActivateFocusTrap => {
                    if let Some(ticket) = self.focus_trap.activate(self.focused.clone()) {
                        commands.push(Command::ScheduleFocus(ticket));
                    }
                }
                LightboxEffect::DeactivateFocusTrap => {
                    if let Some(ticket) = self.focus_trap.deactivate() {
                        commands.push(Command::ScheduleFocus(ticket));
                    }
                }
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{ "seasons": {
        "1": { "images": [
            { "id": "a", "full": "/static/a.webp", "alt": "a", "tags": ["derby"] },
            { "id": "b", "full": "/static/b.webp", "alt": "b", "tags": ["derby"] }
        ] },
        "2": { "images": [
            { "id": "v", "type": "video", "youtube_id": "abc123", "full": "", "alt": "v" }
        ] }
    } }"#;

    fn session() -> GallerySession {
        let catalog = Catalog::from_json_str(JSON).expect("catalog");
        GallerySession::new(catalog, GallerySettings::default())
    }

    fn focus_ticket(commands: &[Command]) -> Ticket {
        commands
            .iter()
            .find_map(|c| match c {
                Command::ScheduleFocus(t) => Some(*t),
                _ => None,
            })
            .expect("focus ticket")
    }

    #[test]
    fn open_locks_scroll_and_focuses_close_button() {
        let mut s = session();
        let commands = s.open_thumbnail(&"a".into());
        assert!(s.is_scroll_locked());
        let ticket = focus_ticket(&commands);
        assert_eq!(ticket.delay, DEFAULT_FOCUS_DELAY);
        assert_eq!(
            s.focus_elapsed(ticket.generation),
            Some(&FocusTarget::LightboxClose)
        );
    }

    #[test]
    fn escape_closes_and_restores_thumbnail_focus() {
        let mut s = session();
        let open = s.open_thumbnail(&"b".into());
        s.focus_elapsed(focus_ticket(&open).generation);

        let close = s.key_pressed(GalleryKey::Escape);
        assert!(!s.lightbox().is_open());
        assert!(!s.is_scroll_locked());
        assert_eq!(
            s.focus_elapsed(focus_ticket(&close).generation),
            Some(&FocusTarget::Thumbnail("b".into()))
        );
    }

    #[test]
    fn tab_cycles_inside_lightbox_without_download_for_video() {
        let mut s = session();
        let open = s.open_thumbnail(&"v".into());
        s.focus_elapsed(focus_ticket(&open).generation);

        s.key_pressed(GalleryKey::Tab { shift: false });
        s.key_pressed(GalleryKey::Tab { shift: false });
        assert_eq!(s.focused(), Some(&FocusTarget::LightboxNext));
        s.key_pressed(GalleryKey::Tab { shift: false });
        assert_eq!(s.focused(), Some(&FocusTarget::LightboxClose));
        s.key_pressed(GalleryKey::Tab { shift: true });
        assert_eq!(s.focused(), Some(&FocusTarget::LightboxNext));
    }

    #[test]
    fn arrows_navigate_only_while_open() {
        let mut s = session();
        assert!(s.key_pressed(GalleryKey::ArrowRight).is_empty());
        s.open(&"b".into());
        s.key_pressed(GalleryKey::ArrowRight);
        assert_eq!(s.lightbox().current_id().map(MediaId::as_str), Some("v"));
        s.key_pressed(GalleryKey::ArrowLeft);
        assert_eq!(s.lightbox().current_id().map(MediaId::as_str), Some("b"));
    }

    #[test]
    fn swipe_left_goes_to_next() {
        let mut s = session();
        s.open(&"a".into());
        s.touch_started(300.0);
        s.touch_ended(200.0);
        assert_eq!(s.lightbox().current_id().map(MediaId::as_str), Some("b"));
        s.touch_started(200.0);
        s.touch_ended(230.0);
        assert_eq!(s.lightbox().current_id().map(MediaId::as_str), Some("b"));
    }

    #[test]
    fn download_uses_id_webp_name() {
        let mut s = session();
        s.open(&"a".into());
        s.focus(FocusTarget::LightboxDownload);
        let commands = s.key_pressed(GalleryKey::Activate);
        assert_eq!(
            commands,
            vec![Command::Download(Download {
                href: "/static/a.webp".into(),
                filename: "a.webp".into(),
            })]
        );
    }

    #[test]
    fn filtering_out_focused_thumbnail_drops_focus() {
        let mut s = session();
        s.focus(FocusTarget::Thumbnail("a".into()));
        let commands = s.set_filter(FilterDimension::Season, "2");
        let Some(Command::ScheduleFade(ticket)) = commands.first() else {
            panic!("expected fade");
        };
        let outcome = s.fade_elapsed(ticket.generation).expect("applied");
        assert_eq!(outcome.visible_count, 1);
        assert_eq!(s.focused(), None);
    }

    #[test]
    fn unknown_open_produces_no_commands() {
        let mut s = session();
        assert!(s.open(&"missing".into()).is_empty());
        assert!(!s.is_scroll_locked());
    }

    #[test]
    fn page_tab_order_ends_with_visible_thumbnails() {
        let s = session();
        let order = s.page_focus_order();
        assert_eq!(order.first(), Some(&FocusTarget::Search));
        assert_eq!(order.last(), Some(&FocusTarget::Thumbnail("v".into())));
        assert!(!order.contains(&FocusTarget::ClearSearch));
    }

    #[test]
    fn dropdown_options_are_sorted() {
        let s = session();
        assert_eq!(s.tag_options(), ["derby".to_string()]);
        assert!(s.player_options().is_empty());
        let seasons: Vec<&str> = s.season_options().iter().map(SeasonId::as_str).collect();
        assert_eq!(seasons, vec!["1", "2"]);
    }
}
