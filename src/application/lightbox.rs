// SPDX-License-Identifier: MPL-2.0
//! Lightbox controller: full-size presentation of one catalog item.
//!
//! The controller is a two-state machine, `Closed` or `Open(current id)`.
//! Transitions never touch the UI directly; they return [`LightboxEffect`]s
//! (image loads, preloads, scroll lock, focus trap) that the presentation
//! layer executes.
//!
//! Image loads are tagged with a [`LoadToken`]. Only the result carrying the
//! session's outstanding token is applied, so a slow load started by an
//! earlier `open` can never overwrite a newer item.

use crate::domain::media::{MediaId, MediaItem, MediaKind, SeasonId};
use crate::media::catalog::Catalog;
use std::fmt;

/// Placeholder shown when a full-size image cannot be loaded.
pub const FALLBACK_IMAGE: &str = "/static/Images/Logo/logo.png";

/// Horizontal displacement a swipe must exceed to navigate.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Embedded videos never start on their own.
const VIDEO_AUTOPLAY: bool = false;

/// Builds the YouTube embed address for a video.
#[must_use]
pub fn youtube_embed_url(youtube_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{youtube_id}?autoplay={}&rel=0&modestbranding=1",
        u8::from(VIDEO_AUTOPLAY)
    )
}

/// Suggested file name when downloading an image.
#[must_use]
pub fn download_filename(id: &MediaId) -> String {
    format!("{id}.webp")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxError {
    /// The requested id does not resolve to a catalog item.
    NotFound(MediaId),
}

impl fmt::Display for LightboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightboxError::NotFound(id) => write!(f, "Media '{id}' not found in catalog"),
        }
    }
}

impl std::error::Error for LightboxError {}

/// Navigation direction inside the Visible-Set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Signed step applied to the current position.
    #[must_use]
    pub fn delta(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Identifies one full-size image load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: LoadToken,
    pub id: MediaId,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Loading,
    Ready,
    /// The load failed; the placeholder is shown instead.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub href: String,
    pub filename: String,
}

/// What occupies the media area of the lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Video {
        embed_url: String,
    },
    Image {
        url: String,
        alt: String,
        status: ImageStatus,
        download: Download,
    },
}

impl Stage {
    /// Address to display, substituting the placeholder after a failed load.
    #[must_use]
    pub fn displayed_url(&self) -> Option<&str> {
        match self {
            Stage::Video { .. } => None,
            Stage::Image {
                status: ImageStatus::Fallback,
                ..
            } => Some(FALLBACK_IMAGE),
            Stage::Image { url, .. } => Some(url),
        }
    }

    /// Download action, hidden for videos.
    #[must_use]
    pub fn download(&self) -> Option<&Download> {
        match self {
            Stage::Video { .. } => None,
            Stage::Image { download, .. } => Some(download),
        }
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        matches!(self, Stage::Video { .. })
    }
}

/// Everything the lightbox shows for the current item.
///
/// Optional fields are hidden by the view when absent; an absent caption is
/// rendered with the localized "Untitled" label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub id: MediaId,
    pub stage: Stage,
    /// 1-based position in the Visible-Set, absent if the item is filtered out.
    pub position: Option<usize>,
    pub total: usize,
    pub caption: Option<String>,
    pub match_label: Option<String>,
    pub season: SeasonId,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub players: Vec<String>,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxEffect {
    LoadImage(LoadRequest),
    /// Warm the cache with these full-size addresses.
    Preload(Vec<String>),
    LockScroll,
    UnlockScroll,
    ActivateFocusTrap,
    DeactivateFocusTrap,
}

#[derive(Debug, Clone)]
struct Session {
    presentation: Presentation,
    pending_load: Option<LoadToken>,
}

/// The lightbox state machine.
#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    session: Option<Session>,
    next_token: u64,
}

impl Lightbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&MediaId> {
        self.session.as_ref().map(|s| &s.presentation.id)
    }

    #[must_use]
    pub fn presentation(&self) -> Option<&Presentation> {
        self.session.as_ref().map(|s| &s.presentation)
    }

    /// Opens (or reopens) the lightbox on `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LightboxError::NotFound`] when `id` is not in the catalog.
    /// The current state is left untouched in that case.
    pub fn open(
        &mut self,
        id: &MediaId,
        catalog: &Catalog,
        visible: &[MediaId],
    ) -> Result<Vec<LightboxEffect>, LightboxError> {
        let Some(entry) = catalog.entry(id) else {
            tracing::warn!(%id, "lightbox open aborted: media not found");
            return Err(LightboxError::NotFound(id.clone()));
        };
        let item = &entry.item;

        let mut effects = Vec::new();
        let was_open = self.is_open();

        let (stage, pending_load) = match &item.kind {
            MediaKind::Video { youtube_id } => (
                Stage::Video {
                    embed_url: youtube_embed_url(youtube_id),
                },
                None,
            ),
            MediaKind::Image => {
                let token = self.issue_token();
                effects.push(LightboxEffect::LoadImage(LoadRequest {
                    token,
                    id: item.id.clone(),
                    url: item.full.clone(),
                }));
                (
                    Stage::Image {
                        url: item.full.clone(),
                        alt: item.alt.clone(),
                        status: ImageStatus::Loading,
                        download: Download {
                            href: item.full.clone(),
                            filename: download_filename(&item.id),
                        },
                    },
                    Some(token),
                )
            }
        };

        let presentation = Presentation {
            id: item.id.clone(),
            stage,
            position: visible.iter().position(|v| v == id).map(|i| i + 1),
            total: visible.len(),
            caption: item.caption.clone(),
            match_label: item.match_label.clone(),
            season: entry.season.clone(),
            date: item.date.clone(),
            tags: item.tags.clone(),
            players: item.players.clone(),
        };

        self.session = Some(Session {
            presentation,
            pending_load,
        });

        if !was_open {
            effects.push(LightboxEffect::ActivateFocusTrap);
            effects.push(LightboxEffect::LockScroll);
        }

        let neighbours = preload_targets(id, catalog, visible);
        if !neighbours.is_empty() {
            effects.push(LightboxEffect::Preload(neighbours));
        }

        tracing::debug!(%id, "lightbox opened");
        Ok(effects)
    }

    /// Closes the lightbox. No-op when already closed.
    pub fn close(&mut self) -> Vec<LightboxEffect> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };

        // Dropping the session also drops any video embed address.
        tracing::debug!(id = %session.presentation.id, "lightbox closed");
        vec![
            LightboxEffect::UnlockScroll,
            LightboxEffect::DeactivateFocusTrap,
        ]
    }

    /// Moves to the previous/next visible item, wrapping at both ends.
    ///
    /// No-op when closed, when nothing is visible, or when the current item
    /// has been filtered out of the Visible-Set.
    pub fn navigate(
        &mut self,
        direction: Direction,
        catalog: &Catalog,
        visible: &[MediaId],
    ) -> Vec<LightboxEffect> {
        let Some(current) = self.current_id() else {
            return Vec::new();
        };
        let Some(target) = step(visible, current, direction.delta()) else {
            return Vec::new();
        };
        let target = target.clone();
        self.open(&target, catalog, visible).unwrap_or_default()
    }

    /// Applies the result of an image load.
    ///
    /// Returns `false` and changes nothing when `token` is not the current
    /// session's outstanding request.
    pub fn finish_image_load(&mut self, token: LoadToken, succeeded: bool) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.pending_load != Some(token) {
            tracing::debug!("discarding stale image load");
            return false;
        }
        session.pending_load = None;

        if let Stage::Image { status, url, .. } = &mut session.presentation.stage {
            if succeeded {
                *status = ImageStatus::Ready;
            } else {
                tracing::warn!(url = %url, "full-size image failed to load, using placeholder");
                *status = ImageStatus::Fallback;
            }
        }
        true
    }

    fn issue_token(&mut self) -> LoadToken {
        self.next_token = self.next_token.wrapping_add(1);
        LoadToken(self.next_token)
    }
}

/// Id `delta` steps away from `current` in `visible`, with wraparound.
fn step<'a>(visible: &'a [MediaId], current: &MediaId, delta: isize) -> Option<&'a MediaId> {
    let len = visible.len();
    let index = visible.iter().position(|v| v == current)?;
    let len_i = isize::try_from(len).ok()?;
    let index_i = isize::try_from(index).ok()?;
    let next = usize::try_from((index_i + delta).rem_euclid(len_i)).ok()?;
    visible.get(next)
}

/// Full-size addresses of the neighbours of `id`, skipping videos.
fn preload_targets(id: &MediaId, catalog: &Catalog, visible: &[MediaId]) -> Vec<String> {
    let mut urls: Vec<String> = Vec::with_capacity(2);
    for delta in [-1, 1] {
        let Some(neighbour) = step(visible, id, delta) else {
            continue;
        };
        if neighbour == id {
            continue;
        }
        if let Some(MediaItem {
            kind: MediaKind::Image,
            full,
            ..
        }) = catalog.get(neighbour)
        {
            if !urls.contains(full) {
                urls.push(full.clone());
            }
        }
    }
    urls
}

/// Turns a horizontal touch gesture into a navigation direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f32>,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            start_x: None,
            threshold,
        }
    }

    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Ends the gesture. A leftward swipe means next, a rightward one previous.
    pub fn end(&mut self, x: f32) -> Option<Direction> {
        let start = self.start_x.take()?;
        let diff = start - x;
        if diff > self.threshold {
            Some(Direction::Next)
        } else if diff < -self.threshold {
            Some(Direction::Previous)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }
}
