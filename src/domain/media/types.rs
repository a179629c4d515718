// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent catalog entries exactly as the gallery sees them:
//! immutable after load and free of any serialization or presentation concern.

use std::fmt;

/// Identifier of a media item, unique within a catalog (e.g. `s6_image_12`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(String);

impl MediaId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of a season as used in the catalog keys (`"1"`, `"6"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonId(String);

impl SeasonId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it is an integer-like key.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a media item is and how it is presented.
///
/// A video always carries its YouTube id; an image never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    /// Still photo served from the gallery's asset tree.
    Image,
    /// Match video hosted on YouTube.
    Video { youtube_id: String },
}

impl MediaKind {
    #[must_use]
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video { .. })
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub id: MediaId,
    pub kind: MediaKind,
    /// Address of the full-resolution asset.
    pub full: String,
    /// Address of the grid thumbnail, when the catalog provides one.
    pub thumbnail: Option<String>,
    pub alt: String,
    pub caption: Option<String>,
    /// Match the media was taken at (e.g. "Week 3: Sharks vs Titans").
    pub match_label: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub players: Vec<String>,
}

impl MediaItem {
    /// Returns the thumbnail address, falling back to the full asset.
    #[must_use]
    pub fn thumbnail_or_full(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.full)
    }

    /// Text searched by the free-text filter: caption, match, tags and players
    /// joined by single spaces, lowercased.
    #[must_use]
    pub fn search_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2 + self.tags.len() + self.players.len());
        parts.push(self.caption.as_deref().unwrap_or(""));
        parts.push(self.match_label.as_deref().unwrap_or(""));
        parts.extend(self.tags.iter().map(String::as_str));
        parts.extend(self.players.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

/// A season and its media, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub id: SeasonId,
    pub items: Vec<MediaItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> MediaItem {
        MediaItem {
            id: MediaId::new("s1_image_1"),
            kind: MediaKind::Image,
            full: "/static/full/1.webp".into(),
            thumbnail: None,
            alt: "alt".into(),
            caption: Some("Derby Day".into()),
            match_label: Some("Sharks vs Titans".into()),
            date: None,
            tags: vec!["Derby".into()],
            players: vec!["Sam Ortiz".into()],
        }
    }

    #[test]
    fn search_text_joins_and_lowercases_fields() {
        assert_eq!(
            item().search_text(),
            "derby day sharks vs titans derby sam ortiz"
        );
    }

    #[test]
    fn search_text_tolerates_missing_caption_and_match() {
        let mut item = item();
        item.caption = None;
        item.match_label = None;
        assert_eq!(item.search_text(), "  derby sam ortiz");
    }

    #[test]
    fn thumbnail_falls_back_to_full() {
        let mut item = item();
        assert_eq!(item.thumbnail_or_full(), "/static/full/1.webp");
        item.thumbnail = Some("/static/thumbs/1.webp".into());
        assert_eq!(item.thumbnail_or_full(), "/static/thumbs/1.webp");
    }

    #[test]
    fn season_number_parses_integer_keys_only() {
        assert_eq!(SeasonId::new("12").number(), Some(12));
        assert_eq!(SeasonId::new("preseason").number(), None);
    }
}
