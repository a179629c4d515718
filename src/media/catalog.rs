// SPDX-License-Identifier: MPL-2.0
//! Gallery catalog loading and lookup.
//!
//! The catalog is the league's `gallery.json`:
//!
//! ```json
//! { "seasons": { "6": { "images": [ { "id": "s6_image_1", "full": "...", ... } ] } } }
//! ```
//!
//! It is parsed once, flattened into catalog order (seasons, then list order)
//! and indexed by id. Every entry carries an [`ItemMirror`] so filtering never
//! has to look at item metadata again.

use crate::domain::media::{ItemMirror, MediaId, MediaItem, MediaKind, Season, SeasonId};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// On-disk catalog layout.
#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    seasons: HashMap<String, RawSeason>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSeason {
    #[serde(default)]
    images: Option<Vec<RawItem>>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    full: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    alt: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(rename = "match", default)]
    match_label: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    players: Option<Vec<String>>,
    #[serde(default)]
    youtube_id: Option<String>,
}

/// Empty strings in the catalog mean "absent".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawItem {
    fn into_item(self) -> Result<MediaItem> {
        let kind = match self.kind.as_deref() {
            Some("video") => {
                let youtube_id = non_empty(self.youtube_id).ok_or_else(|| {
                    Error::Catalog(format!("video '{}' has no youtube_id", self.id))
                })?;
                MediaKind::Video { youtube_id }
            }
            _ => MediaKind::Image,
        };

        Ok(MediaItem {
            id: MediaId::new(self.id),
            kind,
            full: self.full,
            thumbnail: non_empty(self.thumbnail),
            alt: self.alt,
            caption: non_empty(self.caption),
            match_label: non_empty(self.match_label),
            date: non_empty(self.date),
            tags: self.tags.unwrap_or_default(),
            players: self.players.unwrap_or_default(),
        })
    }
}

/// Orders season keys the way the site iterates them: integer keys
/// ascending by value, then any other key lexicographically.
fn compare_seasons(a: &SeasonId, b: &SeasonId) -> Ordering {
    match (a.number(), b.number()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.as_str().cmp(b.as_str()),
    }
}

/// One catalog item together with its season and filter mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub season: SeasonId,
    pub item: MediaItem,
    pub mirror: ItemMirror,
}

/// Read-only media catalog in natural (season-then-list) order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    seasons: Vec<SeasonId>,
    entries: Vec<CatalogEntry>,
    index: HashMap<MediaId, usize>,
}

impl Catalog {
    /// Creates an empty catalog (no gallery data on this page).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a catalog from seasons, ordering them by season key.
    ///
    /// Ids must be unique; a repeated id keeps its first occurrence and the
    /// duplicate is skipped with a warning.
    #[must_use]
    pub fn from_seasons(mut seasons: Vec<Season>) -> Self {
        seasons.sort_by(|a, b| compare_seasons(&a.id, &b.id));

        let mut catalog = Self::default();
        for season in seasons {
            catalog.seasons.push(season.id.clone());
            for item in season.items {
                if catalog.index.contains_key(&item.id) {
                    tracing::warn!(id = %item.id, season = %season.id, "duplicate media id skipped");
                    continue;
                }
                catalog.index.insert(item.id.clone(), catalog.entries.len());
                catalog.entries.push(CatalogEntry {
                    season: season.id.clone(),
                    mirror: ItemMirror::new(season.id.clone(), &item),
                    item,
                });
            }
        }
        catalog
    }

    /// Parses a catalog from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if the JSON is malformed. A single bad
    /// entry (a video without its `youtube_id`) is skipped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let mut seasons = Vec::with_capacity(raw.seasons.len());
        for (key, raw_season) in raw.seasons {
            let items = raw_season
                .images
                .unwrap_or_default()
                .into_iter()
                .filter_map(|raw| {
                    let id = raw.id.clone();
                    raw.into_item()
                        .inspect_err(|err| tracing::warn!(season = %key, id = %id, "skipping entry: {err}"))
                        .ok()
                })
                .collect();
            seasons.push(Season {
                id: SeasonId::new(key),
                items,
            });
        }
        Ok(Self::from_seasons(seasons))
    }

    /// Loads a catalog file from disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a catalog error if
    /// it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            seasons = catalog.seasons.len(),
            items = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: &MediaId) -> Option<&MediaItem> {
        self.entry(id).map(|entry| &entry.item)
    }

    /// Looks up an entry (item, season, mirror) by id.
    #[must_use]
    pub fn entry(&self, id: &MediaId) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Season ids in catalog order, including seasons without media.
    #[must_use]
    pub fn season_ids(&self) -> &[SeasonId] {
        &self.seasons
    }

    /// Sorted, de-duplicated tags across the whole catalog.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.collect_sorted(|entry| &entry.item.tags)
    }

    /// Sorted, de-duplicated player names across the whole catalog.
    #[must_use]
    pub fn players(&self) -> Vec<String> {
        self.collect_sorted(|entry| &entry.item.players)
    }

    fn collect_sorted<'a>(&'a self, field: impl Fn(&'a CatalogEntry) -> &'a Vec<String>) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| field(entry).iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns the total number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "seasons": {
            "10": { "images": [ { "id": "s10_image_1", "full": "/static/a.webp", "alt": "a" } ] },
            "2": { "images": [
                { "id": "s2_image_1", "full": "/static/b.webp", "alt": "b", "caption": "Final", "tags": ["final"], "players": ["Sam"] },
                { "id": "s2_video_1", "type": "video", "youtube_id": "abc123", "full": "", "alt": "v", "match": "" }
            ] },
            "9": {}
        }
    }"#;

    #[test]
    fn seasons_are_ordered_numerically() {
        let catalog = Catalog::from_json_str(SAMPLE).expect("parse");
        let ids: Vec<&str> = catalog.season_ids().iter().map(SeasonId::as_str).collect();
        assert_eq!(ids, vec!["2", "9", "10"]);
        let items: Vec<&str> = catalog.entries().iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(items, vec!["s2_image_1", "s2_video_1", "s10_image_1"]);
    }

    #[test]
    fn lookup_by_id_returns_item_and_season() {
        let catalog = Catalog::from_json_str(SAMPLE).expect("parse");
        let id = MediaId::new("s2_video_1");
        let item = catalog.get(&id).expect("item");
        assert_eq!(
            item.kind,
            MediaKind::Video {
                youtube_id: "abc123".into()
            }
        );
        assert_eq!(item.match_label, None);
        assert_eq!(
            catalog.entry(&id).map(|entry| entry.season.as_str()),
            Some("2")
        );
        assert!(catalog.get(&MediaId::new("missing")).is_none());
    }

    #[test]
    fn video_without_youtube_id_is_skipped() {
        let json = r#"{ "seasons": { "1": { "images": [
            { "id": "a", "full": "/static/a.webp" },
            { "id": "v", "type": "video", "full": "" },
            { "id": "b", "full": "/static/b.webp" }
        ] } } }"#;
        let catalog = Catalog::from_json_str(json).expect("parse");
        let items: Vec<&str> = catalog.entries().iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(items, vec!["a", "b"]);
        assert!(catalog.get(&MediaId::new("v")).is_none());
    }

    #[test]
    fn null_image_list_counts_as_empty_season() {
        let json = r#"{ "seasons": {
            "1": { "images": null },
            "2": { "images": [ { "id": "s2_image_1", "full": "/static/c.webp" } ] }
        } }"#;
        let catalog = Catalog::from_json_str(json).expect("parse");
        let ids: Vec<&str> = catalog.season_ids().iter().map(SeasonId::as_str).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn missing_seasons_key_yields_empty_catalog() {
        let catalog = Catalog::from_json_str("{}").expect("parse");
        assert!(catalog.is_empty());
        assert!(catalog.season_ids().is_empty());
    }

    #[test]
    fn tag_and_player_options_are_sorted_and_unique() {
        let json = r#"{ "seasons": { "1": { "images": [
            { "id": "a", "full": "", "tags": ["derby", "cup"], "players": ["Zed"] },
            { "id": "b", "full": "", "tags": ["cup"], "players": ["Amy", "Zed"] }
        ] } } }"#;
        let catalog = Catalog::from_json_str(json).expect("parse");
        assert_eq!(catalog.tags(), vec!["cup", "derby"]);
        assert_eq!(catalog.players(), vec!["Amy", "Zed"]);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let json = r#"{ "seasons": {
            "1": { "images": [ { "id": "dup", "full": "/first.webp" } ] },
            "2": { "images": [ { "id": "dup", "full": "/second.webp" } ] }
        } }"#;
        let catalog = Catalog::from_json_str(json).expect("parse");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&MediaId::new("dup")).map(|i| i.full.as_str()), Some("/first.webp"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, SAMPLE).expect("write");
        let catalog = Catalog::load(&path).expect("load");
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Catalog::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
