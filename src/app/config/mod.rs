// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[gallery]` - Catalog location, asset root and filter timings
//! - `[lightbox]` - Swipe threshold, focus delay and neighbour prefetching
//!
//! Numeric values outside their supported range are clamped when the
//! configuration is turned into runtime settings, so a hand-edited file can
//! never produce a zero-pixel swipe threshold or a multi-second focus delay.
//!
//! # Examples
//!
//! ```no_run
//! use ifl_gallery::app::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.gallery.search_debounce_ms = Some(150);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::gallery::GallerySettings;
use crate::application::query::FilterTiming;
use crate::error::{Error, Result};
use crate::media::PrefetchConfig;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Catalog file used when neither the command line nor the settings name one.
pub const DEFAULT_CATALOG_PATH: &str = "data/gallery.json";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Catalog location and filtering behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Path to `gallery.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Directory that `/static/...` addresses resolve against.
    /// Derived from the catalog location when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_root: Option<PathBuf>,

    /// Delay after the last keystroke before the search applies (ms).
    #[serde(
        default = "default_search_debounce_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub search_debounce_ms: Option<u64>,

    /// Grid fade played before each recompute (ms).
    #[serde(default = "default_fade_ms", skip_serializing_if = "Option::is_none")]
    pub fade_ms: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            asset_root: None,
            search_debounce_ms: default_search_debounce_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

/// Lightbox interaction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightboxConfig {
    /// Horizontal swipe distance that navigates (px).
    #[serde(
        default = "default_swipe_threshold_px",
        skip_serializing_if = "Option::is_none"
    )]
    pub swipe_threshold_px: Option<f32>,

    /// Delay before focus enters or leaves the lightbox (ms).
    #[serde(
        default = "default_focus_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub focus_delay_ms: Option<u64>,

    /// Whether neighbouring images are decoded ahead of navigation.
    #[serde(
        default = "default_prefetch_enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub prefetch_enabled: Option<bool>,

    /// Memory budget of the prefetch cache (MB).
    #[serde(
        default = "default_prefetch_cache_mb",
        skip_serializing_if = "Option::is_none"
    )]
    pub prefetch_cache_mb: Option<u32>,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: default_swipe_threshold_px(),
            focus_delay_ms: default_focus_delay_ms(),
            prefetch_enabled: default_prefetch_enabled(),
            prefetch_cache_mb: default_prefetch_cache_mb(),
        }
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub lightbox: LightboxConfig,
}

impl Config {
    /// Catalog path from the settings, or [`DEFAULT_CATALOG_PATH`].
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.gallery
            .catalog_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
    }

    /// Runtime tunables for the gallery session, clamped to safe ranges.
    #[must_use]
    pub fn gallery_settings(&self) -> GallerySettings {
        let search_debounce = self
            .gallery
            .search_debounce_ms
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS)
            .clamp(MIN_SEARCH_DEBOUNCE_MS, MAX_SEARCH_DEBOUNCE_MS);
        let fade = self
            .gallery
            .fade_ms
            .unwrap_or(DEFAULT_FADE_MS)
            .clamp(MIN_FADE_MS, MAX_FADE_MS);
        let swipe = self
            .lightbox
            .swipe_threshold_px
            .filter(|px| px.is_finite())
            .unwrap_or(DEFAULT_SWIPE_THRESHOLD_PX)
            .clamp(MIN_SWIPE_THRESHOLD_PX, MAX_SWIPE_THRESHOLD_PX);
        let focus_delay = self
            .lightbox
            .focus_delay_ms
            .unwrap_or(DEFAULT_FOCUS_DELAY_MS)
            .min(MAX_FOCUS_DELAY_MS);

        GallerySettings {
            timing: FilterTiming {
                search_debounce: Duration::from_millis(search_debounce),
                fade: Duration::from_millis(fade),
            },
            swipe_threshold: swipe,
            focus_delay: Duration::from_millis(focus_delay),
        }
    }

    #[must_use]
    pub fn prefetch_config(&self) -> PrefetchConfig {
        PrefetchConfig::new(
            self.lightbox.prefetch_enabled.unwrap_or(true),
            self.lightbox
                .prefetch_cache_mb
                .unwrap_or(DEFAULT_PREFETCH_CACHE_MB),
        )
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_search_debounce_ms() -> Option<u64> {
    Some(DEFAULT_SEARCH_DEBOUNCE_MS)
}

fn default_fade_ms() -> Option<u64> {
    Some(DEFAULT_FADE_MS)
}

fn default_swipe_threshold_px() -> Option<f32> {
    Some(DEFAULT_SWIPE_THRESHOLD_PX)
}

fn default_focus_delay_ms() -> Option<u64> {
    Some(DEFAULT_FOCUS_DELAY_MS)
}

fn default_prefetch_enabled() -> Option<bool> {
    Some(true)
}

fn default_prefetch_cache_mb() -> Option<u32> {
    Some(DEFAULT_PREFETCH_CACHE_MB)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), "{err}");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Dark,
            },
            gallery: GalleryConfig {
                catalog_path: Some(PathBuf::from("/srv/ifl/data/gallery.json")),
                asset_root: Some(PathBuf::from("/srv/ifl")),
                search_debounce_ms: Some(150),
                fade_ms: Some(0),
            },
            lightbox: LightboxConfig {
                swipe_threshold_px: Some(80.0),
                focus_delay_ms: Some(10),
                prefetch_enabled: Some(false),
                prefetch_cache_mb: Some(64),
            },
        };

        save_to_path(&config, &config_path).expect("save should succeed");
        let loaded = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("write file");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert!(config.general.language.is_none());
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_eq!(config.gallery.search_debounce_ms, Some(300));
        assert_eq!(config.gallery.fade_ms, Some(300));
        assert_eq!(config.lightbox.swipe_threshold_px, Some(50.0));
        assert_eq!(config.lightbox.focus_delay_ms, Some(50));
        assert_eq!(config.catalog_path(), PathBuf::from(DEFAULT_CATALOG_PATH));
    }

    #[test]
    fn default_config_yields_default_gallery_settings() {
        assert_eq!(
            Config::default().gallery_settings(),
            GallerySettings::default()
        );
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[lightbox]\nswipe_threshold_px = 70.0\n",
        )
        .expect("write file");

        let config = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(config.lightbox.swipe_threshold_px, Some(70.0));
        assert_eq!(config.lightbox.focus_delay_ms, Some(DEFAULT_FOCUS_DELAY_MS));
        assert_eq!(config.gallery, GalleryConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.gallery.search_debounce_ms = Some(60_000);
        config.gallery.fade_ms = Some(5_000);
        config.lightbox.swipe_threshold_px = Some(0.0);
        config.lightbox.focus_delay_ms = Some(10_000);
        config.lightbox.prefetch_cache_mb = Some(4_096);

        let settings = config.gallery_settings();
        assert_eq!(
            settings.timing.search_debounce,
            Duration::from_millis(MAX_SEARCH_DEBOUNCE_MS)
        );
        assert_eq!(settings.timing.fade, Duration::from_millis(MAX_FADE_MS));
        assert_eq!(settings.swipe_threshold, MIN_SWIPE_THRESHOLD_PX);
        assert_eq!(
            settings.focus_delay,
            Duration::from_millis(MAX_FOCUS_DELAY_MS)
        );
        assert_eq!(
            config.prefetch_config().max_bytes,
            MAX_PREFETCH_CACHE_MB as usize * 1024 * 1024
        );
    }

    #[test]
    fn non_finite_swipe_threshold_falls_back_to_default() {
        let mut config = Config::default();
        config.lightbox.swipe_threshold_px = Some(f32::NAN);
        assert_eq!(
            config.gallery_settings().swipe_threshold,
            DEFAULT_SWIPE_THRESHOLD_PX
        );
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let result = toml::from_str::<Config>("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn theme_mode_is_case_insensitive() {
        let config: Config =
            toml::from_str("[general]\ntheme_mode = \"Dark\"\n").expect("parse config");
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut config = Config::default();
        config.general.language = Some("en-US".to_string());
        config.gallery.catalog_path = Some(PathBuf::from("gallery.json"));

        save_with_override(&config, Some(base_dir.clone())).expect("save");
        assert!(base_dir.join("settings.toml").exists());

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let (config, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let config_path = base_dir.join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(
            warning.as_deref(),
            Some("notification-config-load-error")
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_with_override_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested = temp_dir.path().join("a").join("b");

        save_with_override(&Config::default(), Some(nested.clone())).expect("save");
        assert!(nested.join("settings.toml").exists());
    }

    #[test]
    fn saved_config_uses_sectioned_format() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save");
        let content = fs::read_to_string(&config_path).expect("read");
        assert!(content.contains("[general]"));
        assert!(content.contains("[gallery]"));
        assert!(content.contains("[lightbox]"));
    }
}
