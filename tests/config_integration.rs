// SPDX-License-Identifier: MPL-2.0
use ifl_gallery::app::config::{self, Config, DEFAULT_SWIPE_THRESHOLD_PX};
use ifl_gallery::application::gallery::GallerySettings;
use ifl_gallery::i18n::I18n;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let mut english = Config::default();
    english.general.language = Some("en-US".to_string());
    config::save_to_path(&english, &config_path).expect("Failed to write english config");

    let loaded = config::load_from_path(&config_path).expect("Failed to load english config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("lightbox-untitled"), "Untitled");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &config_path).expect("Failed to write french config");

    let loaded = config::load_from_path(&config_path).expect("Failed to load french config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");

    // Command line wins over the settings file
    let i18n_cli = I18n::new(Some("en-US".to_string()), &loaded);
    assert_eq!(i18n_cli.current_locale().to_string(), "en-US");
}

#[test]
fn test_timings_from_settings_file_reach_the_gallery() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");
    std::fs::write(
        &config_path,
        "[gallery]\nsearch_debounce_ms = 120\nfade_ms = 0\n\n[lightbox]\nfocus_delay_ms = 10\n",
    )
    .expect("Failed to write settings");

    let loaded = config::load_from_path(&config_path).expect("Failed to load settings");
    let settings = loaded.gallery_settings();

    assert_eq!(settings.timing.search_debounce, Duration::from_millis(120));
    assert_eq!(settings.timing.fade, Duration::ZERO);
    assert_eq!(settings.focus_delay, Duration::from_millis(10));
    assert!((settings.swipe_threshold - DEFAULT_SWIPE_THRESHOLD_PX).abs() < f32::EPSILON);
}

#[test]
fn test_missing_settings_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(config.gallery_settings(), GallerySettings::default());
}
