// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery page and
//! the lightbox overlay.
//!
//! The `App` struct owns the [`GallerySession`] and everything the session
//! cannot hold itself: decoded images, the prefetch cache, localization and
//! theming. Session commands are turned into Iced tasks in [`update`].

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::gallery::GallerySession;
use crate::application::lightbox::FALLBACK_IMAGE;
use crate::domain::media::MediaId;
use crate::i18n::I18n;
use crate::media::{AssetResolver, Catalog, ImagePrefetchCache};
use crate::ui::theming::{ColorScheme, ThemeMode};
use iced::widget::image;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    session: GallerySession,
    assets: AssetResolver,
    /// Grid thumbnails, keyed by media id.
    thumbnails: HashMap<MediaId, image::Handle>,
    /// Decoded full-size image (or placeholder) of the lightbox item.
    picture: Option<image::Handle>,
    prefetch: ImagePrefetchCache,
    theme_mode: ThemeMode,
    colors: ColorScheme,
    /// Result line of the last download.
    download_status: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("items", &self.session.catalog().len())
            .field("lightbox_open", &self.session.lightbox().is_open())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an Fn boot closure; the flags are consumed once
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration and the catalog, then builds the initial state.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir.clone());
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        if let Some(key) = config_warning {
            tracing::warn!("{}", i18n.tr(&key));
        }

        let catalog_path = flags
            .catalog_path
            .as_ref()
            .map_or_else(|| config.catalog_path(), PathBuf::from);

        let catalog = match Catalog::load(&catalog_path) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!(path = %catalog_path.display(), "starting with an empty gallery: {err}");
                Catalog::empty()
            }
        };

        let assets = flags
            .asset_root
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config.gallery.asset_root.clone())
            .map_or_else(|| AssetResolver::for_catalog(&catalog_path), AssetResolver::new);

        tracing::info!(
            items = catalog.len(),
            catalog = %catalog_path.display(),
            assets = %assets.root().display(),
            "gallery loaded"
        );

        let thumbnails = build_thumbnails(&catalog, &assets);
        let theme_mode = config.general.theme_mode;

        let app = App {
            i18n,
            session: GallerySession::new(catalog, config.gallery_settings()),
            assets,
            thumbnails,
            picture: None,
            prefetch: ImagePrefetchCache::new(config.prefetch_config()),
            theme_mode,
            colors: theme_mode.colors(),
            download_status: None,
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.session.lightbox().presentation() {
            Some(presentation) => {
                let caption = crate::ui::lightbox::caption_label(presentation, &self.i18n);
                format!("{caption} - {app_name}")
            }
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription(self.session.lightbox().is_open())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            session: &mut self.session,
            assets: &self.assets,
            prefetch: &mut self.prefetch,
            picture: &mut self.picture,
            download_status: &mut self.download_status,
        };
        update::update(&mut ctx, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            session: &self.session,
            thumbnails: &self.thumbnails,
            picture: self.picture.as_ref(),
            download_status: self.download_status.as_deref(),
            colors: &self.colors,
        })
    }
}

/// Image handles for the grid.
///
/// Thumbnails that cannot be resolved locally show the site logo instead.
/// Decoding happens lazily in the renderer.
fn build_thumbnails(catalog: &Catalog, assets: &AssetResolver) -> HashMap<MediaId, image::Handle> {
    let fallback = assets.resolve(FALLBACK_IMAGE);
    catalog
        .entries()
        .iter()
        .filter_map(|entry| {
            let path = assets
                .resolve(entry.item.thumbnail_or_full())
                .filter(|path| path.exists())
                .or_else(|| fallback.clone())?;
            Some((entry.item.id.clone(), image::Handle::from_path(path)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn thumbnails_fall_back_to_logo_when_missing() {
        let root = tempdir().expect("temp dir");
        fs::create_dir_all(root.path().join("thumbs")).expect("thumbs dir");
        fs::write(root.path().join("thumbs/a.webp"), b"x").expect("thumb");

        let catalog = Catalog::from_json_str(
            r#"{ "seasons": { "1": { "images": [
                { "id": "a", "full": "/static/full/a.webp", "thumbnail": "/static/thumbs/a.webp", "alt": "a" },
                { "id": "b", "full": "/static/full/b.webp", "alt": "b" }
            ] } } }"#,
        )
        .expect("valid catalog");
        let assets = AssetResolver::new(root.path());

        let thumbnails = build_thumbnails(&catalog, &assets);
        assert_eq!(thumbnails.len(), 2);
        let path_of = |id: &str| match thumbnails.get(&MediaId::new(id)) {
            Some(image::Handle::Path(_, path)) => Some(path.clone()),
            _ => None,
        };
        assert_eq!(path_of("a"), Some(root.path().join("thumbs/a.webp")));
        assert_eq!(path_of("b"), Some(root.path().join("Images/Logo/logo.png")));
    }

    #[test]
    fn window_minimum_fits_inside_default() {
        assert!(MIN_WINDOW_WIDTH <= WINDOW_DEFAULT_WIDTH);
        assert!(MIN_WINDOW_HEIGHT <= WINDOW_DEFAULT_HEIGHT);
    }
}
