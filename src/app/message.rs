// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::gallery::GalleryKey;
use crate::application::lightbox::LoadToken;
use crate::error::Error;
use crate::media::ImageData;
use crate::ui::{gallery, lightbox};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    Lightbox(lightbox::Message),
    /// A key the gallery reacts to.
    Key(GalleryKey),
    /// Horizontal position where a touch began on the lightbox.
    TouchStarted(f32),
    /// Horizontal position where the touch was lifted.
    TouchEnded(f32),
    SearchDebounceElapsed(u64),
    FadeElapsed(u64),
    FocusElapsed(u64),
    /// Result of the full-size load the lightbox asked for.
    ImageLoaded {
        token: LoadToken,
        result: Result<ImageData, Error>,
    },
    /// Result from prefetching a neighbour in the background.
    ImagePrefetched {
        path: PathBuf,
        result: Result<ImageData, Error>,
    },
    DownloadFinished(Result<PathBuf, Error>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Catalog file to open instead of the configured one.
    pub catalog_path: Option<String>,
    /// Asset root override for `/static/...` addresses.
    pub asset_root: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `IFL_GALLERY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
