// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! The config directory is resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI argument** (`--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variable** (`IFL_GALLERY_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate
//!
//! The catalog location is not resolved here: it comes from the command line
//! or the `[gallery]` section of the settings file, relative to the working
//! directory by default.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "IflGallery";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "IFL_GALLERY_CONFIG_DIR";

/// Global CLI override for config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes the CLI override for the config directory.
///
/// Should be called once at startup, before any path is resolved. Later
/// calls are ignored and logged.
pub fn init_cli_overrides(config_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::warn!("CLI config dir override already initialized, ignoring");
    }
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

/// Returns the application config directory path.
///
/// This directory holds the user preferences (`settings.toml`).
///
/// - Linux: `~/.config/IflGallery/`
/// - macOS: `~/Library/Application Support/IflGallery/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\IflGallery\`
///
/// Returns `None` if the config directory cannot be determined.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory, preferring `override_path` over the CLI
/// override, then the environment, then the platform default.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .or_else(get_cli_config_dir)
        .or_else(env_config_dir)
        .or_else(|| dirs::config_dir().map(|base| base.join(APP_NAME)))
}

/// `IFL_GALLERY_CONFIG_DIR`, ignored when empty.
fn env_config_dir() -> Option<PathBuf> {
    std::env::var_os(ENV_CONFIG_DIR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Directory where lightbox downloads are copied.
///
/// Falls back to the home directory when the platform has no download
/// folder.
pub fn get_download_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(dirs::home_dir)
}
