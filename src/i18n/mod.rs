// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Localization uses the Fluent system. Translation files are embedded at
//! build time from `assets/i18n/`.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Pluralised messages through Fluent selectors
//! - Fallback to `en-US` when a key is missing in the active locale

pub mod fluent;

pub use fluent::I18n;
