// SPDX-License-Identifier: MPL-2.0
//! `ifl_gallery` browses the IFL league's season photos and match videos.
//!
//! The gallery page filters the catalog by season, tag, player and free
//! text; the lightbox shows one item at a time with keyboard, button and
//! swipe navigation. The `import` subcommand turns a folder of photos into
//! WebP renditions and catalog entries.

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod importer;
pub mod media;
pub mod ui;
