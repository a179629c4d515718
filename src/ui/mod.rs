// SPDX-License-Identifier: MPL-2.0
//! User interface components, following the Elm-style "state down, messages
//! up" pattern.
//!
//! - [`gallery`] - Filter bar, count badge and thumbnail grid
//! - [`lightbox`] - Full-size overlay with navigation and metadata
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod gallery;
pub mod lightbox;
pub mod styles;
pub mod theming;
