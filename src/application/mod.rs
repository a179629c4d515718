// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`query`]: Filter engine (read-side over the catalog)
//! - [`lightbox`]: Lightbox state machine
//! - [`focus_trap`]: Keyboard focus trap for modal containers
//! - [`gallery`]: Session tying the above together behind a command interface
//! - [`timer`]: Generation-tagged timers shared by all of them
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Presentation layer drives the application layer through commands and
//!   executes the side effects it returns
//!
//! # Example
//!
//! ```ignore
//! use ifl_gallery::application::gallery::{GallerySession, GallerySettings};
//!
//! let mut session = GallerySession::new(catalog, GallerySettings::default());
//! for command in session.open(&"s6_image_1".into()) {
//!     // sleep on timers, load images, ...
//! }
//! ```

pub mod focus_trap;
pub mod gallery;
pub mod lightbox;
pub mod query;
pub mod timer;
