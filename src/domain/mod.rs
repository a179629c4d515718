// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core gallery types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`media`]: Catalog types ([`MediaItem`](media::MediaItem), [`Season`](media::Season))
//!   and the filter model ([`FilterState`](media::FilterState))

pub mod media;
