// SPDX-License-Identifier: MPL-2.0
//! Query services (CQRS read-side).
//!
//! # Available Services
//!
//! - [`filter_engine`]: Derives the Visible-Set from the catalog and the
//!   current filter state (`FilterEngine`)

pub mod filter_engine;

// Re-export main types
pub use filter_engine::{FilterEngine, FilterOutcome, FilterTiming};
