// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timeline_zoom --heading-base-level=0

//! Understory Timeline Zoom: tiered + continuous zoom for Gantt-style timelines.
//!
//! A Gantt timeline usually offers a handful of zoom *tiers* (day detail,
//! week overview, month, quarter, year) and, within each tier, a continuous
//! *factor* for fine adjustment. This crate models that hybrid as a small,
//! headless state machine and keeps every row and header pixel-aligned to the
//! same calendar reference across arbitrary sequences of zoom commands.
//!
//! The core concepts are:
//!
//! - [`ZoomLevel`]: one tier's constants (id, name, base pixels per calendar
//!   unit, maximum factor, step).
//! - [`ZoomCatalog`]: an immutable, validated list of tiers, finest first.
//! - [`ZoomState`]: the current `(tier, factor)` of one view.
//! - [`ZoomEngine`]: pure transition logic for zoom-in, zoom-out, set-factor
//!   and set-level, including the tier-entry policy and boundary detection.
//! - [`AlignmentCalculator`]: pixel density and scroll geometry, with
//!   anchor capture/restore so a chosen calendar unit keeps its screen
//!   position across a transition.
//! - [`TimelineZoom`]: the per-view controller combining the above and
//!   notifying subscribers after each change.
//!
//! It does **not** render headers, format dates, or interpret input
//! devices. Calendar positions are opaque `i64` ordinals; callers map them
//! to and from dates. Hosts are expected to:
//!
//! - Build one [`ZoomCatalog`] per session and share it between views.
//! - Map buttons, sliders, wheel or pinch gestures onto [`TimelineZoom`]
//!   commands.
//! - Re-render when a subscriber is notified (or when a command returns
//!   `changed == true`).
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_timeline_zoom::{
//!     AlignmentCalculator, Boundary, TimelineZoom, ZoomCatalog, ZoomLevel,
//! };
//!
//! let catalog = ZoomCatalog::new([
//!     ZoomLevel::new("day", "Day", 60.0, 1.5, 0.5),
//!     ZoomLevel::new("month", "Month", 8.0, 2.0, 0.5),
//! ])
//! .unwrap();
//! let mut zoom = TimelineZoom::new(Arc::new(catalog));
//!
//! // One year of days in an 800px viewport.
//! zoom.attach_viewport(AlignmentCalculator::new(0, 365, 800.0, 1.0));
//! zoom.subscribe(|state| {
//!     // Re-render here.
//!     let _ = state.factor();
//! });
//!
//! zoom.zoom_in();
//! assert_eq!(zoom.current_factor(), 1.5);
//! assert_eq!(zoom.pixels_per_unit(), 90.0);
//!
//! let outcome = zoom.zoom_in();
//! assert!(!outcome.changed);
//! assert_eq!(outcome.boundary, Some(Boundary::GlobalMaximum));
//!
//! // Leaving a tier towards a coarser one enters it at its maximum factor.
//! zoom.zoom_out();
//! zoom.zoom_out();
//! assert_eq!(zoom.current_level().id(), "month");
//! assert_eq!(zoom.current_factor(), 2.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): compile against the standard library.
//! - `serde`: `Serialize`/`Deserialize` for [`ZoomLevel`] and
//!   [`AlignmentAnchor`], `Serialize` for [`ZoomState`].
//! - `tracing`: emit `tracing` events for transitions, boundaries,
//!   re-anchoring and catalog rejection.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod alignment;
mod catalog;
mod controller;
mod engine;
mod level;
mod listeners;
mod state;

pub use alignment::{AlignmentAnchor, AlignmentCalculator, AlignmentDebugInfo};
pub use catalog::{ConfigurationError, ZoomCatalog};
pub use controller::{AnchorMode, TimelineZoom};
pub use engine::{Boundary, InvalidLevelReference, ZoomEngine, ZoomOutcome};
pub use level::{FACTOR_EPSILON, ZoomLevel};
pub use listeners::{ListenerId, ZoomListener};
pub use state::ZoomState;
