// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure zoom transition logic.
//!
//! [`ZoomEngine`] computes the next [`ZoomState`] from the current one and a
//! requested command. It owns no state of its own; callers (usually
//! [`TimelineZoom`](crate::TimelineZoom)) commit the returned state.
//!
//! ## Transition rules
//!
//! With `level` the current tier and `step` the requested increment
//! (the tier's own step by default):
//!
//! - **Zoom in**: if `factor + step <= level.max_factor`, the factor grows
//!   inside the tier. Otherwise the engine moves to the finer neighbor and
//!   enters it at factor `1.0`. On the finest tier the factor is clamped to
//!   its maximum; once there, zoom-in is a no-op reporting
//!   [`Boundary::GlobalMaximum`].
//! - **Zoom out**: if `factor - step >= 1.0`, the factor shrinks inside the
//!   tier. Otherwise the engine moves to the coarser neighbor and enters it
//!   at that tier's *maximum* factor. On the coarsest tier the factor is
//!   clamped to `1.0`; once there, zoom-out is a no-op reporting
//!   [`Boundary::GlobalMinimum`].
//! - **Set factor** clamps into the current tier's range and never changes
//!   tier.
//! - **Set level** switches tier and always resets the factor to `1.0`.
//!
//! The two entry policies mirror each other, so a zoom-in immediately
//! followed by a zoom-out restores the original state for any state reached
//! by whole steps on a step-aligned catalog.
//!
//! Every committed factor is rounded to the decimal precision of the step
//! that produced it, so long runs of increments do not drift.

use alloc::string::String;
use core::fmt;

use crate::catalog::ZoomCatalog;
use crate::level::{FACTOR_EPSILON, ZoomLevel, decimal_places, round_to_places};
use crate::state::ZoomState;

/// Global extreme reported when a zoom command cannot move any further.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Coarsest tier at factor `1.0`: nothing left to zoom out to.
    GlobalMinimum,
    /// Finest tier at its maximum factor: nothing left to zoom in to.
    GlobalMaximum,
}

/// Result of a zoom command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomOutcome {
    /// State before the command.
    pub previous: ZoomState,
    /// State after the command. Equal to `previous` when nothing changed.
    pub state: ZoomState,
    /// Whether the command changed the state. Hosts can skip re-rendering
    /// when this is `false`.
    pub changed: bool,
    /// Set when a zoom-in / zoom-out was a no-op because the view already
    /// sits at a global extreme.
    pub boundary: Option<Boundary>,
}

impl ZoomOutcome {
    fn unchanged(state: ZoomState, boundary: Option<Boundary>) -> Self {
        Self {
            previous: state,
            state,
            changed: false,
            boundary,
        }
    }

    /// Returns `true` if the command moved to a different tier.
    #[must_use]
    pub fn crossed_tier(&self) -> bool {
        self.previous.level_index() != self.state.level_index()
    }
}

/// Error returned when a tier reference does not resolve in the catalog.
///
/// The state is left unchanged when this is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidLevelReference {
    /// No tier carries this id.
    UnknownId(String),
    /// The index is past the end of the catalog.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of tiers in the catalog.
        len: usize,
    },
}

impl fmt::Display for InvalidLevelReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId(id) => write!(f, "no zoom level with id {id:?}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "zoom level index {index} out of range for {len} levels")
            }
        }
    }
}

impl core::error::Error for InvalidLevelReference {}

/// Stateless transition function over a [`ZoomCatalog`].
///
/// ```rust
/// use understory_timeline_zoom::{ZoomCatalog, ZoomEngine, ZoomState};
///
/// let catalog = ZoomCatalog::gantt_default();
/// let engine = ZoomEngine::new(&catalog);
///
/// // Day tier, factor 1.0 -> 1.5.
/// let outcome = engine.zoom_in(ZoomState::initial());
/// assert!(outcome.changed);
/// assert_eq!(outcome.state.factor(), 1.5);
///
/// // Zooming out of the day tier enters the week tier at its maximum.
/// let outcome = engine.zoom_out(ZoomState::initial());
/// assert_eq!(outcome.state.level_index(), 1);
/// assert_eq!(outcome.state.factor(), 3.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ZoomEngine<'a> {
    catalog: &'a ZoomCatalog,
}

impl<'a> ZoomEngine<'a> {
    /// Creates an engine over `catalog`.
    #[must_use]
    pub fn new(catalog: &'a ZoomCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this engine transitions over.
    #[must_use]
    pub fn catalog(&self) -> &'a ZoomCatalog {
        self.catalog
    }

    /// Zooms in by the current tier's step.
    #[must_use]
    pub fn zoom_in(&self, state: ZoomState) -> ZoomOutcome {
        let state = self.normalize(state);
        let step = self.level(state).step();
        self.zoom_in_by(state, step)
    }

    /// Zooms in by an explicit `step`.
    ///
    /// A non-finite step, or one no larger than [`FACTOR_EPSILON`], leaves the
    /// state unchanged.
    #[must_use]
    pub fn zoom_in_by(&self, state: ZoomState, step: f64) -> ZoomOutcome {
        let state = self.normalize(state);
        if !(step.is_finite() && step > FACTOR_EPSILON) {
            return ZoomOutcome::unchanged(state, None);
        }
        let index = state.level_index();
        let level = self.level(state);
        let target = state.factor() + step;

        if target <= level.max_factor() + FACTOR_EPSILON {
            let factor = level.clamp_factor(round_for(level, step, target));
            return self.commit(state, ZoomState::new(index, factor));
        }
        if let Some(finer) = self.catalog.finer_neighbor(index) {
            return self.commit(state, ZoomState::new(finer, 1.0));
        }
        if state.factor() < level.max_factor() - FACTOR_EPSILON {
            return self.commit(state, ZoomState::new(index, level.max_factor()));
        }
        self.boundary(state, Boundary::GlobalMaximum)
    }

    /// Zooms out by the current tier's step.
    #[must_use]
    pub fn zoom_out(&self, state: ZoomState) -> ZoomOutcome {
        let state = self.normalize(state);
        let step = self.level(state).step();
        self.zoom_out_by(state, step)
    }

    /// Zooms out by an explicit `step`.
    ///
    /// A non-finite step, or one no larger than [`FACTOR_EPSILON`], leaves the
    /// state unchanged.
    #[must_use]
    pub fn zoom_out_by(&self, state: ZoomState, step: f64) -> ZoomOutcome {
        let state = self.normalize(state);
        if !(step.is_finite() && step > FACTOR_EPSILON) {
            return ZoomOutcome::unchanged(state, None);
        }
        let index = state.level_index();
        let level = self.level(state);
        let target = state.factor() - step;

        if target >= 1.0 - FACTOR_EPSILON {
            let factor = level.clamp_factor(round_for(level, step, target));
            return self.commit(state, ZoomState::new(index, factor));
        }
        if let Some(coarser) = self.catalog.coarser_neighbor(index) {
            let entry = self.catalog.levels()[coarser].max_factor();
            return self.commit(state, ZoomState::new(coarser, entry));
        }
        if state.factor() > 1.0 + FACTOR_EPSILON {
            return self.commit(state, ZoomState::new(index, 1.0));
        }
        self.boundary(state, Boundary::GlobalMinimum)
    }

    /// Sets the factor inside the current tier.
    ///
    /// Out-of-range values are clamped into `[1.0, max_factor]` rather than
    /// rejected, and `NaN` is treated as `1.0`. The tier never changes.
    #[must_use]
    pub fn set_factor(&self, state: ZoomState, value: f64) -> ZoomOutcome {
        let state = self.normalize(state);
        let level = self.level(state);
        let factor = level.clamp_factor(round_to_places(
            level.clamp_factor(value),
            level.decimal_places(),
        ));
        self.commit(state, ZoomState::new(state.level_index(), factor))
    }

    /// Switches to the tier with the given id, at factor `1.0`.
    pub fn set_level(
        &self,
        state: ZoomState,
        id: &str,
    ) -> Result<ZoomOutcome, InvalidLevelReference> {
        let index = self
            .catalog
            .index_of(id)
            .ok_or_else(|| InvalidLevelReference::UnknownId(String::from(id)))?;
        self.set_level_index(state, index)
    }

    /// Switches to the tier at `index`, at factor `1.0`.
    pub fn set_level_index(
        &self,
        state: ZoomState,
        index: usize,
    ) -> Result<ZoomOutcome, InvalidLevelReference> {
        if index >= self.catalog.len() {
            return Err(InvalidLevelReference::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            });
        }
        let state = self.normalize(state);
        Ok(self.commit(state, ZoomState::new(index, 1.0)))
    }

    /// Returns `true` if the state is the coarsest tier at factor `1.0`.
    ///
    /// Zoom-out keeps shrinking the coarsest tier's factor down to `1.0`, so
    /// that, not the tier's maximum, is the lowest reachable magnification.
    #[must_use]
    pub fn is_at_global_minimum(&self, state: ZoomState) -> bool {
        state.level_index() == self.catalog.coarsest_index()
            && state.factor() <= 1.0 + FACTOR_EPSILON
    }

    /// Returns `true` if the state is the finest tier at its maximum factor.
    #[must_use]
    pub fn is_at_global_maximum(&self, state: ZoomState) -> bool {
        state.level_index() == self.catalog.finest_index()
            && state.factor()
                >= self.catalog.levels()[self.catalog.finest_index()].max_factor() - FACTOR_EPSILON
    }

    /// Pixels per base calendar unit for `state`.
    #[must_use]
    pub fn pixels_per_unit(&self, state: ZoomState) -> f64 {
        let state = self.normalize(state);
        self.level(state).pixels_per_unit(state.factor())
    }

    /// Coerces a state from a foreign catalog into this one.
    ///
    /// The tier index is clamped to the catalog and the factor to the tier.
    /// States produced by this engine pass through unchanged.
    #[must_use]
    pub fn normalize(&self, state: ZoomState) -> ZoomState {
        let index = state.level_index().min(self.catalog.coarsest_index());
        let level = &self.catalog.levels()[index];
        if index == state.level_index() && level.contains_factor(state.factor()) {
            return state;
        }
        ZoomState::new(index, level.clamp_factor(state.factor()))
    }

    fn level(&self, state: ZoomState) -> &'a ZoomLevel {
        &self.catalog.levels()[state.level_index()]
    }

    fn commit(&self, previous: ZoomState, next: ZoomState) -> ZoomOutcome {
        if previous.approx_eq(&next) {
            return ZoomOutcome::unchanged(previous, None);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            from_level = previous.level_index(),
            from_factor = previous.factor(),
            to_level = next.level_index(),
            to_factor = next.factor(),
            "zoom transition"
        );
        ZoomOutcome {
            previous,
            state: next,
            changed: true,
            boundary: None,
        }
    }

    fn boundary(&self, state: ZoomState, boundary: Boundary) -> ZoomOutcome {
        #[cfg(feature = "tracing")]
        tracing::trace!(?boundary, level = state.level_index(), "zoom boundary reached");
        ZoomOutcome::unchanged(state, Some(boundary))
    }
}

/// Rounds `value` to the finer of the tier's and the applied step's precision.
fn round_for(level: &ZoomLevel, step: f64, value: f64) -> f64 {
    let places = level.decimal_places().max(decimal_places(step));
    round_to_places(value, places)
}
