// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view zoom controller: state, geometry, and subscribers.

use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::alignment::{AlignmentAnchor, AlignmentCalculator};
use crate::catalog::ZoomCatalog;
use crate::engine::{InvalidLevelReference, ZoomEngine, ZoomOutcome};
use crate::level::ZoomLevel;
use crate::listeners::{ListenerId, Listeners};
use crate::state::ZoomState;

/// Which calendar unit keeps its screen position across a transition.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum AnchorMode {
    /// The leftmost visible unit.
    #[default]
    LeadingEdge,
    /// The unit under the given viewport coordinate (for example the
    /// pointer position for wheel zoom).
    ViewPoint(f64),
}

/// Zoom controller owned by one timeline view.
///
/// `TimelineZoom` holds the view's [`ZoomState`], an optional
/// [`AlignmentCalculator`] describing its horizontal geometry, and the
/// listeners interested in zoom changes. Every command:
///
/// 1. asks the [`ZoomEngine`] for the next state,
/// 2. if the state changed, applies the new density to the attached
///    geometry and scrolls so the anchor unit keeps its screen offset,
/// 3. commits the state, bumps [`Self::revision`], and notifies listeners
///    synchronously.
///
/// The anchor is captured under the old density on the first transition
/// and then kept for consecutive zoom commands, so a unit stays put across a
/// whole zoom gesture even when clamping or snapping would otherwise hand
/// the "leftmost unit" role to a neighbor. Any mutable access to the
/// geometry, a new anchor mode, or [`Self::reset_anchor`] drops it.
///
/// No-ops neither re-anchor nor notify. Commands run to completion before
/// returning; there is no queuing or coalescing, so a button press and a
/// slider drag in the same frame simply apply in call order.
///
/// ```rust
/// use std::sync::Arc;
/// use understory_timeline_zoom::{AlignmentCalculator, TimelineZoom, ZoomCatalog};
///
/// let catalog = Arc::new(ZoomCatalog::gantt_default());
/// let mut zoom = TimelineZoom::new(catalog);
/// zoom.attach_viewport(AlignmentCalculator::new(0, 365, 800.0, 1.0));
///
/// let outcome = zoom.zoom_out();
/// assert!(outcome.changed);
/// assert_eq!(zoom.current_level().id(), "week");
/// assert_eq!(zoom.pixels_per_unit(), 36.0);
/// ```
#[derive(Debug)]
pub struct TimelineZoom {
    catalog: Arc<ZoomCatalog>,
    state: ZoomState,
    revision: u64,
    alignment: Option<AlignmentCalculator>,
    anchor_mode: AnchorMode,
    anchor: Option<AlignmentAnchor>,
    listeners: Listeners,
}

impl TimelineZoom {
    /// Creates a controller at the finest tier, factor `1.0`.
    #[must_use]
    pub fn new(catalog: Arc<ZoomCatalog>) -> Self {
        Self {
            catalog,
            state: ZoomState::initial(),
            revision: 0,
            alignment: None,
            anchor_mode: AnchorMode::default(),
            anchor: None,
            listeners: Listeners::default(),
        }
    }

    /// Creates a controller at the tier `id`, with `factor` clamped into
    /// that tier's range.
    pub fn with_initial_level(
        catalog: Arc<ZoomCatalog>,
        id: &str,
        factor: f64,
    ) -> Result<Self, InvalidLevelReference> {
        let state = {
            let engine = ZoomEngine::new(&catalog);
            let state = engine.set_level(ZoomState::initial(), id)?.state;
            engine.set_factor(state, factor).state
        };
        Ok(Self {
            state,
            ..Self::new(catalog)
        })
    }

    /// The shared catalog.
    #[must_use]
    pub fn catalog(&self) -> &ZoomCatalog {
        &self.catalog
    }

    /// A transition engine over this controller's catalog.
    #[must_use]
    pub fn engine(&self) -> ZoomEngine<'_> {
        ZoomEngine::new(&self.catalog)
    }

    /// The current state snapshot.
    #[must_use]
    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Number of committed transitions so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The current tier.
    #[must_use]
    pub fn current_level(&self) -> &ZoomLevel {
        &self.catalog.levels()[self.state.level_index()]
    }

    /// The current continuous factor.
    #[must_use]
    pub fn current_factor(&self) -> f64 {
        self.state.factor()
    }

    /// Returns `true` at the coarsest tier, factor `1.0`.
    #[must_use]
    pub fn is_at_global_minimum(&self) -> bool {
        self.engine().is_at_global_minimum(self.state)
    }

    /// Returns `true` at the finest tier, maximum factor.
    #[must_use]
    pub fn is_at_global_maximum(&self) -> bool {
        self.engine().is_at_global_maximum(self.state)
    }

    /// Current pixels per base calendar unit.
    #[must_use]
    pub fn pixels_per_unit(&self) -> f64 {
        AlignmentCalculator::pixel_width(self.current_level(), self.state.factor())
    }

    /// Zooms in by the current tier's step.
    pub fn zoom_in(&mut self) -> ZoomOutcome {
        let outcome = self.engine().zoom_in(self.state);
        self.apply(outcome)
    }

    /// Zooms in by an explicit step.
    pub fn zoom_in_by(&mut self, step: f64) -> ZoomOutcome {
        let outcome = self.engine().zoom_in_by(self.state, step);
        self.apply(outcome)
    }

    /// Zooms out by the current tier's step.
    pub fn zoom_out(&mut self) -> ZoomOutcome {
        let outcome = self.engine().zoom_out(self.state);
        self.apply(outcome)
    }

    /// Zooms out by an explicit step.
    pub fn zoom_out_by(&mut self, step: f64) -> ZoomOutcome {
        let outcome = self.engine().zoom_out_by(self.state, step);
        self.apply(outcome)
    }

    /// Sets the factor inside the current tier, clamping out-of-range input.
    pub fn set_factor(&mut self, value: f64) -> ZoomOutcome {
        let outcome = self.engine().set_factor(self.state, value);
        self.apply(outcome)
    }

    /// Switches to the tier `id` at factor `1.0`.
    ///
    /// On error the state, geometry and revision are unchanged and no
    /// listener is notified.
    pub fn set_level(&mut self, id: &str) -> Result<ZoomOutcome, InvalidLevelReference> {
        let outcome = self.engine().set_level(self.state, id)?;
        Ok(self.apply(outcome))
    }

    /// Switches to the tier at `index` at factor `1.0`.
    pub fn set_level_index(&mut self, index: usize) -> Result<ZoomOutcome, InvalidLevelReference> {
        let outcome = self.engine().set_level_index(self.state, index)?;
        Ok(self.apply(outcome))
    }

    /// Attaches the view geometry, replacing any previous one.
    ///
    /// The geometry's density is set to the current zoom without
    /// re-anchoring.
    pub fn attach_viewport(&mut self, mut alignment: AlignmentCalculator) {
        alignment.set_pixels_per_unit(self.pixels_per_unit());
        self.alignment = Some(alignment);
        self.anchor = None;
    }

    /// Detaches and returns the view geometry.
    pub fn detach_viewport(&mut self) -> Option<AlignmentCalculator> {
        self.anchor = None;
        self.alignment.take()
    }

    /// The attached view geometry.
    #[must_use]
    pub fn alignment(&self) -> Option<&AlignmentCalculator> {
        self.alignment.as_ref()
    }

    /// Mutable access to the attached geometry, for scrolling and resizing.
    ///
    /// Drops the held anchor; the next transition captures a fresh one.
    pub fn alignment_mut(&mut self) -> Option<&mut AlignmentCalculator> {
        self.anchor = None;
        self.alignment.as_mut()
    }

    /// The anchor held for the current zoom gesture, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<AlignmentAnchor> {
        self.anchor
    }

    /// Drops the held anchor so the next transition captures a fresh one.
    pub fn reset_anchor(&mut self) {
        self.anchor = None;
    }

    /// How the anchor unit is chosen for subsequent transitions.
    #[must_use]
    pub fn anchor_mode(&self) -> AnchorMode {
        self.anchor_mode
    }

    /// Sets how the anchor unit is chosen for subsequent transitions.
    pub fn set_anchor_mode(&mut self, mode: AnchorMode) {
        self.anchor_mode = mode;
        self.anchor = None;
    }

    /// Registers a listener called with the new state after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&ZoomState) + 'static) -> ListenerId {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn capture_anchor(&self, alignment: &AlignmentCalculator) -> AlignmentAnchor {
        match self.anchor_mode {
            AnchorMode::LeadingEdge => alignment.capture_anchor(),
            AnchorMode::ViewPoint(x) => alignment.capture_anchor_at(x),
        }
    }

    fn apply(&mut self, outcome: ZoomOutcome) -> ZoomOutcome {
        if !outcome.changed {
            return outcome;
        }
        let density = self.engine().pixels_per_unit(outcome.state);
        if let Some(mut alignment) = self.alignment.take() {
            let anchor = match self.anchor {
                Some(anchor) => anchor,
                None => self.capture_anchor(&alignment),
            };
            alignment.apply_density(density, anchor);
            self.alignment = Some(alignment);
            self.anchor = Some(anchor);
        }
        self.state = outcome.state;
        self.revision += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            level = self.state.level_index(),
            factor = self.state.factor(),
            revision = self.revision,
            listeners = self.listeners.len(),
            "zoom committed"
        );
        self.listeners.notify(&self.state);
        outcome
    }
}
