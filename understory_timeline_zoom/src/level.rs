// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tier zoom configuration.

use alloc::string::String;

/// Tolerance applied to every zoom factor comparison.
///
/// Repeated additions of a step such as `0.1` drift away from the exact
/// decimal value; comparisons against `1.0` and a tier's maximum factor
/// absorb that drift with this epsilon.
pub const FACTOR_EPSILON: f64 = 1e-6;

/// Largest number of decimal places a factor is ever rounded to.
const MAX_DECIMAL_PLACES: u32 = 9;

const POW10: [f64; MAX_DECIMAL_PLACES as usize + 1] =
    [1.0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9];

/// Configuration record for one zoom tier.
///
/// A tier maps one base calendar unit (for example one day) to
/// `base_pixels_per_unit` pixels at factor `1.0`. Within the tier, the
/// continuous factor ranges over `[1.0, max_factor]` and moves in increments
/// of `step`.
///
/// Levels are plain data; their ordering and cross-tier invariants are
/// validated by [`ZoomCatalog::new`](crate::ZoomCatalog::new).
///
/// ```rust
/// use understory_timeline_zoom::ZoomLevel;
///
/// let week = ZoomLevel::new("week", "Week / Day", 60.0, 2.5, 0.5);
/// assert_eq!(week.pixels_per_unit(2.0), 120.0);
/// assert_eq!(week.decimal_places(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomLevel {
    id: String,
    name: String,
    base_pixels_per_unit: f64,
    max_factor: f64,
    step: f64,
}

impl ZoomLevel {
    /// Creates a tier record.
    ///
    /// No validation happens here; a catalog rejects invalid values when it
    /// is built.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_pixels_per_unit: f64,
        max_factor: f64,
        step: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_pixels_per_unit,
            max_factor,
            step,
        }
    }

    /// Returns this tier with a different maximum factor.
    #[must_use]
    pub fn with_max_factor(mut self, max_factor: f64) -> Self {
        self.max_factor = max_factor;
        self
    }

    /// Returns this tier with a different step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Stable identifier used by [`ZoomCatalog::index_of`](crate::ZoomCatalog::index_of).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name. Opaque to this crate.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixels per base calendar unit at factor `1.0`.
    #[must_use]
    pub fn base_pixels_per_unit(&self) -> f64 {
        self.base_pixels_per_unit
    }

    /// Largest continuous factor reachable inside this tier.
    #[must_use]
    pub fn max_factor(&self) -> f64 {
        self.max_factor
    }

    /// Default increment used by zoom-in / zoom-out inside this tier.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Pixel width of one base calendar unit at `factor`.
    ///
    /// All row and header geometry derives from this product.
    #[must_use]
    #[inline]
    pub fn pixels_per_unit(&self, factor: f64) -> f64 {
        self.base_pixels_per_unit * factor
    }

    /// Number of decimal places carried by [`Self::step`].
    ///
    /// `0.5` yields `1`, `0.25` yields `2`, `1.0` yields `0`.
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        decimal_places(self.step)
    }

    /// Clamps `factor` into `[1.0, max_factor]`. `NaN` maps to `1.0`.
    #[must_use]
    pub fn clamp_factor(&self, factor: f64) -> f64 {
        if factor.is_nan() {
            return 1.0;
        }
        // `max`/`min` instead of `clamp`: an unvalidated tier may carry
        // `max_factor < 1.0`.
        factor.max(1.0).min(self.max_factor)
    }

    /// Returns `true` if `factor` lies inside this tier's range, within
    /// [`FACTOR_EPSILON`].
    #[must_use]
    pub fn contains_factor(&self, factor: f64) -> bool {
        factor >= 1.0 - FACTOR_EPSILON && factor <= self.max_factor + FACTOR_EPSILON
    }

    /// Returns `true` if `max_factor` is reachable from `1.0` in whole steps.
    ///
    /// Zoom-in immediately followed by zoom-out only restores a tier's
    /// maximum factor exactly when the tier is step aligned.
    #[must_use]
    pub fn is_step_aligned(&self) -> bool {
        let steps = (self.max_factor - 1.0) / self.step;
        (steps - libm::round(steps)).abs() < FACTOR_EPSILON
    }
}

/// Number of decimal places needed to represent `step` exactly.
pub(crate) fn decimal_places(step: f64) -> u32 {
    let step = step.abs();
    for places in 0..=MAX_DECIMAL_PLACES {
        let scaled = step * POW10[places as usize];
        let rounded = libm::round(scaled);
        if rounded >= 1.0 && (scaled - rounded).abs() < FACTOR_EPSILON {
            return places;
        }
    }
    MAX_DECIMAL_PLACES
}

/// Rounds `value` half away from zero to `places` decimal places.
pub(crate) fn round_to_places(value: f64, places: u32) -> f64 {
    let scale = POW10[places.min(MAX_DECIMAL_PLACES) as usize];
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    libm::round(scaled) / scale
}
