// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `(tier, factor)` snapshot of one timeline view.

use crate::catalog::ZoomCatalog;
use crate::level::{FACTOR_EPSILON, ZoomLevel};

/// Current tier and continuous factor of one timeline view.
///
/// States are produced by [`ZoomEngine`](crate::ZoomEngine) and
/// [`TimelineZoom`](crate::TimelineZoom); there is no public constructor other
/// than [`ZoomState::initial`], so every externally visible state satisfies
/// `1.0 <= factor <= max_factor` of its tier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZoomState {
    level_index: usize,
    factor: f64,
}

impl ZoomState {
    pub(crate) const fn new(level_index: usize, factor: f64) -> Self {
        Self {
            level_index,
            factor,
        }
    }

    /// The default state: finest tier at factor `1.0`.
    ///
    /// Valid for every catalog, since catalogs always have a tier `0` whose
    /// maximum factor is at least `1.0`.
    #[must_use]
    pub const fn initial() -> Self {
        Self::new(0, 1.0)
    }

    /// Ordinal index of the current tier in its catalog.
    #[must_use]
    pub const fn level_index(&self) -> usize {
        self.level_index
    }

    /// Current continuous factor.
    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }

    /// Resolves the current tier against `catalog`.
    #[must_use]
    pub fn level<'a>(&self, catalog: &'a ZoomCatalog) -> Option<&'a ZoomLevel> {
        catalog.get(self.level_index)
    }

    /// Effective magnification: pixels per base calendar unit.
    ///
    /// Returns `None` if the state's tier does not exist in `catalog`.
    #[must_use]
    pub fn pixels_per_unit(&self, catalog: &ZoomCatalog) -> Option<f64> {
        self.level(catalog)
            .map(|level| level.pixels_per_unit(self.factor))
    }

    /// Same tier, and factors equal within [`FACTOR_EPSILON`].
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.level_index == other.level_index
            && (self.factor - other.factor).abs() <= FACTOR_EPSILON
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::initial()
    }
}
