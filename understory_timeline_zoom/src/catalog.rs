// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, validated list of zoom tiers.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::level::{FACTOR_EPSILON, ZoomLevel};

/// Error returned when a tier list violates the catalog invariants.
///
/// Catalogs are validated once, before any [`ZoomState`](crate::ZoomState)
/// can be derived from them; an invalid catalog never reaches the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigurationError {
    /// Fewer than two tiers were supplied.
    TooFewLevels {
        /// Number of tiers supplied.
        count: usize,
    },
    /// A tier has an empty identifier.
    EmptyId {
        /// Position of the offending tier.
        index: usize,
    },
    /// Two tiers share an identifier.
    DuplicateId {
        /// Position of the second tier carrying the identifier.
        index: usize,
        /// The repeated identifier.
        id: String,
    },
    /// A tier's base pixel density is not a finite, positive number.
    NonPositiveBasePixels {
        /// Position of the offending tier.
        index: usize,
        /// The rejected density.
        base_pixels_per_unit: f64,
    },
    /// A tier is not strictly coarser than its predecessor.
    NonMonotonic {
        /// Position of the tier whose density is not below the previous one.
        index: usize,
        /// Density of the previous tier.
        previous: f64,
        /// Density of the offending tier.
        current: f64,
    },
    /// A tier's maximum factor is below `1.0` (or not finite).
    MaxFactorBelowOne {
        /// Position of the offending tier.
        index: usize,
        /// The rejected maximum factor.
        max_factor: f64,
    },
    /// A tier's step is not finite or not larger than [`FACTOR_EPSILON`].
    InvalidStep {
        /// Position of the offending tier.
        index: usize,
        /// The rejected step.
        step: f64,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewLevels { count } => {
                write!(f, "zoom catalog needs at least two levels, got {count}")
            }
            Self::EmptyId { index } => write!(f, "zoom level {index} has an empty id"),
            Self::DuplicateId { index, id } => {
                write!(f, "zoom level {index} reuses id {id:?}")
            }
            Self::NonPositiveBasePixels {
                index,
                base_pixels_per_unit,
            } => write!(
                f,
                "zoom level {index} has invalid base pixels per unit {base_pixels_per_unit}"
            ),
            Self::NonMonotonic {
                index,
                previous,
                current,
            } => write!(
                f,
                "zoom level {index} is not coarser than its predecessor ({current} >= {previous} pixels per unit)"
            ),
            Self::MaxFactorBelowOne { index, max_factor } => {
                write!(f, "zoom level {index} has max factor {max_factor} below 1.0")
            }
            Self::InvalidStep { index, step } => {
                write!(f, "zoom level {index} has invalid step {step}")
            }
        }
    }
}

impl core::error::Error for ConfigurationError {}

/// Immutable, ordered list of zoom tiers.
///
/// Index `0` is the finest tier (most pixels per calendar unit); every
/// following index is strictly coarser. Neighbor queries use this ordering:
/// the *finer* neighbor of `i` is `i - 1`, the *coarser* neighbor is `i + 1`.
///
/// A catalog is built once per session and shared (typically behind an
/// `Arc`) by every timeline view.
///
/// ```rust
/// use understory_timeline_zoom::{ZoomCatalog, ZoomLevel};
///
/// let catalog = ZoomCatalog::new([
///     ZoomLevel::new("day", "Day", 60.0, 2.0, 0.5),
///     ZoomLevel::new("week", "Week", 20.0, 2.5, 0.5),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.index_of("week"), Some(1));
/// assert_eq!(catalog.finer_neighbor(1), Some(0));
/// assert_eq!(catalog.coarser_neighbor(1), None);
/// ```
#[derive(Clone, Debug)]
pub struct ZoomCatalog {
    levels: Vec<ZoomLevel>,
    by_id: HashMap<String, usize>,
}

impl ZoomCatalog {
    /// Validates `levels` and builds a catalog from them.
    ///
    /// Levels are taken in order, finest first. Fails if there are fewer
    /// than two levels, if base densities are not strictly decreasing, if a
    /// maximum factor is below `1.0`, if a step is not positive, or if ids
    /// are empty or repeated.
    pub fn new(levels: impl IntoIterator<Item = ZoomLevel>) -> Result<Self, ConfigurationError> {
        let levels: Vec<ZoomLevel> = levels.into_iter().collect();
        match validate(&levels) {
            Ok(by_id) => Ok(Self { levels, by_id }),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "rejected zoom catalog");
                Err(err)
            }
        }
    }

    /// A Day / Week / Month / Quarter / Year catalog over a one-day base unit.
    ///
    /// Every tier boundary in this catalog is seamless (see
    /// [`Self::is_seamless`]), so zooming in always increases magnification.
    #[must_use]
    pub fn gantt_default() -> Self {
        let levels = alloc::vec![
            ZoomLevel::new("day", "Day", 40.0, 2.0, 0.5),
            ZoomLevel::new("week", "Week", 12.0, 3.0, 0.5),
            ZoomLevel::new("month", "Month", 3.0, 3.5, 0.5),
            ZoomLevel::new("quarter", "Quarter", 1.0, 2.5, 0.5),
            ZoomLevel::new("year", "Year", 0.25, 3.0, 0.5),
        ];
        let by_id = levels
            .iter()
            .enumerate()
            .map(|(index, level)| (String::from(level.id()), index))
            .collect();
        let catalog = Self { levels, by_id };
        debug_assert!(
            validate(&catalog.levels).is_ok(),
            "built-in catalog must be valid"
        );
        catalog
    }

    /// Number of tiers. Always at least two.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; a valid catalog has at least two tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the tier at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ZoomLevel> {
        self.levels.get(index)
    }

    /// All tiers, finest first.
    #[must_use]
    pub fn levels(&self) -> &[ZoomLevel] {
        &self.levels
    }

    /// Index of the finest tier.
    #[must_use]
    pub fn finest_index(&self) -> usize {
        0
    }

    /// Index of the coarsest tier.
    #[must_use]
    pub fn coarsest_index(&self) -> usize {
        self.levels.len() - 1
    }

    /// The next finer tier, or `None` when `index` is the finest (or out of range).
    #[must_use]
    pub fn finer_neighbor(&self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.levels.len() {
            None
        } else {
            Some(index - 1)
        }
    }

    /// The next coarser tier, or `None` when `index` is the coarsest (or out of range).
    #[must_use]
    pub fn coarser_neighbor(&self, index: usize) -> Option<usize> {
        let next = index.checked_add(1)?;
        (next < self.levels.len()).then_some(next)
    }

    /// Looks up a tier by id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Returns `true` if crossing into a finer tier always magnifies.
    ///
    /// Zoom-in enters a finer tier at factor `1.0`. The transition only
    /// increases magnification when each tier's base density exceeds the
    /// next coarser tier's density at its maximum factor.
    #[must_use]
    pub fn is_seamless(&self) -> bool {
        self.levels.windows(2).all(|pair| {
            pair[0].base_pixels_per_unit() > pair[1].pixels_per_unit(pair[1].max_factor())
        })
    }
}

fn validate(levels: &[ZoomLevel]) -> Result<HashMap<String, usize>, ConfigurationError> {
    if levels.len() < 2 {
        return Err(ConfigurationError::TooFewLevels {
            count: levels.len(),
        });
    }
    let mut by_id = HashMap::with_capacity(levels.len());
    let mut previous: Option<f64> = None;
    for (index, level) in levels.iter().enumerate() {
        if level.id().is_empty() {
            return Err(ConfigurationError::EmptyId { index });
        }
        let base = level.base_pixels_per_unit();
        if !(base.is_finite() && base > 0.0) {
            return Err(ConfigurationError::NonPositiveBasePixels {
                index,
                base_pixels_per_unit: base,
            });
        }
        if let Some(previous) = previous
            && base >= previous
        {
            return Err(ConfigurationError::NonMonotonic {
                index,
                previous,
                current: base,
            });
        }
        let max_factor = level.max_factor();
        if !(max_factor.is_finite() && max_factor >= 1.0) {
            return Err(ConfigurationError::MaxFactorBelowOne { index, max_factor });
        }
        let step = level.step();
        if !(step.is_finite() && step > FACTOR_EPSILON) {
            return Err(ConfigurationError::InvalidStep { index, step });
        }
        if by_id.insert(String::from(level.id()), index).is_some() {
            return Err(ConfigurationError::DuplicateId {
                index,
                id: String::from(level.id()),
            });
        }
        previous = Some(base);
    }
    Ok(by_id)
}
