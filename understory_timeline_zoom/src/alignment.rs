// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel geometry and scroll anchoring for a horizontal timeline.

use core::ops::Range;

use crate::level::ZoomLevel;

/// A calendar unit and the screen offset it must keep across a zoom change.
///
/// `offset` is measured from the viewport's left edge in device pixels; it
/// is negative when the unit starts left of the viewport (for example the
/// partially scrolled-out leftmost unit).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentAnchor {
    /// Calendar ordinal of the anchored unit.
    pub unit: i64,
    /// Offset of the unit's leading edge from the viewport origin.
    pub offset: f64,
}

/// Horizontal geometry of one timeline view.
///
/// The content is a strip of `unit_count` calendar units starting at ordinal
/// `origin`; unit `u` starts at content coordinate
/// `(u - origin) * pixels_per_unit`. The viewport shows
/// `[scroll_offset, scroll_offset + viewport_width)` of that strip.
///
/// Calendar positions are opaque ordinals here; no calendar arithmetic is
/// performed. Scroll offsets are snapped to whole device pixels and clamped
/// to `[0, max_scroll_offset]`.
///
/// ```rust
/// use understory_timeline_zoom::AlignmentCalculator;
///
/// // 365 days, 800px viewport, 40px per day.
/// let mut view = AlignmentCalculator::new(0, 365, 800.0, 40.0);
/// view.set_scroll_offset(1_010.0);
///
/// let anchor = view.capture_anchor();
/// assert_eq!(anchor.unit, 25);
/// assert_eq!(anchor.offset, -10.0);
///
/// // Halve the density; unit 25 keeps its screen position.
/// view.apply_density(20.0, anchor);
/// assert_eq!(view.unit_to_view_x(25), -10.0);
/// ```
#[derive(Clone, Debug)]
pub struct AlignmentCalculator {
    origin: i64,
    unit_count: u64,
    viewport_width: f64,
    pixels_per_unit: f64,
    scroll_offset: f64,
}

impl AlignmentCalculator {
    /// Creates the geometry for `unit_count` units starting at `origin`,
    /// scrolled to the start.
    ///
    /// Non-finite or non-positive densities fall back to `1.0`; negative
    /// viewport widths are treated as empty.
    #[must_use]
    pub fn new(origin: i64, unit_count: u64, viewport_width: f64, pixels_per_unit: f64) -> Self {
        Self {
            origin,
            unit_count,
            viewport_width: sanitize_width(viewport_width),
            pixels_per_unit: sanitize_density(pixels_per_unit),
            scroll_offset: 0.0,
        }
    }

    /// Width of one calendar unit at `factor` inside `level`.
    ///
    /// Every header and row must derive its geometry from this function so
    /// that all of them stay aligned.
    #[must_use]
    #[inline]
    pub fn pixel_width(level: &ZoomLevel, factor: f64) -> f64 {
        level.pixels_per_unit(factor)
    }

    /// Width of `units` consecutive calendar units at `factor` inside `level`.
    #[must_use]
    pub fn span_width(level: &ZoomLevel, factor: f64, units: u64) -> f64 {
        Self::pixel_width(level, factor) * units as f64
    }

    /// Ordinal of the first content unit.
    #[must_use]
    pub fn origin(&self) -> i64 {
        self.origin
    }

    /// Number of content units.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.unit_count
    }

    /// Replaces the content range and re-clamps the scroll offset.
    pub fn set_content(&mut self, origin: i64, unit_count: u64) {
        self.origin = origin;
        self.unit_count = unit_count;
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Viewport width in device pixels.
    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Resizes the viewport and re-clamps the scroll offset.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = sanitize_width(width);
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Current density in pixels per calendar unit.
    #[must_use]
    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    /// Changes the density without re-anchoring.
    ///
    /// The scroll offset is kept (clamped to the new range). Use
    /// [`Self::apply_density`] to keep a unit fixed on screen instead.
    pub fn set_pixels_per_unit(&mut self, pixels_per_unit: f64) {
        self.pixels_per_unit = sanitize_density(pixels_per_unit);
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Total content width in pixels.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.unit_count as f64 * self.pixels_per_unit
    }

    /// Largest valid scroll offset; `0` when the content fits the viewport.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    /// Current scroll offset in content pixels.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Scrolls to `offset`, snapped to a whole pixel and clamped to the valid range.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = if offset.is_nan() { 0.0 } else { offset };
        let max = libm::floor(self.max_scroll_offset());
        self.scroll_offset = libm::round(offset).clamp(0.0, max);
    }

    /// Scrolls by `delta` pixels.
    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Content coordinate of the leading edge of `unit`.
    #[must_use]
    pub fn unit_to_content_x(&self, unit: i64) -> f64 {
        unit.saturating_sub(self.origin) as f64 * self.pixels_per_unit
    }

    /// Viewport coordinate of the leading edge of `unit`.
    #[must_use]
    pub fn unit_to_view_x(&self, unit: i64) -> f64 {
        self.unit_to_content_x(unit) - self.scroll_offset
    }

    /// Calendar unit under viewport coordinate `view_x`.
    ///
    /// Coordinates outside the content map to units outside
    /// `origin..origin + unit_count`.
    #[must_use]
    pub fn view_x_to_unit(&self, view_x: f64) -> i64 {
        let units = libm::floor((view_x + self.scroll_offset) / self.pixels_per_unit);
        self.origin.saturating_add(units_to_i64(units))
    }

    /// Units at least partially visible in the viewport.
    #[must_use]
    pub fn visible_units(&self) -> Range<i64> {
        let count = self.unit_count as f64;
        let first = libm::floor(self.scroll_offset / self.pixels_per_unit).clamp(0.0, count);
        let end = libm::ceil((self.scroll_offset + self.viewport_width) / self.pixels_per_unit)
            .clamp(first, count);
        self.origin.saturating_add(units_to_i64(first))..self.origin.saturating_add(units_to_i64(end))
    }

    /// Captures the leftmost visible unit and its current screen offset.
    #[must_use]
    pub fn capture_anchor(&self) -> AlignmentAnchor {
        self.capture_anchor_at(0.0)
    }

    /// Captures the unit under `view_x` (for example the pointer position)
    /// and its current screen offset.
    ///
    /// The unit is clamped into the content range.
    #[must_use]
    pub fn capture_anchor_at(&self, view_x: f64) -> AlignmentAnchor {
        let last = self
            .origin
            .saturating_add(units_to_i64(self.unit_count.saturating_sub(1) as f64));
        let unit = self.view_x_to_unit(view_x).clamp(self.origin, last.max(self.origin));
        AlignmentAnchor {
            unit,
            offset: self.unit_to_view_x(unit),
        }
    }

    /// Switches to `pixels_per_unit` and scrolls so `anchor.unit` lands at
    /// `anchor.offset` again.
    ///
    /// The result is exact up to whole-pixel snapping, unless the required
    /// offset falls outside the valid scroll range (for example when the
    /// content became shorter than the viewport), in which case it is
    /// clamped. Returns the new scroll offset.
    pub fn apply_density(&mut self, pixels_per_unit: f64, anchor: AlignmentAnchor) -> f64 {
        self.pixels_per_unit = sanitize_density(pixels_per_unit);
        self.restore_anchor(anchor)
    }

    /// Scrolls so `anchor.unit` lands at `anchor.offset` under the current
    /// density. Returns the new scroll offset.
    pub fn restore_anchor(&mut self, anchor: AlignmentAnchor) -> f64 {
        self.set_scroll_offset(self.unit_to_content_x(anchor.unit) - anchor.offset);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            unit = anchor.unit,
            offset = anchor.offset,
            scroll = self.scroll_offset,
            error = self.anchor_error(anchor),
            "re-anchored timeline"
        );
        self.scroll_offset
    }

    /// Distance between `anchor.unit`'s current screen offset and `anchor.offset`.
    #[must_use]
    pub fn anchor_error(&self, anchor: AlignmentAnchor) -> f64 {
        (self.unit_to_view_x(anchor.unit) - anchor.offset).abs()
    }

    /// Snapshot of the current geometry for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> AlignmentDebugInfo {
        AlignmentDebugInfo {
            origin: self.origin,
            unit_count: self.unit_count,
            viewport_width: self.viewport_width,
            pixels_per_unit: self.pixels_per_unit,
            content_width: self.content_width(),
            scroll_offset: self.scroll_offset,
            max_scroll_offset: self.max_scroll_offset(),
            visible_units: self.visible_units(),
        }
    }
}

/// Debug snapshot of an [`AlignmentCalculator`].
#[derive(Clone, Debug)]
pub struct AlignmentDebugInfo {
    /// Ordinal of the first content unit.
    pub origin: i64,
    /// Number of content units.
    pub unit_count: u64,
    /// Viewport width in device pixels.
    pub viewport_width: f64,
    /// Current density.
    pub pixels_per_unit: f64,
    /// Total content width.
    pub content_width: f64,
    /// Current scroll offset.
    pub scroll_offset: f64,
    /// Largest valid scroll offset.
    pub max_scroll_offset: f64,
    /// Units at least partially visible.
    pub visible_units: Range<i64>,
}

fn sanitize_density(pixels_per_unit: f64) -> f64 {
    if pixels_per_unit.is_finite() && pixels_per_unit > 0.0 {
        pixels_per_unit
    } else {
        1.0
    }
}

fn sanitize_width(width: f64) -> f64 {
    if width.is_finite() { width.max(0.0) } else { 0.0 }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "callers pass whole unit counts; `as` saturates out-of-range values"
)]
fn units_to_i64(units: f64) -> i64 {
    units as i64
}

#[cfg(test)]
mod tests {
    use super::{AlignmentAnchor, AlignmentCalculator};
    use crate::level::ZoomLevel;

    #[test]
    fn pixel_width_matches_level_density() {
        let level = ZoomLevel::new("month", "Month", 30.0, 3.0, 0.5);
        assert_eq!(AlignmentCalculator::pixel_width(&level, 1.0), 30.0);
        assert_eq!(AlignmentCalculator::pixel_width(&level, 2.5), 75.0);
        assert_eq!(AlignmentCalculator::span_width(&level, 2.0, 7), 420.0);
    }

    #[test]
    fn unit_and_view_coordinates_roundtrip() {
        let mut view = AlignmentCalculator::new(1_000, 500, 600.0, 24.0);
        view.set_scroll_offset(240.0);

        assert_eq!(view.unit_to_content_x(1_010), 240.0);
        assert_eq!(view.unit_to_view_x(1_010), 0.0);
        assert_eq!(view.view_x_to_unit(0.0), 1_010);
        assert_eq!(view.view_x_to_unit(23.9), 1_010);
        assert_eq!(view.view_x_to_unit(24.0), 1_011);
        assert_eq!(view.visible_units(), 1_010..1_035);
    }

    #[test]
    fn scroll_offset_is_snapped_and_clamped() {
        let mut view = AlignmentCalculator::new(0, 100, 500.0, 10.0);
        assert_eq!(view.content_width(), 1_000.0);
        assert_eq!(view.max_scroll_offset(), 500.0);

        view.set_scroll_offset(123.4);
        assert_eq!(view.scroll_offset(), 123.0);
        view.scroll_by(10_000.0);
        assert_eq!(view.scroll_offset(), 500.0);
        view.set_scroll_offset(-5.0);
        assert_eq!(view.scroll_offset(), 0.0);
        view.set_scroll_offset(f64::NAN);
        assert_eq!(view.scroll_offset(), 0.0);
    }

    #[test]
    fn anchor_survives_density_change() {
        let mut view = AlignmentCalculator::new(0, 1_000, 800.0, 60.0);
        view.set_scroll_offset(6_030.0);
        let anchor = view.capture_anchor();
        assert_eq!(anchor, AlignmentAnchor { unit: 100, offset: -30.0 });

        for density in [90.0, 30.0, 12.5, 42.0, 3.0, 60.0] {
            view.apply_density(density, anchor);
            assert!(view.anchor_error(anchor) <= 0.5, "density {density}");
        }
    }

    #[test]
    fn anchor_at_view_point_keeps_that_unit_in_place() {
        let mut view = AlignmentCalculator::new(0, 1_000, 800.0, 20.0);
        view.set_scroll_offset(2_000.0);
        let anchor = view.capture_anchor_at(410.0);
        assert_eq!(anchor.unit, 120);
        assert_eq!(anchor.offset, 400.0);

        view.apply_density(50.0, anchor);
        assert_eq!(view.unit_to_view_x(120), 400.0);
    }

    #[test]
    fn anchor_is_clamped_when_content_shrinks() {
        let mut view = AlignmentCalculator::new(0, 100, 800.0, 40.0);
        view.set_scroll_offset(3_200.0);
        let anchor = view.capture_anchor();
        assert_eq!(anchor.unit, 80);

        // 100 units at 5px is 500px: shorter than the viewport.
        let scroll = view.apply_density(5.0, anchor);
        assert_eq!(scroll, 0.0);
        assert_eq!(view.max_scroll_offset(), 0.0);
        assert!(view.anchor_error(anchor) > 1.0);
    }

    #[test]
    fn capture_clamps_to_content_range() {
        let view = AlignmentCalculator::new(10, 5, 800.0, 10.0);
        assert_eq!(view.capture_anchor_at(700.0).unit, 14);
        assert_eq!(view.capture_anchor_at(-50.0).unit, 10);

        let empty = AlignmentCalculator::new(10, 0, 800.0, 10.0);
        assert_eq!(empty.capture_anchor().unit, 10);
        assert_eq!(empty.visible_units(), 10..10);
    }

    #[test]
    fn debug_info_reflects_geometry() {
        let mut view = AlignmentCalculator::new(0, 50, 100.0, 0.0);
        assert_eq!(view.pixels_per_unit(), 1.0);
        view.set_pixels_per_unit(4.0);
        view.set_viewport_width(-10.0);
        let info = view.debug_info();
        assert_eq!(info.pixels_per_unit, 4.0);
        assert_eq!(info.viewport_width, 0.0);
        assert_eq!(info.content_width, 200.0);
        assert_eq!(info.max_scroll_offset, 200.0);
        assert_eq!(info.visible_units, 0..0);
    }
}
