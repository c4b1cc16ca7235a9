// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the zoom engine and alignment.
//!
//! 1. Every reachable state keeps `1.0 <= factor <= max_factor`
//! 2. `set_factor` is idempotent
//! 3. Zoom-in followed by zoom-out restores whole-step states
//! 4. Zoom-in from the global minimum strictly magnifies on seamless catalogs
//! 5. Pixel width is always `base * factor`
//! 6. The anchor unit stays within a pixel across a zoom gesture

use std::sync::Arc;

use proptest::prelude::*;
use understory_timeline_zoom::{
    AlignmentCalculator, TimelineZoom, ZoomCatalog, ZoomEngine, ZoomLevel, ZoomState,
};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    ZoomIn,
    ZoomOut,
    SetFactor(f64),
    SetLevel(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::ZoomIn),
        3 => Just(Op::ZoomOut),
        1 => (-2.0_f64..8.0).prop_map(Op::SetFactor),
        1 => (0_usize..6).prop_map(Op::SetLevel),
    ]
}

/// Zoom-only operations: every reachable state sits on the step grid.
fn zoom_op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::ZoomIn), Just(Op::ZoomOut)]
}

fn gantt() -> ZoomCatalog {
    ZoomCatalog::gantt_default()
}

fn four_tiers() -> ZoomCatalog {
    ZoomCatalog::new([
        ZoomLevel::new("week-day", "Week / Day", 60.0, 2.5, 0.5),
        ZoomLevel::new("month-week", "Month / Week", 30.0, 3.0, 0.5),
        ZoomLevel::new("quarter-month", "Quarter / Month", 12.0, 3.5, 0.5),
        ZoomLevel::new("year-quarter", "Year / Quarter", 3.0, 4.0, 0.5),
    ])
    .unwrap()
}

fn apply(engine: &ZoomEngine<'_>, state: ZoomState, op: &Op) -> ZoomState {
    match op {
        Op::ZoomIn => engine.zoom_in(state).state,
        Op::ZoomOut => engine.zoom_out(state).state,
        Op::SetFactor(value) => engine.set_factor(state, *value).state,
        Op::SetLevel(index) => engine
            .set_level_index(state, *index)
            .map(|outcome| outcome.state)
            .unwrap_or(state),
    }
}

fn apply_to(zoom: &mut TimelineZoom, op: &Op) {
    match op {
        Op::ZoomIn => {
            zoom.zoom_in();
        }
        Op::ZoomOut => {
            zoom.zoom_out();
        }
        Op::SetFactor(value) => {
            zoom.set_factor(*value);
        }
        Op::SetLevel(index) => {
            let _ = zoom.set_level_index(*index);
        }
    }
}

fn magnification(catalog: &ZoomCatalog, state: ZoomState) -> f64 {
    state.pixels_per_unit(catalog).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Factor stays inside the tier's range
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn factor_stays_in_range(ops in prop::collection::vec(op_strategy(), 0..64)) {
        for catalog in [gantt(), four_tiers()] {
            let engine = ZoomEngine::new(&catalog);
            let mut state = ZoomState::initial();
            for op in &ops {
                state = apply(&engine, state, op);
                let level = state.level(&catalog).unwrap();
                prop_assert!(state.factor() >= 1.0);
                prop_assert!(state.factor() <= level.max_factor());
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. set_factor is idempotent
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn set_factor_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..16),
        value in -10.0_f64..10.0,
    ) {
        let catalog = four_tiers();
        let engine = ZoomEngine::new(&catalog);
        let mut state = ZoomState::initial();
        for op in &ops {
            state = apply(&engine, state, op);
        }
        let once = engine.set_factor(state, value);
        let twice = engine.set_factor(once.state, value);
        prop_assert_eq!(once.state, twice.state);
        prop_assert!(!twice.changed);
        prop_assert_eq!(once.state.level_index(), state.level_index());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Round trip on whole-step states
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zoom_in_then_out_round_trips(ops in prop::collection::vec(zoom_op_strategy(), 0..48)) {
        for catalog in [gantt(), four_tiers()] {
            let engine = ZoomEngine::new(&catalog);
            let mut state = ZoomState::initial();
            for op in &ops {
                state = apply(&engine, state, op);
            }
            if engine.is_at_global_maximum(state) {
                continue;
            }
            let there = engine.zoom_in(state);
            prop_assert!(there.changed);
            let back = engine.zoom_out(there.state);
            prop_assert_eq!(back.state, state);
        }
    }

    #[test]
    fn zoom_out_then_in_round_trips(ops in prop::collection::vec(zoom_op_strategy(), 0..48)) {
        let catalog = four_tiers();
        let engine = ZoomEngine::new(&catalog);
        let mut state = ZoomState::initial();
        for op in &ops {
            state = apply(&engine, state, op);
        }
        prop_assume!(!engine.is_at_global_minimum(state));
        let there = engine.zoom_out(state).state;
        prop_assert_eq!(engine.zoom_in(there).state, state);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Monotonic zoom-in on seamless catalogs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn zoom_in_from_global_minimum_strictly_magnifies() {
    let catalog = gantt();
    assert!(catalog.is_seamless());
    let engine = ZoomEngine::new(&catalog);

    let mut state = engine
        .set_level_index(ZoomState::initial(), catalog.coarsest_index())
        .unwrap()
        .state;
    assert!(engine.is_at_global_minimum(state));

    let mut steps = 0;
    loop {
        let outcome = engine.zoom_in(state);
        if !outcome.changed {
            assert!(engine.is_at_global_maximum(state));
            break;
        }
        assert!(magnification(&catalog, outcome.state) > magnification(&catalog, state));
        state = outcome.state;
        steps += 1;
        assert!(steps < 1_000, "zoom-in never reached the global maximum");
    }
    assert!(!engine.zoom_in(state).changed);
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Pixel width
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pixel_width_is_base_times_factor(index in 0_usize..5, value in 1.0_f64..4.0) {
        let catalog = gantt();
        let level = &catalog.levels()[index];
        let factor = level.clamp_factor(value);
        let width = AlignmentCalculator::pixel_width(level, factor);
        prop_assert!((width - level.base_pixels_per_unit() * factor).abs() < 1e-9);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Alignment bound across a gesture of up to 20 operations
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn anchor_stays_within_one_pixel(
        ops in prop::collection::vec(op_strategy(), 1..=20),
        start_unit in 4_000_i64..6_000,
        sub_pixel in 0.0_f64..40.0,
    ) {
        let mut zoom = TimelineZoom::new(Arc::new(gantt()));
        // Long enough that the anchor never hits the scroll clamp, even at
        // 0.25px per unit.
        zoom.attach_viewport(AlignmentCalculator::new(0, 20_000, 1_000.0, 1.0));
        zoom.alignment_mut()
            .unwrap()
            .set_scroll_offset(start_unit as f64 * 40.0 + sub_pixel);

        let anchor = zoom.alignment().unwrap().capture_anchor();
        for op in &ops {
            apply_to(&mut zoom, op);
            let error = zoom.alignment().unwrap().anchor_error(anchor);
            prop_assert!(error <= 1.0, "error {} after {:?}", error, op);
        }
    }
}
