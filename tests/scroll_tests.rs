// Host-side tests for the easing curve and scroll interpolation engine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
    pub use easing::*;
    pub use scroll::*;
}

use crate::core::*;

const FRAME_MS: f64 = 16.0;

fn hero_spec() -> LayerSpec {
    LayerSpec {
        key: "#hero-panel".to_string(),
        scroll_start: 0.0,
        travel: 800.0,
        start_offset: 0.0,
        end_offset: -320.0,
        easing: EasingCurve::REVEAL,
        background: Some([constants::LAYER_BG_FROM, constants::LAYER_BG_TO]),
    }
}

fn engine_with(config: ScrollConfig) -> (ScrollEngine, LayerId) {
    let mut engine = ScrollEngine::new(config);
    let id = engine.add_layer(hero_spec()).expect("valid layer");
    (engine, id)
}

#[test]
fn easing_is_continuous_at_breakpoints() {
    for curve in [EasingCurve::REVEAL, EasingCurve::SETTLE] {
        for b in [curve.ease_in_end, curve.ease_out_start] {
            let left = curve.apply(b - 1e-9);
            let right = curve.apply(b);
            assert!(
                (left - right).abs() < 1e-6,
                "jump of {} at p={b}",
                (left - right).abs()
            );
        }
    }
}

#[test]
fn easing_spans_zero_to_one_monotonically() {
    for curve in [EasingCurve::REVEAL, EasingCurve::SETTLE] {
        assert!(curve.is_well_formed());
        assert_eq!(curve.apply(0.0), 0.0);
        assert!((curve.apply(1.0) - 1.0).abs() < 1e-12);
        let mut prev = curve.apply(0.0);
        for i in 1..=1000 {
            let v = curve.apply(i as f64 / 1000.0);
            assert!(v >= prev, "not monotonic at {}", i);
            prev = v;
        }
    }
}

#[test]
fn easing_pieces_follow_their_formulas() {
    let c = EasingCurve::REVEAL;
    // slow cubic start
    assert!((c.apply(0.2) - 0.2_f64.powi(3) * 0.3).abs() < 1e-12);
    // near-linear ramp
    let slope = (c.apply(0.5) - c.apply(0.4)) / 0.1;
    assert!((slope - c.ramp_slope).abs() < 1e-9);
    // settle phase decelerates
    let early = c.apply(0.70) - c.apply(0.65);
    let late = c.apply(1.00) - c.apply(0.95);
    assert!(late < early);
}

#[test]
fn preset_ease_out_offsets_match_both_variants() {
    assert!((EasingCurve::REVEAL.ease_out_offset() - 0.892).abs() < 1e-3);
    assert!((EasingCurve::SETTLE.ease_out_offset() - 0.495).abs() < 1e-3);
}

#[test]
fn easing_clamps_out_of_range_input() {
    let c = EasingCurve::default();
    assert_eq!(c.apply(-3.0), 0.0);
    assert_eq!(c.apply(f64::NAN), 0.0);
    assert!((c.apply(42.0) - 1.0).abs() < 1e-12);
}

#[test]
fn offset_stays_within_bounds_for_any_scroll_input() {
    let (mut engine, id) = engine_with(ScrollConfig {
        velocity_multiplier: 0.5,
        ..ScrollConfig::default()
    });
    let inputs = [
        0.0,
        1e9,
        -1e9,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        400.0,
        -400.0,
        799.0,
        10_000.0,
        0.0,
    ];
    let mut now = 0.0;
    for (i, y) in inputs.iter().cycle().take(200).enumerate() {
        engine.on_scroll(*y, now);
        now += if i % 7 == 0 { 250.0 } else { FRAME_MS };
        for frame in engine.frame(now) {
            assert!((-320..=0).contains(&frame.offset_px), "offset {}", frame.offset_px);
        }
        let layer = engine.layer(id).unwrap();
        assert!(layer.current_offset.is_finite());
        assert!(layer.current_offset >= layer.min_offset());
        assert!(layer.current_offset <= layer.max_offset());
    }
}

#[test]
fn converges_monotonically_once_scrolling_settles() {
    let (mut engine, id) = engine_with(ScrollConfig {
        lerp_factor: 0.15,
        ..ScrollConfig::default()
    });
    let mut now = 0.0;
    let mut y = 0.0;
    while y <= 800.0 {
        engine.on_scroll(y, now);
        now += FRAME_MS;
        engine.frame(now);
        y += 50.0;
    }

    // wait out the debounce so only the LERP term moves the layer
    now += 200.0;
    let target = engine.layer(id).unwrap().target_offset;
    assert!((target - -320.0).abs() < 1e-9);
    let mut prev_gap = f64::INFINITY;
    for _ in 0..200 {
        engine.frame(now);
        now += FRAME_MS;
        let layer = engine.layer(id).unwrap();
        let gap = (layer.target_offset - layer.current_offset).abs();
        assert!(gap <= prev_gap, "gap grew from {prev_gap} to {gap}");
        assert!(layer.current_offset >= -320.0 && layer.current_offset <= 0.0);
        prev_gap = gap;
    }
    assert!(prev_gap < 1e-6);
}

#[test]
fn without_momentum_every_frame_closes_the_gap() {
    let (mut engine, id) = engine_with(ScrollConfig {
        lerp_factor: 0.15,
        velocity_multiplier: 0.0,
        ..ScrollConfig::default()
    });
    engine.on_scroll(400.0, 0.0);
    let mut prev_gap = f64::INFINITY;
    for i in 1..=60 {
        engine.frame(i as f64 * FRAME_MS);
        let layer = engine.layer(id).unwrap();
        let gap = (layer.target_offset - layer.current_offset).abs();
        assert!(gap < prev_gap);
        prev_gap = gap;
    }
}

#[test]
fn momentum_pushes_along_the_layer_direction() {
    let (mut plain, plain_id) = engine_with(ScrollConfig {
        velocity_multiplier: 0.0,
        ..ScrollConfig::default()
    });
    let (mut boosted, boosted_id) = engine_with(ScrollConfig::default());
    for e in [&mut plain, &mut boosted] {
        e.snap(0.0);
        e.on_scroll(400.0, 0.0);
        e.frame(FRAME_MS);
    }
    let p = plain.layer(plain_id).unwrap();
    let b = boosted.layer(boosted_id).unwrap();
    assert!(b.current_offset < p.current_offset);
    assert!(b.current_offset >= b.target_offset);
    assert!(b.velocity < 0.0);
}

#[test]
fn phase_goes_idle_after_quiet_period() {
    let (mut engine, _) = engine_with(ScrollConfig::default());
    assert_eq!(engine.phase(), ScrollPhase::Idle);
    engine.on_scroll(10.0, 1000.0);
    assert!(engine.is_scrolling());
    engine.frame(1050.0);
    assert!(engine.is_scrolling());
    engine.on_scroll(20.0, 1080.0);
    engine.frame(1150.0);
    assert!(engine.is_scrolling(), "second event re-arms the timer");
    engine.frame(1180.0);
    assert_eq!(engine.phase(), ScrollPhase::Idle);
}

#[test]
fn velocity_decays_while_idle() {
    let (mut engine, id) = engine_with(ScrollConfig::default());
    engine.snap(0.0);
    engine.on_scroll(600.0, 0.0);
    engine.frame(FRAME_MS);
    let v0 = engine.layer(id).unwrap().velocity;
    assert!(v0 != 0.0);
    engine.frame(500.0);
    let v1 = engine.layer(id).unwrap().velocity;
    assert!((v1 - v0 * 0.95).abs() < 1e-12);
}

#[test]
fn snap_and_background_follow_eased_progress() {
    let (mut engine, id) = engine_with(ScrollConfig::default());
    engine.snap(800.0);
    let frames = engine.frame(0.0);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].id, id);
    assert_eq!(frames[0].offset_px, -320);
    assert_eq!(frames[0].background, Some(constants::LAYER_BG_TO));

    engine.snap(0.0);
    let frames = engine.frame(0.0);
    assert_eq!(frames[0].offset_px, 0);
    assert_eq!(frames[0].background, Some(constants::LAYER_BG_FROM));
}

#[test]
fn progress_is_relative_to_layer_start() {
    let mut engine = ScrollEngine::new(ScrollConfig::default());
    let id = engine
        .add_layer(LayerSpec {
            key: "#projects".to_string(),
            scroll_start: 1000.0,
            travel: 500.0,
            start_offset: 200.0,
            end_offset: 0.0,
            ..LayerSpec::default()
        })
        .unwrap();
    let layer = engine.layer(id).unwrap();
    assert_eq!(layer.progress_for(0.0), 0.0);
    assert_eq!(layer.progress_for(1250.0), 0.5);
    assert_eq!(layer.progress_for(9999.0), 1.0);
    assert_eq!(layer.progress_for(f64::NAN), 0.0);
}

#[test]
fn duplicate_and_degenerate_layers_are_rejected() {
    let (mut engine, id) = engine_with(ScrollConfig::default());
    assert_eq!(
        engine.add_layer(hero_spec()),
        Err(ScrollError::DuplicateLayer("#hero-panel".to_string()))
    );
    let zero = LayerSpec {
        key: "#flat".to_string(),
        travel: 0.0,
        ..LayerSpec::default()
    };
    assert!(matches!(
        engine.add_layer(zero),
        Err(ScrollError::InvalidTravel { .. })
    ));
    let nan = LayerSpec {
        key: "#nan".to_string(),
        end_offset: f64::NAN,
        ..LayerSpec::default()
    };
    assert!(matches!(
        engine.add_layer(nan),
        Err(ScrollError::InvalidOffsets { .. })
    ));
    assert_eq!(engine.layer_count(), 1);

    assert!(engine.remove_layer(id).is_some());
    assert!(engine.add_layer(hero_spec()).is_ok());
}

#[test]
fn scroll_offset_fallback_chain() {
    assert_eq!(resolve_scroll_offset(&[Some(12.0), Some(99.0)]), 12.0);
    assert_eq!(
        resolve_scroll_offset(&[None, Some(f64::NAN), Some(34.0), Some(1.0)]),
        34.0
    );
    assert_eq!(resolve_scroll_offset(&[None, None, None, None]), 0.0);
    assert_eq!(resolve_scroll_offset(&[]), 0.0);
}

#[test]
fn rgb_blend_is_linear_and_clamped() {
    assert_eq!(lerp_rgb([0, 0, 0], [200, 100, 50], 0.5), [100, 50, 25]);
    assert_eq!(lerp_rgb([0, 0, 0], [200, 100, 50], 2.0), [200, 100, 50]);
    assert_eq!(lerp_rgb([10, 20, 30], [200, 100, 50], -1.0), [10, 20, 30]);
    assert_eq!(css_rgb([1, 2, 3]), "rgb(1, 2, 3)");
}
