// Host-side tests for page configuration parsing and validation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod particles {
        include!("../src/core/particles.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
    pub use easing::*;
    pub use particles::*;
    pub use scroll::*;
}
mod config {
    include!("../src/config.rs");
}

use crate::config::*;
use crate::core::{EasingCurve, FireworkEngine};

#[test]
fn defaults_are_valid() {
    let cfg = FxConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.particles.explosion_particle_count, 16);
    assert_eq!(cfg.particles.gravity, 0.13);
    assert_eq!(cfg.particles.particle_lifespan, 50.0);
    assert_eq!(cfg.scroll.idle_after_ms, 100.0);
    assert_eq!(cfg.flower_style, FlowerStyle::Petals);
}

#[test]
fn empty_object_is_the_default_config() {
    assert_eq!(FxConfig::from_json("{}").unwrap(), FxConfig::default());
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let cfg = FxConfig::from_json(
        r##"{
            "canvas_id": "petals",
            "flower_style": "bezier",
            "particles": { "gravity": 0.2, "labels": "HI" },
            "scroll": { "lerp_factor": 0.05 },
            "layers": [
                { "selector": "#about", "end_offset": 120,
                  "easing": { "ease_out_power": 4.5 } }
            ]
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.canvas_id, "petals");
    assert_eq!(cfg.flower_style, FlowerStyle::Bezier);
    assert_eq!(cfg.particles.gravity, 0.2);
    assert_eq!(cfg.particles.labels, "HI");
    assert_eq!(cfg.particles.lifespan_decay, 2.5);
    assert_eq!(cfg.scroll.lerp_factor, 0.05);
    assert_eq!(cfg.scroll.velocity_damping, 0.95);
    assert_eq!(cfg.layers.len(), 1);
    let layer = &cfg.layers[0];
    assert_eq!(layer.end_offset, 120.0);
    assert_eq!(layer.easing.ease_out_power, 4.5);
    assert_eq!(layer.easing.ease_in_end, EasingCurve::REVEAL.ease_in_end);
}

#[test]
fn out_of_range_values_name_the_field() {
    let err = FxConfig::from_json(r#"{ "particles": { "spawn_probability": 1.5 } }"#).unwrap_err();
    match err {
        ConfigError::OutOfRange { field, .. } => assert_eq!(field, "particles.spawn_probability"),
        other => panic!("unexpected error {other:?}"),
    }

    let err = FxConfig::from_json(r#"{ "scroll": { "lerp_factor": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("scroll.lerp_factor"));

    let err = FxConfig::from_json(r#"{ "scroll": { "velocity_damping": 1.0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
}

#[test]
fn overflowing_particle_numbers_are_rejected() {
    // 1e300 does not fit in an f32 and reads back as infinity
    for field in [
        "explosion_speed_max",
        "explosion_speed_min",
        "launch_speed_max",
        "launch_speed_min",
        "launch_drift",
        "rising_spin",
        "falling_spin_max",
        "sweep_half_extent",
        "gravity",
        "particle_lifespan",
        "lifespan_decay",
    ] {
        for value in ["1e300", "-1e300"] {
            let json = format!(r#"{{ "particles": {{ "{field}": {value} }} }}"#);
            let err = FxConfig::from_json(&json)
                .expect_err(&format!("{field}={value} should be rejected"));
            assert!(
                matches!(err, ConfigError::OutOfRange { .. }),
                "{field}={value}: {err:?}"
            );
        }
    }
}

#[test]
fn particle_ranges_have_upper_bounds() {
    for json in [
        r#"{ "particles": { "explosion_speed_min": 0, "explosion_speed_max": 1000.5 } }"#,
        r#"{ "particles": { "launch_speed_max": 5000 } }"#,
        r#"{ "particles": { "launch_drift": -1 } }"#,
        r#"{ "particles": { "falling_spin_max": 7 } }"#,
        r#"{ "particles": { "max_active": 0 } }"#,
        r#"{ "particles": { "max_active": 1000000 } }"#,
        r#"{ "particles": { "explosion_particle_count": 100000 } }"#,
        r#"{ "particles": { "sweep_half_extent": -2 } }"#,
    ] {
        assert!(
            matches!(FxConfig::from_json(json), Err(ConfigError::OutOfRange { .. })),
            "{json} should be rejected"
        );
    }
}

#[test]
fn largest_accepted_particle_config_runs_without_panicking() {
    let cfg = FxConfig::from_json(
        r#"{ "particles": {
            "explosion_speed_min": 0,
            "explosion_speed_max": 1000,
            "launch_speed_min": 1000,
            "launch_speed_max": 1000,
            "launch_drift": 1000,
            "rising_spin": -6.28,
            "falling_spin_max": 6.28,
            "sweep_half_extent": 10000,
            "spawn_probability": 1.0,
            "explosion_particle_count": 512,
            "max_active": 1000
        } }"#,
    )
    .unwrap();
    let mut engine = FireworkEngine::new(cfg.particles, 11);
    let viewport = glam::Vec2::new(1280.0, 720.0);
    for _ in 0..300 {
        engine.step(viewport, true);
    }
    assert_eq!(engine.len(), 300);

    // a slow launch explodes within a few ticks using the widest ranges
    engine.clear();
    engine.launch(glam::Vec2::new(100.0, 600.0), glam::Vec2::new(0.0, -1.0));
    for _ in 0..20 {
        engine.update();
    }
    assert!(engine.fireworks()[0].exploded);
    assert_eq!(engine.particle_count(), 512);

    assert!(!engine.on_click(glam::Vec2::new(10.0, 10.0)));
    assert!(engine.on_click(glam::Vec2::new(640.0, 360.0)));
    assert!(engine.sweep(glam::Vec2::new(640.0, 360.0)) > 0);
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        FxConfig::from_json("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        FxConfig::from_json(r#"{ "flower_style": "tulip" }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn layer_rules_are_enforced() {
    let dup = r##"{ "layers": [ { "selector": "#a" }, { "selector": "#a" } ] }"##;
    assert!(matches!(
        FxConfig::from_json(dup),
        Err(ConfigError::DuplicateSelector(s)) if s == "#a"
    ));

    let empty = r#"{ "layers": [ { "selector": "  " } ] }"#;
    assert!(matches!(FxConfig::from_json(empty), Err(ConfigError::Empty(_))));

    let bad_curve =
        r##"{ "layers": [ { "selector": "#a", "easing": { "ease_in_end": 0.8 } } ] }"##;
    assert!(matches!(
        FxConfig::from_json(bad_curve),
        Err(ConfigError::Easing(s)) if s == "#a"
    ));

    let bad_travel = r##"{ "layers": [ { "selector": "#a", "travel": -5 } ] }"##;
    assert!(matches!(
        FxConfig::from_json(bad_travel),
        Err(ConfigError::OutOfRange { .. })
    ));
}

#[test]
fn layer_resolve_prefers_explicit_geometry() {
    let measured = LayerConfig {
        selector: "#hero".to_string(),
        end_offset: -200.0,
        ..LayerConfig::default()
    }
    .resolve(640.0, 900.0);
    assert_eq!(measured.key, "#hero");
    assert_eq!(measured.scroll_start, 640.0);
    assert_eq!(measured.travel, 900.0);
    assert_eq!(measured.end_offset, -200.0);

    let explicit = LayerConfig {
        selector: "#hero".to_string(),
        scroll_start: Some(0.0),
        travel: Some(300.0),
        ..LayerConfig::default()
    }
    .resolve(640.0, 900.0);
    assert_eq!(explicit.scroll_start, 0.0);
    assert_eq!(explicit.travel, 300.0);
}
