use crate::constants::*;
use crate::core::{EasingCurve, LayerSpec, ParticleConfig, ScrollConfig};
use serde::Deserialize;

/// Which outline particles are drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowerStyle {
    /// Four round petals around a center disc.
    #[default]
    Petals,
    /// Bezier-traced teardrop petals with a solid center.
    Bezier,
}

/// A tracked element as written in page config. Geometry left unset is
/// measured from the element at startup (see `LayerConfig::resolve`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub selector: String,
    pub scroll_start: Option<f64>,
    pub travel: Option<f64>,
    pub start_offset: f64,
    pub end_offset: f64,
    pub easing: EasingCurve,
    pub background: Option<[[u8; 3]; 2]>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            selector: String::new(),
            scroll_start: None,
            travel: None,
            start_offset: 0.0,
            end_offset: 0.0,
            easing: EasingCurve::REVEAL,
            background: None,
        }
    }
}

impl LayerConfig {
    /// Fill in unset geometry from the element's measured page top and height.
    pub fn resolve(&self, measured_top: f64, measured_height: f64) -> LayerSpec {
        LayerSpec {
            key: self.selector.clone(),
            scroll_start: self.scroll_start.unwrap_or(measured_top),
            travel: self.travel.unwrap_or(measured_height),
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            easing: self.easing,
            background: self.background,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
    #[error("easing curve for '{0}' is malformed")]
    Easing(String),
    #[error("layer selector '{0}' appears more than once")]
    DuplicateSelector(String),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Everything a page can tune. Every field has a default, so `{}` is a valid
/// config and so is a page with no config block at all.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub canvas_id: String,
    pub particles: ParticleConfig,
    pub flower_style: FlowerStyle,
    pub petal_radius: f64,
    /// Auto-spawn stops once this element's top scrolls above the viewport.
    pub spawn_stop_selector: Option<String>,
    pub scroll: ScrollConfig,
    pub layers: Vec<LayerConfig>,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            canvas_id: "fireworks-canvas".to_string(),
            particles: ParticleConfig::default(),
            flower_style: FlowerStyle::default(),
            petal_radius: PETAL_RADIUS,
            spawn_stop_selector: Some("#projects".to_string()),
            scroll: ScrollConfig::default(),
            layers: vec![LayerConfig {
                selector: "#hero-panel".to_string(),
                start_offset: 0.0,
                end_offset: -320.0,
                easing: EasingCurve::REVEAL,
                background: Some([LAYER_BG_FROM, LAYER_BG_TO]),
                ..LayerConfig::default()
            }],
        }
    }
}

fn check(field: &'static str, expected: &'static str, value: f64, ok: bool) -> Result<(), ConfigError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected,
            value,
        })
    }
}

// Speeds feed `gen_range`, which rejects non-finite or overflowing bounds.
fn check_speed(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    check(
        field,
        "in [min, 1000]",
        value as f64,
        value >= min && value <= CONFIG_SPEED_LIMIT,
    )
}

impl FxConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: FxConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_id.trim().is_empty() {
            return Err(ConfigError::Empty("canvas_id"));
        }
        let p = &self.particles;
        check("particles.gravity", "> 0", p.gravity as f64, p.gravity > 0.0)?;
        check(
            "particles.particle_lifespan",
            "> 0",
            p.particle_lifespan as f64,
            p.particle_lifespan > 0.0,
        )?;
        check(
            "particles.lifespan_decay",
            "> 0",
            p.lifespan_decay as f64,
            p.lifespan_decay > 0.0,
        )?;
        check(
            "particles.child_damping",
            "in (0, 1]",
            p.child_damping as f64,
            p.child_damping > 0.0 && p.child_damping <= 1.0,
        )?;
        check_speed("particles.explosion_speed_max", p.explosion_speed_max, 0.0)?;
        check(
            "particles.explosion_speed_min",
            ">= 0 and <= explosion_speed_max",
            p.explosion_speed_min as f64,
            p.explosion_speed_min >= 0.0 && p.explosion_speed_min <= p.explosion_speed_max,
        )?;
        check_speed("particles.launch_speed_max", p.launch_speed_max, f32::MIN_POSITIVE)?;
        check(
            "particles.launch_speed_min",
            "> 0 and <= launch_speed_max",
            p.launch_speed_min as f64,
            p.launch_speed_min > 0.0 && p.launch_speed_min <= p.launch_speed_max,
        )?;
        check_speed("particles.launch_drift", p.launch_drift, 0.0)?;
        check(
            "particles.rising_spin",
            "in [-TAU, TAU]",
            p.rising_spin as f64,
            p.rising_spin.abs() <= CONFIG_SPIN_LIMIT,
        )?;
        check(
            "particles.falling_spin_max",
            "in [0, TAU]",
            p.falling_spin_max as f64,
            (0.0..=CONFIG_SPIN_LIMIT).contains(&p.falling_spin_max),
        )?;
        check(
            "particles.sweep_half_extent",
            "in [0, 10000]",
            p.sweep_half_extent as f64,
            (0.0..=CONFIG_EXTENT_LIMIT).contains(&p.sweep_half_extent),
        )?;
        check(
            "particles.spawn_probability",
            "in [0, 1]",
            p.spawn_probability,
            (0.0..=1.0).contains(&p.spawn_probability),
        )?;
        check(
            "particles.explosion_particle_count",
            "in [1, 512]",
            p.explosion_particle_count as f64,
            (1..=CONFIG_PARTICLE_COUNT_LIMIT).contains(&p.explosion_particle_count),
        )?;
        check(
            "particles.max_active",
            "in [1, 1000]",
            p.max_active as f64,
            (1..=CONFIG_MAX_ACTIVE_LIMIT).contains(&p.max_active),
        )?;
        check("petal_radius", "> 0", self.petal_radius, self.petal_radius > 0.0)?;

        let s = &self.scroll;
        check(
            "scroll.lerp_factor",
            "in (0, 1]",
            s.lerp_factor,
            s.lerp_factor > 0.0 && s.lerp_factor <= 1.0,
        )?;
        check(
            "scroll.velocity_damping",
            "in [0, 1)",
            s.velocity_damping,
            (0.0..1.0).contains(&s.velocity_damping),
        )?;
        check(
            "scroll.velocity_multiplier",
            ">= 0",
            s.velocity_multiplier,
            s.velocity_multiplier >= 0.0,
        )?;
        check("scroll.idle_after_ms", ">= 0", s.idle_after_ms, s.idle_after_ms >= 0.0)?;

        let mut seen: Vec<&str> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            if layer.selector.trim().is_empty() {
                return Err(ConfigError::Empty("layers[].selector"));
            }
            if seen.contains(&layer.selector.as_str()) {
                return Err(ConfigError::DuplicateSelector(layer.selector.clone()));
            }
            seen.push(&layer.selector);
            if !layer.easing.is_well_formed() {
                return Err(ConfigError::Easing(layer.selector.clone()));
            }
            if let Some(t) = layer.travel {
                check("layers[].travel", "> 0", t, t > 0.0)?;
            }
        }
        Ok(())
    }
}
