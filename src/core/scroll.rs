// Scroll-driven layer positioning.
//
// Every scroll event retargets each tracked layer through its easing curve.
// Every animation frame the layer's smoothed offset moves toward that target
// by a fixed LERP fraction, picks up a momentum term while the user is
// actively scrolling, and is finally clamped into the layer's bounds.

use super::easing::{lerp, lerp_rgb, EasingCurve};
use crate::constants::*;
use serde::Deserialize;

/// Frame-level smoothing parameters shared by all layers of one engine.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub lerp_factor: f64,
    pub velocity_multiplier: f64,
    pub velocity_damping: f64,
    pub idle_after_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            lerp_factor: LERP_FACTOR,
            velocity_multiplier: VELOCITY_MULTIPLIER,
            velocity_damping: VELOCITY_DAMPING,
            idle_after_ms: SCROLL_IDLE_MS,
        }
    }
}

/// Describes one tracked element.
///
/// - `key`: element selector; at most one layer per key so a single owner
///   writes each element's offset
/// - `scroll_start`: page scroll offset where this layer's travel begins
/// - `travel`: scroll distance mapped onto progress 0..1
/// - `start_offset` / `end_offset`: collapsed and expanded positions (px)
/// - `background`: optional colour pair blended with the eased progress
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayerSpec {
    pub key: String,
    pub scroll_start: f64,
    pub travel: f64,
    pub start_offset: f64,
    pub end_offset: f64,
    pub easing: EasingCurve,
    pub background: Option<[[u8; 3]; 2]>,
}

impl Default for LayerSpec {
    fn default() -> Self {
        Self {
            key: String::new(),
            scroll_start: 0.0,
            travel: 1.0,
            start_offset: 0.0,
            end_offset: 0.0,
            easing: EasingCurve::REVEAL,
            background: None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScrollError {
    #[error("layer '{0}' is already tracked")]
    DuplicateLayer(String),
    #[error("layer '{key}' has unusable travel distance {travel}")]
    InvalidTravel { key: String, travel: f64 },
    #[error("layer '{key}' has non-finite offsets")]
    InvalidOffsets { key: String },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollPhase {
    Idle,
    Scrolling { last_event_ms: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// Mutable per-layer smoothing state.
#[derive(Clone, Debug)]
pub struct ScrollLayer {
    pub spec: LayerSpec,
    pub current_offset: f64,
    pub target_offset: f64,
    pub velocity: f64,
    pub eased_progress: f64,
    last_local: Option<f64>,
    pending_delta: f64,
}

impl ScrollLayer {
    fn new(spec: LayerSpec) -> Self {
        let start = spec.start_offset;
        Self {
            spec,
            current_offset: start,
            target_offset: start,
            velocity: 0.0,
            eased_progress: 0.0,
            last_local: None,
            pending_delta: 0.0,
        }
    }

    #[inline]
    pub fn min_offset(&self) -> f64 {
        self.spec.start_offset.min(self.spec.end_offset)
    }

    #[inline]
    pub fn max_offset(&self) -> f64 {
        self.spec.start_offset.max(self.spec.end_offset)
    }

    /// Scroll offset relative to this layer, clamped into its travel.
    #[inline]
    fn local_scroll(&self, scroll_y: f64) -> f64 {
        (scroll_y - self.spec.scroll_start).clamp(0.0, self.spec.travel)
    }

    /// Linear progress for a raw page scroll offset.
    pub fn progress_for(&self, scroll_y: f64) -> f64 {
        self.local_scroll(sanitize(scroll_y)) / self.spec.travel
    }

    fn retarget(&mut self, scroll_y: f64) {
        let local = self.local_scroll(scroll_y);
        if let Some(prev) = self.last_local {
            self.pending_delta += local - prev;
        }
        self.last_local = Some(local);
        self.eased_progress = self.spec.easing.apply(local / self.spec.travel);
        self.target_offset = lerp(
            self.spec.start_offset,
            self.spec.end_offset,
            self.eased_progress,
        );
    }

    fn advance(&mut self, cfg: &ScrollConfig, scrolling: bool) {
        self.current_offset += (self.target_offset - self.current_offset) * cfg.lerp_factor;
        if scrolling {
            // momentum follows the layer's own direction of travel
            let direction = (self.spec.end_offset - self.spec.start_offset).signum();
            self.velocity += self.pending_delta * cfg.velocity_multiplier * direction;
            self.current_offset += self.velocity;
        }
        self.pending_delta = 0.0;
        self.velocity *= cfg.velocity_damping;
        self.current_offset = self
            .current_offset
            .clamp(self.min_offset(), self.max_offset());
    }

    fn background(&self) -> Option<[u8; 3]> {
        self.spec
            .background
            .map(|[from, to]| lerp_rgb(from, to, self.eased_progress))
    }
}

/// Output of one frame for one layer, ready to be written to the element.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerFrame {
    pub id: LayerId,
    pub offset_px: i64,
    pub eased_progress: f64,
    pub background: Option<[u8; 3]>,
}

/// Owns every tracked layer and the IDLE/SCROLLING state machine.
pub struct ScrollEngine {
    pub config: ScrollConfig,
    phase: ScrollPhase,
    layers: Vec<(LayerId, ScrollLayer)>,
    next_id: u32,
}

impl ScrollEngine {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            phase: ScrollPhase::Idle,
            layers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self.phase, ScrollPhase::Scrolling { .. })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, id: LayerId) -> Option<&ScrollLayer> {
        self.layers.iter().find(|(i, _)| *i == id).map(|(_, l)| l)
    }

    pub fn add_layer(&mut self, spec: LayerSpec) -> Result<LayerId, ScrollError> {
        if self.layers.iter().any(|(_, l)| l.spec.key == spec.key) {
            return Err(ScrollError::DuplicateLayer(spec.key));
        }
        if !(spec.travel.is_finite() && spec.travel > 0.0) {
            return Err(ScrollError::InvalidTravel {
                key: spec.key,
                travel: spec.travel,
            });
        }
        if !(spec.start_offset.is_finite() && spec.end_offset.is_finite()) {
            return Err(ScrollError::InvalidOffsets { key: spec.key });
        }
        let id = LayerId(self.next_id);
        self.next_id += 1;
        log::debug!(
            "[scroll] tracking '{}' offsets {}..{} over {}px",
            spec.key,
            spec.start_offset,
            spec.end_offset,
            spec.travel
        );
        self.layers.push((id, ScrollLayer::new(spec)));
        Ok(id)
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Option<LayerSpec> {
        let idx = self.layers.iter().position(|(i, _)| *i == id)?;
        Some(self.layers.remove(idx).1.spec)
    }

    /// Jump every layer straight to its target for `scroll_y`, dropping any
    /// momentum. Used on load and after a resize.
    pub fn snap(&mut self, scroll_y: f64) {
        let y = sanitize(scroll_y);
        for (_, layer) in self.layers.iter_mut() {
            layer.last_local = None;
            layer.pending_delta = 0.0;
            layer.retarget(y);
            layer.current_offset = layer.target_offset;
            layer.velocity = 0.0;
        }
    }

    /// Scroll event: retarget layers and (re)arm the idle timer.
    pub fn on_scroll(&mut self, scroll_y: f64, now_ms: f64) {
        let y = sanitize(scroll_y);
        for (_, layer) in self.layers.iter_mut() {
            layer.retarget(y);
        }
        if !self.is_scrolling() {
            log::debug!("[scroll] scrolling");
        }
        self.phase = ScrollPhase::Scrolling {
            last_event_ms: now_ms,
        };
    }

    /// Animation frame: settle the phase, then advance every layer.
    pub fn frame(&mut self, now_ms: f64) -> Vec<LayerFrame> {
        if let ScrollPhase::Scrolling { last_event_ms } = self.phase {
            if now_ms - last_event_ms >= self.config.idle_after_ms {
                self.phase = ScrollPhase::Idle;
                log::debug!("[scroll] idle");
            }
        }
        let scrolling = self.is_scrolling();
        let cfg = self.config;
        self.layers
            .iter_mut()
            .map(|(id, layer)| {
                layer.advance(&cfg, scrolling);
                LayerFrame {
                    id: *id,
                    offset_px: layer.current_offset.round() as i64,
                    eased_progress: layer.eased_progress,
                    background: layer.background(),
                }
            })
            .collect()
    }
}

#[inline]
fn sanitize(scroll_y: f64) -> f64 {
    if scroll_y.is_nan() {
        0.0
    } else {
        scroll_y
    }
}

/// First finite candidate of the browser fallback chain
/// (`pageYOffset`, `scrollY`, `documentElement.scrollTop`, `body.scrollTop`),
/// or 0 when none is usable.
pub fn resolve_scroll_offset(candidates: &[Option<f64>]) -> f64 {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|v| v.is_finite())
        .unwrap_or(0.0)
}
