use crate::constants::*;
use serde::Deserialize;

/// Three-piece scroll easing: slow cubic start, linear momentum ramp, power
/// ease-out settle.
///
/// Only the breakpoints, the cubic scale, the ramp slope and the ease-out
/// power are free. The ramp offset and ease-out offset are derived from them
/// so the pieces always meet, and the ease-out piece is stretched to land on
/// exactly 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EasingCurve {
    pub ease_in_end: f64,
    pub ease_out_start: f64,
    pub ease_in_scale: f64,
    pub ramp_slope: f64,
    pub ease_out_power: f64,
}

impl EasingCurve {
    /// Fast reveal used by the hero layer; ease-out starts at 0.892.
    pub const REVEAL: EasingCurve = EasingCurve {
        ease_in_end: EASE_IN_END,
        ease_out_start: EASE_OUT_START,
        ease_in_scale: EASE_IN_SCALE,
        ramp_slope: REVEAL_RAMP_SLOPE,
        ease_out_power: REVEAL_EASE_OUT_POWER,
    };

    /// Gentler curve used by project sections; ease-out starts near 0.495.
    pub const SETTLE: EasingCurve = EasingCurve {
        ease_in_end: EASE_IN_END,
        ease_out_start: EASE_OUT_START,
        ease_in_scale: EASE_IN_SCALE,
        ramp_slope: SETTLE_RAMP_SLOPE,
        ease_out_power: SETTLE_EASE_OUT_POWER,
    };

    /// Value where the linear ramp begins (end of the cubic piece).
    #[inline]
    pub fn ramp_offset(&self) -> f64 {
        self.ease_in_scale * self.ease_in_end.powi(3)
    }

    /// Value where the ease-out piece begins (end of the ramp).
    #[inline]
    pub fn ease_out_offset(&self) -> f64 {
        self.ramp_offset() + (self.ease_out_start - self.ease_in_end) * self.ramp_slope
    }

    /// Breakpoints are ordered inside (0, 1) and the curve rises monotonically
    /// to 1 without overshooting.
    pub fn is_well_formed(&self) -> bool {
        let ordered = 0.0 < self.ease_in_end
            && self.ease_in_end <= self.ease_out_start
            && self.ease_out_start < 1.0;
        ordered
            && self.ease_in_scale >= 0.0
            && self.ramp_slope >= 0.0
            && self.ease_out_power > 0.0
            && self.ease_out_offset() <= 1.0
    }

    /// Map linear progress to eased progress. Input is clamped to [0, 1];
    /// NaN maps to 0.
    pub fn apply(&self, progress: f64) -> f64 {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if p < self.ease_in_end {
            return p.powi(3) * self.ease_in_scale;
        }
        if p < self.ease_out_start {
            return self.ramp_offset() + (p - self.ease_in_end) * self.ramp_slope;
        }
        let offset = self.ease_out_offset();
        let q = (p - self.ease_out_start) / (1.0 - self.ease_out_start);
        offset + (1.0 - offset) * (1.0 - (1.0 - q).powf(self.ease_out_power))
    }
}

impl Default for EasingCurve {
    fn default() -> Self {
        EasingCurve::REVEAL
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear blend between two RGB triples, `t` clamped to [0, 1].
pub fn lerp_rgb(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = lerp(from[i] as f64, to[i] as f64, t).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[inline]
pub fn css_rgb(c: [u8; 3]) -> String {
    format!("rgb({}, {}, {})", c[0], c[1], c[2])
}
