// Flower geometry in particle-local space (origin at the particle, +x along
// rotation 0). The renderer translates/rotates and fills; nothing here knows
// about canvases.
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

/// Four overlapping round petals plus a center disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PetalFlower {
    pub petals: [Circle; 4],
    pub center: Circle,
}

pub fn petal_flower(size: f64) -> PetalFlower {
    let size = size.max(0.0);
    let reach = size * 0.6;
    let petal_r = size * 0.55;
    let petals = [0.0, 1.0, 2.0, 3.0].map(|i| Circle {
        center: DVec2::from_angle(i * FRAC_PI_2) * reach,
        radius: petal_r,
    });
    PetalFlower {
        petals,
        center: Circle {
            center: DVec2::ZERO,
            radius: size * 0.35,
        },
    }
}

/// One teardrop petal: out along `c1, c2` to `tip`, back along `c3, c4` to the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierPetal {
    pub c1: DVec2,
    pub c2: DVec2,
    pub tip: DVec2,
    pub c3: DVec2,
    pub c4: DVec2,
}

pub const BEZIER_PETALS: usize = 5;

/// Multi-petal outline traced with cubic beziers, evenly spaced around the
/// origin. The solid center is drawn separately with `center_radius`.
pub fn bezier_flower(size: f64, petal_count: usize) -> Vec<BezierPetal> {
    let len = size.max(0.0) * 1.4;
    let width = len * 0.45;
    let n = petal_count.max(1);
    (0..n)
        .map(|i| {
            let rot = DVec2::from_angle(i as f64 * TAU / n as f64);
            BezierPetal {
                c1: rot.rotate(DVec2::new(len * 0.25, -width)),
                c2: rot.rotate(DVec2::new(len * 0.85, -width * 0.7)),
                tip: rot.rotate(DVec2::new(len, 0.0)),
                c3: rot.rotate(DVec2::new(len * 0.85, width * 0.7)),
                c4: rot.rotate(DVec2::new(len * 0.25, width)),
            }
        })
        .collect()
}

#[inline]
pub fn center_radius(size: f64) -> f64 {
    size.max(0.0) * 0.4
}
