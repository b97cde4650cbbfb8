use crate::constants::*;
use glam::Vec2;
use rand::prelude::*;
use serde::Deserialize;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Tunables for the firework simulation.
///
/// All distances are canvas pixels and all rates are per animation tick; the
/// simulation is deliberately frame-locked rather than time-stepped.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub gravity: f32,
    pub particle_lifespan: f32,
    pub lifespan_decay: f32,
    pub explosion_particle_count: usize,
    pub explosion_speed_min: f32,
    pub explosion_speed_max: f32,
    pub child_damping: f32,
    pub rising_spin: f32,
    pub falling_spin_max: f32,
    pub launch_speed_min: f32,
    pub launch_speed_max: f32,
    pub launch_drift: f32,
    pub spawn_probability: f64,
    pub sweep_half_extent: f32,
    pub max_active: usize,
    pub labels: String,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            particle_lifespan: PARTICLE_LIFESPAN,
            lifespan_decay: LIFESPAN_DECAY,
            explosion_particle_count: EXPLOSION_PARTICLE_COUNT,
            explosion_speed_min: EXPLOSION_SPEED_MIN,
            explosion_speed_max: EXPLOSION_SPEED_MAX,
            child_damping: CHILD_DAMPING,
            rising_spin: RISING_SPIN,
            falling_spin_max: FALLING_SPIN_MAX,
            launch_speed_min: LAUNCH_SPEED_MIN,
            launch_speed_max: LAUNCH_SPEED_MAX,
            launch_drift: LAUNCH_DRIFT,
            spawn_probability: SPAWN_PROBABILITY,
            sweep_half_extent: SWEEP_HALF_EXTENT,
            max_active: MAX_ACTIVE_FIREWORKS,
            labels: DEFAULT_LABELS.to_string(),
        }
    }
}

/// A single simulated point: the rising head of a firework or one of its petals.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub is_rising: bool,
    pub lifespan: f32,
    pub rotation: f32,
    pub rotation_velocity: f32,
    pub color: [u8; 3],
}

impl Particle {
    fn rising(origin: Vec2, velocity: Vec2, spin: f32, lifespan: f32) -> Self {
        Self {
            position: origin,
            velocity,
            acceleration: Vec2::ZERO,
            is_rising: true,
            lifespan,
            rotation: 0.0,
            rotation_velocity: spin,
            color: PETAL_COLOR,
        }
    }

    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Semi-implicit Euler step. Exploded particles also lose speed and life.
    pub fn update(&mut self, damping: f32, lifespan_decay: f32) {
        self.velocity += self.acceleration;
        if !self.is_rising {
            self.velocity *= damping;
            self.lifespan -= lifespan_decay;
        }
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
        self.rotation += self.rotation_velocity;
    }

    #[inline]
    pub fn done(&self) -> bool {
        self.lifespan < 0.0
    }

    #[inline]
    fn within(&self, point: Vec2, half_extent: f32) -> bool {
        let d = (self.position - point).abs();
        d.x <= half_extent && d.y <= half_extent
    }
}

/// One emitter lifecycle: rising particle, explosion at apex, decaying petals.
#[derive(Clone, Debug)]
pub struct Firework {
    pub origin: Vec2,
    pub ascent: Particle,
    pub exploded: bool,
    pub children: SmallVec<[Particle; EXPLOSION_PARTICLE_COUNT]>,
    pub label: char,
}

impl Firework {
    pub fn new(origin: Vec2, velocity: Vec2, label: char, spin: f32, lifespan: f32) -> Self {
        Self {
            origin,
            ascent: Particle::rising(origin, velocity, spin, lifespan),
            exploded: false,
            children: SmallVec::new(),
            label,
        }
    }

    /// Gone from the active set once exploded and every petal has expired.
    #[inline]
    pub fn done(&self) -> bool {
        self.exploded && self.children.is_empty()
    }

    fn update(&mut self, cfg: &ParticleConfig, rng: &mut StdRng) {
        let gravity = Vec2::new(0.0, cfg.gravity);
        if !self.exploded {
            self.ascent.apply_force(gravity);
            self.ascent.update(1.0, 0.0);
            if self.ascent.velocity.y >= 0.0 {
                self.exploded = true;
                self.explode(cfg, rng);
            }
            return;
        }
        for p in self.children.iter_mut() {
            p.apply_force(gravity);
            p.update(cfg.child_damping, cfg.lifespan_decay);
        }
        self.children.retain(|p| !p.done());
    }

    fn explode(&mut self, cfg: &ParticleConfig, rng: &mut StdRng) {
        let color = *EXPLOSION_PALETTE.choose(rng).unwrap_or(&PETAL_COLOR);
        let at = self.ascent.position;
        let (lo, hi) = ordered(cfg.explosion_speed_min, cfg.explosion_speed_max);
        let spin = cfg.falling_spin_max.abs();
        for _ in 0..cfg.explosion_particle_count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(lo..=hi);
            let rotation_velocity = if spin > 0.0 {
                rng.gen_range(-spin..=spin)
            } else {
                0.0
            };
            self.children.push(Particle {
                position: at,
                velocity: Vec2::from_angle(angle) * speed,
                acceleration: Vec2::ZERO,
                is_rising: false,
                lifespan: cfg.particle_lifespan,
                rotation: self.ascent.rotation,
                rotation_velocity,
                color,
            });
        }
    }
}

#[inline]
fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Owns every live firework and the auto-spawn policy.
///
/// Typical usage from the frame loop:
/// - `step(viewport, auto_spawn_allowed)` once per animation frame
/// - `on_click(pos)` from the click handler
/// - `sweep(pos)` from the pointer-move handler
pub struct FireworkEngine {
    pub config: ParticleConfig,
    fireworks: Vec<Firework>,
    labels: Vec<char>,
    next_label: usize,
    user_clicked: bool,
    rng: StdRng,
}

impl FireworkEngine {
    pub fn new(config: ParticleConfig, seed: u64) -> Self {
        let mut labels: Vec<char> = config.labels.chars().filter(|c| !c.is_whitespace()).collect();
        if labels.is_empty() {
            labels.push('*');
        }
        Self {
            config,
            fireworks: Vec::new(),
            labels,
            next_label: 0,
            user_clicked: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn len(&self) -> usize {
        self.fireworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }

    /// Live particles, counting the ascent particle of unexploded fireworks.
    pub fn particle_count(&self) -> usize {
        self.fireworks
            .iter()
            .map(|f| if f.exploded { f.children.len() } else { 1 })
            .sum()
    }

    pub fn auto_spawn_stopped(&self) -> bool {
        self.user_clicked
    }

    pub fn clear(&mut self) {
        self.fireworks.clear();
    }

    fn take_label(&mut self) -> char {
        let c = self.labels[self.next_label % self.labels.len()];
        self.next_label = (self.next_label + 1) % self.labels.len();
        c
    }

    /// Launch with an explicit initial velocity. Ignores `max_active`.
    pub fn launch(&mut self, origin: Vec2, velocity: Vec2) -> &Firework {
        let label = self.take_label();
        let spin = self.config.rising_spin;
        let lifespan = self.config.particle_lifespan;
        self.fireworks
            .push(Firework::new(origin, velocity, label, spin, lifespan));
        log::debug!(
            "[fx] launch '{}' at ({:.0},{:.0}) v=({:.2},{:.2})",
            label,
            origin.x,
            origin.y,
            velocity.x,
            velocity.y
        );
        &self.fireworks[self.fireworks.len() - 1]
    }

    /// Launch from `origin` with a random upward speed and slight drift.
    pub fn spawn_at(&mut self, origin: Vec2) -> bool {
        if self.fireworks.len() >= self.config.max_active {
            return false;
        }
        let (lo, hi) = ordered(self.config.launch_speed_min, self.config.launch_speed_max);
        let speed = self.rng.gen_range(lo..=hi);
        let drift = self.config.launch_drift.abs();
        let vx = if drift > 0.0 {
            self.rng.gen_range(-drift..=drift)
        } else {
            0.0
        };
        self.launch(origin, Vec2::new(vx, -speed));
        true
    }

    /// The first click anywhere ends auto-spawning for good; later clicks
    /// each launch one firework from the click point.
    pub fn on_click(&mut self, pos: Vec2) -> bool {
        if !self.user_clicked {
            self.user_clicked = true;
            log::info!("[fx] auto-spawn stopped by click");
            return false;
        }
        self.spawn_at(pos)
    }

    /// One animation tick: maybe auto-spawn, then advance and reap.
    pub fn step(&mut self, viewport: Vec2, auto_spawn_allowed: bool) {
        if auto_spawn_allowed && !self.user_clicked && viewport.x > 0.0 {
            let roll: f64 = self.rng.gen();
            if roll < self.config.spawn_probability {
                let x = self.rng.gen_range(0.0..viewport.x);
                self.spawn_at(Vec2::new(x, viewport.y));
            }
        }
        self.update();
    }

    /// Advance every firework one tick without spawning.
    pub fn update(&mut self) {
        let cfg = &self.config;
        let rng = &mut self.rng;
        for fw in self.fireworks.iter_mut() {
            fw.update(cfg, rng);
        }
        self.fireworks.retain(|f| !f.done());
    }

    /// Removes every particle inside the square box around `pointer`. A swept
    /// ascent particle takes its whole firework with it. Returns how many
    /// particles were removed.
    pub fn sweep(&mut self, pointer: Vec2) -> usize {
        let half = self.config.sweep_half_extent;
        let mut removed = 0;
        self.fireworks.retain_mut(|fw| {
            if !fw.exploded {
                if fw.ascent.within(pointer, half) {
                    removed += 1;
                    return false;
                }
                return true;
            }
            let before = fw.children.len();
            fw.children.retain(|p| !p.within(pointer, half));
            removed += before - fw.children.len();
            !fw.done()
        });
        removed
    }
}
