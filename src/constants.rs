/// Animation and scroll tuning constants.
///
/// These are the defaults behind `ParticleConfig`, `ScrollConfig` and the
/// easing presets. A page can override any of them through the JSON config
/// block; nothing else in the crate hard-codes these numbers.
// Particle physics (units are canvas px per tick)
pub const GRAVITY: f32 = 0.13;
pub const PARTICLE_LIFESPAN: f32 = 50.0;
pub const LIFESPAN_DECAY: f32 = 2.5; // per tick, exploded particles only
pub const EXPLOSION_PARTICLE_COUNT: usize = 16;
pub const EXPLOSION_SPEED_MIN: f32 = 4.0;
pub const EXPLOSION_SPEED_MAX: f32 = 15.0;
pub const CHILD_DAMPING: f32 = 0.92; // velocity scale per tick after explosion

// Spin (radians per tick)
pub const RISING_SPIN: f32 = 0.05;
pub const FALLING_SPIN_MAX: f32 = 0.1;

// Launch
pub const LAUNCH_SPEED_MIN: f32 = 8.0;
pub const LAUNCH_SPEED_MAX: f32 = 12.0;
pub const LAUNCH_DRIFT: f32 = 0.6; // max |vx| of a rising particle
pub const SPAWN_PROBABILITY: f64 = 0.015; // per frame, while auto-spawn is on
pub const MAX_ACTIVE_FIREWORKS: usize = 24;
pub const DEFAULT_LABELS: &str = "WELCOME";

// Interaction
pub const SWEEP_HALF_EXTENT: f32 = 24.0; // half side of the dismiss box

// Config limits (accepted page-config ranges)
pub const CONFIG_SPEED_LIMIT: f32 = 1_000.0; // px per tick, launch/explosion/drift
pub const CONFIG_SPIN_LIMIT: f32 = std::f32::consts::TAU; // rad per tick
pub const CONFIG_EXTENT_LIMIT: f32 = 10_000.0; // px, sweep box half side
pub const CONFIG_MAX_ACTIVE_LIMIT: usize = 1_000;
pub const CONFIG_PARTICLE_COUNT_LIMIT: usize = 512;

// Drawing
pub const PETAL_RADIUS: f64 = 7.0;
pub const LABEL_FONT: &str = "bold 11px 'Quicksand', system-ui, sans-serif";
pub const PETAL_COLOR: [u8; 3] = [255, 183, 197]; // rising particles
pub const CENTER_COLOR: [u8; 3] = [255, 236, 170];
pub const LABEL_COLOR: &str = "#5a3d4a";
pub const EXPLOSION_PALETTE: [[u8; 3]; 6] = [
    [255, 105, 180], // hot pink
    [255, 182, 193], // light pink
    [221, 160, 221], // plum
    [186, 130, 255], // lavender
    [255, 200, 120], // apricot
    [255, 240, 245], // blush white
];

// Scroll smoothing
pub const LERP_FACTOR: f64 = 0.15;
pub const VELOCITY_MULTIPLIER: f64 = 0.02;
pub const VELOCITY_DAMPING: f64 = 0.95;
pub const SCROLL_IDLE_MS: f64 = 100.0;

// Easing breakpoints
pub const EASE_IN_END: f64 = 0.25;
pub const EASE_OUT_START: f64 = 0.65;
pub const EASE_IN_SCALE: f64 = 0.3;
pub const REVEAL_RAMP_SLOPE: f64 = 2.2183; // reaches 0.892 at EASE_OUT_START
pub const REVEAL_EASE_OUT_POWER: f64 = 3.0;
pub const SETTLE_RAMP_SLOPE: f64 = 1.2258; // reaches 0.495 at EASE_OUT_START
pub const SETTLE_EASE_OUT_POWER: f64 = 4.5;

// Default tracked layer background sweep (collapsed -> expanded)
pub const LAYER_BG_FROM: [u8; 3] = [255, 248, 250];
pub const LAYER_BG_TO: [u8; 3] = [40, 32, 48];
