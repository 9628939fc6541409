//! Neon FX - procedural visual effects for a themed chat UI
//!
//! Core modules:
//! - `fx`: Deterministic effect simulation (particles, weather, helix, text)
//! - `engine`: Host-facing aggregate that routes input events and ticks
//! - `render`: Declarative draw-list adapter (no GPU dependency)
//! - `settings`: Effect preferences and quality presets

pub mod engine;
pub mod fx;
pub mod render;
pub mod settings;

pub use engine::{Engine, EngineInput};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Effect timing and layout constants
pub mod consts {
    /// Nominal fixed timestep (60 Hz; hosts may substep)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Shockwave lifetime in seconds
    pub const SHOCKWAVE_TTL: f32 = 1.0;
    /// Pointer trail capacity (oldest evicted first)
    pub const TRAIL_CAP: usize = 5;
    /// Fade-out duration applied on eviction
    pub const EVICT_FADE_SECS: f32 = 0.5;

    /// Scroll ripple baseline diameter and growth cap (pixels)
    pub const RIPPLE_BASE_DIAMETER: f32 = 20.0;
    pub const RIPPLE_MAX_GROWTH: f32 = 100.0;
    /// Ring ripples finish expanding (and expire) after this long
    pub const RIPPLE_EXPAND_SECS: f32 = 0.8;

    /// Synaptic mesh cadence and layout
    pub const MESH_ROLL_SECS: f32 = 10.0;
    pub const MESH_REGEN_CHANCE: f32 = 0.3;
    pub const MESH_NODE_COUNT: usize = 15;
    pub const MESH_EDGE_CHANCE: f32 = 0.3;
    pub const MESH_VISIBLE_SECS: f32 = 5.0;

    /// Weather schedule bounds (seconds)
    pub const WEATHER_DELAY_MIN: f32 = 30.0;
    pub const WEATHER_DELAY_MAX: f32 = 90.0;
    pub const WEATHER_COOLDOWN_MIN: f32 = 120.0;
    pub const WEATHER_COOLDOWN_MAX: f32 = 300.0;
    pub const WEATHER_FADE_SECS: f32 = 3.0;
    pub const RAIN_DURATION: f32 = 30.0;
    pub const RAIN_INITIAL_DROPS: usize = 50;
    pub const RAIN_DROP_INTERVAL: f32 = 0.3;
    pub const METEOR_DURATION: f32 = 20.0;
    pub const METEOR_INTERVAL: f32 = 0.6;

    /// Kinetic text: gravity radius, displacement scale, easing times
    pub const GRAVITY_RADIUS: f32 = 100.0;
    pub const GRAVITY_SCALE: f32 = 0.2;
    pub const EASE_IN_SECS: f32 = 0.1;
    pub const EASE_OUT_SECS: f32 = 0.5;
    /// Glitch substitution cadence and odds (applies to every 4th char)
    pub const GLITCH_INTERVAL: f32 = 0.1;
    pub const GLITCH_CHANCE: f32 = 0.3;
    /// Selection burst particles are cleared after this long regardless
    /// of remaining animation state
    pub const BURST_TTL: f32 = 1.0;

    /// Helix layout
    pub const HELIX_FREQUENCY: f32 = 0.02;
    pub const HELIX_SAMPLE_STEP: f32 = 5.0;
    pub const HELIX_HIT_TOLERANCE: f32 = 5.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}
