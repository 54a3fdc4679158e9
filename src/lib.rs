//! Star Strike - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input adaptation and platform errors
//! - `audio`: Procedural sound effects driven by simulation events
//! - `tuning`: Data-driven game balance
//! - `config`: JSON config loading (tuning + settings)

pub mod audio;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use config::{ConfigError, GameConfig};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one frame-equivalent)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (origin top-left, y grows downward)
    pub const PLAY_WIDTH: f32 = 480.0;
    pub const PLAY_HEIGHT: f32 = 800.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Units per frame-equivalent
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Gap between the ship's bottom edge and the ground line
    pub const PLAYER_GROUND_GAP: f32 = 60.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 8.0;
    /// Bullets spawn this far above the ship's top edge
    pub const BULLET_SPAWN_OFFSET: f32 = 10.0;
    pub const FIRE_COOLDOWN_MS: f32 = 150.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_MIN_SPEED: f32 = 2.0;
    pub const ENEMY_MAX_SPEED: f32 = 4.0;
    pub const ENEMY_HEALTH: u8 = 1;

    /// Spawn pacing (milliseconds)
    pub const SPAWN_INTERVAL_START_MS: f32 = 2000.0;
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 5.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 800.0;

    /// Run rules
    pub const STARTING_LIVES: u8 = 3;
    pub const SCORE_PER_ENEMY: u64 = 100;

    /// Explosion effect (per frame-equivalent)
    pub const EXPLOSION_START_RADIUS: f32 = 5.0;
    pub const EXPLOSION_GROWTH: f32 = 2.0;
    pub const EXPLOSION_MAX_RADIUS: f32 = 40.0;
    pub const EXPLOSION_FADE: f32 = 0.05;

    /// Particle effect (per frame-equivalent)
    pub const PARTICLES_PER_BURST: usize = 8;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;
}

/// Milliseconds in a timestep given in seconds
#[inline]
pub fn dt_millis(dt: f32) -> f32 {
    dt * 1000.0
}

/// Number of frame-equivalents covered by a timestep
///
/// Per-tick motion constants are expressed per frame-equivalent; scaling by
/// this keeps motion tied to elapsed time rather than tick count.
#[inline]
pub fn frame_steps(dt: f32) -> f32 {
    dt / consts::SIM_DT
}
