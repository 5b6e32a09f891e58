//! FPS Arena - A first-person arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, enemy AI, hit-scan, waves)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser listener and frame-request lifecycle
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `ui`: HUD snapshot for display

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Longest frame delta the simulation will integrate (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.05;

    /// Arena dimensions
    pub const ARENA_HALF_EXTENT: f32 = 40.0;
    /// Keeps entities off the walls (half the player's collision size)
    pub const ARENA_MARGIN: f32 = 1.5;
    pub const WALL_HEIGHT: f32 = 3.0;
    pub const WALL_THICKNESS: f32 = 1.0;

    /// Player defaults
    pub const PLAYER_START: [f32; 3] = [0.0, 1.6, 5.0];
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;

    /// Enemy defaults
    pub const ENEMY_HEALTH: f32 = 100.0;
    pub const ENEMY_HALF_EXTENTS: [f32; 3] = [0.4, 0.8, 0.4];
    pub const ENEMY_SPAWN_HEIGHT: f32 = 0.8;
    pub const ENEMY_SPEED_MIN: f32 = 2.8;
    pub const ENEMY_SPEED_MAX: f32 = 4.8;
    /// Fraction of the speed range an enemy may use each frame
    pub const ENEMY_SPEED_JITTER: f32 = 0.2;
    pub const CONTACT_RANGE: f32 = 1.2;
    pub const CONTACT_DAMAGE_PER_SEC: f32 = 10.0;
    /// Below this distance the pursuit direction is treated as zero
    pub const PURSUIT_EPSILON: f32 = 0.001;
    pub const KILL_REWARD: u64 = 100;

    /// Weapon
    pub const SHOT_DAMAGE: f32 = 50.0;
    pub const MUZZLE_FLASH: f32 = 0.12;
    /// Flash strength lost per second
    pub const FLASH_DECAY: f32 = 2.5;
    pub const HIT_HIGHLIGHT_SECS: f32 = 0.06;

    /// Waves
    pub const INITIAL_ENEMIES: u32 = 6;
    pub const WAVE_BASE_SIZE: u32 = 5;
    pub const WAVE_MAX_SIZE: u32 = 20;
    pub const WAVE_COOLDOWN_SECS: f32 = 1.5;
    /// Spawn ring radius as a fraction of the half extent
    pub const SPAWN_RING_FACTOR: f32 = 0.9;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Horizontal forward vector for a camera yaw (yaw 0 looks down -Z)
#[inline]
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal right vector for a camera yaw (yaw 0 points along +X)
#[inline]
pub fn yaw_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Yaw that turns an object's +Z axis toward `offset` on the ground plane
#[inline]
pub fn facing_yaw(offset: Vec3) -> f32 {
    offset.x.atan2(offset.z)
}
