//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a session can be
//! rebalanced from JSON without recompiling. Missing fields fall back to the
//! defaults in [`crate::consts`].

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ArenaBounds;

/// Tuning load/validation errors
#[derive(Error, Debug)]
pub enum TuningError {
    /// JSON could not be parsed
    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is out of range
    #[error("Invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_half_extent: f32,
    pub arena_margin: f32,

    // === Player ===
    pub player_start: Vec3,
    pub player_speed: f32,
    pub player_max_health: f32,

    // === Enemies ===
    pub enemy_health: f32,
    pub enemy_half_extents: Vec3,
    pub enemy_spawn_height: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_speed_jitter: f32,
    pub contact_range: f32,
    pub contact_damage_per_sec: f32,
    pub kill_reward: u64,

    // === Weapon ===
    pub shot_damage: f32,
    pub muzzle_flash: f32,
    pub flash_decay: f32,
    pub hit_highlight_secs: f32,

    // === Waves ===
    pub initial_enemies: u32,
    pub wave_base_size: u32,
    pub wave_max_size: u32,
    pub wave_cooldown_secs: f32,
    /// When false the cooldown is cosmetic and a cleared arena refills at once
    pub wave_cooldown_gates_spawn: bool,
    pub spawn_ring_factor: f32,

    // === Frame loop ===
    pub max_frame_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_half_extent: ARENA_HALF_EXTENT,
            arena_margin: ARENA_MARGIN,

            player_start: Vec3::from_array(PLAYER_START),
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,

            enemy_health: ENEMY_HEALTH,
            enemy_half_extents: Vec3::from_array(ENEMY_HALF_EXTENTS),
            enemy_spawn_height: ENEMY_SPAWN_HEIGHT,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_speed_jitter: ENEMY_SPEED_JITTER,
            contact_range: CONTACT_RANGE,
            contact_damage_per_sec: CONTACT_DAMAGE_PER_SEC,
            kill_reward: KILL_REWARD,

            shot_damage: SHOT_DAMAGE,
            muzzle_flash: MUZZLE_FLASH,
            flash_decay: FLASH_DECAY,
            hit_highlight_secs: HIT_HIGHLIGHT_SECS,

            initial_enemies: INITIAL_ENEMIES,
            wave_base_size: WAVE_BASE_SIZE,
            wave_max_size: WAVE_MAX_SIZE,
            wave_cooldown_secs: WAVE_COOLDOWN_SECS,
            wave_cooldown_gates_spawn: false,
            spawn_ring_factor: SPAWN_RING_FACTOR,

            max_frame_delta: MAX_FRAME_DELTA,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.arena_half_extent > 0.0) {
            return invalid("arena_half_extent", "must be positive");
        }
        if !(self.arena_margin >= 0.0) || self.arena_margin >= self.arena_half_extent {
            return invalid("arena_margin", "must be non-negative and below the half extent");
        }
        if !ArenaBounds::from_tuning(self).contains(self.player_start) {
            return invalid("player_start", "must lie inside the playable area");
        }
        if !(self.player_speed >= 0.0) {
            return invalid("player_speed", "must be non-negative");
        }
        if !(self.player_max_health > 0.0) {
            return invalid("player_max_health", "must be positive");
        }
        if !(self.enemy_health > 0.0) {
            return invalid("enemy_health", "must be positive");
        }
        if self.enemy_half_extents.min_element() <= 0.0 {
            return invalid("enemy_half_extents", "must be positive on every axis");
        }
        if !(self.enemy_speed_min >= 0.0) || self.enemy_speed_max < self.enemy_speed_min {
            return invalid("enemy_speed_max", "speed range must be non-negative and ordered");
        }
        if !(0.0..=1.0).contains(&self.enemy_speed_jitter) {
            return invalid("enemy_speed_jitter", "must be within 0..=1");
        }
        let non_negative = [
            ("contact_range", self.contact_range),
            ("contact_damage_per_sec", self.contact_damage_per_sec),
            ("muzzle_flash", self.muzzle_flash),
            ("flash_decay", self.flash_decay),
            ("hit_highlight_secs", self.hit_highlight_secs),
            ("wave_cooldown_secs", self.wave_cooldown_secs),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return invalid(field, "must be non-negative");
            }
        }
        if !(self.shot_damage > 0.0) {
            return invalid("shot_damage", "must be positive");
        }
        if self.wave_max_size == 0 {
            return invalid("wave_max_size", "must be at least 1");
        }
        if !(self.spawn_ring_factor > 0.0) {
            return invalid("spawn_ring_factor", "must be positive");
        }
        if !(self.max_frame_delta > 0.0) {
            return invalid("max_frame_delta", "must be positive");
        }
        Ok(())
    }

    /// Radius of the ring new enemies appear on
    pub fn spawn_radius(&self) -> f32 {
        self.arena_half_extent * self.spawn_ring_factor
    }
}
