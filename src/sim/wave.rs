//! Wave progression
//!
//! A new batch spawns as soon as the arena is empty. The cooldown set at each
//! clear only drives the "wave incoming" banner unless
//! `Tuning::wave_cooldown_gates_spawn` is enabled.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::state::GameState;
use crate::tuning::Tuning;

/// Director phase, derived from the cooldown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Cooldown elapsed
    Active,
    /// A wave was just cleared and the next one announced
    ClearedCooldown,
}

/// Wave counter and post-clear cooldown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDirector {
    /// Current wave number (starts at 1)
    pub wave: u32,
    /// Seconds left on the post-clear cooldown
    pub cooldown: f32,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveDirector {
    pub fn new() -> Self {
        Self {
            wave: 1,
            cooldown: 0.0,
        }
    }

    pub fn phase(&self) -> WavePhase {
        if self.cooldown > 0.0 {
            WavePhase::ClearedCooldown
        } else {
            WavePhase::Active
        }
    }
}

/// A batch spawned this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveSpawned {
    pub wave: u32,
    pub count: u32,
}

/// Enemies in a given wave: base + wave, capped
pub fn batch_size(wave: u32, tuning: &Tuning) -> u32 {
    (tuning.wave_base_size + wave).min(tuning.wave_max_size)
}

/// Spawn `count` enemies at random angles on the spawn ring
pub fn spawn_batch(state: &mut GameState, count: u32) {
    let radius = state.tuning.spawn_radius();
    let height = state.tuning.enemy_spawn_height;
    for _ in 0..count {
        let angle: f32 = state.rng.random_range(0.0..TAU);
        let pos = state
            .arena
            .clamp(Vec3::new(angle.cos() * radius, height, angle.sin() * radius));
        state.spawn_enemy_at(pos);
    }
}

/// Refill the arena when it is empty and advance the cooldown.
///
/// Runs once per simulated frame after the enemy step.
pub fn direct_waves(state: &mut GameState, dt: f32) -> Option<WaveSpawned> {
    let gated = state.tuning.wave_cooldown_gates_spawn && state.waves.cooldown > 0.0;

    let spawned = if state.enemies.is_empty() && !gated {
        state.waves.wave += 1;
        let wave = state.waves.wave;
        let count = batch_size(wave, &state.tuning);
        spawn_batch(state, count);
        state.waves.cooldown = state.tuning.wave_cooldown_secs;
        log::info!("Wave {wave}: {count} enemies");
        Some(WaveSpawned { wave, count })
    } else {
        None
    };

    if state.waves.cooldown > 0.0 {
        state.waves.cooldown = (state.waves.cooldown - dt).max(0.0);
    }

    spawned
}
