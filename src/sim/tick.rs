//! Per-frame simulation step
//!
//! Called once per display refresh with the real elapsed time. The delta is
//! clamped so a stalled tab cannot produce a huge jump.

use super::ai::step_enemies;
use super::input::InputState;
use super::movement::resolve_movement;
use super::state::{EnemyId, GameState};
use super::wave::{WaveSpawned, direct_waves};

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Delta actually integrated (seconds)
    pub dt: f32,
    /// False while the pointer is unlocked
    pub simulated: bool,
    pub killed: Vec<EnemyId>,
    pub contact_damage: f32,
    pub wave_spawned: Option<WaveSpawned>,
}

/// Clamp a raw frame delta into [0, max]
#[inline]
pub fn clamp_delta(raw: f32, max: f32) -> f32 {
    if raw.is_nan() { 0.0 } else { raw.clamp(0.0, max) }
}

/// Advance the session by one rendered frame
pub fn tick(state: &mut GameState, input: &InputState, raw_dt: f32) -> FrameReport {
    let dt = clamp_delta(raw_dt, state.tuning.max_frame_delta);
    let mut report = FrameReport {
        dt,
        simulated: input.locked,
        ..Default::default()
    };

    if input.locked {
        state.frame_count += 1;

        // Movement first so enemies chase the post-move position
        resolve_movement(
            &mut state.player,
            &input.keys,
            &state.arena,
            state.tuning.player_speed,
            dt,
        );

        let outcome = step_enemies(
            &mut state.enemies,
            &mut state.player,
            &state.arena,
            &state.tuning,
            &mut state.rng,
            dt,
        );
        state.score += outcome.killed.len() as u64 * state.tuning.kill_reward;
        report.killed = outcome.killed;
        report.contact_damage = outcome.contact_damage;

        report.wave_spawned = direct_waves(state, dt);
    }

    // Cosmetic decay runs even while paused
    state.flash = (state.flash - dt * state.tuning.flash_decay).max(0.0);
    for enemy in state.enemies.iter_mut() {
        if enemy.highlight > 0.0 {
            enemy.highlight = (enemy.highlight - dt).max(0.0);
        }
    }

    report
}
