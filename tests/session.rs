//! Whole-session behavior through the public API

use fps_arena::sim::{GameState, HeldKeys, InputState, apply_look, batch_size, fire, tick};
use fps_arena::{Tuning, TuningError};
use glam::Vec3;
use proptest::prelude::*;

fn locked(keys: HeldKeys) -> InputState {
    InputState { keys, locked: true }
}

fn positions(state: &GameState) -> Vec<Vec3> {
    state.enemies.iter().map(|e| e.pos).collect()
}

/// A fixed input script: strafe and turn, firing every tenth frame
fn play_scripted(seed: u64, frames: u32) -> GameState {
    let mut state = GameState::new(seed);
    for frame in 0..frames {
        let keys = HeldKeys {
            forward: frame % 90 < 45,
            left: frame % 60 < 20,
            right: frame % 60 >= 40,
            back: false,
        };
        let input = locked(keys);
        apply_look(&mut state.player, ((frame % 7) as f32) - 3.0, 0.002);
        if frame % 10 == 0 {
            fire(&mut state, &input);
        }
        tick(&mut state, &input, 1.0 / 60.0);
    }
    state
}

#[test]
fn initial_session() {
    let state = GameState::new(123);
    assert_eq!(state.wave(), 1);
    assert_eq!(state.score, 0);
    assert_eq!(state.player.health, 100.0);
    assert_eq!(state.enemies.len(), 6);
    assert_eq!(state.player.pos, Vec3::new(0.0, 1.6, 5.0));
}

#[test]
fn same_seed_same_session() {
    let a = play_scripted(99, 600);
    let b = play_scripted(99, 600);
    assert_eq!(a.player, b.player);
    assert_eq!(a.score, b.score);
    assert_eq!(a.wave(), b.wave());
    assert_eq!(positions(&a), positions(&b));
}

#[test]
fn different_seeds_spawn_differently() {
    let a = GameState::new(1);
    let b = GameState::new(2);
    assert_ne!(positions(&a), positions(&b));
}

#[test]
fn cleared_waves_grow_to_cap() {
    let mut state = GameState::new(8);
    let input = locked(HeldKeys::default());

    for _ in 0..20 {
        let previous = state.wave();
        for enemy in state.enemies.iter_mut() {
            enemy.health = 0.0;
        }
        let killed = state.enemies.len() as u64;
        let score_before = state.score;

        let report = tick(&mut state, &input, 0.016);
        let spawned = report.wave_spawned.expect("empty arena spawns a wave");

        assert_eq!(state.score - score_before, killed * 100);
        assert_eq!(spawned.wave, previous + 1);
        assert_eq!(spawned.count, (5 + previous + 1).min(20));
        assert_eq!(spawned.count, batch_size(state.wave(), &state.tuning));
        assert_eq!(state.enemies.len() as u32, spawned.count);
    }
    assert_eq!(state.enemies.len(), 20);
}

#[test]
fn shot_at_nothing_changes_no_health() {
    let mut state = GameState::new(3);
    // Look out of the arena through a corner, away from the spawn ring
    state.player.pos = Vec3::new(-38.5, 1.6, -38.5);
    state.player.yaw = std::f32::consts::PI * 0.75;
    let before: Vec<f32> = state.enemies.iter().map(|e| e.health).collect();

    let report = fire(&mut state, &locked(HeldKeys::default())).expect("locked shot");
    assert!(report.hit.is_none());
    let after: Vec<f32> = state.enemies.iter().map(|e| e.health).collect();
    assert_eq!(before, after);
}

#[test]
fn tuning_json_overrides_and_defaults() {
    let tuning = Tuning::from_json(r#"{ "initial_enemies": 2, "player_speed": 4.0 }"#)
        .expect("valid tuning");
    assert_eq!(tuning.player_speed, 4.0);
    assert_eq!(tuning.shot_damage, Tuning::default().shot_damage);

    let state = GameState::with_tuning(1, tuning);
    assert_eq!(state.enemies.len(), 2);
}

#[test]
fn tuning_json_rejects_inverted_speed_range() {
    let err = Tuning::from_json(r#"{ "enemy_speed_min": 5.0, "enemy_speed_max": 1.0 }"#)
        .expect_err("inverted range");
    assert!(matches!(err, TuningError::Invalid { .. }));
}

proptest! {
    #[test]
    fn paused_session_is_frozen(
        dts in prop::collection::vec(0.0f32..10.0, 1..50),
        keys in any::<[bool; 4]>(),
    ) {
        let mut state = GameState::new(17);
        let input = InputState {
            keys: HeldKeys { forward: keys[0], back: keys[1], left: keys[2], right: keys[3] },
            locked: false,
        };
        let player = state.player.clone();
        let enemies = positions(&state);

        for dt in dts {
            tick(&mut state, &input, dt);
        }

        prop_assert_eq!(&state.player, &player);
        prop_assert_eq!(positions(&state), enemies);
    }

    #[test]
    fn health_never_regenerates_or_goes_negative(
        seed in any::<u64>(),
        frames in prop::collection::vec((any::<[bool; 4]>(), 0.0f32..0.05), 1..200),
    ) {
        let mut state = GameState::new(seed);
        let mut last = state.player.health;

        for (keys, dt) in frames {
            let input = locked(HeldKeys { forward: keys[0], back: keys[1], left: keys[2], right: keys[3] });
            tick(&mut state, &input, dt);
            prop_assert!(state.player.health >= 0.0);
            prop_assert!(state.player.health <= last);
            last = state.player.health;

            let limit = 38.5 + 1e-4;
            prop_assert!(state.player.pos.x.abs() <= limit && state.player.pos.z.abs() <= limit);
        }
    }
}
