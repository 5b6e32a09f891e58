//! Enemy pursuit and contact damage
//!
//! Every live enemy walks straight at the player each frame. Enemies close
//! enough to touch drain player health; enemies whose health reached zero are
//! removed here and scored.

use glam::Vec3;
use rand::Rng;

use super::arena::ArenaBounds;
use super::state::{EnemyId, EnemyStore, Player};
use crate::consts::PURSUIT_EPSILON;
use crate::facing_yaw;
use crate::tuning::Tuning;

/// What one enemy step did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiOutcome {
    /// IDs removed this frame, in store order
    pub killed: Vec<EnemyId>,
    /// Player health lost to contact
    pub contact_damage: f32,
}

/// Per-frame pursuit speed: lerp(min, max, r * jitter) for r in [0, 1)
pub fn pursuit_speed<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> f32 {
    let r: f32 = rng.random();
    let t = r * tuning.enemy_speed_jitter;
    tuning.enemy_speed_min + (tuning.enemy_speed_max - tuning.enemy_speed_min) * t
}

/// Unit direction from `from` to `to`, or zero when they (nearly) coincide
pub fn pursuit_direction(from: Vec3, to: Vec3) -> (Vec3, f32) {
    let offset = to - from;
    let dist = offset.length();
    if dist > PURSUIT_EPSILON {
        (offset / dist, dist)
    } else {
        (Vec3::ZERO, dist)
    }
}

/// Advance every live enemy one frame.
///
/// Dead enemies are tombstoned during the scan and compacted at the end, so
/// indices stay valid throughout.
pub fn step_enemies<R: Rng + ?Sized>(
    enemies: &mut EnemyStore,
    player: &mut Player,
    arena: &ArenaBounds,
    tuning: &Tuning,
    rng: &mut R,
    dt: f32,
) -> AiOutcome {
    let mut outcome = AiOutcome::default();

    for index in 0..enemies.slot_count() {
        let Some(enemy) = enemies.get_mut(index) else {
            continue;
        };

        let (dir, dist) = pursuit_direction(enemy.pos, player.pos);
        let speed = pursuit_speed(tuning, rng);
        enemy.pos = arena.clamp(enemy.pos + dir * speed * dt);

        let facing = player.pos - enemy.pos;
        if facing.x != 0.0 || facing.z != 0.0 {
            enemy.yaw = facing_yaw(facing);
        }

        if dist < tuning.contact_range {
            let before = player.health;
            player.take_damage(tuning.contact_damage_per_sec * dt);
            outcome.contact_damage += before - player.health;
        }

        if !enemy.is_alive() {
            if let Some(dead) = enemies.kill(index) {
                log::debug!("Enemy {} destroyed", dead.id);
                outcome.killed.push(dead.id);
            }
        }
    }

    enemies.compact();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup(enemies: &[(u32, Vec3, f32)]) -> (EnemyStore, Player) {
        let mut store = EnemyStore::new();
        for &(id, pos, health) in enemies {
            store.push(Enemy::new(id, pos, health));
        }
        (store, Player::new(Vec3::new(0.0, 1.6, 0.0), 100.0))
    }

    fn step(store: &mut EnemyStore, player: &mut Player, dt: f32) -> AiOutcome {
        let mut rng = Pcg32::seed_from_u64(5);
        step_enemies(
            store,
            player,
            &ArenaBounds::default(),
            &Tuning::default(),
            &mut rng,
            dt,
        )
    }

    #[test]
    fn test_speed_range() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..1000 {
            let s = pursuit_speed(&tuning, &mut rng);
            assert!((2.8..=3.2).contains(&s), "speed {s} out of range");
        }
    }

    #[test]
    fn test_enemy_closes_distance() {
        let (mut store, mut player) = setup(&[(1, Vec3::new(10.0, 0.8, 0.0), 100.0)]);
        let before = store.get(0).map(|e| e.pos.distance(player.pos)).unwrap_or_default();
        step(&mut store, &mut player, 0.05);
        let enemy = store.get(0).expect("still alive");
        let after = enemy.pos.distance(player.pos);
        assert!(after < before);
        assert!(before - after >= 2.8 * 0.05 - 1e-4);
        // Facing the player along -X
        assert!((enemy.yaw + std::f32::consts::FRAC_PI_2).abs() < 0.05);
    }

    #[test]
    fn test_coincident_enemy_stays_finite() {
        let (mut store, mut player) = setup(&[(1, Vec3::new(0.0, 1.6, 0.0), 100.0)]);
        let outcome = step(&mut store, &mut player, 0.05);
        let enemy = store.get(0).expect("still alive");
        assert!(enemy.pos.is_finite());
        assert_eq!(enemy.pos, Vec3::new(0.0, 1.6, 0.0));
        assert!(enemy.yaw.is_finite());
        assert!((outcome.contact_damage - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_contact_damage_scaled_by_delta() {
        let (mut store, mut player) = setup(&[(1, Vec3::new(1.0, 1.6, 0.0), 100.0)]);
        step(&mut store, &mut player, 0.05);
        assert!((player.health - 99.5).abs() < 1e-4);
    }

    #[test]
    fn test_far_enemy_deals_no_damage() {
        let (mut store, mut player) = setup(&[(1, Vec3::new(5.0, 1.6, 0.0), 100.0)]);
        step(&mut store, &mut player, 0.05);
        assert_eq!(player.health, 100.0);
    }

    #[test]
    fn test_health_floors_at_zero() {
        let (mut store, mut player) = setup(&[
            (1, Vec3::new(0.5, 1.6, 0.0), 100.0),
            (2, Vec3::new(-0.5, 1.6, 0.0), 100.0),
        ]);
        player.health = 0.6;
        let outcome = step(&mut store, &mut player, 0.05);
        assert_eq!(player.health, 0.0);
        assert!((outcome.contact_damage - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_dead_enemies_removed_in_order() {
        let (mut store, mut player) = setup(&[
            (1, Vec3::new(20.0, 0.8, 0.0), 0.0),
            (2, Vec3::new(-20.0, 0.8, 0.0), 100.0),
            (3, Vec3::new(0.0, 0.8, 20.0), -50.0),
        ]);
        let outcome = step(&mut store, &mut player, 0.016);
        assert_eq!(outcome.killed, vec![1, 3]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.slot_count(), 1);
        assert_eq!(store.get(0).map(|e| e.id), Some(2));
    }

    #[test]
    fn test_enemies_clamped_to_arena() {
        let (mut store, mut player) = setup(&[(1, Vec3::new(38.5, 0.8, 38.5), 100.0)]);
        player.pos = Vec3::new(38.5, 1.6, 38.5);
        step(&mut store, &mut player, 0.05);
        let enemy = store.get(0).expect("alive");
        assert!(enemy.pos.x <= 38.5 && enemy.pos.z <= 38.5);
    }
}
