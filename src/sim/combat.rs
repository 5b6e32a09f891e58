//! Hit-scan shooting
//!
//! A shot is an instantaneous ray from the player's eye along the camera
//! forward vector, tested against each live enemy's yaw-rotated box.

use glam::Vec3;

use super::input::InputState;
use super::state::{EnemyId, EnemyStore, GameState};
use crate::yaw_forward;

/// Parallel-axis threshold for the slab test
const PARALLEL_EPSILON: f32 = 1e-8;

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// The struck enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub enemy_id: EnemyId,
    pub distance: f32,
    pub point: Vec3,
    /// Health after the shot was applied
    pub remaining_health: f32,
}

impl Hit {
    /// The shot brought the enemy to zero (removal happens on the next step)
    pub fn lethal(&self) -> bool {
        self.remaining_health <= 0.0
    }
}

/// Result of an accepted fire action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotReport {
    pub ray: Ray,
    pub hit: Option<Hit>,
}

/// Slab test of a ray against an origin-centered box with the given half
/// extents. Boundaries count as hits. Returns the entry distance, or 0 when
/// the origin is inside.
pub fn ray_aabb(origin: Vec3, dir: Vec3, half: Vec3) -> Option<f32> {
    let mut t_min: f32 = 0.0;
    let mut t_max: f32 = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let (lo, hi) = (-half[axis], half[axis]);

        if d.abs() < PARALLEL_EPSILON {
            if o < lo || o > hi {
                return None;
            }
        } else {
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            let (t_near, t_far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            t_min = t_min.max(t_near);
            t_max = t_max.min(t_far);
            if t_min > t_max {
                return None;
            }
        }
    }

    Some(t_min)
}

/// Ray against a box centered at `center`, rotated by `yaw` about +Y
pub fn ray_oriented_box(ray: &Ray, center: Vec3, yaw: f32, half: Vec3) -> Option<f32> {
    let (s, c) = yaw.sin_cos();
    let to_local = |v: Vec3| Vec3::new(v.x * c - v.z * s, v.y, v.x * s + v.z * c);
    ray_aabb(to_local(ray.origin - center), to_local(ray.dir), half)
}

/// Nearest live enemy along the ray as (slot index, distance).
///
/// Equal distances resolve to the lowest slot.
pub fn nearest_hit(enemies: &EnemyStore, ray: &Ray, half: Vec3) -> Option<(usize, f32)> {
    enemies
        .iter_indexed()
        .filter(|(_, e)| e.is_alive())
        .filter_map(|(i, e)| ray_oriented_box(ray, e.pos, e.yaw, half).map(|t| (i, t)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// The ray a shot would travel right now
pub fn aim_ray(state: &GameState) -> Ray {
    Ray::new(state.player.pos, yaw_forward(state.player.yaw))
}

/// Fire the weapon.
///
/// Ignored (returns `None`) while the pointer is not locked. Otherwise the
/// muzzle flash is added and the nearest enemy on the ray, if any, takes
/// damage and is highlighted.
pub fn fire(state: &mut GameState, input: &InputState) -> Option<ShotReport> {
    if !input.locked {
        return None;
    }

    let tuning = &state.tuning;
    state.flash = (state.flash + tuning.muzzle_flash).min(1.0);

    let ray = aim_ray(state);
    let damage = tuning.shot_damage;
    let highlight = tuning.hit_highlight_secs;

    let hit = nearest_hit(&state.enemies, &ray, tuning.enemy_half_extents).and_then(
        |(index, distance)| {
            let enemy = state.enemies.get_mut(index)?;
            enemy.health -= damage;
            enemy.highlight = highlight;
            Some(Hit {
                enemy_id: enemy.id,
                distance,
                point: ray.at(distance),
                remaining_health: enemy.health,
            })
        },
    );

    match &hit {
        Some(h) => log::debug!(
            "Shot hit enemy {} at {:.1}m ({} hp left)",
            h.enemy_id,
            h.distance,
            h.remaining_health
        ),
        None => log::debug!("Shot missed"),
    }

    Some(ShotReport { ray, hit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;
    use std::f32::consts::FRAC_PI_4;

    const HALF: Vec3 = Vec3::new(0.4, 0.8, 0.4);

    fn locked() -> InputState {
        InputState {
            locked: true,
            ..Default::default()
        }
    }

    /// Session with the player at the origin looking down -Z and the given enemies
    fn arena_with(enemies: &[Vec3]) -> GameState {
        let mut state = GameState::new(1);
        state.enemies = EnemyStore::new();
        state.player.pos = Vec3::new(0.0, 1.6, 0.0);
        for &pos in enemies {
            state.spawn_enemy_at(pos);
        }
        state
    }

    #[test]
    fn test_ray_aabb_front_hit() {
        let t = ray_aabb(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, HALF).expect("hit");
        assert!((t - 4.6).abs() < 1e-5);
    }

    #[test]
    fn test_ray_aabb_behind_misses() {
        assert!(ray_aabb(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, HALF).is_none());
    }

    #[test]
    fn test_ray_aabb_grazing_top_face_counts() {
        assert!(ray_aabb(Vec3::new(0.0, 0.8, 5.0), Vec3::NEG_Z, HALF).is_some());
        assert!(ray_aabb(Vec3::new(0.0, 0.81, 5.0), Vec3::NEG_Z, HALF).is_none());
    }

    #[test]
    fn test_rotated_box_wider_on_diagonal() {
        // At 45 degrees the box's corner reaches 0.4 * sqrt(2) along X
        let ray = Ray::new(Vec3::new(0.5, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray_oriented_box(&ray, Vec3::ZERO, 0.0, HALF).is_none());
        assert!(ray_oriented_box(&ray, Vec3::ZERO, FRAC_PI_4, HALF).is_some());
    }

    #[test]
    fn test_fire_ignored_when_unlocked() {
        let mut state = arena_with(&[Vec3::new(0.0, 0.8, -10.0)]);
        assert!(fire(&mut state, &InputState::default()).is_none());
        assert_eq!(state.flash, 0.0);
        assert_eq!(state.enemies.get(0).map(|e| e.health), Some(100.0));
    }

    #[test]
    fn test_miss_leaves_health_unchanged() {
        let mut state = arena_with(&[Vec3::new(5.0, 0.8, -10.0), Vec3::new(0.0, 0.8, 10.0)]);
        let report = fire(&mut state, &locked()).expect("accepted");
        assert!(report.hit.is_none());
        assert!(state.enemies.iter().all(|e| e.health == 100.0));
        assert!((state.flash - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_enemy_takes_the_hit() {
        let mut state = arena_with(&[Vec3::new(0.0, 0.8, -20.0), Vec3::new(0.0, 0.8, -8.0)]);
        let report = fire(&mut state, &locked()).expect("accepted");
        let hit = report.hit.expect("hit");
        assert_eq!(hit.enemy_id, state.enemies.get(1).map(|e| e.id).unwrap_or_default());
        assert!((hit.distance - 7.6).abs() < 1e-4);
        assert_eq!(state.enemies.get(0).map(|e| e.health), Some(100.0));
        assert_eq!(state.enemies.get(1).map(|e| e.health), Some(50.0));
        assert!(state.enemies.get(1).map(|e| e.highlight).unwrap_or_default() > 0.0);
    }

    #[test]
    fn test_tie_goes_to_lowest_slot() {
        let mut store = EnemyStore::new();
        store.push(Enemy::new(1, Vec3::new(0.0, 0.8, -8.0), 100.0));
        store.push(Enemy::new(2, Vec3::new(0.0, 0.8, -8.0), 100.0));
        let ray = Ray::new(Vec3::new(0.0, 1.6, 0.0), Vec3::NEG_Z);
        assert_eq!(nearest_hit(&store, &ray, HALF).map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_dead_enemy_not_targetable() {
        let mut state = arena_with(&[Vec3::new(0.0, 0.8, -8.0), Vec3::new(0.0, 0.8, -20.0)]);
        if let Some(e) = state.enemies.get_mut(0) {
            e.health = 0.0;
        }
        let hit = fire(&mut state, &locked()).and_then(|r| r.hit).expect("hit");
        assert!(hit.distance > 19.0);
    }

    #[test]
    fn test_two_shots_are_lethal() {
        let mut state = arena_with(&[Vec3::new(0.0, 0.8, -8.0)]);
        let first = fire(&mut state, &locked()).and_then(|r| r.hit).expect("hit");
        assert!(!first.lethal());
        let second = fire(&mut state, &locked()).and_then(|r| r.hit).expect("hit");
        assert!(second.lethal());
    }

    #[test]
    fn test_flash_saturates() {
        let mut state = arena_with(&[]);
        for _ in 0..20 {
            fire(&mut state, &locked());
        }
        assert_eq!(state.flash, 1.0);
    }
}
