//! Player movement and mouse look

use glam::Vec3;

use super::arena::ArenaBounds;
use super::input::HeldKeys;
use super::state::Player;
use crate::{normalize_angle, yaw_forward, yaw_right};

/// World-space displacement for one frame of held keys
pub fn displacement(keys: &HeldKeys, yaw: f32, speed: f32, dt: f32) -> Vec3 {
    let intent = keys.intent();
    if intent == glam::Vec2::ZERO {
        return Vec3::ZERO;
    }
    (yaw_right(yaw) * intent.x + yaw_forward(yaw) * intent.y) * speed * dt
}

/// Move the player by held keys relative to the camera, then clamp to the arena
pub fn resolve_movement(
    player: &mut Player,
    keys: &HeldKeys,
    arena: &ArenaBounds,
    speed: f32,
    dt: f32,
) {
    player.pos += displacement(keys, player.yaw, speed, dt);
    player.pos = arena.clamp(player.pos);
}

/// Turn the camera by a horizontal pointer movement (pixels)
pub fn apply_look(player: &mut Player, movement_x: f32, sensitivity: f32) {
    player.yaw = normalize_angle(player.yaw - movement_x * sensitivity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn player_at(x: f32, z: f32, yaw: f32) -> Player {
        let mut p = Player::new(Vec3::new(x, 1.6, z), 100.0);
        p.yaw = yaw;
        p
    }

    #[test]
    fn test_forward_at_zero_yaw_moves_neg_z() {
        let mut p = player_at(0.0, 5.0, 0.0);
        let keys = HeldKeys {
            forward: true,
            ..Default::default()
        };
        resolve_movement(&mut p, &keys, &ArenaBounds::default(), 10.0, 0.05);
        assert!((p.pos - Vec3::new(0.0, 1.6, 4.5)).length() < 1e-5);
    }

    #[test]
    fn test_forward_follows_yaw() {
        let mut p = player_at(0.0, 0.0, FRAC_PI_2);
        let keys = HeldKeys {
            forward: true,
            ..Default::default()
        };
        resolve_movement(&mut p, &keys, &ArenaBounds::default(), 10.0, 0.1);
        assert!((p.pos.x + 1.0).abs() < 1e-5);
        assert!(p.pos.z.abs() < 1e-5);
    }

    #[test]
    fn test_strafe_right_at_zero_yaw() {
        let d = displacement(
            &HeldKeys {
                right: true,
                ..Default::default()
            },
            0.0,
            10.0,
            0.05,
        );
        assert!((d - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_diagonal_not_faster() {
        let keys = HeldKeys {
            forward: true,
            right: true,
            ..Default::default()
        };
        let d = displacement(&keys, 0.3, 10.0, 0.05);
        assert!((d.length() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_clamped_at_wall() {
        let mut p = player_at(38.4, 0.0, 0.0);
        let keys = HeldKeys {
            right: true,
            ..Default::default()
        };
        resolve_movement(&mut p, &keys, &ArenaBounds::default(), 10.0, 0.05);
        assert_eq!(p.pos.x, 38.5);
    }

    #[test]
    fn test_look_turns_left_on_negative_movement() {
        let mut p = player_at(0.0, 0.0, 0.0);
        apply_look(&mut p, -100.0, 0.002);
        assert!((p.yaw - 0.2).abs() < 1e-6);
        apply_look(&mut p, 4000.0, 0.002);
        assert!(p.yaw >= -std::f32::consts::PI && p.yaw < std::f32::consts::PI);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            x in -38.5f32..=38.5,
            z in -38.5f32..=38.5,
            yaw in -3.0f32..3.0,
            dt in 0.0f32..=0.05,
            keys in any::<[bool; 4]>(),
        ) {
            let mut p = player_at(x, z, yaw);
            let [forward, back, left, right] = keys;
            let keys = HeldKeys { forward, back, left, right };
            resolve_movement(&mut p, &keys, &ArenaBounds::default(), 10.0, dt);
            prop_assert!(p.pos.x.abs() <= 38.5);
            prop_assert!(p.pos.z.abs() <= 38.5);
            prop_assert_eq!(p.pos.y, 1.6);
        }
    }
}
