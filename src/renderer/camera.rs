//! First-person camera basis

use glam::Vec3;

use crate::sim::Player;
use crate::{yaw_forward, yaw_right};

/// View basis the shader builds primary rays from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub eye: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// tan(fov_y / 2)
    pub tan_half_fov: f32,
}

impl CameraBasis {
    /// Pitch stays level, so up is always +Y
    pub fn from_player(player: &Player, fov_y: f32) -> Self {
        Self {
            eye: player.pos,
            forward: yaw_forward(player.yaw),
            right: yaw_right(player.yaw),
            up: Vec3::Y,
            tan_half_fov: (fov_y * 0.5).tan(),
        }
    }

    /// World-space direction through a pixel given in normalized device
    /// coordinates (x right, y up, both in [-1, 1])
    pub fn ray_dir(&self, ndc_x: f32, ndc_y: f32, aspect: f32) -> Vec3 {
        (self.forward
            + self.right * ndc_x * self.tan_half_fov * aspect
            + self.up * ndc_y * self.tan_half_fov)
            .normalize()
    }
}
