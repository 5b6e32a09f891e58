//! Axis-aligned arena bounds

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Square arena centered on the origin. Only x and z are bounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Distance from the center to each wall
    pub half_extent: f32,
    /// Gap kept between entities and the walls
    pub margin: f32,
}

impl ArenaBounds {
    pub fn new(half_extent: f32, margin: f32) -> Self {
        Self { half_extent, margin }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.arena_half_extent, tuning.arena_margin)
    }

    /// Largest |x| or |z| a position may have
    #[inline]
    pub fn limit(&self) -> f32 {
        self.half_extent - self.margin
    }

    /// Clamp a position into the playable area (y untouched)
    #[inline]
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        let limit = self.limit();
        Vec3::new(pos.x.clamp(-limit, limit), pos.y, pos.z.clamp(-limit, limit))
    }

    pub fn contains(&self, pos: Vec3) -> bool {
        let limit = self.limit();
        pos.x.abs() <= limit && pos.z.abs() <= limit
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}
