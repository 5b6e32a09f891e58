//! Held-key and input-lock state
//!
//! Browser events are folded into an [`InputState`] owned by the session; the
//! frame loop reads it but never mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    /// Map a `KeyboardEvent.code` to a direction (layout independent)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(MoveKey::Forward),
            "KeyS" | "ArrowDown" => Some(MoveKey::Back),
            "KeyA" | "ArrowLeft" => Some(MoveKey::Left),
            "KeyD" | "ArrowRight" => Some(MoveKey::Right),
            _ => None,
        }
    }
}

/// Which movement keys are currently down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn set(&mut self, key: MoveKey, down: bool) {
        match key {
            MoveKey::Forward => self.forward = down,
            MoveKey::Back => self.back = down,
            MoveKey::Left => self.left = down,
            MoveKey::Right => self.right = down,
        }
    }

    /// Movement intent: x = strafe right, y = forward.
    ///
    /// Zero when no net direction is held (including opposite keys together),
    /// unit length otherwise.
    pub fn intent(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.back)).normalize_or_zero()
    }
}

/// Per-session input context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub keys: HeldKeys,
    /// Pointer lock held: aiming is captured and the simulation runs
    pub locked: bool,
}

impl InputState {
    /// Apply a key press/release by event code. Returns true if the code was a
    /// movement key.
    pub fn handle_key(&mut self, code: &str, down: bool) -> bool {
        match MoveKey::from_code(code) {
            Some(key) => {
                self.keys.set(key, down);
                true
            }
            None => false,
        }
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}
