//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (store slots in spawn order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod arena;
pub mod combat;
pub mod input;
pub mod movement;
pub mod state;
pub mod tick;
pub mod wave;

pub use ai::{AiOutcome, step_enemies};
pub use arena::ArenaBounds;
pub use combat::{Hit, Ray, ShotReport, aim_ray, fire};
pub use input::{HeldKeys, InputState, MoveKey};
pub use movement::{apply_look, resolve_movement};
pub use state::{Enemy, EnemyId, EnemyStore, GameState, Player};
pub use tick::{FrameReport, tick};
pub use wave::{WaveDirector, WavePhase, WaveSpawned, batch_size, direct_waves};
