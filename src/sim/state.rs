//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]; no step function
//! touches global state.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::ArenaBounds;
use super::wave::WaveDirector;
use crate::tuning::Tuning;

/// Stable enemy identity (never reused within a session)
pub type EnemyId = u32;

/// The player (first-person camera)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Eye position; y is eye height
    pub pos: Vec3,
    /// Camera yaw in radians, normalized to [-π, π)
    pub yaw: f32,
    /// 0..=max_health, never regenerates
    pub health: f32,
}

impl Player {
    pub fn new(start: Vec3, health: f32) -> Self {
        Self {
            pos: start,
            yaw: 0.0,
            health,
        }
    }

    /// Subtract damage, flooring at zero. Non-positive amounts are ignored.
    pub fn take_damage(&mut self, amount: f32) {
        if amount > 0.0 {
            self.health = (self.health - amount).max(0.0);
        }
    }
}

/// An enemy box pursuing the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    /// Box center
    pub pos: Vec3,
    /// Rotation about +Y; the box's +Z axis faces the player
    pub yaw: f32,
    pub health: f32,
    /// Seconds left on the white hit highlight (cosmetic)
    #[serde(default)]
    pub highlight: f32,
}

impl Enemy {
    pub fn new(id: EnemyId, pos: Vec3, health: f32) -> Self {
        Self {
            id,
            pos,
            yaw: 0.0,
            health,
            highlight: 0.0,
        }
    }

    /// Alive and targetable
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Store slot. Dead slots stay in place until [`EnemyStore::compact`] so
/// indices held during a scan never shift.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Live(Enemy),
    Dead,
}

/// Index-stable enemy list
#[derive(Debug, Clone, Default)]
pub struct EnemyStore {
    slots: Vec<Slot>,
}

impl EnemyStore {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn push(&mut self, enemy: Enemy) {
        self.slots.push(Slot::Live(enemy));
    }

    /// Number of slots, including tombstones
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of live enemies
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Live(_))).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.slots.iter().any(|s| matches!(s, Slot::Live(_)))
    }

    pub fn get(&self, index: usize) -> Option<&Enemy> {
        match self.slots.get(index) {
            Some(Slot::Live(enemy)) => Some(enemy),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        match self.slots.get_mut(index) {
            Some(Slot::Live(enemy)) => Some(enemy),
            _ => None,
        }
    }

    /// Tombstone a slot, returning the removed enemy
    pub fn kill(&mut self, index: usize) -> Option<Enemy> {
        let slot = self.slots.get_mut(index)?;
        match std::mem::replace(slot, Slot::Dead) {
            Slot::Live(enemy) => Some(enemy),
            Slot::Dead => None,
        }
    }

    /// Drop tombstones, keeping live enemies in order
    pub fn compact(&mut self) {
        self.slots.retain(|s| matches!(s, Slot::Live(_)));
    }

    /// Live enemies with their slot index
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| match s {
            Slot::Live(enemy) => Some((i, enemy)),
            Slot::Dead => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.iter_indexed().map(|(_, e)| e)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.slots.iter_mut().filter_map(|s| match s {
            Slot::Live(enemy) => Some(enemy),
            Slot::Dead => None,
        })
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub arena: ArenaBounds,
    pub player: Player,
    pub enemies: EnemyStore,
    pub waves: WaveDirector,
    pub score: u64,
    /// Full-screen muzzle flash strength (0-1, cosmetic)
    pub flash: f32,
    /// Frames simulated while locked
    pub frame_count: u64,
    /// Next entity ID
    next_id: EnemyId,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session and spawn the opening wave
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let arena = ArenaBounds::from_tuning(&tuning);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            player: Player::new(arena.clamp(tuning.player_start), tuning.player_max_health),
            enemies: EnemyStore::new(),
            waves: WaveDirector::new(),
            score: 0,
            flash: 0.0,
            frame_count: 0,
            next_id: 1,
            tuning,
        };

        let count = state.tuning.initial_enemies;
        super::wave::spawn_batch(&mut state, count);
        log::info!("Session started (seed {seed}, {count} enemies)");

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EnemyId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current wave number (starts at 1)
    pub fn wave(&self) -> u32 {
        self.waves.wave
    }

    /// Add an enemy at a position with full health
    pub fn spawn_enemy_at(&mut self, pos: Vec3) -> EnemyId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, self.tuning.enemy_health));
        id
    }
}
