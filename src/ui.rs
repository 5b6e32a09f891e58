//! HUD snapshot
//!
//! Plain values the page displays each frame, derived from the session.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, WavePhase};

/// Health at or below this percentage shows the warning bar
pub const CRITICAL_HEALTH_PCT: u32 = 30;

/// Health bar styling band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    Healthy,
    Critical,
}

impl HealthBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "fill",
            HealthBand::Critical => "fill critical",
        }
    }
}

/// Everything the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Rounded health percentage, 0-100
    pub health_pct: u32,
    pub health_band: HealthBand,
    pub score: u64,
    pub wave: u32,
    /// Pointer lock held (overlay hidden)
    pub locked: bool,
    /// A wave was just cleared and the next announced
    pub wave_incoming: bool,
    pub enemies_left: usize,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState, locked: bool) -> Self {
        let max = state.tuning.player_max_health;
        let pct = (state.player.health / max * 100.0).round().clamp(0.0, 100.0) as u32;
        let health_band = if pct > CRITICAL_HEALTH_PCT {
            HealthBand::Healthy
        } else {
            HealthBand::Critical
        };

        Self {
            health_pct: pct,
            health_band,
            score: state.score,
            wave: state.wave(),
            locked,
            wave_incoming: state.waves.phase() == WavePhase::ClearedCooldown,
            enemies_left: state.enemies.len(),
        }
    }
}
