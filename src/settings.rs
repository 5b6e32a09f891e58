//! Player preferences
//!
//! Persisted separately from the (never persisted) session in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Radians of yaw per pixel of pointer movement
    pub mouse_sensitivity: f32,

    // === Camera ===
    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    // === Visual Effects ===
    /// Full-screen muzzle flash
    pub screen_flash: bool,
    /// White flash on struck enemies
    pub hit_highlight: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            fov_degrees: 75.0,
            screen_flash: true,
            hit_highlight: true,
            show_fps: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen flash (respects reduced_motion)
    pub fn effective_screen_flash(&self) -> bool {
        self.screen_flash && !self.reduced_motion
    }

    /// Effective hit highlight (respects reduced_motion)
    pub fn effective_hit_highlight(&self) -> bool {
        self.hit_highlight && !self.reduced_motion
    }

    /// Vertical FOV in radians, kept within a usable range
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.clamp(40.0, 110.0).to_radians()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fps_arena_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
