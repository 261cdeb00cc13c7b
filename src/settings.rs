//! User preferences
//!
//! Persisted as JSON next to the stats in the key/value store.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::KeyValueStore;

/// Arcade settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence all beeps
    pub muted: bool,

    // === Visual Effects ===
    /// CRT flicker and glitch lines
    pub crt_effects: bool,
    /// Pixel bursts on activation
    pub particles: bool,
    /// Idle highlight cycling
    pub attract_mode: bool,

    // === Accessibility ===
    /// Reduced motion (no flicker, glitches or bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,

            crt_effects: true,
            particles: true,
            attract_mode: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective CRT effects (respects reduced_motion)
    pub fn effective_crt_effects(&self) -> bool {
        self.crt_effects && !self.reduced_motion
    }

    /// Effective pixel bursts (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Volume after mute
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Load settings, falling back to defaults when absent or corrupt
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(SETTINGS_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, store: &mut impl KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(SETTINGS_KEY, &json);
            log::info!("Settings saved");
        }
    }
}
