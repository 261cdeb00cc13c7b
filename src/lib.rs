//! Arcade Cabinet - retro arcade skin for a single-page site
//!
//! Core modules:
//! - `sim`: Deterministic interaction core (scheduler, components, dispatcher)
//! - `audio`: Synthesized beeps (Web Audio on wasm32)
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `platform`: Browser glue - DOM discovery, listeners, timer pump
//! - `settings`: User preferences

pub mod audio;
pub mod banner;
pub mod persistence;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod settings;
pub mod sim;

pub use audio::{SoundEffect, Tone, Waveform};
pub use persistence::{KeyValueStore, MemoryStore};
pub use settings::Settings;
pub use sim::{Arcade, Dispatch, Effect, InputEvent};

/// Timing and tuning constants (all durations in milliseconds)
pub mod consts {
    /// Loading bar update interval
    pub const LOAD_TICK_MS: u64 = 60;
    /// Random progress increment per tick, percent
    pub const LOAD_STEP_MIN: f32 = 2.0;
    pub const LOAD_STEP_MAX: f32 = 8.0;
    /// Auto-launch if the bar is still filling after this long
    pub const LOAD_TIMEOUT_MS: u64 = 3500;
    /// Delay from user input to launch
    pub const LOAD_INPUT_LAUNCH_DELAY_MS: u64 = 200;
    /// Delay from timeout to launch
    pub const LOAD_TIMEOUT_LAUNCH_DELAY_MS: u64 = 300;
    /// Loading screen opacity transition
    pub const LOAD_FADE_MS: u64 = 500;

    /// CRT flicker
    pub const FLICKER_TICK_MS: u64 = 150;
    pub const FLICKER_CHANCE: f64 = 0.03;
    pub const FLICKER_OPACITY_MIN: f64 = 0.88;
    pub const FLICKER_OPACITY_SPREAD: f64 = 0.1;
    pub const FLICKER_RESTORE_MIN_MS: f64 = 40.0;
    pub const FLICKER_RESTORE_SPREAD_MS: f64 = 60.0;

    /// CRT glitch lines
    pub const GLITCH_TICK_MS: u64 = 400;
    pub const GLITCH_CHANCE: f64 = 0.07;
    pub const GLITCH_ALPHA_MIN: f64 = 0.04;
    pub const GLITCH_ALPHA_SPREAD: f64 = 0.1;
    pub const GLITCH_LIFETIME_MIN_MS: f64 = 80.0;
    pub const GLITCH_LIFETIME_SPREAD_MS: f64 = 120.0;

    /// Keyboard navigation
    pub const DPAD_FLASH_MS: u64 = 150;
    pub const KEY_ACTIVATE_DELAY_MS: u64 = 200;

    /// Pixel burst
    pub const BURST_PARTICLES: usize = 14;
    pub const BURST_FRAMES: u32 = 28;
    pub const BURST_FRAME_MS: u64 = 16;
    pub const BURST_ANGLE_JITTER: f32 = 0.25;
    pub const BURST_SPEED_MIN: f32 = 55.0;
    pub const BURST_SPEED_SPREAD: f32 = 55.0;
    pub const BURST_SIZE_MIN: u32 = 3;
    pub const BURST_SIZE_MAX: u32 = 6;
    /// Downward drop at the end of the animation, px
    pub const BURST_DROP: f32 = 30.0;
    pub const BURST_PALETTE: [&str; 5] = ["#ff00ff", "#00ffff", "#ffff00", "#00ff00", "#ff4400"];

    /// Attract mode
    pub const ATTRACT_IDLE_MS: u64 = 20_000;
    pub const ATTRACT_CYCLE_MS: u64 = 1_800;

    /// Button flash / launch
    pub const BUTTON_FLASH_MS: u64 = 200;
    pub const LAUNCH_DELAY_MS: u64 = 200;

    /// Persisted storage keys
    pub const PLAYED_KEY: &str = "played-count";
    pub const HIGH_SCORE_KEY: &str = "high-score";
    pub const SETTINGS_KEY: &str = "arcade-settings";
    pub const DEFAULT_HIGH_SCORE: &str = "012600";
}
