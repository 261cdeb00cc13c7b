//! Side effects requested by the core, applied by the platform

use glam::Vec2;

use super::event::Direction;
use crate::audio::Tone;
use crate::banner::ConsoleLine;

/// Transient horizontal scanline glitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchLine {
    pub id: u32,
    /// 1 or 2 px
    pub height_px: u32,
    /// Vertical position, percent of the frame
    pub top_percent: u32,
    /// Cyan tint alpha
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Play one synthesized tone
    Beep(Tone),

    // === Loading sequence ===
    /// Progress bar width, percent
    SetLoadProgress(f32),
    /// Start the loading screen opacity transition
    FadeOutLoading,
    /// Hide the loading screen and unhide the main content
    RevealMain,

    // === CRT ===
    SetFrameOpacity(f64),
    AddGlitchLine(GlitchLine),
    RemoveGlitchLine(u32),

    // === Navigation ===
    /// Mark exactly this card as keyboard-focused
    SetKeyboardFocus(usize),
    ScrollIntoView(usize),
    SetDpadPressed { direction: Direction, pressed: bool },
    /// Click the card's real action button
    ClickButton(usize),

    // === Pixel burst ===
    SpawnParticle {
        id: u32,
        pos: Vec2,
        size: u32,
        color: &'static str,
    },
    MoveParticle { id: u32, pos: Vec2, opacity: f32 },
    RemoveParticle(u32),

    // === Stats ===
    SetPlayedCount(String),
    SetHighScore(String),

    // === Attract mode ===
    Highlight(usize),
    ClearHighlights,

    // === Modal ===
    /// Show the overlay and lock page scroll
    ShowModal,
    /// Hide the overlay and restore page scroll
    HideModal,

    // === Misc ===
    Console(ConsoleLine),
    SetButtonFlash { handle: u32, on: bool },
    OpenUrl(String),
}
