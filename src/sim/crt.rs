//! CRT flicker and glitch lines
//!
//! Two independent interval processes that run for the life of the page.

use rand::Rng;

use super::context::{Context, Task};
use super::effect::{Effect, GlitchLine};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrtTask {
    Flicker,
    RestoreOpacity,
    Glitch,
    RemoveGlitch(u32),
}

#[derive(Debug)]
pub struct CrtEffects {
    enabled: bool,
    next_glitch_id: u32,
    live_glitches: usize,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl CrtEffects {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            next_glitch_id: 0,
            live_glitches: 0,
        }
    }

    /// Glitch lines currently on screen
    pub fn live_glitches(&self) -> usize {
        self.live_glitches
    }

    pub fn start(&mut self, cx: &mut Context) {
        if !self.enabled {
            return;
        }
        cx.schedule(FLICKER_TICK_MS, Task::Crt(CrtTask::Flicker));
        cx.schedule(GLITCH_TICK_MS, Task::Crt(CrtTask::Glitch));
    }

    pub fn on_task(&mut self, task: CrtTask, cx: &mut Context) {
        match task {
            CrtTask::Flicker => {
                if cx.rng().random::<f64>() < FLICKER_CHANCE {
                    let opacity =
                        round2(FLICKER_OPACITY_MIN + cx.rng().random::<f64>() * FLICKER_OPACITY_SPREAD);
                    cx.emit(Effect::SetFrameOpacity(opacity));
                    let restore = FLICKER_RESTORE_MIN_MS
                        + cx.rng().random::<f64>() * FLICKER_RESTORE_SPREAD_MS;
                    cx.schedule(restore as u64, Task::Crt(CrtTask::RestoreOpacity));
                }
                cx.schedule_every(FLICKER_TICK_MS, Task::Crt(CrtTask::Flicker));
            }
            CrtTask::RestoreOpacity => cx.emit(Effect::SetFrameOpacity(1.0)),
            CrtTask::Glitch => {
                if cx.rng().random::<f64>() < GLITCH_CHANCE {
                    let line = GlitchLine {
                        id: self.next_glitch_id,
                        height_px: cx.rng().random_range(1..=2),
                        top_percent: cx.rng().random_range(0..100),
                        alpha: round2(GLITCH_ALPHA_MIN + cx.rng().random::<f64>() * GLITCH_ALPHA_SPREAD),
                    };
                    self.next_glitch_id = self.next_glitch_id.wrapping_add(1);
                    self.live_glitches += 1;
                    cx.emit(Effect::AddGlitchLine(line));
                    let lifetime = GLITCH_LIFETIME_MIN_MS
                        + cx.rng().random::<f64>() * GLITCH_LIFETIME_SPREAD_MS;
                    cx.schedule(lifetime as u64, Task::Crt(CrtTask::RemoveGlitch(line.id)));
                }
                cx.schedule_every(GLITCH_TICK_MS, Task::Crt(CrtTask::Glitch));
            }
            CrtTask::RemoveGlitch(id) => {
                self.live_glitches = self.live_glitches.saturating_sub(1);
                cx.emit(Effect::RemoveGlitchLine(id));
            }
        }
    }
}
