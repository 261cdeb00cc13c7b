//! Loading bar intro
//!
//! `Loading -> Revealing -> Revealed`. The bar fills by random steps until
//! the first click/keypress (or the auto-launch timeout) forces it to 100%
//! and schedules the launch; the launch fades the screen out and reveals
//! the main content. The transition fires once.

use rand::Rng;

use super::context::{Context, Task};
use super::effect::Effect;
use super::event::{ClickTarget, InputEvent};
use super::scheduler::TimerId;
use crate::audio::SoundEffect;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    /// Bar filling, waiting for input or timeout
    Loading,
    /// Loading screen fading out
    Revealing,
    /// Main content visible (terminal)
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingTask {
    Tick,
    Timeout,
    Launch,
    Reveal,
}

#[derive(Debug)]
pub struct LoadingSequence {
    enabled: bool,
    phase: LoadingPhase,
    progress: f32,
    tick: Option<TimerId>,
    launch_scheduled: bool,
}

impl LoadingSequence {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            phase: LoadingPhase::Loading,
            progress: 0.0,
            tick: None,
            launch_scheduled: false,
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Current bar value, percent
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn start(&mut self, cx: &mut Context) {
        if !self.enabled {
            // No loading screen: show the content straight away
            self.phase = LoadingPhase::Revealed;
            cx.emit(Effect::RevealMain);
            return;
        }
        self.tick = Some(cx.schedule(LOAD_TICK_MS, Task::Loading(LoadingTask::Tick)));
        cx.schedule(LOAD_TIMEOUT_MS, Task::Loading(LoadingTask::Timeout));
    }

    pub fn on_event(&mut self, event: &InputEvent, cx: &mut Context) {
        if self.phase != LoadingPhase::Loading || self.launch_scheduled {
            return;
        }
        match event {
            InputEvent::KeyDown(_)
            | InputEvent::Click {
                target: ClickTarget::LoadingScreen,
                ..
            } => self.force_complete(LOAD_INPUT_LAUNCH_DELAY_MS, cx),
            _ => {}
        }
    }

    pub fn on_task(&mut self, task: LoadingTask, cx: &mut Context) {
        match task {
            LoadingTask::Tick => self.advance_bar(cx),
            LoadingTask::Timeout => {
                if self.phase == LoadingPhase::Loading
                    && !self.launch_scheduled
                    && self.progress < 100.0
                {
                    log::debug!("Loading timed out at {:.0}%", self.progress);
                    self.force_complete(LOAD_TIMEOUT_LAUNCH_DELAY_MS, cx);
                }
            }
            LoadingTask::Launch => {
                self.phase = LoadingPhase::Revealing;
                cx.play(SoundEffect::Coin);
                cx.emit(Effect::FadeOutLoading);
                cx.schedule(LOAD_FADE_MS, Task::Loading(LoadingTask::Reveal));
            }
            LoadingTask::Reveal => {
                self.phase = LoadingPhase::Revealed;
                cx.emit(Effect::RevealMain);
                log::info!("Main content revealed");
            }
        }
    }

    fn advance_bar(&mut self, cx: &mut Context) {
        self.tick = None;
        if self.phase != LoadingPhase::Loading || self.progress >= 100.0 {
            return;
        }
        let step = cx.rng().random_range(LOAD_STEP_MIN..LOAD_STEP_MAX);
        self.progress = (self.progress + step).min(100.0);
        cx.emit(Effect::SetLoadProgress(self.progress));
        if self.progress < 100.0 {
            self.tick = Some(cx.schedule_every(LOAD_TICK_MS, Task::Loading(LoadingTask::Tick)));
        }
    }

    fn force_complete(&mut self, delay_ms: u64, cx: &mut Context) {
        if let Some(tick) = self.tick.take() {
            cx.cancel(tick);
        }
        self.progress = 100.0;
        self.launch_scheduled = true;
        cx.emit(Effect::SetLoadProgress(100.0));
        cx.schedule(delay_ms, Task::Loading(LoadingTask::Launch));
    }
}
