//! Per-dispatch context handed to components

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::attract::AttractTask;
use super::crt::CrtTask;
use super::effect::Effect;
use super::loading::LoadingTask;
use super::navigator::NavTask;
use super::scheduler::{Scheduler, TimerId};
use crate::audio::{SoundEffect, Tone};

/// Scheduled work, routed back to the owning component when due
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Delayed tone of a multi-tone sound
    Tone(Tone),
    Loading(LoadingTask),
    Crt(CrtTask),
    Nav(NavTask),
    /// Next animation frame of burst `n`
    BurstFrame(u32),
    Attract(AttractTask),
    ButtonFlashOff(u32),
    OpenUrl(String),
}

/// Cross-component requests, routed by the dispatcher after the emitting
/// component returns
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SpawnBurst(Vec2),
    RecordPlay,
    OpenModal,
}

/// State shared by every dispatch
#[derive(Debug)]
pub struct Runtime {
    pub scheduler: Scheduler<Task>,
    pub rng: Pcg32,
    pub effects: Vec<Effect>,
}

impl Runtime {
    pub fn new(seed: u64) -> Self {
        Self {
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            effects: Vec::new(),
        }
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

pub struct Context<'a> {
    now: u64,
    /// Host clock when the dispatch runs; later than `now` for overdue tasks
    wall: u64,
    rt: &'a mut Runtime,
    commands: Vec<Command>,
    prevent_default: bool,
}

impl<'a> Context<'a> {
    pub fn new(now: u64, rt: &'a mut Runtime) -> Self {
        Self::overdue(now, now, rt)
    }

    /// Context for a task due at `deadline` that is only running at `wall`
    pub fn overdue(deadline: u64, wall: u64, rt: &'a mut Runtime) -> Self {
        Self {
            now: deadline,
            wall: wall.max(deadline),
            rt,
            commands: Vec::new(),
            prevent_default: false,
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn emit(&mut self, effect: Effect) {
        self.rt.effects.push(effect);
    }

    pub fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerId {
        self.rt.scheduler.schedule(self.now, delay_ms, task)
    }

    /// Schedule the next run of a repeating task. Periods missed while the
    /// host timer was throttled are skipped, not replayed.
    pub fn schedule_every(&mut self, period_ms: u64, task: Task) -> TimerId {
        let period = period_ms.max(1);
        let missed = (self.wall - self.now) / period;
        self.schedule(period * (missed + 1), task)
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.rt.scheduler.cancel(id);
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rt.rng
    }

    /// Emit the first tone now and schedule the rest
    pub fn play(&mut self, sound: SoundEffect) {
        for (delay, tone) in sound.tones() {
            if delay == 0 {
                self.emit(Effect::Beep(tone));
            } else {
                self.schedule(delay, Task::Tone(tone));
            }
        }
    }

    pub fn command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub(super) fn next_command(&mut self) -> Option<Command> {
        if self.commands.is_empty() {
            None
        } else {
            Some(self.commands.remove(0))
        }
    }

    /// Suppress the browser's default action for the current event
    pub fn prevent_default(&mut self) {
        self.prevent_default = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.prevent_default
    }
}
