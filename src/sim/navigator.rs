//! Keyboard card navigation
//!
//! Arrow keys move a focus index over the available cards (wrapping at both
//! ends); Enter/Space activates the focused card's button. The D-pad up/down
//! controls are a second entry point into the same focus moves.

use super::context::{Command, Context, Task};
use super::effect::Effect;
use super::event::{ClickTarget, Direction, InputEvent, Key};
use super::page::{Layout, PageSpec};
use crate::audio::SoundEffect;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTask {
    ReleaseDpad(Direction),
    /// Click card `n`'s real button
    Click(usize),
}

#[derive(Debug)]
pub struct Navigator {
    /// Page indices of the available cards, in document order
    cards: Vec<usize>,
    activatable: Vec<bool>,
    focus: Option<usize>,
}

impl Navigator {
    pub fn new(page: &PageSpec) -> Self {
        let cards: Vec<usize> = page.available_cards().collect();
        let activatable = cards
            .iter()
            .map(|&i| page.cards[i].is_activatable())
            .collect();
        Self {
            cards,
            activatable,
            focus: None,
        }
    }

    /// Position in the available-card list, -1 when nothing is focused
    pub fn focus_index(&self) -> i64 {
        self.focus.map_or(-1, |i| i as i64)
    }

    /// Page index of the focused card
    pub fn focused_card(&self) -> Option<usize> {
        self.focus.map(|i| self.cards[i])
    }

    pub fn on_event(&mut self, event: &InputEvent, cx: &mut Context, layout: &dyn Layout) {
        match event {
            InputEvent::KeyDown(Key::ArrowDown | Key::ArrowRight) => {
                cx.prevent_default();
                self.step(1, cx);
                press_dpad(Direction::Down, cx);
            }
            InputEvent::KeyDown(Key::ArrowUp | Key::ArrowLeft) => {
                cx.prevent_default();
                self.step(-1, cx);
                press_dpad(Direction::Up, cx);
            }
            InputEvent::KeyDown(Key::Enter | Key::Space) => {
                cx.prevent_default();
                self.activate(cx, layout);
            }
            InputEvent::Click {
                target: ClickTarget::Dpad(Direction::Up),
                ..
            } => self.step(-1, cx),
            InputEvent::Click {
                target: ClickTarget::Dpad(Direction::Down),
                ..
            } => self.step(1, cx),
            _ => {}
        }
    }

    pub fn on_task(&mut self, task: NavTask, cx: &mut Context) {
        match task {
            NavTask::ReleaseDpad(direction) => cx.emit(Effect::SetDpadPressed {
                direction,
                pressed: false,
            }),
            NavTask::Click(card) => cx.emit(Effect::ClickButton(card)),
        }
    }

    /// Move focus by `delta`, wrapping. From "no selection" a step forward
    /// lands on the first card and a step back on the last.
    fn step(&mut self, delta: i64, cx: &mut Context) {
        let count = self.cards.len() as i64;
        if count == 0 {
            return;
        }
        let next = match self.focus {
            Some(i) => (i as i64 + delta).rem_euclid(count) as usize,
            None if delta < 0 => (count - 1) as usize,
            None => 0,
        };
        self.set_focus(next, cx);
    }

    fn set_focus(&mut self, index: usize, cx: &mut Context) {
        self.focus = Some(index);
        let card = self.cards[index];
        cx.emit(Effect::SetKeyboardFocus(card));
        cx.emit(Effect::ScrollIntoView(card));
        cx.play(SoundEffect::Hover);
    }

    fn activate(&mut self, cx: &mut Context, layout: &dyn Layout) {
        let Some(index) = self.focus else { return };
        if !self.activatable[index] {
            return;
        }
        let card = self.cards[index];
        cx.play(SoundEffect::Play);
        if let Some(anchor) = layout.button_center(card) {
            cx.command(Command::SpawnBurst(anchor));
        }
        // Let the sound and burst start before the real click
        cx.schedule(KEY_ACTIVATE_DELAY_MS, Task::Nav(NavTask::Click(card)));
    }
}

fn press_dpad(direction: Direction, cx: &mut Context) {
    cx.emit(Effect::SetDpadPressed {
        direction,
        pressed: true,
    });
    cx.schedule(DPAD_FLASH_MS, Task::Nav(NavTask::ReleaseDpad(direction)));
}
