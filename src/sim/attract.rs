//! Attract mode
//!
//! After a stretch of inactivity the cards are highlighted one after another
//! until the user does something. Any activity is a full reset: highlight
//! cleared, idle countdown restarted from zero.

use super::context::{Context, Task};
use super::effect::Effect;
use super::event::InputEvent;
use super::scheduler::TimerId;
use crate::consts::{ATTRACT_CYCLE_MS, ATTRACT_IDLE_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttractTask {
    Cycle,
}

#[derive(Debug)]
pub struct AttractMode {
    enabled: bool,
    /// All cards, including unavailable ones
    card_count: usize,
    /// Monotonic; taken modulo `card_count`
    active: u64,
    timer: Option<TimerId>,
    highlighted: Option<usize>,
}

impl AttractMode {
    pub fn new(card_count: usize, enabled: bool) -> Self {
        Self {
            enabled: enabled && card_count > 0,
            card_count,
            active: 0,
            timer: None,
            highlighted: None,
        }
    }

    /// Card currently highlighted by the cycle
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn start(&mut self, cx: &mut Context) {
        self.reset(cx);
    }

    pub fn on_event(&mut self, event: &InputEvent, cx: &mut Context) {
        if event.is_activity() {
            self.reset(cx);
        }
    }

    pub fn on_task(&mut self, task: AttractTask, cx: &mut Context) {
        match task {
            AttractTask::Cycle => self.cycle(cx),
        }
    }

    fn reset(&mut self, cx: &mut Context) {
        if !self.enabled {
            return;
        }
        if let Some(timer) = self.timer.take() {
            cx.cancel(timer);
        }
        if self.highlighted.take().is_some() {
            cx.emit(Effect::ClearHighlights);
        }
        self.timer = Some(cx.schedule(ATTRACT_IDLE_MS, Task::Attract(AttractTask::Cycle)));
    }

    fn cycle(&mut self, cx: &mut Context) {
        let card = (self.active % self.card_count as u64) as usize;
        cx.emit(Effect::ClearHighlights);
        cx.emit(Effect::Highlight(card));
        self.highlighted = Some(card);
        self.active += 1;
        self.timer = Some(cx.schedule_every(ATTRACT_CYCLE_MS, Task::Attract(AttractTask::Cycle)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::context::Runtime;

    #[test]
    fn test_no_cards_never_schedules() {
        let mut rt = Runtime::new(0);
        let mut attract = AttractMode::new(0, true);
        let mut cx = Context::new(0, &mut rt);
        attract.start(&mut cx);
        assert!(rt.scheduler.is_empty());
    }

    #[test]
    fn test_reset_replaces_pending_timer() {
        let mut rt = Runtime::new(0);
        let mut attract = AttractMode::new(2, true);
        let mut cx = Context::new(0, &mut rt);
        attract.start(&mut cx);
        let mut cx = Context::new(500, &mut rt);
        attract.on_event(&InputEvent::MouseMove, &mut cx);

        assert_eq!(rt.scheduler.len(), 1);
        assert_eq!(rt.scheduler.next_deadline(), Some(500 + ATTRACT_IDLE_MS));
        // Nothing was highlighted, so nothing to clear
        assert!(rt.take_effects().is_empty());
    }
}
