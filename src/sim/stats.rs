//! Play counter and high score display
//!
//! The counter is written back on every card activation. The high score is
//! display-only: it is read from storage but nothing here ever writes it.

use super::context::Context;
use super::effect::Effect;
use crate::consts::{DEFAULT_HIGH_SCORE, HIGH_SCORE_KEY, PLAYED_KEY};
use crate::persistence::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    played: u32,
    high_score: String,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            played: 0,
            high_score: DEFAULT_HIGH_SCORE.to_string(),
        }
    }
}

impl Stats {
    /// Read both values, falling back to defaults when absent or unparsable
    pub fn load(store: &impl KeyValueStore) -> Self {
        let played = store
            .get(PLAYED_KEY)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let high_score = store
            .get(HIGH_SCORE_KEY)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HIGH_SCORE.to_string());
        log::info!("Stats loaded: {} played, high score {}", played, high_score);
        Self { played, high_score }
    }

    pub fn played(&self) -> u32 {
        self.played
    }

    pub fn high_score(&self) -> &str {
        &self.high_score
    }

    /// Counter as displayed, zero-padded to two digits
    pub fn played_display(&self) -> String {
        format!("{:02}", self.played)
    }

    pub fn render(&self, cx: &mut Context) {
        cx.emit(Effect::SetHighScore(self.high_score.clone()));
        cx.emit(Effect::SetPlayedCount(self.played_display()));
    }

    /// Count one activation, persist it and refresh the display
    pub fn record_play(&mut self, store: &mut impl KeyValueStore, cx: &mut Context) {
        self.played = self.played.saturating_add(1);
        store.set(PLAYED_KEY, &self.played.to_string());
        cx.emit(Effect::SetPlayedCount(self.played_display()));
    }
}
