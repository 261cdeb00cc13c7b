//! Card hover sounds and button activation

use super::context::{Command, Context};
use super::effect::Effect;
use super::event::{ClickTarget, InputEvent};
use super::page::{CardSpec, PageSpec};
use crate::audio::SoundEffect;
use crate::banner::loading_line;

#[derive(Debug)]
pub struct CardEffects {
    cards: Vec<CardSpec>,
}

impl CardEffects {
    pub fn new(page: &PageSpec) -> Self {
        Self {
            cards: page.cards.clone(),
        }
    }

    pub fn on_event(&mut self, event: &InputEvent, cx: &mut Context) {
        match event {
            InputEvent::Hover(card) => {
                // Every hover re-triggers; overlapping tones are fine
                if self.cards.get(*card).is_some_and(|c| c.available) {
                    cx.play(SoundEffect::Hover);
                }
            }
            InputEvent::Click {
                target: ClickTarget::PlayButton(card),
                anchor,
            } => {
                let Some(spec) = self.cards.get(*card) else { return };
                if !spec.is_activatable() {
                    return;
                }
                cx.play(SoundEffect::Play);
                cx.command(Command::SpawnBurst(*anchor));
                log::info!("Launching {}", spec.title);
                cx.emit(Effect::Console(loading_line(&spec.title)));
                cx.command(Command::RecordPlay);
            }
            _ => {}
        }
    }
}
