//! Game-select modal

use super::context::Context;
use super::effect::Effect;
use super::event::{ClickTarget, InputEvent, Key};
use crate::audio::SoundEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    Open,
}

#[derive(Debug)]
pub struct Modal {
    present: bool,
    state: ModalState,
}

impl Modal {
    pub fn new(present: bool) -> Self {
        Self {
            present,
            state: ModalState::Hidden,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Returns false if there is no modal or it is already open
    pub fn open(&mut self, cx: &mut Context) -> bool {
        if !self.present || self.state == ModalState::Open {
            return false;
        }
        cx.play(SoundEffect::Select);
        cx.emit(Effect::ShowModal);
        self.state = ModalState::Open;
        true
    }

    /// Closing a hidden modal is a no-op
    pub fn close(&mut self, cx: &mut Context) -> bool {
        if self.state != ModalState::Open {
            return false;
        }
        cx.play(SoundEffect::Close);
        cx.emit(Effect::HideModal);
        self.state = ModalState::Hidden;
        true
    }

    pub fn on_event(&mut self, event: &InputEvent, cx: &mut Context) {
        match event {
            InputEvent::Click {
                target: ClickTarget::ModalClose | ClickTarget::ModalBackdrop,
                ..
            }
            | InputEvent::KeyDown(Key::Escape) => {
                self.close(cx);
            }
            _ => {}
        }
    }
}
