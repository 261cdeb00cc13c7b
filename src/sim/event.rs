//! Input events fed to the core
//!
//! The platform translates DOM events into these; nothing else reaches the
//! components.

use glam::Vec2;

/// Keys the arcade reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Parse `KeyboardEvent.key`
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Enter" => Key::Enter,
            " " => Key::Space,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// D-pad control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Element id of the control
    pub fn element_id(self) -> &'static str {
        match self {
            Direction::Up => "dp-up",
            Direction::Down => "dp-down",
            Direction::Left => "dp-left",
            Direction::Right => "dp-right",
        }
    }
}

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    LoadingScreen,
    /// Action button of card `n`
    PlayButton(usize),
    Dpad(Direction),
    StartButton,
    /// The modal overlay itself, outside its content
    ModalBackdrop,
    /// Anything inside the modal content
    ModalContent,
    ModalClose,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    /// `anchor` is the screen-space center of the clicked element
    Click { target: ClickTarget, anchor: Vec2 },
    /// Pointer entered card `n`
    Hover(usize),
    MouseMove,
    TouchStart,
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown(key)
    }

    pub fn click(target: ClickTarget) -> Self {
        InputEvent::Click {
            target,
            anchor: Vec2::ZERO,
        }
    }

    /// Events that count as user activity for attract mode
    pub fn is_activity(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyDown(_) | InputEvent::MouseMove | InputEvent::TouchStart
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("a"), Key::Other);
    }

    #[test]
    fn test_clicks_are_not_activity() {
        assert!(!InputEvent::click(ClickTarget::Other).is_activity());
        assert!(!InputEvent::Hover(0).is_activity());
        assert!(InputEvent::MouseMove.is_activity());
        assert!(InputEvent::key(Key::Other).is_activity());
    }
}
