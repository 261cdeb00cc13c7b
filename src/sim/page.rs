//! Static description of the page the arcade is wired into
//!
//! Built once by the platform from the DOM (or by hand in tests). Optional
//! collaborators that are missing simply switch their component off.

use glam::Vec2;

/// One game card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSpec {
    pub title: String,
    /// False for "coming soon" cards
    pub available: bool,
    /// Card has an action button
    pub has_button: bool,
    /// Action button is not flagged disabled
    pub button_enabled: bool,
}

impl CardSpec {
    /// Available card with an enabled button
    pub fn playable(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            available: true,
            has_button: true,
            button_enabled: true,
        }
    }

    /// "Coming soon" card with a disabled button
    pub fn coming_soon(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            available: false,
            has_button: true,
            button_enabled: false,
        }
    }

    /// Button exists and can be activated
    pub fn is_activatable(&self) -> bool {
        self.has_button && self.button_enabled
    }
}

/// Which collaborators exist on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub cards: Vec<CardSpec>,
    /// Loading screen plus its progress bar
    pub loading_screen: bool,
    pub crt_frame: bool,
    pub modal: bool,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            loading_screen: true,
            crt_frame: true,
            modal: true,
        }
    }
}

impl PageSpec {
    /// Cards eligible for keyboard navigation and hover sounds
    pub fn available_cards(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.available)
            .map(|(i, _)| i)
    }
}

/// Screen geometry lookups
pub trait Layout {
    /// Screen-space center of a card's action button
    fn button_center(&self, card: usize) -> Option<Vec2>;
}

/// Layout with fixed button centers, indexed by card
#[derive(Debug, Clone, Default)]
pub struct FixedLayout(pub Vec<Vec2>);

impl Layout for FixedLayout {
    fn button_center(&self, card: usize) -> Option<Vec2> {
        self.0.get(card).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_cards_skip_coming_soon() {
        let page = PageSpec {
            cards: vec![
                CardSpec::playable("A"),
                CardSpec::coming_soon("B"),
                CardSpec::playable("C"),
            ],
            ..Default::default()
        };
        assert_eq!(page.available_cards().collect::<Vec<_>>(), vec![0, 2]);
    }
}
