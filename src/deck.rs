use serde::Deserialize;
use strum::EnumIter;

/// Which palette the deck is drawn with.
#[derive(Clone, Copy, Debug, Default, Deserialize, EnumIter, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// The position within the deck and the active theme.
///
/// Navigation wraps around at both ends. Every operation returns whether the deck needs to be
/// redrawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckState {
    current_index: usize,
    slide_count: usize,
    theme_mode: ThemeMode,
}

impl DeckState {
    pub fn new(slide_count: usize, theme_mode: ThemeMode) -> Self {
        Self { current_index: 0, slide_count, theme_mode }
    }

    /// The index of the slide being shown.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Move to the next slide, going back to the first one after the last.
    pub fn next(&mut self) -> bool {
        if self.slide_count == 0 {
            return false;
        }
        self.current_index = (self.current_index + 1) % self.slide_count;
        true
    }

    /// Move to the previous slide, going to the last one before the first.
    pub fn previous(&mut self) -> bool {
        if self.slide_count == 0 {
            return false;
        }
        self.current_index = (self.current_index + self.slide_count - 1) % self.slide_count;
        true
    }

    /// Jump to a specific slide.
    ///
    /// Indexes past the end of the deck are ignored and leave the state untouched.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.slide_count {
            tracing::debug!("ignoring jump to slide {index}, deck only has {} slides", self.slide_count);
            return false;
        }
        self.current_index = index;
        true
    }

    /// Flip between the dark and light themes.
    pub fn toggle_theme(&mut self) -> bool {
        self.theme_mode = self.theme_mode.toggled();
        true
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn is_dark(&self) -> bool {
        self.theme_mode == ThemeMode::Dark
    }

    /// The position in the deck as shown to the audience, e.g. `03 / 12`.
    pub fn counter_label(&self) -> String {
        format!("{:02} / {}", self.current_index + 1, self.slide_count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    const SLIDES: usize = 12;

    fn deck_at(index: usize) -> DeckState {
        let mut deck = DeckState::new(SLIDES, ThemeMode::Dark);
        assert!(deck.jump_to(index));
        deck
    }

    #[test]
    fn starts_at_first_slide() {
        let deck = DeckState::new(SLIDES, ThemeMode::Dark);
        assert_eq!(deck.current_index(), 0);
        assert!(deck.is_dark());
        assert_eq!(deck.counter_label(), "01 / 12");
    }

    #[rstest]
    #[case::first(0)]
    #[case::middle(5)]
    #[case::last(11)]
    fn next_wraps_around_the_ring(#[case] start: usize) {
        let mut deck = deck_at(start);
        for _ in 0..SLIDES {
            assert!(deck.next());
        }
        assert_eq!(deck.current_index(), start);
    }

    #[rstest]
    #[case::first(0)]
    #[case::middle(7)]
    #[case::last(11)]
    fn previous_undoes_next(#[case] start: usize) {
        let mut deck = deck_at(start);
        deck.next();
        deck.previous();
        assert_eq!(deck.current_index(), start);

        deck.previous();
        deck.next();
        assert_eq!(deck.current_index(), start);
    }

    #[test]
    fn wrapping_at_both_ends() {
        let mut deck = deck_at(11);
        deck.next();
        assert_eq!(deck.current_index(), 0);
        deck.previous();
        assert_eq!(deck.current_index(), 11);
        assert_eq!(deck.counter_label(), "12 / 12");
    }

    #[test]
    fn jump_to_every_slide() {
        let mut deck = DeckState::new(SLIDES, ThemeMode::Light);
        for index in 0..SLIDES {
            assert!(deck.jump_to(index));
            assert_eq!(deck.current_index(), index);
        }
    }

    #[rstest]
    #[case::one_past_end(12)]
    #[case::far_past_end(500)]
    fn jump_out_of_range_is_ignored(#[case] index: usize) {
        let mut deck = deck_at(3);
        let before = deck.clone();
        assert!(!deck.jump_to(index));
        assert_eq!(deck, before);
    }

    #[test]
    fn theme_toggle_is_an_involution() {
        for mode in ThemeMode::iter() {
            let mut deck = DeckState::new(SLIDES, mode);
            deck.toggle_theme();
            assert_ne!(deck.theme_mode(), mode);
            deck.toggle_theme();
            assert_eq!(deck.theme_mode(), mode);
        }
    }

    #[test]
    fn theme_is_independent_of_navigation() {
        let mut deck = deck_at(4);
        deck.toggle_theme();
        assert_eq!(deck.current_index(), 4);
        deck.next();
        assert_eq!(deck.theme_mode(), ThemeMode::Light);
    }

    #[test]
    fn empty_deck_does_not_move() {
        let mut deck = DeckState::new(0, ThemeMode::Dark);
        assert!(!deck.next());
        assert!(!deck.previous());
        assert!(!deck.jump_to(0));
    }
}
