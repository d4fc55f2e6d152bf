use super::keyboard::{CommandKeyBindings, KeyBindingsValidationError, KeyboardListener};
use crate::config::KeyBindingsConfig;
use crossterm::event::{poll, read, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use std::{io, time::Duration};
use strum::EnumDiscriminants;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Turns terminal events into commands.
pub(crate) struct CommandListener {
    keyboard: KeyboardListener,
    mouse_enabled: bool,
}

impl CommandListener {
    pub(crate) fn new(config: KeyBindingsConfig, mouse_enabled: bool) -> Result<Self, KeyBindingsValidationError> {
        let bindings = CommandKeyBindings::try_from(config)?;
        Ok(Self { keyboard: KeyboardListener::new(bindings), mouse_enabled })
    }

    /// Try to get the next command.
    ///
    /// This returns `Ok(None)` if nothing happened within a short timeout.
    pub(crate) fn try_next_command(&mut self) -> io::Result<Option<Command>> {
        if !poll(POLL_TIMEOUT)? {
            return Ok(None);
        }
        let event = read()?;
        Ok(self.process_event(event))
    }

    /// Process a terminal event, returning the command it translates to, if any.
    pub(crate) fn process_event(&mut self, event: Event) -> Option<Command> {
        match event {
            // Ignore release events
            Event::Key(event) if event.kind == KeyEventKind::Release => None,
            Event::Key(event) => self.keyboard.on_key(event),
            Event::Resize(..) => Some(Command::Redraw),
            Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. })
                if self.mouse_enabled =>
            {
                self.keyboard.reset();
                Some(Command::Click { column, row })
            }
            _ => {
                self.keyboard.reset();
                None
            }
        }
    }
}

/// A command.
#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
pub(crate) enum Command {
    /// Redraw the deck.
    ///
    /// This happens when the terminal is resized.
    Redraw,

    /// Move to the next slide.
    Next,

    /// Move to the previous slide.
    Previous,

    /// Go to one particular slide, 1-based.
    GoToSlide(u32),

    /// Switch between the dark and light themes.
    ToggleTheme,

    /// The left mouse button was pressed at a screen position.
    Click { column: u16, row: u16 },

    /// Exit the deck.
    Exit,

    /// Suspend the deck.
    Suspend,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::commands::keyboard::test::{char, control, key};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rstest::rstest;

    fn listener(mouse_enabled: bool) -> CommandListener {
        CommandListener::new(KeyBindingsConfig::default(), mouse_enabled).expect("invalid bindings")
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent { kind, column: 7, row: 3, modifiers: KeyModifiers::empty() })
    }

    #[rstest]
    #[case::right(Event::Key(key(KeyCode::Right)), Some(Command::Next))]
    #[case::left(Event::Key(key(KeyCode::Left)), Some(Command::Previous))]
    #[case::quit(Event::Key(char('q')), Some(Command::Exit))]
    #[case::interrupt(Event::Key(control('c')), Some(Command::Exit))]
    #[case::suspend(Event::Key(control('z')), Some(Command::Suspend))]
    #[case::unbound(Event::Key(char('t')), None)]
    #[case::release(Event::Key(KeyEvent { kind: KeyEventKind::Release, ..key(KeyCode::Right) }), None)]
    #[case::resize(Event::Resize(80, 24), Some(Command::Redraw))]
    #[case::click(mouse(MouseEventKind::Down(MouseButton::Left)), Some(Command::Click { column: 7, row: 3 }))]
    #[case::right_click(mouse(MouseEventKind::Down(MouseButton::Right)), None)]
    #[case::mouse_up(mouse(MouseEventKind::Up(MouseButton::Left)), None)]
    #[case::scroll(mouse(MouseEventKind::ScrollDown), None)]
    #[case::focus(Event::FocusGained, None)]
    fn default_bindings(#[case] event: Event, #[case] expected: Option<Command>) {
        assert_eq!(listener(true).process_event(event), expected);
    }

    #[test]
    fn clicks_ignored_without_mouse() {
        let event = mouse(MouseEventKind::Down(MouseButton::Left));
        assert_eq!(listener(false).process_event(event), None);
    }

    #[test]
    fn custom_bindings() {
        let config = KeyBindingsConfig {
            toggle_theme: vec!["t".parse().expect("invalid binding")],
            next: vec!["l".parse().expect("invalid binding")],
            ..Default::default()
        };
        let mut listener = CommandListener::new(config, true).expect("invalid bindings");
        assert_eq!(listener.process_event(Event::Key(char('t'))), Some(Command::ToggleTheme));
        assert_eq!(listener.process_event(Event::Key(char('l'))), Some(Command::Next));
        assert_eq!(listener.process_event(Event::Key(key(KeyCode::Right))), None);
    }

    #[test]
    fn conflicting_bindings() {
        let config =
            KeyBindingsConfig { toggle_theme: vec!["q".parse().expect("invalid binding")], ..Default::default() };
        assert!(CommandListener::new(config, true).is_err());
    }
}
