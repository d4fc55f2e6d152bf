use super::listener::{Command, CommandDiscriminants};
use crate::config::KeyBindingsConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;
use serde_with::DeserializeFromStr;
use std::{fmt, iter, mem, str::FromStr};

// The keys that can be referred to by name within angle brackets, e.g. `<Left>`.
//
// Names are matched ignoring case and underscores so `<PageUp>` and `<page_up>` are the same key.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("cr", KeyCode::Enter),
    ("enter", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("tab", KeyCode::Tab),
    ("backspace", KeyCode::Backspace),
    ("space", KeyCode::Char(' ')),
];

/// Turns key presses into commands.
///
/// Bindings can span multiple keys so presses are buffered until they either match a binding or
/// can't possibly match any.
pub(crate) struct KeyboardListener {
    bindings: CommandKeyBindings,
    events: Vec<KeyEvent>,
}

impl KeyboardListener {
    pub(crate) fn new(bindings: CommandKeyBindings) -> Self {
        Self { bindings, events: Vec::new() }
    }

    /// Process a key press, returning the command it completes, if any.
    pub(crate) fn on_key(&mut self, event: KeyEvent) -> Option<Command> {
        let mut events = mem::take(&mut self.events);
        events.push(event);
        match self.bindings.apply(&events) {
            InputAction::Emit(command) => Some(command),
            InputAction::Buffer => {
                self.events = events;
                None
            }
            InputAction::Reset => None,
        }
    }

    /// Forget about any keys pressed so far.
    pub(crate) fn reset(&mut self) {
        self.events.clear();
    }
}

enum InputAction {
    Buffer,
    Reset,
    Emit(Command),
}

/// The key bindings for every command that can be bound.
#[derive(Debug)]
pub(crate) struct CommandKeyBindings {
    bindings: Vec<(KeyBinding, CommandDiscriminants)>,
}

impl CommandKeyBindings {
    fn apply(&self, events: &[KeyEvent]) -> InputAction {
        let mut any_partials = false;
        for (binding, command) in &self.bindings {
            match binding.match_events(events) {
                BindingMatch::Full(context) => return Self::instantiate(command, context),
                BindingMatch::Partial => any_partials = true,
                BindingMatch::None => (),
            }
        }
        if any_partials { InputAction::Buffer } else { InputAction::Reset }
    }

    fn instantiate(command: &CommandDiscriminants, context: MatchContext) -> InputAction {
        let command = match (command, context) {
            (CommandDiscriminants::Next, _) => Command::Next,
            (CommandDiscriminants::Previous, _) => Command::Previous,
            (CommandDiscriminants::GoToSlide, MatchContext::Number(number)) => Command::GoToSlide(number),
            (CommandDiscriminants::ToggleTheme, _) => Command::ToggleTheme,
            (CommandDiscriminants::Exit, _) => Command::Exit,
            (CommandDiscriminants::Suspend, _) => Command::Suspend,
            // Validation guarantees these never happen.
            (CommandDiscriminants::GoToSlide, MatchContext::None)
            | (CommandDiscriminants::Redraw | CommandDiscriminants::Click, _) => return InputAction::Reset,
        };
        InputAction::Emit(command)
    }

    fn validate_conflicts<'a>(
        bindings: impl Iterator<Item = &'a KeyBinding>,
    ) -> Result<(), KeyBindingsValidationError> {
        let bindings: Vec<_> = bindings.collect();
        for (first, second) in bindings.into_iter().tuple_combinations() {
            // A binding that's a prefix of another one makes the longer one unreachable.
            if first.is_prefix_of(second) || second.is_prefix_of(first) {
                return Err(KeyBindingsValidationError::Conflict(first.clone(), second.clone()));
            }
        }
        Ok(())
    }
}

impl TryFrom<KeyBindingsConfig> for CommandKeyBindings {
    type Error = KeyBindingsValidationError;

    fn try_from(config: KeyBindingsConfig) -> Result<Self, Self::Error> {
        let zip = |command, bindings: Vec<KeyBinding>| bindings.into_iter().zip(iter::repeat(command));
        if !config.go_to_slide.iter().all(KeyBinding::expects_number) {
            return Err(KeyBindingsValidationError::Invalid("go_to_slide", "<number> matcher required"));
        }
        let bindings: Vec<_> = iter::empty()
            .chain(zip(CommandDiscriminants::Next, config.next))
            .chain(zip(CommandDiscriminants::Previous, config.previous))
            .chain(zip(CommandDiscriminants::GoToSlide, config.go_to_slide))
            .chain(zip(CommandDiscriminants::ToggleTheme, config.toggle_theme))
            .chain(zip(CommandDiscriminants::Exit, config.exit))
            .chain(zip(CommandDiscriminants::Suspend, config.suspend))
            .collect();
        Self::validate_conflicts(bindings.iter().map(|(binding, _)| binding))?;
        Ok(Self { bindings })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyBindingsValidationError {
    #[error("invalid binding for {0}: {1}")]
    Invalid(&'static str, &'static str),

    #[error("conflicting key bindings: {0} and {1}")]
    Conflict(KeyBinding, KeyBinding),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum BindingMatch {
    Full(MatchContext),
    Partial,
    None,
}

/// A sequence of keys that triggers a command, e.g. `<c-c>` or `<number>G`.
#[derive(Clone, Debug, PartialEq, Eq, DeserializeFromStr)]
pub struct KeyBinding(Vec<KeyMatcher>);

impl KeyBinding {
    fn match_events(&self, mut events: &[KeyEvent]) -> BindingMatch {
        let mut output_context = MatchContext::None;
        for (index, matcher) in self.0.iter().enumerate() {
            let Some((context, rest)) = matcher.try_match_events(events) else {
                return BindingMatch::None;
            };
            if let MatchContext::Number(_) = context {
                output_context = context;
            }
            events = rest;

            // Every event was consumed but there's still matchers left.
            if index != self.0.len() - 1 && events.is_empty() {
                return BindingMatch::Partial;
            }
        }
        BindingMatch::Full(output_context)
    }

    fn expects_number(&self) -> bool {
        self.0.contains(&KeyMatcher::Number)
    }

    fn is_prefix_of(&self, other: &KeyBinding) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl FromStr for KeyBinding {
    type Err = KeyBindingParseError;

    fn from_str(mut input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(KeyBindingParseError::NoInput);
        }
        let mut matchers = Vec::new();
        while !input.is_empty() {
            let (matcher, rest) = KeyMatcher::parse(input)?;
            if matcher == KeyMatcher::Number && matchers.contains(&KeyMatcher::Number) {
                return Err(KeyBindingParseError::TooManyNumbers);
            }
            matchers.push(matcher);
            input = rest;
        }
        Ok(Self(matchers))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for matcher in &self.0 {
            write!(f, "{matcher}")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyBindingParseError {
    #[error("no input")]
    NoInput,

    #[error("not a valid key: {0}")]
    InvalidKey(char),

    #[error("unknown key name: <{0}>")]
    UnknownKeyName(String),

    #[error("too many number placeholders")]
    TooManyNumbers,

    #[error("unterminated key name")]
    Unterminated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum KeyMatcher {
    Key(KeyCombination),
    Number,
}

impl KeyMatcher {
    fn try_match_events<'a>(&self, events: &'a [KeyEvent]) -> Option<(MatchContext, &'a [KeyEvent])> {
        match self {
            Self::Key(combo) => {
                let (event, rest) = events.split_first()?;
                combo.matches(event).then_some((MatchContext::None, rest))
            }
            Self::Number => Self::try_match_number(events),
        }
    }

    fn try_match_number(mut events: &[KeyEvent]) -> Option<(MatchContext, &[KeyEvent])> {
        let mut number: Option<u32> = None;
        while let Some((head, rest)) = events.split_first() {
            let KeyCode::Char(c) = head.code else {
                break;
            };
            let Some(digit) = c.to_digit(10) else {
                break;
            };
            // Numbers that overflow can't be a slide anyway.
            number = Some(number.unwrap_or(0).checked_mul(10)?.checked_add(digit)?);
            events = rest;
        }
        number.map(|number| (MatchContext::Number(number), events))
    }

    fn parse(input: &str) -> Result<(Self, &str), KeyBindingParseError> {
        let Some(tagged) = input.strip_prefix('<') else {
            let next = input.chars().next().ok_or(KeyBindingParseError::NoInput)?;
            let rest = &input[next.len_utf8()..];
            return match next {
                '>' => Err(KeyBindingParseError::InvalidKey(next)),
                c if c.is_alphanumeric() || c.is_ascii_punctuation() || c == ' ' => {
                    Ok((Self::Key(KeyCode::Char(c).into()), rest))
                }
                c => Err(KeyBindingParseError::InvalidKey(c)),
            };
        };
        let (name, rest) = tagged.split_once('>').ok_or(KeyBindingParseError::Unterminated)?;
        if name == "number" {
            return Ok((Self::Number, rest));
        }
        let combination = match name.strip_prefix("c-").or_else(|| name.strip_prefix("C-")) {
            Some(key) => KeyCombination { key: Self::parse_control_key(key, name)?, control: true },
            None => Self::parse_named_key(name)?.into(),
        };
        Ok((Self::Key(combination), rest))
    }

    fn parse_control_key(key: &str, name: &str) -> Result<KeyCode, KeyBindingParseError> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphanumeric() => Ok(KeyCode::Char(c)),
            _ => Err(KeyBindingParseError::UnknownKeyName(name.to_string())),
        }
    }

    fn parse_named_key(name: &str) -> Result<KeyCode, KeyBindingParseError> {
        let normalized = name.to_lowercase().replace('_', "");
        if let Some((_, key)) = NAMED_KEYS.iter().find(|(key_name, _)| *key_name == normalized) {
            return Ok(*key);
        }
        match normalized.strip_prefix('f').map(str::parse::<u8>) {
            Some(Ok(number @ 1..=12)) => Ok(KeyCode::F(number)),
            _ => Err(KeyBindingParseError::UnknownKeyName(name.to_string())),
        }
    }
}

impl fmt::Display for KeyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let combo = match self {
            Self::Number => return write!(f, "<number>"),
            Self::Key(combo) => combo,
        };
        match (combo.control, combo.key) {
            (true, KeyCode::Char(c)) => write!(f, "<c-{c}>"),
            (_, KeyCode::Char(' ')) => write!(f, "<space>"),
            (_, KeyCode::Char(c)) => write!(f, "{c}"),
            (_, KeyCode::F(number)) => write!(f, "<f{number}>"),
            (_, other) => write!(f, "<{other:?}>"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum MatchContext {
    Number(u32),
    None,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct KeyCombination {
    key: KeyCode,
    control: bool,
}

impl KeyCombination {
    fn matches(&self, event: &KeyEvent) -> bool {
        let is_control = event.modifiers == KeyModifiers::CONTROL;
        self.key == event.code && self.control == is_control
    }
}

impl From<KeyCode> for KeyCombination {
    fn from(key: KeyCode) -> Self {
        Self { key, control: false }
    }
}
