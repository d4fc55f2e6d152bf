use crossterm::style::{StyledContent, Stylize};
use hex::{FromHex, FromHexError};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// The style of a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextStyle {
    flags: u8,
    pub(crate) colors: Colors,
}

impl TextStyle {
    /// Create a style that only sets colors.
    pub(crate) fn colored(colors: Colors) -> Self {
        Self { flags: 0, colors }
    }

    /// Add bold to this style.
    pub(crate) fn bold(self) -> Self {
        self.add_flag(TextFormatFlags::Bold)
    }

    /// Set the foreground color for this text style.
    pub(crate) fn fg_color(mut self, color: Color) -> Self {
        self.colors.foreground = Some(color);
        self
    }

    /// Set the background color for this text style.
    pub(crate) fn bg_color(mut self, color: Color) -> Self {
        self.colors.background = Some(color);
        self
    }

    pub(crate) fn is_bold(&self) -> bool {
        self.has_flag(TextFormatFlags::Bold)
    }

    /// Merge this style with another one, keeping our own colors when set.
    pub(crate) fn merged(mut self, other: &TextStyle) -> Self {
        self.flags |= other.flags;
        self.colors = self.colors.merge(&other.colors);
        self
    }

    /// Apply this style to a piece of text.
    pub(crate) fn apply<T: Into<String>>(&self, text: T) -> StyledContent<String> {
        let mut styled = text.into().stylize();
        if self.is_bold() {
            styled = styled.bold();
        }
        if let Some(color) = self.colors.background {
            styled = styled.on(color.into());
        }
        if let Some(color) = self.colors.foreground {
            styled = styled.with(color.into());
        }
        styled
    }

    /// Checks whether printing this style leaves the terminal with different attributes or colors.
    pub(crate) fn has_modifiers(&self) -> bool {
        self.flags != 0 || self.colors.foreground.is_some() || self.colors.background.is_some()
    }

    fn add_flag(mut self, flag: TextFormatFlags) -> Self {
        self.flags |= flag as u8;
        self
    }

    fn has_flag(&self, flag: TextFormatFlags) -> bool {
        self.flags & flag as u8 != 0
    }
}

#[derive(Debug)]
enum TextFormatFlags {
    Bold = 1,
}

/// A color.
///
/// Named colors map to the terminal's own palette, anything else is a hex encoded RGB triple.
#[derive(Debug, Copy, Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub(crate) enum Color {
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    const NAMES: [(&'static str, Color); 16] = [
        ("black", Self::Black),
        ("white", Self::White),
        ("grey", Self::Grey),
        ("dark_grey", Self::DarkGrey),
        ("red", Self::Red),
        ("dark_red", Self::DarkRed),
        ("green", Self::Green),
        ("dark_green", Self::DarkGreen),
        ("blue", Self::Blue),
        ("dark_blue", Self::DarkBlue),
        ("yellow", Self::Yellow),
        ("dark_yellow", Self::DarkYellow),
        ("magenta", Self::Magenta),
        ("dark_magenta", Self::DarkMagenta),
        ("cyan", Self::Cyan),
        ("dark_cyan", Self::DarkCyan),
    ];
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if let Some((_, color)) = Self::NAMES.iter().find(|(name, _)| *name == input) {
            return Ok(*color);
        }
        let input = input.strip_prefix('#').unwrap_or(input);
        let [r, g, b] = <[u8; 3]>::from_hex(input)?;
        Ok(Self::Rgb { r, g, b })
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Rgb { r, g, b } = self {
            return write!(f, "{}", hex::encode([*r, *g, *b]));
        }
        let name = Self::NAMES.iter().find(|(_, color)| color == self).map(|(name, _)| *name).unwrap_or_default();
        write!(f, "{name}")
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(value: Color) -> Self {
        use crossterm::style::Color as C;
        match value {
            Color::Black => C::Black,
            Color::DarkGrey => C::DarkGrey,
            Color::Red => C::Red,
            Color::DarkRed => C::DarkRed,
            Color::Green => C::Green,
            Color::DarkGreen => C::DarkGreen,
            Color::Yellow => C::Yellow,
            Color::DarkYellow => C::DarkYellow,
            Color::Blue => C::Blue,
            Color::DarkBlue => C::DarkBlue,
            Color::Magenta => C::Magenta,
            Color::DarkMagenta => C::DarkMagenta,
            Color::Cyan => C::Cyan,
            Color::DarkCyan => C::DarkCyan,
            Color::White => C::White,
            Color::Grey => C::Grey,
            Color::Rgb { r, g, b } => C::Rgb { r, g, b },
        }
    }
}

/// A foreground/background color pair.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub(crate) struct Colors {
    /// The background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) background: Option<Color>,

    /// The foreground color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) foreground: Option<Color>,
}

impl Colors {
    pub(crate) fn new(foreground: Color, background: Color) -> Self {
        Self { foreground: Some(foreground), background: Some(background) }
    }

    /// Fill any missing color in `self` from `other`.
    pub(crate) fn merge(&self, other: &Colors) -> Self {
        let background = self.background.or(other.background);
        let foreground = self.foreground.or(other.foreground);
        Self { background, foreground }
    }
}

impl From<Colors> for crossterm::style::Colors {
    fn from(value: Colors) -> Self {
        let foreground = value.foreground.map(Color::into);
        let background = value.background.map(Color::into);
        Self { foreground, background }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ParseColorError {
    #[error("invalid hex color: {0}")]
    Hex(#[from] FromHexError),
}
