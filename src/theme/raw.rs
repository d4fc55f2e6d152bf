use super::registry::LoadThemeError;
use crate::text::style::{Color, Colors};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A deck theme, as written in a theme file.
///
/// Every color is optional here so a theme can extend another one and only override a few of them.
#[derive(Default, Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawTheme {
    /// The theme this theme extends from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) extends: Option<String>,

    /// The color palette.
    #[serde(default)]
    pub(crate) colors: PaletteColors,

    /// The layout of the content area.
    #[serde(default)]
    pub(crate) layout: LayoutStyle,
}

impl RawTheme {
    /// Load a theme from a path.
    pub(crate) fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadThemeError> {
        let contents = fs::read_to_string(&path)?;
        let theme = serde_yaml::from_str(&contents)
            .map_err(|e| LoadThemeError::Corrupted(path.as_ref().display().to_string(), e.to_string()))?;
        Ok(theme)
    }
}

/// The colors used throughout the deck.
#[derive(Default, Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PaletteColors {
    /// The screen background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) background: Option<Color>,

    /// Slide titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<Color>,

    /// Subtitles and headlines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) subtitle: Option<Color>,

    /// Body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) body: Option<Color>,

    /// List items and card titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<Color>,

    /// The accent color used for highlights, markers and stats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) accent: Option<Color>,

    /// Secondary text like the counter and captions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) muted: Option<Color>,

    /// The background of cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) card: Option<Color>,

    /// The unfilled part of bars and connector lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) track: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) positive: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) negative: Option<Color>,

    /// The progress dot for the current slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) dot_active: Option<Color>,

    /// The progress dots for every other slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) dot_inactive: Option<Color>,

    /// Tag and badge colors.
    #[serde(default)]
    pub(crate) badge: Colors,

    /// The primary button on the closing slide.
    #[serde(default)]
    pub(crate) button: Colors,
}

/// How the slide content is laid out on the screen.
#[derive(Default, Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LayoutStyle {
    /// The margin on the left and right of the content area.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_yaml::with::singleton_map")]
    pub(crate) horizontal_margin: Option<Margin>,

    /// The number of rows kept free above the content area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) top_margin: Option<u16>,

    /// The number of rows kept free below the content area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) bottom_margin: Option<u16>,
}

/// A margin.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Margin {
    /// A fixed number of characters.
    Fixed(u16),

    /// A percent of the screen size.
    Percent(u16),
}

impl Margin {
    pub(crate) fn as_characters(&self, screen_size: u16) -> u16 {
        match *self {
            Self::Fixed(value) => value,
            Self::Percent(percent) => {
                let ratio = percent as f64 / 100.0;
                (screen_size as f64 * ratio).ceil() as u16
            }
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::Fixed(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::fixed(Margin::Fixed(3), 3)]
    #[case::percent(Margin::Percent(8), 8)]
    #[case::percent_rounds_up(Margin::Percent(5), 5)]
    fn margin_characters(#[case] margin: Margin, #[case] expected: u16) {
        assert_eq!(margin.as_characters(100), expected);
    }

    #[test]
    fn percent_of_odd_screen() {
        assert_eq!(Margin::Percent(8).as_characters(81), 7);
    }

    #[test]
    fn parse_partial_theme() {
        let input = r##"
extends: dark
colors:
  accent: "#ff00ff"
  badge:
    foreground: white
layout:
  horizontal_margin:
    percent: 10
"##;
        let theme: RawTheme = serde_yaml::from_str(input).expect("parse failed");
        assert_eq!(theme.extends.as_deref(), Some("dark"));
        assert_eq!(theme.colors.accent, Some(Color::new(255, 0, 255)));
        assert_eq!(theme.colors.badge.foreground, Some(Color::White));
        assert!(theme.colors.title.is_none());
        assert_eq!(theme.layout.horizontal_margin, Some(Margin::Percent(10)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let input = "colors:\n  sparkle: \"ffffff\"\n";
        serde_yaml::from_str::<RawTheme>(input).expect_err("parse succeeded");
    }
}
