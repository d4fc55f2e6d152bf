pub(crate) mod raw;
pub(crate) mod registry;

use crate::{
    deck::ThemeMode,
    text::style::{Color, Colors, TextStyle},
};
pub(crate) use raw::Margin;
use raw::RawTheme;
use registry::ThemeRegistry;

/// A fully resolved deck theme.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DeckTheme {
    pub(crate) background: Color,
    pub(crate) title: Color,
    pub(crate) subtitle: Color,
    pub(crate) body: Color,
    pub(crate) item: Color,
    pub(crate) accent: Color,
    pub(crate) muted: Color,
    pub(crate) card: Color,
    pub(crate) track: Color,
    pub(crate) positive: Color,
    pub(crate) negative: Color,
    pub(crate) dot_active: Color,
    pub(crate) dot_inactive: Color,
    pub(crate) badge: Colors,
    pub(crate) button: Colors,
    pub(crate) horizontal_margin: Margin,
    pub(crate) top_margin: u16,
    pub(crate) bottom_margin: u16,
}

impl DeckTheme {
    /// Resolve a raw theme, failing if any color is missing.
    pub(crate) fn new(raw: &RawTheme) -> Result<Self, ThemeError> {
        let colors = &raw.colors;
        let require = |color: Option<Color>, name: &'static str| color.ok_or(ThemeError::MissingColor(name));
        let background = require(colors.background, "background")?;
        let badge = colors.badge.merge(&Colors { foreground: colors.accent, background: colors.card });
        let button = colors.button.merge(&Colors { foreground: Some(background), background: colors.title });
        Ok(Self {
            background,
            title: require(colors.title, "title")?,
            subtitle: require(colors.subtitle, "subtitle")?,
            body: require(colors.body, "body")?,
            item: require(colors.item, "item")?,
            accent: require(colors.accent, "accent")?,
            muted: require(colors.muted, "muted")?,
            card: require(colors.card, "card")?,
            track: require(colors.track, "track")?,
            positive: require(colors.positive, "positive")?,
            negative: require(colors.negative, "negative")?,
            dot_active: require(colors.dot_active, "dot_active")?,
            dot_inactive: require(colors.dot_inactive, "dot_inactive")?,
            badge,
            button,
            horizontal_margin: raw.layout.horizontal_margin.unwrap_or(Margin::Percent(8)),
            top_margin: raw.layout.top_margin.unwrap_or(3),
            bottom_margin: raw.layout.bottom_margin.unwrap_or(4),
        })
    }

    /// The colors every slide is drawn with.
    pub(crate) fn screen_colors(&self) -> Colors {
        Colors::new(self.body, self.background)
    }

    /// A style that only sets the foreground color.
    pub(crate) fn fg(&self, color: Color) -> TextStyle {
        TextStyle::default().fg_color(color)
    }
}

/// The pair of themes the deck switches between.
#[derive(Clone, Debug)]
pub struct DeckThemes {
    pub(crate) dark: DeckTheme,
    pub(crate) light: DeckTheme,
}

impl DeckThemes {
    /// Load the dark and light themes by name.
    pub fn load(registry: &ThemeRegistry, dark: &str, light: &str) -> Result<Self, ThemeError> {
        let load = |name: &str| {
            let raw = registry.load_by_name(name).ok_or_else(|| ThemeError::NotFound(name.to_string()))?;
            DeckTheme::new(&raw)
        };
        Ok(Self { dark: load(dark)?, light: load(light)? })
    }

    /// Get the theme for the given mode.
    pub(crate) fn get(&self, mode: ThemeMode) -> &DeckTheme {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }
}

/// Positioning for a piece of text.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Alignment {
    Left { margin: Margin },
    Right { margin: Margin },
    Center { minimum_margin: Margin, minimum_size: u16 },
}

impl Alignment {
    /// A centered alignment with no constraints.
    pub(crate) fn center() -> Self {
        Self::Center { minimum_margin: Margin::Fixed(0), minimum_size: 0 }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::Left { margin: Margin::Fixed(0) }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ThemeError {
    #[error("theme not found: {0}")]
    NotFound(String),

    #[error("theme is missing color '{0}'")]
    MissingColor(&'static str),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_themes_resolve() {
        let registry = ThemeRegistry::default();
        let themes = DeckThemes::load(&registry, "dark", "light").expect("loading failed");
        assert_eq!(themes.get(ThemeMode::Dark).background, Color::new(0x09, 0x09, 0x0b));
        assert_eq!(themes.get(ThemeMode::Light).background, Color::new(0xfa, 0xfa, 0xfa));
        assert_eq!(themes.dark.horizontal_margin, Margin::Percent(8));
    }

    #[test]
    fn missing_color() {
        let raw = RawTheme::default();
        let err = DeckTheme::new(&raw).expect_err("resolved empty theme");
        assert!(matches!(err, ThemeError::MissingColor("background")));
    }

    #[test]
    fn unknown_theme() {
        let registry = ThemeRegistry::default();
        let err = DeckThemes::load(&registry, "dark", "sepia").expect_err("loaded unknown theme");
        assert!(matches!(err, ThemeError::NotFound(name) if name == "sepia"));
    }
}
