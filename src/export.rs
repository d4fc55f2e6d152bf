use crate::{
    catalog::Catalog,
    deck::{DeckState, ThemeMode},
    processing::builder::build_frame,
    render::{
        engine::{RenderEngine, RenderEngineOptions},
        properties::WindowSize,
        RenderError,
    },
    terminal::virt::VirtualTerminal,
    theme::DeckThemes,
};
use std::io::{self, Write};

/// Allows exporting a deck as plain text.
///
/// Every slide is drawn, chrome included, into an in-memory terminal of a fixed size and the
/// resulting screens are written one after the other.
pub struct Exporter<'a> {
    catalog: &'a Catalog,
    themes: &'a DeckThemes,
    options: ExportOptions,
}

pub struct ExportOptions {
    pub dimensions: WindowSize,
    pub theme_mode: ThemeMode,
    pub max_columns: u16,
}

impl<'a> Exporter<'a> {
    /// Construct a new exporter.
    pub fn new(catalog: &'a Catalog, themes: &'a DeckThemes, options: ExportOptions) -> Self {
        Self { catalog, themes, options }
    }

    /// Render every slide into the given output.
    pub fn export<W: Write>(&self, mut output: W) -> Result<(), ExportError> {
        let separator = "─".repeat(self.options.dimensions.columns as usize);
        for index in 0..self.catalog.len() {
            if index > 0 {
                writeln!(output, "{separator}")?;
            }
            for line in self.render_slide(index)? {
                writeln!(output, "{line}")?;
            }
        }
        output.flush()?;
        Ok(())
    }

    fn render_slide(&self, index: usize) -> Result<Vec<String>, ExportError> {
        let mut deck = DeckState::new(self.catalog.len(), self.options.theme_mode);
        deck.jump_to(index);
        let slide = self.catalog.get(index).ok_or(ExportError::MissingSlide(index))?;
        let operations = build_frame(slide, self.themes.get(deck.theme_mode()), &deck);

        let dimensions = self.options.dimensions;
        let mut terminal = VirtualTerminal::new(dimensions);
        let options = RenderEngineOptions { max_columns: self.options.max_columns };
        let engine = RenderEngine::new(&mut terminal, dimensions, options);
        engine.render(operations.iter())?;
        tracing::debug!("exported slide {} ({})", index + 1, slide.id);
        Ok(terminal.into_contents().lines())
    }
}

/// An error when exporting a deck.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("rendering slide: {0}")]
    Render(#[from] RenderError),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("slide {0} does not exist")]
    MissingSlide(usize),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::theme::registry::ThemeRegistry;

    fn export(theme_mode: ThemeMode, dimensions: WindowSize) -> String {
        let catalog = Catalog::homevisor();
        let themes = DeckThemes::load(&ThemeRegistry::default(), "dark", "light").expect("themes failed");
        let options = ExportOptions { dimensions, theme_mode, max_columns: u16::MAX };
        let mut output = Vec::new();
        Exporter::new(&catalog, &themes, options).export(&mut output).expect("export failed");
        String::from_utf8(output).expect("not utf8")
    }

    #[test]
    fn every_slide_is_exported() {
        let dimensions = WindowSize { rows: 40, columns: 120 };
        let output = export(ThemeMode::Dark, dimensions);
        for number in 1..=12 {
            assert!(output.contains(&format!("{number:02} / 12")), "slide {number} missing");
        }
        assert_eq!(output.lines().count(), 12 * 40 + 11);
        assert!(output.contains("Get Early Access"));
    }

    #[test]
    fn theme_mode_is_honored() {
        let dimensions = WindowSize { rows: 40, columns: 120 };
        assert!(export(ThemeMode::Dark, dimensions).contains("[☀]"));
        assert!(export(ThemeMode::Light, dimensions).contains("[☾]"));
    }
}
