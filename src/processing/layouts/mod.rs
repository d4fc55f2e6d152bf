//! One renderer per slide layout.
//!
//! Every renderer only draws the elements whose fields are set in the slide, so none of them can
//! fail.

pub(crate) mod columns;
pub(crate) mod dashboard;
pub(crate) mod fallback;
pub(crate) mod grid;
pub(crate) mod hero;
pub(crate) mod split;
pub(crate) mod table;
pub(crate) mod timeline;

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{
        catalog::Slide,
        processing::builder::build_slide,
        render::{engine::RenderEngine, properties::WindowSize},
        terminal::virt::{TerminalGrid, VirtualTerminal},
        theme::{registry::ThemeRegistry, DeckTheme, DeckThemes},
    };

    pub(crate) fn dark_theme() -> DeckTheme {
        DeckThemes::load(&ThemeRegistry::default(), "dark", "light").expect("themes failed").dark
    }

    /// Render a slide body into a terminal big enough to fit any slide.
    pub(crate) fn render_slide(slide: &Slide) -> TerminalGrid {
        let dimensions = WindowSize { rows: 40, columns: 120 };
        let operations = build_slide(slide, &dark_theme());
        let mut terminal = VirtualTerminal::new(dimensions);
        let engine = RenderEngine::new(&mut terminal, dimensions, Default::default());
        engine.render(operations.iter()).expect("render failed");
        terminal.into_contents()
    }
}
