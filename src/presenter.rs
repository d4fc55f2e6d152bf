use crate::{
    catalog::Catalog,
    commands::{
        keyboard::KeyBindingsValidationError,
        listener::{Command, CommandListener},
    },
    config::KeyBindingsConfig,
    deck::{DeckState, ThemeMode},
    processing::builder::build_frame,
    render::{
        operation::RenderOperation, properties::WindowSize, RenderError, RenderResult, TerminalDrawer,
        TerminalDrawerOptions,
    },
    terminal::printer::ScreenWriter,
    theme::DeckThemes,
    ui::chrome::{ChromeLayout, Hotspot},
};
use std::io;

pub struct PresenterOptions {
    /// The theme the deck starts with.
    pub theme_mode: ThemeMode,

    /// The index of the slide the deck starts at.
    pub initial_slide: usize,

    /// The max width in columns the deck is capped to.
    pub max_columns: u16,

    /// Whether to capture the mouse.
    pub mouse: bool,

    pub bindings: KeyBindingsConfig,
}

/// A pitch deck presenter.
///
/// This type puts everything else together.
pub struct Presenter {
    catalog: Catalog,
    themes: DeckThemes,
    deck: DeckState,
    options: PresenterOptions,
}

impl Presenter {
    /// Construct a new presenter.
    pub fn new(catalog: Catalog, themes: DeckThemes, options: PresenterOptions) -> Self {
        let mut deck = DeckState::new(catalog.len(), options.theme_mode);
        if options.initial_slide > 0 && !deck.jump_to(options.initial_slide) {
            tracing::warn!("slide {} does not exist, starting at the first one", options.initial_slide + 1);
        }
        Self { catalog, themes, deck, options }
    }

    /// Run the deck until the user exits.
    pub fn present(mut self) -> Result<(), PresentationError> {
        let mut commands = CommandListener::new(self.options.bindings.clone(), self.options.mouse)?;
        let drawer_options = TerminalDrawerOptions { max_columns: self.options.max_columns };
        let mut drawer = TerminalDrawer::new(ScreenWriter::new(self.options.mouse), drawer_options)?;
        tracing::info!("presenting {} slides", self.catalog.len());
        loop {
            self.render(&mut drawer)?;
            loop {
                let Some(command) = commands.try_next_command()? else {
                    continue;
                };
                tracing::debug!("applying command {:?}", command);
                let dimensions = WindowSize::current()?;
                match self.apply_command(command, dimensions) {
                    CommandSideEffect::Exit => return Ok(()),
                    CommandSideEffect::Suspend => {
                        self.suspend(&mut drawer);
                        break;
                    }
                    CommandSideEffect::Redraw => break,
                    CommandSideEffect::None => (),
                };
            }
        }
    }

    fn render(&self, drawer: &mut TerminalDrawer<ScreenWriter>) -> RenderResult {
        let dimensions = WindowSize::current()?;
        let operations = self.frame();
        let result = drawer.render_operations(operations.iter(), dimensions);
        // If the screen is too small, simply ignore this. Eventually the user will resize the
        // screen.
        match result {
            Err(RenderError::TerminalTooSmall) => {
                tracing::debug!("terminal too small to draw slide: {dimensions:?}");
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to draw slide {}: {e}", self.deck.current_index() + 1);
                drawer.render_error(&e.to_string(), dimensions)
            }
            Ok(()) => Ok(()),
        }
    }

    /// The operations that draw the current slide along with the chrome around it.
    pub(crate) fn frame(&self) -> Vec<RenderOperation> {
        let theme = self.themes.get(self.deck.theme_mode());
        match self.catalog.get(self.deck.current_index()) {
            Some(slide) => build_frame(slide, theme, &self.deck),
            None => vec![RenderOperation::SetColors(theme.screen_colors()), RenderOperation::ClearScreen],
        }
    }

    pub(crate) fn apply_command(&mut self, command: Command, dimensions: WindowSize) -> CommandSideEffect {
        let needs_redraw = match command {
            Command::Exit => return CommandSideEffect::Exit,
            Command::Suspend => return CommandSideEffect::Suspend,
            Command::Redraw => return CommandSideEffect::Redraw,
            Command::Next => self.deck.next(),
            Command::Previous => self.deck.previous(),
            Command::GoToSlide(number) => self.deck.jump_to(number.saturating_sub(1) as usize),
            Command::ToggleTheme => self.deck.toggle_theme(),
            Command::Click { column, row } => {
                let chrome = ChromeLayout::new(&self.deck);
                match chrome.hit(dimensions, self.options.max_columns, column, row) {
                    Some(Hotspot::Next) => self.deck.next(),
                    Some(Hotspot::Previous) => self.deck.previous(),
                    Some(Hotspot::Dot(index)) => self.deck.jump_to(index),
                    Some(Hotspot::ToggleTheme) => self.deck.toggle_theme(),
                    None => false,
                }
            }
        };
        if needs_redraw {
            tracing::info!("showing slide {} in {:?} mode", self.deck.current_index() + 1, self.deck.theme_mode());
            CommandSideEffect::Redraw
        } else {
            CommandSideEffect::None
        }
    }

    fn suspend(&self, drawer: &mut TerminalDrawer<ScreenWriter>) {
        #[cfg(unix)]
        unsafe {
            drawer.terminal.suspend();
            libc::raise(libc::SIGTSTP);
            drawer.terminal.resume();
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CommandSideEffect {
    Exit,
    Suspend,
    Redraw,
    None,
}

/// An error during the presentation.
#[derive(thiserror::Error, Debug)]
pub enum PresentationError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("invalid key bindings: {0}")]
    KeyBindings(#[from] KeyBindingsValidationError),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        render::engine::{RenderEngine, RenderEngineOptions},
        terminal::virt::{TerminalGrid, VirtualTerminal},
        theme::registry::ThemeRegistry,
    };
    use rstest::rstest;

    const DIMENSIONS: WindowSize = WindowSize { rows: 40, columns: 120 };

    fn themes() -> DeckThemes {
        DeckThemes::load(&ThemeRegistry::default(), "dark", "light").expect("themes failed")
    }

    fn presenter(initial_slide: usize) -> Presenter {
        let options = PresenterOptions {
            theme_mode: ThemeMode::Dark,
            initial_slide,
            max_columns: u16::MAX,
            mouse: true,
            bindings: Default::default(),
        };
        Presenter::new(Catalog::homevisor(), themes(), options)
    }

    fn draw(presenter: &Presenter) -> TerminalGrid {
        let mut terminal = VirtualTerminal::new(DIMENSIONS);
        let engine = RenderEngine::new(&mut terminal, DIMENSIONS, RenderEngineOptions { max_columns: u16::MAX });
        engine.render(presenter.frame().iter()).expect("render failed");
        terminal.into_contents()
    }

    fn click(presenter: &mut Presenter, text: &str) -> CommandSideEffect {
        let (column, row) = draw(presenter).find(text).expect("text not found");
        presenter.apply_command(Command::Click { column, row }, DIMENSIONS)
    }

    #[test]
    fn starts_at_initial_slide() {
        assert!(draw(&presenter(0)).contains("01 / 12"));
        assert!(draw(&presenter(4)).contains("05 / 12"));
    }

    #[test]
    fn initial_slide_out_of_range() {
        assert!(draw(&presenter(12)).contains("01 / 12"));
    }

    #[test]
    fn navigate_with_keys() {
        let mut presenter = presenter(0);
        assert_eq!(presenter.apply_command(Command::Next, DIMENSIONS), CommandSideEffect::Redraw);
        assert!(draw(&presenter).contains("02 / 12"));

        presenter.apply_command(Command::Previous, DIMENSIONS);
        presenter.apply_command(Command::Previous, DIMENSIONS);
        let grid = draw(&presenter);
        assert!(grid.contains("12 / 12"));
        assert!(grid.contains("Get Early Access"));
    }

    #[rstest]
    #[case::exists(7, CommandSideEffect::Redraw, "07 / 12")]
    #[case::first(1, CommandSideEffect::Redraw, "01 / 12")]
    #[case::past_end(13, CommandSideEffect::None, "03 / 12")]
    fn go_to_slide(#[case] number: u32, #[case] effect: CommandSideEffect, #[case] counter: &str) {
        let mut presenter = presenter(2);
        assert_eq!(presenter.apply_command(Command::GoToSlide(number), DIMENSIONS), effect);
        assert!(draw(&presenter).contains(counter));
    }

    #[test]
    fn click_chevrons() {
        let mut presenter = presenter(0);
        assert_eq!(click(&mut presenter, "[›]"), CommandSideEffect::Redraw);
        assert!(draw(&presenter).contains("02 / 12"));

        click(&mut presenter, "[‹]");
        click(&mut presenter, "[‹]");
        assert!(draw(&presenter).contains("12 / 12"));
    }

    #[test]
    fn click_dot() {
        let mut presenter = presenter(0);
        // The active dot is 4 cells wide and the rest are 2, all separated by a single space.
        let row = DIMENSIONS.rows - 2;
        let effect = presenter.apply_command(Command::Click { column: 13, row }, DIMENSIONS);
        assert_eq!(effect, CommandSideEffect::Redraw);
        assert!(draw(&presenter).contains("04 / 12"));
    }

    #[test]
    fn walk_whole_deck() {
        let mut presenter = presenter(0);
        for _ in 0..11 {
            assert_eq!(presenter.apply_command(Command::Next, DIMENSIONS), CommandSideEffect::Redraw);
        }
        let grid = draw(&presenter);
        assert!(grid.contains("12 / 12"));
        assert!(grid.contains("Enter your email..."));
        assert!(grid.contains("Get Early Access"));

        presenter.apply_command(Command::Next, DIMENSIONS);
        assert!(draw(&presenter).contains("01 / 12"));
    }

    #[test]
    fn click_sixth_dot() {
        let mut presenter = presenter(0);
        // The sixth dot spans columns 19 and 20 while the first one is active.
        let row = DIMENSIONS.rows - 2;
        let effect = presenter.apply_command(Command::Click { column: 19, row }, DIMENSIONS);
        assert_eq!(effect, CommandSideEffect::Redraw);
        let grid = draw(&presenter);
        assert!(grid.contains("06 / 12"));
        assert!(grid.contains("Proactive Asset Management"));
    }

    #[test]
    fn click_nowhere() {
        let mut presenter = presenter(0);
        let effect = presenter.apply_command(Command::Click { column: 60, row: 20 }, DIMENSIONS);
        assert_eq!(effect, CommandSideEffect::None);
        assert!(draw(&presenter).contains("01 / 12"));
    }

    #[test]
    fn toggle_theme() {
        let mut presenter = presenter(0);
        let themes = themes();
        let grid = draw(&presenter);
        assert_eq!(grid.background_color, themes.dark.screen_colors().background);

        assert_eq!(click(&mut presenter, "[☀]"), CommandSideEffect::Redraw);
        let grid = draw(&presenter);
        assert!(grid.contains("[☾]"));
        assert!(grid.contains("01 / 12"));
        assert_eq!(grid.background_color, themes.light.screen_colors().background);

        presenter.apply_command(Command::ToggleTheme, DIMENSIONS);
        assert_eq!(draw(&presenter).background_color, themes.dark.screen_colors().background);
    }

    #[test]
    fn theme_survives_navigation() {
        let mut presenter = presenter(0);
        let themes = themes();
        let light = themes.light.screen_colors().background;
        click(&mut presenter, "[☀]");

        presenter.apply_command(Command::Next, DIMENSIONS);
        let grid = draw(&presenter);
        assert!(grid.contains("02 / 12"));
        assert!(grid.contains("[☾]"));
        assert_eq!(grid.background_color, light);

        presenter.apply_command(Command::Previous, DIMENSIONS);
        presenter.apply_command(Command::Previous, DIMENSIONS);
        let grid = draw(&presenter);
        assert!(grid.contains("12 / 12"));
        assert!(grid.contains("[☾]"));
        assert_eq!(grid.background_color, light);
    }

    #[rstest]
    #[case::exit(Command::Exit, CommandSideEffect::Exit)]
    #[case::suspend(Command::Suspend, CommandSideEffect::Suspend)]
    #[case::redraw(Command::Redraw, CommandSideEffect::Redraw)]
    fn terminal_commands(#[case] command: Command, #[case] effect: CommandSideEffect) {
        let mut presenter = presenter(3);
        assert_eq!(presenter.apply_command(command, DIMENSIONS), effect);
        assert!(draw(&presenter).contains("04 / 12"));
    }
}
