pub(crate) mod engine;
pub(crate) mod layout;
pub(crate) mod operation;
pub(crate) mod properties;
pub(crate) mod text;

use crate::{
    render::{operation::RenderOperation, properties::WindowSize},
    terminal::printer::{Terminal, TerminalError, TerminalWrite},
    text::{
        style::{Color, Colors, TextStyle},
        weighted::WeightedLine,
        Text,
    },
    theme::{Alignment, Margin},
};
use engine::{RenderEngine, RenderEngineOptions};
use std::io;

/// The result of a render operation.
pub(crate) type RenderResult = Result<(), RenderError>;

pub(crate) struct TerminalDrawerOptions {
    /// The max width in columns that the deck should be capped to.
    pub(crate) max_columns: u16,
}

impl Default for TerminalDrawerOptions {
    fn default() -> Self {
        Self { max_columns: u16::MAX }
    }
}

/// Allows drawing on the terminal.
pub(crate) struct TerminalDrawer<W: TerminalWrite> {
    pub(crate) terminal: Terminal<W>,
    options: TerminalDrawerOptions,
}

impl<W> TerminalDrawer<W>
where
    W: TerminalWrite,
{
    pub(crate) fn new(handle: W, options: TerminalDrawerOptions) -> io::Result<Self> {
        let terminal = Terminal::new(handle)?;
        Ok(Self { terminal, options })
    }

    pub(crate) fn render_operations<'a>(
        &mut self,
        operations: impl Iterator<Item = &'a RenderOperation>,
        dimensions: WindowSize,
    ) -> RenderResult {
        let engine = self.create_engine(dimensions);
        engine.render(operations)?;
        Ok(())
    }

    /// Draw an error message in place of the deck.
    pub(crate) fn render_error(&mut self, message: &str, dimensions: WindowSize) -> RenderResult {
        let heading = vec![Text::new("Error drawing slide", TextStyle::default().bold()), Text::from(": ")];
        let total_lines = message.lines().count();
        let starting_row = (dimensions.rows / 2).saturating_sub(total_lines as u16 / 2 + 3);
        let alignment = Alignment::Left { margin: Margin::Percent(25) };

        let mut operations = vec![
            RenderOperation::SetColors(Colors::new(Color::new(255, 0, 0), Color::new(0, 0, 0))),
            RenderOperation::ClearScreen,
            RenderOperation::JumpToRow { index: starting_row },
            RenderOperation::RenderText { line: WeightedLine::from(heading), alignment: alignment.clone() },
            RenderOperation::RenderLineBreak,
            RenderOperation::RenderLineBreak,
        ];
        for line in message.lines() {
            let op = RenderOperation::RenderText { line: WeightedLine::from(line), alignment: alignment.clone() };
            operations.extend([op, RenderOperation::RenderLineBreak]);
        }
        let engine = self.create_engine(dimensions);
        engine.render(operations.iter())?;
        Ok(())
    }

    fn create_engine(&mut self, dimensions: WindowSize) -> RenderEngine<Terminal<W>> {
        let options = RenderEngineOptions { max_columns: self.options.max_columns };
        RenderEngine::new(&mut self.terminal, dimensions, options)
    }
}

/// A rendering error.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error("screen is too small")]
    TerminalTooSmall,

    #[error("tried to move to non existent layout location")]
    InvalidLayoutEnter,

    #[error("tried to pop default screen")]
    PopDefaultScreen,
}
