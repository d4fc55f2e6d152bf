use crate::{
    render::{layout::Positioning, RenderError, RenderResult},
    terminal::printer::{TerminalCommand, TerminalIo},
    text::{
        style::{Color, Colors, TextStyle},
        weighted::WeightedLine,
        Text,
    },
};

const MINIMUM_LINE_LENGTH: u16 = 10;

/// Draws text on the screen.
///
/// This deals with splitting words and doing word wrapping based on the given positioning.
pub(crate) struct TextDrawer<'a> {
    prefix: &'a Text,
    line: &'a WeightedLine,
    positioning: Positioning,
    prefix_length: u16,
    default_colors: &'a Colors,
    draw_block: bool,
    block_color: Option<Color>,
    repeat_prefix: bool,
}

impl<'a> TextDrawer<'a> {
    pub(crate) fn new(
        prefix: &'a Text,
        line: &'a WeightedLine,
        positioning: Positioning,
        default_colors: &'a Colors,
    ) -> Result<Self, RenderError> {
        let text_length = (line.width() + prefix.width()) as u16;
        // If our line doesn't fit and it's just too small then abort
        if text_length > positioning.max_line_length && positioning.max_line_length <= MINIMUM_LINE_LENGTH {
            return Err(RenderError::TerminalTooSmall);
        }
        let prefix_length = prefix.width() as u16;
        let positioning = Positioning {
            max_line_length: positioning.max_line_length.saturating_sub(prefix_length),
            start_column: positioning.start_column,
        };
        Ok(Self {
            prefix,
            line,
            positioning,
            prefix_length,
            default_colors,
            draw_block: false,
            block_color: None,
            repeat_prefix: false,
        })
    }

    /// Fill the rest of every line with the given color.
    pub(crate) fn with_surrounding_block(mut self, block_color: Option<Color>) -> Self {
        self.draw_block = true;
        self.block_color = block_color;
        self
    }

    /// Print the prefix again on every wrapped line rather than just on the first one.
    pub(crate) fn repeat_prefix_on_wrap(mut self, value: bool) -> Self {
        self.repeat_prefix = value;
        self
    }

    /// Draw text on the given terminal.
    ///
    /// This performs word splitting and word wrapping.
    pub(crate) fn draw<T: TerminalIo>(self, terminal: &mut T) -> RenderResult {
        let mut line_length: u16 = 0;

        terminal.execute(&TerminalCommand::MoveToColumn(self.positioning.start_column))?;
        self.print_chunk(self.prefix, terminal)?;

        let start_column = self.positioning.start_column + self.prefix_length;
        for (line_index, line) in self.line.wrap(self.positioning.max_line_length as usize).into_iter().enumerate() {
            if line_index > 0 {
                // Complete the current line's block to the right before moving down.
                self.print_block_background(line_length, terminal)?;
                terminal.execute(&TerminalCommand::MoveDown(1))?;
                line_length = 0;

                if self.prefix_length > 0 {
                    terminal.execute(&TerminalCommand::MoveToColumn(self.positioning.start_column))?;
                    if self.repeat_prefix {
                        self.print_chunk(self.prefix, terminal)?;
                    } else {
                        let padding = Text::from(" ".repeat(self.prefix_length as usize));
                        self.print_chunk(&padding, terminal)?;
                    }
                }
            }
            terminal.execute(&TerminalCommand::MoveToColumn(start_column))?;
            for chunk in &line {
                line_length = line_length.saturating_add(chunk.width() as u16);
                self.print_chunk(chunk, terminal)?;
            }
        }
        self.print_block_background(line_length, terminal)?;
        Ok(())
    }

    fn print_chunk<T: TerminalIo>(&self, chunk: &Text, terminal: &mut T) -> RenderResult {
        if chunk.content.is_empty() {
            return Ok(());
        }
        let style = match (self.draw_block, self.block_color) {
            (true, Some(color)) => chunk.style.merged(&TextStyle::default().bg_color(color)),
            _ => chunk.style,
        };
        terminal.execute(&TerminalCommand::PrintText { content: &chunk.content, style })?;

        // Crossterm resets colors if any attributes are set so let's just re-apply colors
        // if the format has anything on it at all.
        if style.has_modifiers() {
            terminal.execute(&TerminalCommand::SetColors(*self.default_colors))?;
        }
        Ok(())
    }

    fn print_block_background<T: TerminalIo>(&self, line_length: u16, terminal: &mut T) -> RenderResult {
        if !self.draw_block {
            return Ok(());
        }
        let remaining = self.positioning.max_line_length.saturating_sub(line_length);
        if remaining > 0 {
            let padding = Text::from(" ".repeat(remaining as usize));
            self.print_chunk(&padding, terminal)?;
        }
        Ok(())
    }
}
