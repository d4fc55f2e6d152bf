use crate::text::style::{Color, Colors, TextStyle};
use crossterm::{
    cursor, event, style,
    terminal::{self},
    QueueableCommand,
};
use std::io::{self, Write};

#[derive(Debug, PartialEq)]
pub(crate) enum TerminalCommand<'a> {
    BeginUpdate,
    EndUpdate,
    MoveTo { column: u16, row: u16 },
    MoveToRow(u16),
    MoveToColumn(u16),
    MoveDown(u16),
    MoveToNextLine,
    PrintText { content: &'a str, style: TextStyle },
    ClearScreen,
    SetColors(Colors),
    SetBackgroundColor(Color),
    Flush,
}

/// Something commands can be executed against.
pub(crate) trait TerminalIo {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError>;
    fn cursor_row(&self) -> u16;
}

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// A wrapper over the terminal write handle.
pub(crate) struct Terminal<I: TerminalWrite> {
    writer: I,
    cursor_row: u16,
    background_color: Option<Color>,
}

impl<I: TerminalWrite> Terminal<I> {
    pub(crate) fn new(mut writer: I) -> io::Result<Self> {
        writer.init()?;
        Ok(Self { writer, cursor_row: 0, background_color: None })
    }

    fn begin_update(&mut self) -> io::Result<()> {
        self.writer.queue(terminal::BeginSynchronizedUpdate)?;
        Ok(())
    }

    fn end_update(&mut self) -> io::Result<()> {
        self.writer.queue(terminal::EndSynchronizedUpdate)?;
        Ok(())
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.writer.queue(cursor::MoveTo(column, row))?;
        self.cursor_row = row;
        Ok(())
    }

    fn move_to_row(&mut self, row: u16) -> io::Result<()> {
        self.writer.queue(cursor::MoveToRow(row))?;
        self.cursor_row = row;
        Ok(())
    }

    fn move_to_column(&mut self, column: u16) -> io::Result<()> {
        self.writer.queue(cursor::MoveToColumn(column))?;
        Ok(())
    }

    fn move_down(&mut self, amount: u16) -> io::Result<()> {
        self.writer.queue(cursor::MoveDown(amount))?;
        self.cursor_row += amount;
        Ok(())
    }

    fn move_to_next_line(&mut self) -> io::Result<()> {
        self.writer.queue(cursor::MoveToNextLine(1))?;
        self.cursor_row += 1;
        Ok(())
    }

    fn print_text(&mut self, content: &str, style: &TextStyle) -> io::Result<()> {
        let content = style.apply(content);
        self.writer.queue(style::PrintStyledContent(content))?;
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.writer.queue(terminal::Clear(terminal::ClearType::All))?;
        self.cursor_row = 0;
        Ok(())
    }

    fn set_colors(&mut self, colors: Colors) -> io::Result<()> {
        let crossterm_colors = colors.into();
        self.writer.queue(style::ResetColor)?;
        self.writer.queue(style::SetColors(crossterm_colors))?;
        if self.background_color != colors.background {
            match (self.background_color, colors.background) {
                (_, Some(Color::Rgb { r, g, b })) => {
                    // Set background via OSC 11 so the area outside the grid matches the deck.
                    write!(self.writer, "\x1b]11;#{r:02x}{g:02x}{b:02x}\x1b\\")?;
                }
                (Some(Color::Rgb { .. }), Some(_)) | (_, None) => write!(self.writer, "\x1b]111\x1b\\")?,
                _ => (),
            };
            self.background_color = colors.background;
        }
        Ok(())
    }

    fn set_background_color(&mut self, color: Color) -> io::Result<()> {
        self.writer.queue(style::SetBackgroundColor(color.into()))?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Give the terminal back to the shell, e.g. before suspending the process.
    pub(crate) fn suspend(&mut self) {
        self.writer.deinit();
    }

    pub(crate) fn resume(&mut self) {
        let _ = self.writer.init();
    }
}

impl<I: TerminalWrite> TerminalIo for Terminal<I> {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError> {
        use TerminalCommand::*;
        match command {
            BeginUpdate => self.begin_update()?,
            EndUpdate => self.end_update()?,
            MoveTo { column, row } => self.move_to(*column, *row)?,
            MoveToRow(row) => self.move_to_row(*row)?,
            MoveToColumn(column) => self.move_to_column(*column)?,
            MoveDown(amount) => self.move_down(*amount)?,
            MoveToNextLine => self.move_to_next_line()?,
            PrintText { content, style } => self.print_text(content, style)?,
            ClearScreen => self.clear_screen()?,
            SetColors(colors) => self.set_colors(*colors)?,
            SetBackgroundColor(color) => self.set_background_color(*color)?,
            Flush => self.flush()?,
        };
        Ok(())
    }

    fn cursor_row(&self) -> u16 {
        self.cursor_row
    }
}

impl<I: TerminalWrite> Drop for Terminal<I> {
    fn drop(&mut self) {
        if let Some(Color::Rgb { .. }) = self.background_color {
            let _ = write!(self.writer, "\x1b]111\x1b\\");
        }
        self.writer.deinit();
    }
}

/// A handle that can take over the terminal.
pub(crate) trait TerminalWrite: io::Write {
    fn init(&mut self) -> io::Result<()>;
    fn deinit(&mut self);
}

/// Stdout, in raw mode and on the alternate screen while initialized.
pub(crate) struct ScreenWriter {
    stdout: io::Stdout,
    capture_mouse: bool,
}

impl ScreenWriter {
    pub(crate) fn new(capture_mouse: bool) -> Self {
        Self { stdout: io::stdout(), capture_mouse }
    }
}

impl io::Write for ScreenWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl TerminalWrite for ScreenWriter {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        if self.capture_mouse {
            self.stdout.queue(event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn deinit(&mut self) {
        if self.capture_mouse {
            let _ = self.stdout.queue(event::DisableMouseCapture);
        }
        let _ = self.stdout.queue(terminal::LeaveAlternateScreen);
        let _ = self.stdout.queue(cursor::Show);
        let _ = self.stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}
