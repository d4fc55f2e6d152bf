use super::printer::{TerminalCommand, TerminalError, TerminalIo};
use crate::{
    render::properties::WindowSize,
    text::style::{Color, Colors, TextStyle},
};
use unicode_width::UnicodeWidthChar;

/// The contents of a [VirtualTerminal] once it's done being drawn on.
pub(crate) struct TerminalGrid {
    pub(crate) rows: Vec<Vec<StyledChar>>,
    pub(crate) background_color: Option<Color>,
}

impl TerminalGrid {
    /// Get every row as plain text, with trailing whitespace removed.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().map(|c| c.character).collect::<String>().trim_end().to_string()).collect()
    }

    /// Find the first cell where `needle` starts, as `(column, row)`.
    pub(crate) fn find(&self, needle: &str) -> Option<(u16, u16)> {
        for (row_index, row) in self.rows.iter().enumerate() {
            let chars: Vec<char> = row.iter().map(|c| c.character).collect();
            let needle: Vec<char> = needle.chars().collect();
            if needle.is_empty() || needle.len() > chars.len() {
                continue;
            }
            if let Some(column) = chars.windows(needle.len()).position(|window| window == needle.as_slice()) {
                return Some((column as u16, row_index as u16));
            }
        }
        None
    }

    /// Whether any row contains the given text.
    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }
}

/// An in-memory terminal.
pub(crate) struct VirtualTerminal {
    row: u16,
    column: u16,
    colors: Colors,
    rows: Vec<Vec<StyledChar>>,
    background_color: Option<Color>,
}

impl VirtualTerminal {
    pub(crate) fn new(dimensions: WindowSize) -> Self {
        let rows = vec![vec![StyledChar::default(); dimensions.columns as usize]; dimensions.rows as usize];
        Self { row: 0, column: 0, colors: Default::default(), rows, background_color: None }
    }

    pub(crate) fn into_contents(self) -> TerminalGrid {
        TerminalGrid { rows: self.rows, background_color: self.background_color }
    }

    fn current_cell_mut(&mut self) -> Option<&mut StyledChar> {
        self.rows.get_mut(self.row as usize).and_then(|row| row.get_mut(self.column as usize))
    }

    fn move_to(&mut self, column: u16, row: u16) {
        self.column = column;
        self.row = row;
    }

    fn move_to_next_line(&mut self) {
        self.row += 1;
        self.column = 0;
    }

    fn print_text(&mut self, content: &str, style: &TextStyle) {
        let style = style.merged(&TextStyle::colored(self.colors));
        for c in content.chars() {
            let width = c.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if let Some(cell) = self.current_cell_mut() {
                cell.character = c;
                cell.style = style;
            }
            self.column = self.column.saturating_add(width);
        }
    }

    fn clear_screen(&mut self) {
        let style = TextStyle::colored(self.colors);
        for row in &mut self.rows {
            for cell in row {
                *cell = StyledChar { character: ' ', style };
            }
        }
        self.background_color = self.colors.background;
    }
}

impl TerminalIo for VirtualTerminal {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError> {
        use TerminalCommand::*;
        match command {
            BeginUpdate | EndUpdate | Flush => (),
            MoveTo { column, row } => self.move_to(*column, *row),
            MoveToRow(row) => self.row = *row,
            MoveToColumn(column) => self.column = *column,
            MoveDown(amount) => self.row = self.row.saturating_add(*amount),
            MoveToNextLine => self.move_to_next_line(),
            PrintText { content, style } => self.print_text(content, style),
            ClearScreen => self.clear_screen(),
            SetColors(colors) => self.colors = *colors,
            SetBackgroundColor(color) => self.colors.background = Some(*color),
        };
        Ok(())
    }

    fn cursor_row(&self) -> u16 {
        self.row
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StyledChar {
    pub(crate) character: char,
    pub(crate) style: TextStyle,
}

impl Default for StyledChar {
    fn default() -> Self {
        Self { character: ' ', style: Default::default() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn print(term: &mut VirtualTerminal, content: &str) {
        term.execute(&TerminalCommand::PrintText { content, style: Default::default() }).expect("print failed");
    }

    #[test]
    fn text() {
        let mut term = VirtualTerminal::new(WindowSize { rows: 2, columns: 3 });
        for c in "abc".chars() {
            print(&mut term, &c.to_string());
        }
        term.execute(&TerminalCommand::MoveToNextLine).unwrap();
        print(&mut term, "A");
        let grid = term.into_contents();
        assert_eq!(grid.lines(), &["abc", "A"]);
    }

    #[test]
    fn movement() {
        let mut term = VirtualTerminal::new(WindowSize { rows: 2, columns: 3 });
        print(&mut term, "A");
        term.execute(&TerminalCommand::MoveDown(1)).unwrap();
        print(&mut term, "B");
        term.execute(&TerminalCommand::MoveTo { column: 2, row: 0 }).unwrap();
        print(&mut term, "C");
        term.execute(&TerminalCommand::MoveToRow(1)).unwrap();
        term.execute(&TerminalCommand::MoveToColumn(2)).unwrap();
        print(&mut term, "D");

        let grid = term.into_contents();
        assert_eq!(grid.lines(), &["A C", " BD"]);
    }

    #[test]
    fn overflow_is_clipped() {
        let mut term = VirtualTerminal::new(WindowSize { rows: 1, columns: 3 });
        print(&mut term, "abcdef");
        term.execute(&TerminalCommand::MoveToNextLine).unwrap();
        print(&mut term, "ghi");
        assert_eq!(term.into_contents().lines(), &["abc"]);
    }

    #[test]
    fn clear_screen_applies_background() {
        let mut term = VirtualTerminal::new(WindowSize { rows: 1, columns: 2 });
        let colors = Colors::new(Color::White, Color::new(9, 9, 11));
        term.execute(&TerminalCommand::SetColors(colors)).unwrap();
        term.execute(&TerminalCommand::ClearScreen).unwrap();
        let grid = term.into_contents();
        assert_eq!(grid.background_color, Some(Color::new(9, 9, 11)));
        assert_eq!(grid.rows[0][1].style.colors, colors);
    }

    #[test]
    fn find_text() {
        let mut term = VirtualTerminal::new(WindowSize { rows: 2, columns: 10 });
        term.execute(&TerminalCommand::MoveTo { column: 4, row: 1 }).unwrap();
        print(&mut term, "[›]");
        let grid = term.into_contents();
        assert_eq!(grid.find("[›]"), Some((4, 1)));
        assert_eq!(grid.find("[‹]"), None);
    }
}
