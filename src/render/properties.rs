use crossterm::terminal;
use std::io;

/// The size of the terminal window, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub columns: u16,
}

impl WindowSize {
    /// Get the current window size.
    pub fn current() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self { rows, columns })
    }

    /// Shrink a window by the given number of rows.
    pub(crate) fn shrink_rows(&self, amount: u16) -> WindowSize {
        Self { rows: self.rows.saturating_sub(amount), columns: self.columns }
    }

    /// Shrink a window by the given number of columns.
    pub(crate) fn shrink_columns(&self, amount: u16) -> WindowSize {
        Self { rows: self.rows, columns: self.columns.saturating_sub(amount) }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shrinking_saturates() {
        let size = WindowSize { rows: 10, columns: 20 };
        assert_eq!(size.shrink_rows(3), WindowSize { rows: 7, columns: 20 });
        assert_eq!(size.shrink_columns(25), WindowSize { rows: 10, columns: 0 });
    }
}
