use crate::{render::properties::WindowSize, theme::Alignment};

/// Computes where a piece of text starts and how wide it can get.
///
/// The chrome's hit testing goes through this same type so what is clickable always matches what
/// was drawn.
#[derive(Debug)]
pub(crate) struct Layout {
    alignment: Alignment,
    start_column_offset: u16,
}

impl Layout {
    pub(crate) fn new(alignment: Alignment) -> Self {
        Self { alignment, start_column_offset: 0 }
    }

    pub(crate) fn with_start_column(mut self, column: u16) -> Self {
        self.start_column_offset = column;
        self
    }

    pub(crate) fn compute(&self, dimensions: &WindowSize, text_length: u16) -> Positioning {
        let columns = dimensions.columns;
        let (start_column, max_line_length) = match &self.alignment {
            Alignment::Left { margin } => {
                // A margin that can't fit on both sides is ignored altogether.
                let margin = Self::usable_margin(columns, margin.as_characters(columns), 0);
                (margin, columns - margin * 2)
            }
            Alignment::Right { margin } => {
                let margin = Self::usable_margin(columns, margin.as_characters(columns), 0);
                let start = columns.saturating_sub(margin).saturating_sub(text_length).max(margin);
                (start, columns - margin - start)
            }
            Alignment::Center { minimum_margin, minimum_size } => {
                let minimum_size = columns.min(*minimum_size);
                let minimum_margin = Self::usable_margin(columns, minimum_margin.as_characters(columns), minimum_size);
                let max_line_length = text_length.min(columns - minimum_margin * 2).max(minimum_size);
                let start = ((columns - max_line_length) / 2).max(minimum_margin);
                (start, max_line_length)
            }
        };
        Positioning { max_line_length, start_column: start_column + self.start_column_offset }
    }

    fn usable_margin(columns: u16, margin: u16, reserved: u16) -> u16 {
        if margin.saturating_mul(2).saturating_add(reserved) > columns { 0 } else { margin }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Positioning {
    pub(crate) max_line_length: u16,
    pub(crate) start_column: u16,
}
