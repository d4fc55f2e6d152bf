use crate::{
    catalog::Slide,
    processing::builder::{left, SlideBuilder},
    render::operation::RenderOperation,
    text::{style::TextStyle, weighted::WeightedLine, Text},
    theme::Alignment,
    ui::separator::RenderSeparator,
};

// The width of each of the table's columns, in units.
const COLUMN_WIDTHS: [u8; 3] = [2, 3, 4];
const HEADER: [&str; 3] = ["Dimension", "Legacy Platforms", "HomeVisor"];
const BADGE_ROW: usize = 1;

/// A comparison between legacy platforms and HomeVisor, one dimension per row.
///
/// Every row is laid out as a set of columns so that cells that wrap push the next row down.
pub(crate) fn build(slide: &Slide, builder: &mut SlideBuilder) {
    let theme = builder.theme;
    let center = Alignment::center();
    if let Some(title) = slide.title {
        builder.push_title(title, &center);
    }
    if let Some(headline) = slide.headline {
        builder.push_styled(headline, theme.fg(theme.muted), &center);
    }
    if slide.table.is_empty() {
        return;
    }
    builder.push_line_break();

    let header_style = theme.fg(theme.muted).bold();
    let header = [
        Text::new(HEADER[0], header_style),
        Text::new(HEADER[1], header_style),
        Text::new(HEADER[2], theme.fg(theme.accent).bold()),
    ];
    push_row(builder, header.map(WeightedLine::from));
    for (index, row) in slide.table.iter().enumerate() {
        builder.push_operation(RenderSeparator::new("─", theme.track));
        builder.push_line_break();

        let mut highlighted = WeightedLine::from(Text::new(row.hv, theme.fg(theme.title).bold()));
        if index == BADGE_ROW {
            highlighted.push(Text::from("  "));
            highlighted.push(Text::new(" Managed ", TextStyle::colored(theme.badge)));
        }
        let cells = [
            builder.colored(row.feature, theme.body).into(),
            builder.colored(row.legacy, theme.muted).into(),
            highlighted,
        ];
        push_row(builder, cells);
    }
}

fn push_row(builder: &mut SlideBuilder, cells: [WeightedLine; 3]) {
    let alignment = left();
    builder.push_operation(RenderOperation::InitColumnLayout { columns: COLUMN_WIDTHS.to_vec() });
    for (column, cell) in cells.into_iter().enumerate() {
        builder.enter_column(column);
        builder.push_operation(RenderOperation::RenderText { line: cell, alignment: alignment.clone() });
    }
    builder.exit_columns();
    builder.push_line_break();
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        catalog::Catalog,
        processing::layouts::test_utils::{dark_theme, render_slide},
    };

    #[test]
    fn header_and_rows_line_up() {
        let slide = Catalog::homevisor().get(7).expect("no comparison");
        let grid = render_slide(slide);
        let (dimension_column, header_row) = grid.find("Dimension").expect("no header");
        let (legacy_column, legacy_row) = grid.find("Legacy Platforms").expect("no header");
        assert_eq!(legacy_row, header_row);
        let header_line = &grid.lines()[header_row as usize];
        let homevisor_column = header_line.find("HomeVisor").expect("no header") as u16;

        let (column, row) = grid.find("Delegator").expect("no cell");
        assert_eq!(column, homevisor_column);
        assert_eq!(row, header_row + 2);
        assert_eq!(grid.find("DIY Manager"), Some((legacy_column, row)));
        assert_eq!(grid.find("User Role"), Some((dimension_column, row)));
        assert!(grid.lines()[row as usize - 1].starts_with("───"));
    }

    #[test]
    fn centered_heading() {
        let slide = Catalog::homevisor().get(7).expect("no comparison");
        let grid = render_slide(slide);
        let theme = dark_theme();
        let (title_column, title_row) = grid.find("Why HomeVisor Wins").expect("no title");
        let (headline_column, headline_row) = grid.find("Category-Defining Position").expect("no headline");
        assert_eq!(headline_row, title_row + 1);
        let (_, header_row) = grid.find("Dimension").expect("no header");
        assert!(header_row > headline_row);

        // Centered text leaves the same gap on both sides, give or take a cell.
        let width = grid.rows[0].len();
        let is_centered = |column: u16, text: &str| {
            let right_gap = width - column as usize - text.len();
            (column as usize).abs_diff(right_gap) <= 1
        };
        assert!(is_centered(title_column, "Why HomeVisor Wins"));
        assert!(is_centered(headline_column, "Category-Defining Position"));

        let color_at = |column: u16, row: u16| grid.rows[row as usize][column as usize].style.colors.foreground;
        assert_eq!(color_at(title_column, title_row), Some(theme.title));
        assert_eq!(color_at(headline_column, headline_row), Some(theme.muted));
    }

    #[test]
    fn second_row_is_badged() {
        let slide = Catalog::homevisor().get(7).expect("no comparison");
        let grid = render_slide(slide);
        let theme = dark_theme();
        let (_, model_row) = grid.find("Lead Directory").expect("no row");
        let badged_rows: Vec<_> = grid
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|c| c.style.colors == theme.badge))
            .map(|(index, _)| index as u16)
            .collect();
        assert_eq!(badged_rows, &[model_row]);
        assert!(grid.lines()[model_row as usize].ends_with("Managed Service + Marketplace   Managed"));
    }
}
