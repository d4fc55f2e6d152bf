use crate::{
    catalog::Slide,
    processing::builder::{left, SlideBuilder},
    text::{weighted::WeightedLine, Text},
};

/// A heading followed by one card per column, each with its icon.
pub(crate) fn build(slide: &Slide, builder: &mut SlideBuilder) {
    let theme = builder.theme;
    let alignment = left();
    match (slide.title, slide.headline) {
        (Some(title), Some(headline)) => {
            builder.push_label(title, &alignment);
            builder.push_title(headline, &alignment);
        }
        (Some(title), None) => builder.push_title(title, &alignment),
        (None, Some(headline)) => builder.push_title(headline, &alignment),
        (None, None) => (),
    };
    if let Some(description) = slide.description {
        builder.push_body(description, &alignment);
    }
    if slide.columns.is_empty() {
        return;
    }
    builder.push_line_break();
    builder.init_columns(slide.columns.len());
    for (index, column) in slide.columns.iter().enumerate() {
        builder.enter_column(index);
        let icon = Text::new(column.icon.glyph(), theme.fg(theme.accent).bold());
        let lines = vec![
            WeightedLine::from(icon),
            WeightedLine::default(),
            WeightedLine::from(Text::new(column.title, theme.fg(theme.title).bold())),
            WeightedLine::from(builder.colored(column.text, theme.body)),
        ];
        builder.push_card(lines, theme.accent);
    }
    builder.exit_columns();
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{catalog::Catalog, processing::layouts::test_utils::render_slide};

    #[test]
    fn one_card_per_column() {
        let slide = Catalog::homevisor().get(4).expect("no solution");
        let grid = render_slide(slide);
        let heading = ["The Solution", "Home Operating System", "One concierge, one interface, one financial brain."];
        assert_eq!(grid.lines()[..3], heading);

        let titles = ["Source of Truth", "Proactive Planning", "Managed Execution"];
        let positions: Vec<_> = titles.iter().map(|title| grid.find(title).expect("no column title")).collect();
        assert!(positions.windows(2).all(|pair| pair[0].0 < pair[1].0 && pair[0].1 == pair[1].1));

        let (column, row) = positions[0];
        let icon_row = &grid.rows[row as usize - 2];
        assert_eq!(icon_row[column as usize].character, '∿');
    }

    #[test]
    fn title_only() {
        let slide = Catalog::homevisor().get(9).expect("no streams");
        let grid = render_slide(slide);
        assert_eq!(grid.lines()[0], "Three Revenue Streams");
        assert!(grid.contains("30–40% take rate"));
    }
}
