use crate::{
    catalog::Slide,
    processing::builder::{left, SlideBuilder},
    text::weighted::WeightedLine,
};

/// The problem statement on the left and the pain points in a card on the right.
pub(crate) fn build(slide: &Slide, builder: &mut SlideBuilder) {
    let theme = builder.theme;
    let alignment = left();
    builder.init_columns(2);
    builder.enter_column(0);
    if let Some(title) = slide.title {
        builder.push_title(title, &alignment);
    }
    if let Some(subtitle) = slide.subtitle {
        builder.push_line_break();
        builder.push_subtitle(subtitle, &alignment);
    }
    if let Some(highlight) = slide.highlight {
        builder.push_line_break();
        let line = vec![builder.colored("┃ ", theme.accent), builder.colored(highlight, theme.accent)];
        builder.push_line(line, &alignment);
    }

    builder.enter_column(1);
    if !slide.points.is_empty() {
        let mut lines = Vec::new();
        for (index, point) in slide.points.iter().enumerate() {
            if index > 0 {
                lines.push(WeightedLine::default());
            }
            lines.push(WeightedLine::from(vec![
                builder.colored("⚠  ", theme.negative),
                builder.colored(*point, theme.item),
            ]));
        }
        builder.push_card(lines, theme.negative);
    }
    builder.exit_columns();
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{catalog::Catalog, processing::layouts::test_utils::render_slide};

    #[test]
    fn points_are_to_the_right() {
        let slide = Catalog::homevisor().get(1).expect("no challenge");
        let grid = render_slide(slide);
        let (title_column, title_row) = grid.find("The Challenge").expect("no title");
        let (point_column, point_row) = grid.find("⚠  No single source of truth").expect("no point");
        assert!(point_column > title_column);
        assert_eq!(point_row, title_row + 1);
        assert!(grid.contains("Discovery calls sound the same: frustration."));
        assert!(grid.contains("┃ HomeVisor gives every homeowner"));
    }
}
