use crate::{
    catalog::{ComparisonSide, Slide},
    processing::builder::{left, SlideBuilder},
    text::{style::Color, weighted::WeightedLine},
};

/// A problem statement followed by a side by side before and after comparison.
pub(crate) fn build(slide: &Slide, builder: &mut SlideBuilder) {
    let theme = builder.theme;
    let alignment = left();
    if let Some(title) = slide.title {
        builder.push_label(title, &alignment);
    }
    if let Some(headline) = slide.headline {
        builder.push_title(headline, &alignment);
    }
    if let Some(description) = slide.description {
        builder.push_line_break();
        builder.push_body(description, &alignment);
    }
    let Some(comparison) = slide.comparison else {
        return;
    };
    builder.push_line_break();
    builder.init_columns(2);
    builder.enter_column(0);
    push_side(builder, &comparison.left, "✗", theme.negative, theme.muted);
    builder.enter_column(1);
    push_side(builder, &comparison.right, "✓", theme.accent, theme.accent);
    builder.exit_columns();
}

fn push_side(builder: &mut SlideBuilder, side: &ComparisonSide, marker: &str, marker_color: Color, edge: Color) {
    let theme = builder.theme;
    let mut lines = vec![WeightedLine::from(builder.colored(side.label, edge)), WeightedLine::default()];
    for item in side.items {
        lines.push(WeightedLine::from(vec![
            builder.colored(format!("{marker} "), marker_color),
            builder.colored(*item, theme.item),
        ]));
    }
    builder.push_card(lines, edge);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        catalog::Catalog,
        processing::layouts::test_utils::{dark_theme, render_slide},
    };

    #[test]
    fn sides_are_marked() {
        let slide = Catalog::homevisor().get(2).expect("no problem slide");
        let grid = render_slide(slide);
        let theme = dark_theme();

        let (column, row) = grid.find("✗ 12+ Vendors (SMS/Email)").expect("no left item");
        assert_eq!(grid.rows[row as usize][column as usize].style.colors.foreground, Some(theme.negative));
        let (column, row) = grid.find("✓ One Concierge").expect("no right item");
        assert_eq!(grid.rows[row as usize][column as usize].style.colors.foreground, Some(theme.accent));

        let (today_column, today_row) = grid.find("Today").expect("no label");
        let (with_column, with_row) = grid.find("With HomeVisor").expect("no label");
        assert_eq!(today_row, with_row);
        assert!(today_column < with_column);
    }

    #[test]
    fn without_comparison() {
        let slide = Slide {
            id: "x",
            layout: "grid-problem",
            title: Some("Label"),
            headline: Some("Headline"),
            ..Slide::EMPTY
        };
        let grid = render_slide(&slide);
        assert_eq!(grid.lines()[..2], ["Label", "Headline"]);
        assert!(!grid.contains("▎"));
    }
}
