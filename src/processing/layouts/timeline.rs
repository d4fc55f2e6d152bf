use crate::{
    catalog::Slide,
    processing::builder::SlideBuilder,
    text::{style::TextStyle, weighted::WeightedLine, Text},
    theme::Alignment,
    ui::separator::RenderSeparator,
};

/// The roadmap: a connector line with one card per phase hanging from it.
pub(crate) fn build(slide: &Slide, builder: &mut SlideBuilder) {
    let theme = builder.theme;
    if let Some(title) = slide.title {
        builder.push_title(title, &Alignment::center());
    }
    if slide.steps.is_empty() {
        return;
    }
    builder.push_line_break();
    builder.push_operation(RenderSeparator::new("━", theme.track));
    builder.push_line_break();
    builder.init_columns(slide.steps.len());
    for (index, step) in slide.steps.iter().enumerate() {
        builder.enter_column(index);
        let lines = vec![
            WeightedLine::from(Text::new(format!(" {} ", step.time), TextStyle::colored(theme.badge))),
            WeightedLine::default(),
            WeightedLine::from(Text::new(step.title, theme.fg(theme.title).bold())),
            WeightedLine::from(builder.colored(step.description, theme.body)),
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
    fn steps_side_by_side() {
        let slide = Catalog::homevisor().get(10).expect("no roadmap");
        let grid = render_slide(slide);
        let (_, title_row) = grid.find("Roadmap").expect("no title");
        assert!(grid.lines()[title_row as usize + 2].starts_with("━━━━"));

        let phases = ["Phase 1 (Xmas)", "Phase 2 (Launch)", "Phase 3 (Scale)"];
        let positions: Vec<_> = phases.iter().map(|phase| grid.find(phase).expect("no phase")).collect();
        assert!(positions.windows(2).all(|pair| pair[0].0 < pair[1].0 && pair[0].1 == pair[1].1));
        assert_eq!(positions[0].1, title_row + 4);
        assert!(grid.contains("National"));
    }

    #[test]
    fn title_is_centered() {
        let slide = Slide { id: "x", layout: "timeline", title: Some("Roadmap"), ..Slide::EMPTY };
        let grid = render_slide(&slide);
        assert_eq!(grid.find("Roadmap"), Some((56, 0)));
    }
}
