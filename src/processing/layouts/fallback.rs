use crate::{
    catalog::Slide,
    processing::builder::{left, SlideBuilder},
    text::Text,
};

/// Draws any slide whose layout isn't known.
///
/// The description takes precedence over the content when both are set.
pub(crate) fn build(slide: &Slide, builder: &mut SlideBuilder) {
    let theme = builder.theme;
    let alignment = left();
    if let Some(title) = slide.title {
        builder.push_title(title, &alignment);
    }
    if let Some(headline) = slide.headline {
        builder.push_subtitle(headline, &alignment);
    }
    if let Some(body) = slide.description.or(slide.content) {
        builder.push_line_break();
        builder.push_body(body, &alignment);
    }
    if let Some(stat) = slide.stat {
        builder.push_line_break();
        builder.push_line(Text::new(stat, theme.fg(theme.accent).bold()), &alignment);
        if let Some(label) = slide.stat_label {
            builder.push_styled(label, theme.fg(theme.muted), &alignment);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{catalog::Catalog, processing::layouts::test_utils::render_slide};

    #[test]
    fn stat_block() {
        let slide = Catalog::homevisor().get(3).expect("no problem slide");
        let grid = render_slide(slide);
        let lines = grid.lines();
        let expected = [
            "Problem #2: Financial Trap",
            "Failures happen on random Tuesdays.",
            "",
            "Roofs and HVACs don't fail on spreadsheets. Homeowners lack a predictable cash flow model.",
            "",
            "$8–20k",
            "Unexpected events with 0 days notice",
        ];
        assert_eq!(lines[..expected.len()], expected);
    }

    #[test]
    fn stat_label_needs_stat() {
        let slide = Slide { id: "x", layout: "?", title: Some("Title"), stat_label: Some("label"), ..Slide::EMPTY };
        let grid = render_slide(&slide);
        assert!(!grid.contains("label"));
    }
}
