use crate::{
    catalog::Slide,
    processing::builder::{card_line, left, SlideBuilder},
    render::{
        operation::{AsRenderOperations, RenderOperation},
        properties::WindowSize,
    },
    text::{
        style::{Color, TextStyle},
        weighted::WeightedLine,
        Text,
    },
    theme::DeckTheme,
};
use std::rc::Rc;

// The columns taken by the card's edge plus the space left on its right side.
const CARD_PADDING: u16 = 4;

/// The pitch on the left and a mock of the product's dashboard on the right.
pub(crate) fn build(slide: &Slide, builder: &mut SlideBuilder) {
    let theme = builder.theme;
    let alignment = left();
    builder.init_columns(2);
    builder.enter_column(0);
    if let Some(title) = slide.title {
        builder.push_title(title, &alignment);
    }
    if let Some(headline) = slide.headline {
        builder.push_styled(headline, theme.fg(theme.accent), &alignment);
    }
    if let Some(content) = slide.content {
        builder.push_line_break();
        builder.push_styled(content, theme.fg(theme.muted), &alignment);
    }
    if !slide.features.is_empty() {
        builder.push_line_break();
        for (index, feature) in slide.features.iter().enumerate() {
            let number = Text::new(format!("{:02}  ", index + 1), theme.fg(theme.accent).bold());
            builder.push_line(vec![number, builder.colored(*feature, theme.item)], &alignment);
        }
    }

    builder.enter_column(1);
    push_mock_dashboard(builder, theme);
    builder.exit_columns();
}

fn push_mock_dashboard(builder: &mut SlideBuilder, theme: &DeckTheme) {
    let edge = theme.accent;
    let metrics = [
        ("Total Asset Value", "$450,200", 75, theme.positive),
        ("Maintenance Fund", "$12,450", 50, theme.accent),
    ];
    builder.push_card_row(WeightedLine::default(), edge);
    for (label, value, percent, color) in metrics {
        builder.push_card_row(builder.colored(label, theme.muted).into(), edge);
        builder.push_card_row(Text::new(value, theme.fg(theme.title).bold()).into(), edge);
        builder.push_operation(ProgressBar { percent, fill: color, track: theme.track, edge, card: theme.card });
        builder.push_card_row(WeightedLine::default(), edge);
    }
    // Placeholder status rows, the first one flagging a problem.
    for index in 0..3 {
        let status = if index == 0 { theme.negative } else { theme.positive };
        let line = vec![
            builder.colored("●  ", status),
            builder.colored("━━━━━━━━━━━━━━━━", theme.track),
            Text::from("    "),
            builder.colored("━━━━━━━━", theme.track),
        ];
        builder.push_card_row(line.into(), edge);
    }
    builder.push_card_row(WeightedLine::default(), edge);
}

/// A bar within a card that's filled up to a percentage of the card's width.
#[derive(Clone, Debug)]
pub(crate) struct ProgressBar {
    percent: u16,
    fill: Color,
    track: Color,
    edge: Color,
    card: Color,
}

impl From<ProgressBar> for RenderOperation {
    fn from(bar: ProgressBar) -> Self {
        Self::RenderDynamic(Rc::new(bar))
    }
}

impl AsRenderOperations for ProgressBar {
    fn as_render_operations(&self, dimensions: &WindowSize) -> Vec<RenderOperation> {
        let width = dimensions.columns.saturating_sub(CARD_PADDING);
        let filled = (u32::from(width) * u32::from(self.percent.min(100)) / 100) as u16;
        let line = WeightedLine::from(vec![
            Text::new("━".repeat(filled as usize), TextStyle::default().fg_color(self.fill)),
            Text::new("━".repeat((width - filled) as usize), TextStyle::default().fg_color(self.track)),
        ]);
        vec![RenderOperation::RenderBlockLine(card_line(line, self.edge, self.card)), RenderOperation::RenderLineBreak]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        catalog::Catalog,
        processing::layouts::test_utils::{dark_theme, render_slide},
        render::engine::RenderEngine,
        terminal::virt::VirtualTerminal,
    };
    use rstest::rstest;

    #[test]
    fn numbered_features() {
        let slide = Catalog::homevisor().get(5).expect("no proactive");
        let grid = render_slide(slide);
        let (_, first) = grid.find("01  Track Age & Lifespan").expect("no first feature");
        let (_, third) = grid.find("03  Smart Sinking Fund").expect("no third feature");
        assert_eq!(third, first + 2);
        assert!(grid.contains("From Surprise to Strategy"));
    }

    #[test]
    fn mock_dashboard() {
        let slide = Catalog::homevisor().get(5).expect("no proactive");
        let grid = render_slide(slide);
        let (total_column, total_row) = grid.find("Total Asset Value").expect("no total");
        assert_eq!(grid.find("$450,200"), Some((total_column, total_row + 1)));
        let (fund_column, fund_row) = grid.find("Maintenance Fund").expect("no fund");
        assert_eq!(fund_column, total_column);
        assert_eq!(grid.find("$12,450"), Some((fund_column, fund_row + 1)));

        let theme = dark_theme();
        let (column, row) = grid.find("●").expect("no status");
        assert_eq!(grid.rows[row as usize][column as usize].style.colors.foreground, Some(theme.negative));
        let next = &grid.rows[row as usize + 1][column as usize];
        assert_eq!(next.character, '●');
        assert_eq!(next.style.colors.foreground, Some(theme.positive));
    }

    #[test]
    fn heading_order() {
        let slide = Catalog::homevisor().get(5).expect("no proactive");
        let grid = render_slide(slide);
        let theme = dark_theme();
        let title = slide.title.expect("no title");
        let headline = slide.headline.expect("no headline");
        let (title_column, title_row) = grid.find(title).expect("no title");
        let (headline_column, headline_row) = grid.find(headline).expect("no headline");
        assert_eq!(headline_column, title_column);
        assert_eq!(headline_row, title_row + 1);
        let color_at = |column: u16, row: u16| grid.rows[row as usize][column as usize].style.colors.foreground;
        assert_eq!(color_at(title_column, title_row), Some(theme.title));
        assert_eq!(color_at(headline_column, headline_row), Some(theme.accent));
    }

    #[rstest]
    #[case::narrow(24, 15, 5)]
    #[case::wide(3000, 2247, 749)]
    fn bar_fills_percentage(#[case] columns: u16, #[case] filled: usize, #[case] track: usize) {
        let theme = dark_theme();
        let bar =
            ProgressBar { percent: 75, fill: theme.positive, track: theme.track, edge: theme.accent, card: theme.card };
        let dimensions = WindowSize { rows: 2, columns };
        let mut terminal = VirtualTerminal::new(dimensions);
        let engine = RenderEngine::new(&mut terminal, dimensions, Default::default());
        let operations: [RenderOperation; 1] = [bar.into()];
        engine.render(operations.iter()).expect("render failed");

        let grid = terminal.into_contents();
        let count = |color| {
            grid.rows[0].iter().filter(|c| c.character == '━' && c.style.colors.foreground == Some(color)).count()
        };
        assert_eq!(count(theme.positive), filled);
        assert_eq!(count(theme.track), track);
    }
}
