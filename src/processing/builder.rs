use super::layouts;
use crate::{
    catalog::Slide,
    deck::DeckState,
    render::{
        engine::measure_height,
        operation::{AsRenderOperations, BlockLine, MarginProperties, RenderOperation},
        properties::WindowSize,
    },
    text::{
        style::{Color, TextStyle},
        weighted::WeightedLine,
        Text,
    },
    theme::{Alignment, DeckTheme, Margin},
    ui::chrome::ChromeLayout,
};
use std::{iter, rc::Rc};
use strum::EnumString;

// The bar drawn along the left edge of every card.
const CARD_EDGE: &str = "▎ ";

/// The layout a slide is drawn with, as named by its layout tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString)]
pub(crate) enum SlideLayout {
    #[strum(serialize = "hero")]
    Hero,

    #[strum(serialize = "split")]
    Split,

    #[strum(serialize = "grid-problem")]
    GridProblem,

    #[strum(serialize = "columns-3")]
    Columns,

    #[strum(serialize = "visual-dashboard")]
    VisualDashboard,

    #[strum(serialize = "comparison-table")]
    ComparisonTable,

    #[strum(serialize = "timeline")]
    Timeline,

    #[strum(serialize = "split-graphic")]
    SplitGraphic,

    /// Used for any tag we don't know about.
    #[default]
    #[strum(disabled)]
    Default,
}

impl SlideLayout {
    /// Find the layout for a tag, falling back to the default one for unknown tags.
    pub(crate) fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

/// Build the operations that draw the body of a slide.
pub(crate) fn build_slide(slide: &Slide, theme: &DeckTheme) -> Vec<RenderOperation> {
    let mut builder = SlideBuilder::new(theme);
    match SlideLayout::from_tag(slide.layout) {
        SlideLayout::Hero => layouts::hero::build(slide, &mut builder),
        SlideLayout::Split => layouts::split::build(slide, &mut builder),
        SlideLayout::GridProblem => layouts::grid::build(slide, &mut builder),
        SlideLayout::Columns => layouts::columns::build(slide, &mut builder),
        SlideLayout::VisualDashboard => layouts::dashboard::build(slide, &mut builder),
        SlideLayout::ComparisonTable => layouts::table::build(slide, &mut builder),
        SlideLayout::Timeline => layouts::timeline::build(slide, &mut builder),
        SlideLayout::SplitGraphic => {
            // This is a dashboard where the points are the features and the description is the copy.
            let reshaped = Slide { features: slide.points, content: slide.description, ..*slide };
            layouts::dashboard::build(&reshaped, &mut builder)
        }
        SlideLayout::Default => layouts::fallback::build(slide, &mut builder),
    };
    builder.build()
}

/// Build every operation needed to draw a whole screen: the slide body plus the chrome around it.
pub(crate) fn build_frame(slide: &Slide, theme: &DeckTheme, deck: &DeckState) -> Vec<RenderOperation> {
    let body = build_slide(slide, theme);
    let margin = MarginProperties {
        horizontal: theme.horizontal_margin,
        top: theme.top_margin,
        bottom: theme.bottom_margin,
    };
    let mut operations = vec![
        RenderOperation::SetColors(theme.screen_colors()),
        RenderOperation::ClearScreen,
        RenderOperation::ApplyMargin(margin),
        VerticallyCentered(body).into(),
        RenderOperation::PopMargin,
    ];
    let chrome = ChromeLayout::new(deck);
    operations.extend(chrome.build(theme));
    operations
}

/// Accumulates the operations for a slide body.
pub(crate) struct SlideBuilder<'a> {
    pub(crate) theme: &'a DeckTheme,
    operations: Vec<RenderOperation>,
}

impl<'a> SlideBuilder<'a> {
    pub(crate) fn new(theme: &'a DeckTheme) -> Self {
        Self { theme, operations: Vec::new() }
    }

    /// Push a line of text and move to the next line.
    pub(crate) fn push_line<L: Into<WeightedLine>>(&mut self, line: L, alignment: &Alignment) {
        let line = line.into();
        if !line.is_empty() {
            self.operations.push(RenderOperation::RenderText { line, alignment: alignment.clone() });
        }
        self.push_line_break();
    }

    pub(crate) fn push_styled(&mut self, text: &str, style: TextStyle, alignment: &Alignment) {
        self.push_line(Text::new(text, style), alignment);
    }

    /// Push a slide title.
    pub(crate) fn push_title(&mut self, title: &str, alignment: &Alignment) {
        let style = self.theme.fg(self.theme.title).bold();
        self.push_styled(title, style, alignment);
    }

    /// Push a small label on top of a title.
    pub(crate) fn push_label(&mut self, label: &str, alignment: &Alignment) {
        let style = self.theme.fg(self.theme.accent).bold();
        self.push_styled(label, style, alignment);
    }

    pub(crate) fn push_subtitle(&mut self, subtitle: &str, alignment: &Alignment) {
        self.push_styled(subtitle, self.theme.fg(self.theme.subtitle), alignment);
    }

    pub(crate) fn push_body(&mut self, body: &str, alignment: &Alignment) {
        self.push_styled(body, self.theme.fg(self.theme.body), alignment);
    }

    pub(crate) fn push_line_break(&mut self) {
        self.operations.push(RenderOperation::RenderLineBreak);
    }

    /// Push a card: a block filled with the card color that spans the entire width it's drawn in.
    pub(crate) fn push_card(&mut self, lines: Vec<WeightedLine>, edge: Color) {
        self.push_card_row(WeightedLine::default(), edge);
        for line in lines {
            self.push_card_row(line, edge);
        }
        self.push_card_row(WeightedLine::default(), edge);
    }

    /// Push a single row within a card.
    pub(crate) fn push_card_row(&mut self, text: WeightedLine, edge: Color) {
        self.operations.push(RenderOperation::RenderBlockLine(card_line(text, edge, self.theme.card)));
        self.push_line_break();
    }

    pub(crate) fn push_operation<O: Into<RenderOperation>>(&mut self, operation: O) {
        self.operations.push(operation.into());
    }

    /// Lay the next operations out in `count` columns of the same width.
    pub(crate) fn init_columns(&mut self, count: usize) {
        self.operations.push(RenderOperation::InitColumnLayout { columns: vec![1; count] });
    }

    pub(crate) fn enter_column(&mut self, column: usize) {
        self.operations.push(RenderOperation::EnterColumn { column });
    }

    pub(crate) fn exit_columns(&mut self) {
        self.operations.push(RenderOperation::ExitLayout);
    }

    /// A chunk of text with the given foreground color.
    pub(crate) fn colored(&self, text: impl Into<String>, color: Color) -> Text {
        Text::new(text, self.theme.fg(color))
    }

    pub(crate) fn build(mut self) -> Vec<RenderOperation> {
        // Trailing line breaks would push the content up when it gets centered.
        while matches!(self.operations.last(), Some(RenderOperation::RenderLineBreak)) {
            self.operations.pop();
        }
        self.operations
    }
}

/// Left alignment with no margin, which is what most slide elements use.
pub(crate) fn left() -> Alignment {
    Alignment::Left { margin: Margin::Fixed(0) }
}

/// A line within a card that fills the entire width available to it.
pub(crate) fn card_line(text: WeightedLine, edge: Color, card: Color) -> BlockLine {
    BlockLine {
        prefix: Text::new(CARD_EDGE, TextStyle::default().fg_color(edge)),
        text,
        block_length: u16::MAX,
        block_color: Some(card),
        alignment: left(),
    }
}

/// Draws a sequence of operations centered vertically in the area they're drawn in.
#[derive(Debug)]
pub(crate) struct VerticallyCentered(pub(crate) Vec<RenderOperation>);

impl From<VerticallyCentered> for RenderOperation {
    fn from(centered: VerticallyCentered) -> Self {
        Self::RenderDynamic(Rc::new(centered))
    }
}

impl AsRenderOperations for VerticallyCentered {
    fn as_render_operations(&self, dimensions: &WindowSize) -> Vec<RenderOperation> {
        let height = match measure_height(&self.0, *dimensions) {
            Ok(height) => height,
            Err(e) => {
                tracing::debug!("could not measure slide body: {e}");
                dimensions.rows
            }
        };
        let index = dimensions.rows.saturating_sub(height) / 2;
        iter::once(RenderOperation::JumpToRow { index }).chain(self.0.iter().cloned()).collect()
    }
}
