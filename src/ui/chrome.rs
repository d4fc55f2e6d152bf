//! The fixed UI drawn around every slide.
//!
//! The header mark and the theme toggle sit on the top row, the progress dots, the slide counter
//! and the navigation chevrons on the bottom one. Everything here is described as a list of
//! segments so drawing it and figuring out what a click landed on use the exact same geometry.

use crate::{
    deck::DeckState,
    render::{
        engine::drawable_area,
        layout::{Layout, Positioning},
        operation::RenderOperation,
        properties::WindowSize,
    },
    text::{style::TextStyle, weighted::WeightedLine, Text},
    theme::{Alignment, DeckTheme, Margin},
};
use unicode_width::UnicodeWidthStr;

// The distance between the chrome and the left and right edges of the screen.
const EDGE_MARGIN: u16 = 2;

// The distance between the chrome rows and the top and bottom edges of the screen.
const EDGE_ROW: u16 = 1;

const ACTIVE_DOT: &str = "━━━━";
const INACTIVE_DOT: &str = "━━";

/// A clickable region of the chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Hotspot {
    ToggleTheme,
    Previous,
    Next,
    Dot(usize),
}

/// The chrome for a specific position in the deck.
#[derive(Clone, Debug)]
pub(crate) struct ChromeLayout {
    deck: DeckState,
}

impl ChromeLayout {
    pub(crate) fn new(deck: &DeckState) -> Self {
        Self { deck: deck.clone() }
    }

    /// Build the operations that draw the chrome over the entire screen.
    pub(crate) fn build(&self, theme: &DeckTheme) -> Vec<RenderOperation> {
        let mut operations = Vec::new();
        for group in self.groups() {
            let jump = match group.row {
                ChromeRow::Top => RenderOperation::JumpToRow { index: EDGE_ROW },
                ChromeRow::Bottom => RenderOperation::JumpToBottomRow { index: EDGE_ROW },
            };
            let line: WeightedLine = group
                .segments
                .into_iter()
                .map(|segment| Text::new(segment.text, segment.paint.style(theme)))
                .collect::<Vec<_>>()
                .into();
            operations.extend([jump, RenderOperation::RenderText { line, alignment: group.alignment }]);
        }
        operations
    }

    /// Find the hotspot at a screen position, if any.
    pub(crate) fn hit(&self, dimensions: WindowSize, max_columns: u16, column: u16, row: u16) -> Option<Hotspot> {
        let (start_column, area) = drawable_area(dimensions, max_columns);
        let row = match row {
            row if row == EDGE_ROW => ChromeRow::Top,
            row if row == area.rows.saturating_sub(EDGE_ROW + 1) => ChromeRow::Bottom,
            _ => return None,
        };
        for group in self.groups().into_iter().filter(|group| group.row == row) {
            let width = group.segments.iter().map(|segment| segment.text.width() as u16).sum();
            let layout = Layout::new(group.alignment).with_start_column(start_column);
            let Positioning { start_column: mut segment_start, .. } = layout.compute(&area, width);
            for segment in &group.segments {
                let segment_end = segment_start + segment.text.width() as u16;
                if (segment_start..segment_end).contains(&column) {
                    return segment.hotspot;
                }
                segment_start = segment_end;
            }
        }
        None
    }

    fn groups(&self) -> Vec<Group> {
        let left = Alignment::Left { margin: Margin::Fixed(EDGE_MARGIN) };
        let right = Alignment::Right { margin: Margin::Fixed(EDGE_MARGIN) };
        let toggle = match self.deck.is_dark() {
            true => "[☀]",
            false => "[☾]",
        };
        let header = Group {
            row: ChromeRow::Top,
            alignment: left.clone(),
            segments: vec![Segment::new("⌂ ", Paint::Accent), Segment::new("HomeVisor", Paint::Title)],
        };
        let toggle = Group {
            row: ChromeRow::Top,
            alignment: right.clone(),
            segments: vec![Segment::new(toggle, Paint::Title).with_hotspot(Hotspot::ToggleTheme)],
        };

        let mut dots = Vec::new();
        for index in 0..self.deck.slide_count() {
            if index > 0 {
                dots.push(Segment::new(" ", Paint::Muted));
            }
            let dot = match index == self.deck.current_index() {
                true => Segment::new(ACTIVE_DOT, Paint::ActiveDot),
                false => Segment::new(INACTIVE_DOT, Paint::InactiveDot),
            };
            dots.push(dot.with_hotspot(Hotspot::Dot(index)));
        }
        let dots = Group { row: ChromeRow::Bottom, alignment: left, segments: dots };

        let controls = Group {
            row: ChromeRow::Bottom,
            alignment: right,
            segments: vec![
                Segment::new(self.deck.counter_label(), Paint::Muted),
                Segment::new("   ", Paint::Muted),
                Segment::new("[‹]", Paint::Title).with_hotspot(Hotspot::Previous),
                Segment::new(" ", Paint::Muted),
                Segment::new("[›]", Paint::Title).with_hotspot(Hotspot::Next),
            ],
        };
        vec![header, toggle, dots, controls]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChromeRow {
    Top,
    Bottom,
}

struct Group {
    row: ChromeRow,
    alignment: Alignment,
    segments: Vec<Segment>,
}

struct Segment {
    text: String,
    paint: Paint,
    hotspot: Option<Hotspot>,
}

impl Segment {
    fn new<S: Into<String>>(text: S, paint: Paint) -> Self {
        Self { text: text.into(), paint, hotspot: None }
    }

    fn with_hotspot(mut self, hotspot: Hotspot) -> Self {
        self.hotspot = Some(hotspot);
        self
    }
}

#[derive(Clone, Copy)]
enum Paint {
    Accent,
    Title,
    Muted,
    ActiveDot,
    InactiveDot,
}

impl Paint {
    fn style(&self, theme: &DeckTheme) -> TextStyle {
        match self {
            Self::Accent => theme.fg(theme.accent).bold(),
            Self::Title => theme.fg(theme.title).bold(),
            Self::Muted => theme.fg(theme.muted),
            Self::ActiveDot => theme.fg(theme.dot_active),
            Self::InactiveDot => theme.fg(theme.dot_inactive),
        }
    }
}
