use crate::{
    render::{
        operation::{AsRenderOperations, RenderOperation},
        properties::WindowSize,
    },
    text::{
        style::{Color, TextStyle},
        Text,
    },
    theme::Alignment,
};
use std::rc::Rc;

/// A horizontal line that spans the entire width of the area it's drawn in.
#[derive(Clone, Debug)]
pub(crate) struct RenderSeparator {
    character: &'static str,
    color: Color,
}

impl RenderSeparator {
    pub(crate) fn new(character: &'static str, color: Color) -> Self {
        Self { character, color }
    }
}

impl From<RenderSeparator> for RenderOperation {
    fn from(separator: RenderSeparator) -> Self {
        Self::RenderDynamic(Rc::new(separator))
    }
}

impl AsRenderOperations for RenderSeparator {
    fn as_render_operations(&self, dimensions: &WindowSize) -> Vec<RenderOperation> {
        let separator = self.character.repeat(dimensions.columns as usize);
        let line = Text::new(separator, TextStyle::default().fg_color(self.color));
        vec![RenderOperation::RenderText { line: line.into(), alignment: Alignment::default() }]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{render::engine::RenderEngine, terminal::virt::VirtualTerminal};

    #[test]
    fn spans_entire_width() {
        let dimensions = WindowSize { rows: 2, columns: 7 };
        let color = Color::new(1, 2, 3);
        let operations = [RenderSeparator::new("─", color).into()];
        let mut terminal = VirtualTerminal::new(dimensions);
        let engine = RenderEngine::new(&mut terminal, dimensions, Default::default());
        engine.render(operations.iter()).expect("render failed");

        let grid = terminal.into_contents();
        assert_eq!(grid.lines(), &["───────", ""]);
        assert_eq!(grid.rows[0][6].style.colors.foreground, Some(color));
    }
}
