use crate::{
    catalog::Slide,
    processing::builder::SlideBuilder,
    text::{
        style::{Colors, TextStyle},
        weighted::WeightedLine,
        Text,
    },
    theme::{Alignment, Margin},
};

const EMAIL_PLACEHOLDER: &str = "Enter your email...";
const EMAIL_INPUT_WIDTH: usize = 34;
const SIGN_UP_BUTTON: &str = "Get Early Access →";

/// The opening slide and the closing call to action, all centered.
pub(crate) fn build(slide: &Slide, builder: &mut SlideBuilder) {
    let theme = builder.theme;
    let center = Alignment::center();
    if !slide.tags.is_empty() {
        let mut badges = WeightedLine::default();
        for (index, tag) in slide.tags.iter().enumerate() {
            if index > 0 {
                badges.push(Text::from("  "));
            }
            badges.push(Text::new(format!(" {tag} "), TextStyle::colored(theme.badge)));
        }
        builder.push_line(badges, &center);
        builder.push_line_break();
    }
    if let Some(title) = slide.title {
        builder.push_title(title, &center);
    }
    if let Some(subtitle) = slide.subtitle {
        builder.push_subtitle(subtitle, &center);
    }
    if let Some(content) = slide.content {
        builder.push_line_break();
        let paragraph = Alignment::Center { minimum_margin: Margin::Percent(15), minimum_size: 0 };
        builder.push_body(content, &paragraph);
    }
    if slide.is_cta {
        builder.push_line_break();
        let input = Text::new(
            format!(" {EMAIL_PLACEHOLDER:<width$}", width = EMAIL_INPUT_WIDTH - 1),
            TextStyle::colored(Colors::new(theme.muted, theme.card)),
        );
        let button = Text::new(format!(" {SIGN_UP_BUTTON} "), TextStyle::colored(theme.button).bold());
        builder.push_line(vec![input, Text::from("  "), button], &center);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        catalog::Catalog,
        processing::layouts::test_utils::{dark_theme, render_slide},
    };

    #[test]
    fn badges_above_title() {
        let slide = Catalog::homevisor().get(0).expect("no hero");
        let grid = render_slide(slide);
        let (_, badges_row) = grid.find("Home Operating System").expect("no badge");
        let (_, title_row) = grid.find("HomeVisor").expect("no title");
        assert!(badges_row < title_row);
        assert!(grid.contains("Your Home, Managed"));
        assert!(!grid.contains(EMAIL_PLACEHOLDER));
    }

    #[test]
    fn call_to_action() {
        let slide = Catalog::homevisor().get(11).expect("no cta");
        let grid = render_slide(slide);
        let (input_column, input_row) = grid.find(EMAIL_PLACEHOLDER).expect("no input");
        let (button_column, button_row) = grid.find("Get Early Access").expect("no button");
        assert_eq!(input_row, button_row);
        assert!(input_column < button_column);

        let theme = dark_theme();
        let button = &grid.rows[button_row as usize][button_column as usize];
        assert_eq!(button.style.colors, theme.button);
        assert!(button.style.is_bold());
    }

    #[test]
    fn everything_is_optional() {
        let slide = Slide { id: "bare", layout: "hero", ..Slide::EMPTY };
        let grid = render_slide(&slide);
        assert!(grid.lines().iter().all(|line| line.is_empty()));
    }
}
