pub(crate) mod style;
pub(crate) mod weighted;

use style::TextStyle;
use unicode_width::UnicodeWidthStr;

/// A styled piece of text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Text {
    pub(crate) content: String,
    pub(crate) style: TextStyle,
}

impl Text {
    /// Construct a new styled text.
    pub(crate) fn new<S: Into<String>>(content: S, style: TextStyle) -> Self {
        Self { content: content.into(), style }
    }

    /// Get this text's width in terminal columns.
    pub(crate) fn width(&self) -> usize {
        self.content.width()
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Self { content, style: TextStyle::default() }
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Self::from(content.to_string())
    }
}
