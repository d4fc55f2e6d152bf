use super::{style::TextStyle, Text};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A line of styled text that knows how wide it is when printed.
///
/// The weight of a character is its width in unicode, which is what the terminal uses to lay it
/// out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct WeightedLine(Vec<Text>);

impl WeightedLine {
    /// The total width of this line.
    pub(crate) fn width(&self) -> usize {
        self.0.iter().map(Text::width).sum()
    }

    /// Whether this line contains no text.
    pub(crate) fn is_empty(&self) -> bool {
        self.0.iter().all(|text| text.content.is_empty())
    }

    /// Get an iterator to the underlying text chunks.
    pub(crate) fn iter_texts(&self) -> impl Iterator<Item = &Text> {
        self.0.iter()
    }

    /// Append a chunk to this line.
    pub(crate) fn push(&mut self, text: Text) {
        self.0.push(text);
    }

    /// Word wrap this line into lines that are at most `max_width` columns wide.
    ///
    /// Words are only split when they don't fit in a line on their own. Whitespace at the point
    /// where a line is wrapped is dropped.
    pub(crate) fn wrap(&self, max_width: usize) -> Vec<Vec<Text>> {
        let mut wrapper = LineWrapper::new(max_width);
        for text in &self.0 {
            wrapper.push(text);
        }
        wrapper.finish()
    }
}

impl From<Vec<Text>> for WeightedLine {
    fn from(texts: Vec<Text>) -> Self {
        Self(texts)
    }
}

impl From<Text> for WeightedLine {
    fn from(text: Text) -> Self {
        Self(vec![text])
    }
}

impl From<String> for WeightedLine {
    fn from(text: String) -> Self {
        Self(vec![Text::from(text)])
    }
}

impl From<&str> for WeightedLine {
    fn from(text: &str) -> Self {
        Self(vec![Text::from(text)])
    }
}

struct LineWrapper {
    max_width: usize,
    lines: Vec<Vec<Text>>,
    current: Vec<Text>,
    current_width: usize,
    pending_spaces: usize,
    pending_style: TextStyle,
}

impl LineWrapper {
    fn new(max_width: usize) -> Self {
        Self {
            max_width,
            lines: Vec::new(),
            current: Vec::new(),
            current_width: 0,
            pending_spaces: 0,
            pending_style: TextStyle::default(),
        }
    }

    fn push(&mut self, text: &Text) {
        for (index, word) in text.content.split(' ').enumerate() {
            if index > 0 {
                self.pending_spaces += 1;
                self.pending_style = text.style;
            }
            if !word.is_empty() {
                self.push_word(word, text.style);
            }
        }
    }

    fn push_word(&mut self, word: &str, style: TextStyle) {
        let width = word.width();
        if self.max_width == 0 {
            self.flush_spaces();
            self.append(word, style);
            return;
        }
        let spaces = self.spaces_for_current_line();
        if self.current_width > 0 && self.current_width + spaces + width > self.max_width {
            self.break_line();
        } else {
            self.flush_spaces();
        }

        let mut rest = word;
        while self.current_width + rest.width() > self.max_width {
            let available = self.max_width.saturating_sub(self.current_width);
            let (head, tail) = split_at_width(rest, available);
            if !head.is_empty() {
                self.append(head, style);
                rest = tail;
            } else if self.current_width == 0 {
                // A single character that's wider than a whole line, there's nowhere better to put it.
                let first = rest.chars().next().map_or(0, char::len_utf8);
                let (head, tail) = rest.split_at(first);
                self.append(head, style);
                rest = tail;
            }
            self.break_line();
        }
        if !rest.is_empty() {
            self.append(rest, style);
        }
    }

    // Spaces are only kept at the beginning of the very first line.
    fn spaces_for_current_line(&self) -> usize {
        if self.current_width == 0 && !self.lines.is_empty() { 0 } else { self.pending_spaces }
    }

    fn flush_spaces(&mut self) {
        let mut spaces = self.spaces_for_current_line();
        if self.max_width > 0 {
            spaces = spaces.min(self.max_width.saturating_sub(self.current_width));
        }
        if spaces > 0 {
            self.append(&" ".repeat(spaces), self.pending_style);
        }
        self.pending_spaces = 0;
    }

    fn append(&mut self, content: &str, style: TextStyle) {
        self.current_width += content.width();
        match self.current.last_mut() {
            Some(last) if last.style == style => last.content.push_str(content),
            _ => self.current.push(Text::new(content, style)),
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
        self.current_width = 0;
        self.pending_spaces = 0;
    }

    fn finish(mut self) -> Vec<Vec<Text>> {
        if self.pending_spaces > 0 && (self.current_width > 0 || self.lines.is_empty()) {
            self.flush_spaces();
        }
        if !self.current.is_empty() || self.lines.is_empty() {
            self.lines.push(self.current);
        }
        self.lines
    }
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

// Splits the given string so that the head is at most `max_width` columns wide.
fn split_at_width(input: &str, max_width: usize) -> (&str, &str) {
    let mut width = 0;
    for (index, c) in input.char_indices() {
        width += char_width(c);
        if width > max_width {
            return input.split_at(index);
        }
    }
    (input, "")
}
