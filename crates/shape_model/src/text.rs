//! Text shape and word wrapping

use crate::{Rect, TextExtra};

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    bound: Rect,
    text: String,
    extra: TextExtra,
    is_text_editable: bool,
    is_text_editing: bool,
    renderable: RenderableText,
}

impl Text {
    pub fn new(bound: Rect, extra: TextExtra, is_text_editable: bool) -> Self {
        let mut text = Self {
            bound,
            text: String::new(),
            extra,
            is_text_editable,
            is_text_editing: false,
            renderable: RenderableText::default(),
        };
        text.update_renderable_text();
        text
    }

    pub fn bound(&self) -> Rect {
        self.bound
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn extra(&self) -> &TextExtra {
        &self.extra
    }

    pub fn is_text_editable(&self) -> bool {
        self.is_text_editable
    }

    pub fn is_text_editing(&self) -> bool {
        self.is_text_editing
    }

    /// Wrapped rows for the current text and content width
    pub fn renderable_text(&self) -> &[String] {
        &self.renderable.lines
    }

    /// The area text is laid out in: the bound, inset by one when bordered
    pub fn content_bound(&self) -> Rect {
        if self.extra.has_border() {
            Rect::by_ltwh(
                self.bound.left() + 1,
                self.bound.top() + 1,
                self.bound.width() - 2,
                self.bound.height() - 2,
            )
        } else {
            self.bound
        }
    }

    pub fn set_bound(&mut self, bound: Rect) -> bool {
        if self.bound == bound {
            return false;
        }
        self.bound = bound;
        self.update_renderable_text();
        true
    }

    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        self.update_renderable_text();
        true
    }

    pub fn set_extra(&mut self, extra: TextExtra) -> bool {
        if self.extra == extra {
            return false;
        }
        self.extra = extra;
        self.update_renderable_text();
        true
    }

    pub fn make_text_editable(&mut self) -> bool {
        if self.is_text_editable {
            return false;
        }
        self.is_text_editable = true;
        true
    }

    pub fn set_text_editing(&mut self, is_editing: bool) -> bool {
        if self.is_text_editing == is_editing {
            return false;
        }
        self.is_text_editing = is_editing;
        true
    }

    fn max_row_char_count(&self) -> usize {
        let width = if self.extra.has_border() {
            self.bound.width() - 2
        } else {
            self.bound.width()
        };
        width.max(1) as usize
    }

    fn update_renderable_text(&mut self) {
        let max = self.max_row_char_count();
        if self.renderable.text != self.text || self.renderable.max_row_char_count != max {
            self.renderable = RenderableText::new(&self.text, max);
        }
    }
}

/// Word-wrapped rows memoized on (text, row width)
#[derive(Debug, Clone, PartialEq, Default)]
struct RenderableText {
    text: String,
    max_row_char_count: usize,
    lines: Vec<String>,
}

impl RenderableText {
    fn new(text: &str, max_row_char_count: usize) -> Self {
        Self {
            text: text.to_string(),
            max_row_char_count,
            lines: wrap_text(text, max_row_char_count),
        }
    }
}

/// Greedy word wrap. Words longer than a row are cut into row-sized pieces;
/// a width of one stacks every character on its own row.
pub fn wrap_text(text: &str, max_row_char_count: usize) -> Vec<String> {
    if max_row_char_count <= 1 {
        return text
            .chars()
            .filter(|c| *c != '\n')
            .map(|c| c.to_string())
            .collect();
    }

    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in split_words(line, max_row_char_count) {
            let space = usize::from(current_len > 0);
            let word_len = word.chars().count();
            if current_len + space + word_len <= max_row_char_count {
                if space == 1 {
                    current.push(' ');
                }
                current.push_str(&word);
                current_len += space + word_len;
            } else {
                rows.push(std::mem::take(&mut current));
                current = word;
                current_len = word_len;
            }
        }
        rows.push(current);
    }
    rows
}

fn split_words(line: &str, max: usize) -> Vec<String> {
    let mut words = Vec::new();
    for word in line.split(' ') {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= max {
            words.push(word.to_string());
        } else {
            words.extend(chars.chunks(max).map(|chunk| chunk.iter().collect::<String>()));
        }
    }
    words
}
