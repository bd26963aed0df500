//! A single line of decoded text and its terminator rules

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Line terminator convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Newline {
    #[default]
    Lf,
    Cr,
    CrLf,
    LfCr,
}

impl Newline {
    /// Code points written for this terminator
    pub fn as_chars(&self) -> &'static [char] {
        match self {
            Newline::Lf => &['\n'],
            Newline::Cr => &['\r'],
            Newline::CrLf => &['\r', '\n'],
            Newline::LfCr => &['\n', '\r'],
        }
    }

    /// Settings name (`lf`, `cr`, `crlf`, `lfcr`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "lf",
            Newline::Cr => "cr",
            Newline::CrLf => "crlf",
            Newline::LfCr => "lfcr",
        }
    }

    /// Parse a settings name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lf" => Some(Newline::Lf),
            "cr" => Some(Newline::Cr),
            "crlf" => Some(Newline::CrLf),
            "lfcr" => Some(Newline::LfCr),
            _ => None,
        }
    }

    /// Recognise the terminator at the start of `text`.
    ///
    /// A pair is two code points from `{\n, \r}` where the second differs from
    /// the first, so `\n\n` is a single `\n` followed by another terminator.
    pub fn detect(text: &[char]) -> Option<Self> {
        match text {
            ['\r', '\n', ..] => Some(Newline::CrLf),
            ['\n', '\r', ..] => Some(Newline::LfCr),
            ['\n', ..] => Some(Newline::Lf),
            ['\r', ..] => Some(Newline::Cr),
            _ => None,
        }
    }

    /// Number of code points (1 or 2)
    pub fn width(&self) -> usize {
        self.as_chars().len()
    }
}

/// `\n` or `\r`
pub fn is_terminator(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// An owned, growable sequence of code points
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    text: Vec<char>,
}

impl Line {
    /// Empty line without a terminator
    pub fn new() -> Self {
        Self { text: Vec::new() }
    }

    /// Wrap code points as they are; the terminator, if any, is part of `text`
    pub fn from_chars(text: Vec<char>) -> Self {
        Self { text }
    }

    /// All code points, terminator included
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Length in code points, terminator included
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// No code points at all, not even a terminator
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of trailing code points forming the terminator (0, 1 or 2)
    pub fn newline_width(&self) -> usize {
        match self.text.as_slice() {
            [.., a, b] if is_terminator(*a) && is_terminator(*b) && a != b => 2,
            [.., last] if is_terminator(*last) => 1,
            _ => 0,
        }
    }

    /// Trailing terminator, if any
    pub fn terminator(&self) -> Option<Newline> {
        let width = self.newline_width();
        Newline::detect(&self.text[self.text.len() - width..])
    }

    /// Whether the line ends in a terminator
    pub fn has_terminator(&self) -> bool {
        self.newline_width() > 0
    }

    /// Length without the terminator
    pub fn content_length(&self) -> usize {
        self.text.len() - self.newline_width()
    }

    /// Code points before the terminator
    pub fn content(&self) -> &[char] {
        &self.text[..self.content_length()]
    }

    /// Highest column the cursor may rest on.
    ///
    /// With whitespace drawn the cursor stops before the terminator glyphs.
    /// With whitespace hidden it may stand on the last terminator code point,
    /// which only differs for two-code-point terminators.
    pub fn max_cursor_column(&self, draw_whitespace: bool) -> usize {
        let newline_width = self.newline_width();
        if draw_whitespace {
            self.text.len() - newline_width
        } else {
            self.text.len() - usize::from(newline_width > 0)
        }
    }

    pub(crate) fn insert(&mut self, column: usize, ch: char) {
        self.text.insert(column, ch);
    }

    pub(crate) fn remove(&mut self, column: usize) -> char {
        self.text.remove(column)
    }

    pub(crate) fn split_off(&mut self, column: usize) -> Line {
        Line {
            text: self.text.split_off(column),
        }
    }

    pub(crate) fn strip_terminator(&mut self) {
        let keep = self.content_length();
        self.text.truncate(keep);
    }

    pub(crate) fn push_newline(&mut self, newline: Newline) {
        self.text.extend_from_slice(newline.as_chars());
    }

    pub(crate) fn append(&mut self, other: Line) {
        self.text.extend(other.text);
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }

    /// Whole line as a `String`, terminator included
    pub fn as_string(&self) -> String {
        self.text.iter().collect()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self {
            text: s.chars().collect(),
        }
    }
}
