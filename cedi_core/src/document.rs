//! Line store
//!
//! Lines live in a `Vec` and are addressed by index. A line index is only
//! meaningful until the next split or merge.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::codec::{decode_utf8, detect_and_skip_bom, encode_utf8, DecodeError, UTF8_BOM};
use crate::line::{is_terminator, Line, Newline};

/// Line store error
///
/// These signal a broken caller contract, never a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Merge requested on the last line
    InvalidMerge { line: usize },
    LineOutOfRange { line: usize, line_count: usize },
    ColumnOutOfRange { line: usize, column: usize, len: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidMerge { line } => {
                write!(f, "Cannot merge line {} with a following line", line)
            }
            BufferError::LineOutOfRange { line, line_count } => {
                write!(f, "Line {} out of range ({} lines)", line, line_count)
            }
            BufferError::ColumnOutOfRange { line, column, len } => {
                write!(f, "Column {} out of range on line {} (length {})", column, line, len)
            }
        }
    }
}

pub type BufferResult<T> = Result<T, BufferError>;

/// How one edit step moved text, used to carry other positions along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChange {
    /// A code point was inserted before `column`
    Inserted { line: usize, column: usize },
    /// The code point at `column` was removed
    Removed { line: usize, column: usize },
    /// Everything from `column` on moved to the start of a new line below
    Split { line: usize, column: usize },
    /// Line `line + 1` was appended to `line` at column `join`
    Merged { line: usize, join: usize },
}

impl TextChange {
    /// Where a position ends up after this change
    pub fn map(&self, line: usize, column: usize) -> (usize, usize) {
        match *self {
            TextChange::Inserted { line: at, column: col } if line == at && column > col => {
                (line, column + 1)
            }
            TextChange::Removed { line: at, column: col } if line == at && column > col => {
                (line, column - 1)
            }
            TextChange::Split { line: at, column: col } => {
                if line > at {
                    (line + 1, column)
                } else if line == at && column >= col {
                    (line + 1, column - col)
                } else {
                    (line, column)
                }
            }
            TextChange::Merged { line: at, join } => {
                if line > at + 1 {
                    (line - 1, column)
                } else if line == at + 1 {
                    (at, join + column)
                } else if line == at {
                    (line, column.min(join))
                } else {
                    (line, column)
                }
            }
            _ => (line, column),
        }
    }
}

/// Result of loading a document from bytes
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    pub document: Document,
    pub had_bom: bool,
    pub errors: Vec<DecodeError>,
}

/// Ordered, never-empty collection of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    newline: Newline,
}

impl Document {
    /// A document holding one empty line
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            newline: Newline::default(),
        }
    }

    /// Split text into lines, each keeping its terminator.
    ///
    /// A trailing terminator does not produce an extra empty line.
    pub fn from_text(text: &[char]) -> Self {
        let mut lines = Vec::new();
        let mut newline = None;
        let mut start = 0;
        let mut i = 0;

        while i < text.len() {
            if is_terminator(text[i]) {
                let found = Newline::detect(&text[i..]).unwrap_or_default();
                newline.get_or_insert(found);
                i += found.width();
                lines.push(Line::from_chars(text[start..i].to_vec()));
                start = i;
            } else {
                i += 1;
            }
        }
        if start < text.len() || lines.is_empty() {
            lines.push(Line::from_chars(text[start..].to_vec()));
        }

        Self {
            lines,
            newline: newline.unwrap_or_default(),
        }
    }

    /// Split a string into lines; see [`Document::from_text`]
    pub fn from_str(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self::from_text(&chars)
    }

    /// Skip a BOM, decode lossily and split into lines
    pub fn decode(bytes: &[u8]) -> DecodedDocument {
        let (bytes, had_bom) = detect_and_skip_bom(bytes);
        let decoded = decode_utf8(bytes);
        DecodedDocument {
            document: Self::from_text(&decoded.text),
            had_bom,
            errors: decoded.errors,
        }
    }

    /// Terminator used when splitting lines
    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// Change the terminator used by later splits; existing lines keep theirs
    pub fn set_newline(&mut self, newline: Newline) {
        self.newline = newline;
    }

    /// Number of lines (at least one)
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines in order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line at `index`, if any
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Line at `index`, or `LineOutOfRange`
    pub fn line_at(&self, index: usize) -> BufferResult<&Line> {
        self.lines.get(index).ok_or(BufferError::LineOutOfRange {
            line: index,
            line_count: self.lines.len(),
        })
    }

    fn line_at_mut(&mut self, index: usize) -> BufferResult<&mut Line> {
        let line_count = self.lines.len();
        self.lines.get_mut(index).ok_or(BufferError::LineOutOfRange {
            line: index,
            line_count,
        })
    }

    /// Index of the last line
    pub fn last_line_index(&self) -> usize {
        self.lines.len() - 1
    }

    /// Line length without its terminator (0 for a missing line)
    pub fn newlineless_length(&self, index: usize) -> usize {
        self.lines.get(index).map(Line::content_length).unwrap_or(0)
    }

    /// Highest valid cursor column on a line (0 for a missing line)
    pub fn max_cursor_column(&self, index: usize, draw_whitespace: bool) -> usize {
        self.lines
            .get(index)
            .map(|line| line.max_cursor_column(draw_whitespace))
            .unwrap_or(0)
    }

    /// Insert a code point before `column`
    pub fn insert_char(&mut self, index: usize, column: usize, ch: char) -> BufferResult<()> {
        let line = self.line_at_mut(index)?;
        if column > line.len() {
            return Err(BufferError::ColumnOutOfRange {
                line: index,
                column,
                len: line.len(),
            });
        }
        line.insert(column, ch);
        Ok(())
    }

    /// Remove and return the code point at `column`
    pub fn remove_char(&mut self, index: usize, column: usize) -> BufferResult<char> {
        let line = self.line_at_mut(index)?;
        if column >= line.len() {
            return Err(BufferError::ColumnOutOfRange {
                line: index,
                column,
                len: line.len(),
            });
        }
        Ok(line.remove(column))
    }

    /// Move everything at/after `column` into a new following line and
    /// terminate the source line. Returns the new line's index.
    ///
    /// The new terminator may pair up with a neighbouring one; follow with
    /// [`Document::fuse_terminators`].
    pub fn split(&mut self, index: usize, column: usize, newline: Newline) -> BufferResult<usize> {
        let line = self.line_at_mut(index)?;
        if column > line.len() {
            return Err(BufferError::ColumnOutOfRange {
                line: index,
                column,
                len: line.len(),
            });
        }
        let tail = line.split_off(column);
        line.push_newline(newline);
        self.lines.insert(index + 1, tail);
        Ok(index + 1)
    }

    /// Drop the terminator of `index` and pull the following line onto it.
    ///
    /// Like [`Document::split`] this can leave a pair spread over two lines.
    pub fn merge_with_next(&mut self, index: usize) -> BufferResult<()> {
        if index >= self.lines.len() {
            return Err(BufferError::LineOutOfRange {
                line: index,
                line_count: self.lines.len(),
            });
        }
        if index + 1 >= self.lines.len() {
            return Err(BufferError::InvalidMerge { line: index });
        }
        let next = self.lines.remove(index + 1);
        let line = &mut self.lines[index];
        line.strip_terminator();
        line.append(next);
        Ok(())
    }

    /// Insert a whole line before `index` (`index == line_count` appends).
    ///
    /// Any terminator in `text` is dropped; terminators are then added where
    /// the line store invariant needs them.
    pub fn insert_line(&mut self, index: usize, text: &[char], newline: Newline) -> BufferResult<()> {
        if index > self.lines.len() {
            return Err(BufferError::LineOutOfRange {
                line: index,
                line_count: self.lines.len(),
            });
        }
        let mut line = Line::from_chars(text.iter().copied().filter(|ch| !is_terminator(*ch)).collect());

        if index == self.lines.len() {
            let last = self.last_line_index();
            if !self.lines[last].has_terminator() {
                self.lines[last].push_newline(newline);
            }
        } else {
            line.push_newline(newline);
        }
        self.lines.insert(index, line);
        self.fuse_terminators(index.saturating_sub(1), index + 1)?;
        Ok(())
    }

    /// Remove a line; removing the only line clears it instead
    pub fn remove_line(&mut self, index: usize) -> BufferResult<Line> {
        self.line_at(index)?;
        if self.lines.len() == 1 {
            let removed = self.lines[0].clone();
            self.lines[0].clear();
            return Ok(removed);
        }
        let removed = self.lines.remove(index);
        self.fuse_terminators(index.saturating_sub(1), index)?;
        Ok(removed)
    }

    /// Fuse a single terminator ending one line with a different one
    /// starting the next, so the lines are exactly what decoding the text
    /// again would produce.
    ///
    /// Boundaries below lines `first..=last` are checked, and further down
    /// for as long as fusing pushes a lone terminator onto the next line.
    /// Returns the changes made, in order.
    pub fn fuse_terminators(&mut self, first: usize, mut last: usize) -> BufferResult<Vec<TextChange>> {
        let mut changes = Vec::new();
        let mut index = first;

        while index + 1 < self.lines.len() {
            if !self.splits_pair(index) {
                if index >= last {
                    break;
                }
                index += 1;
                continue;
            }

            let join = self.newlineless_length(index);
            let start = self.remove_char(index + 1, 0)?;
            let end = self.line_at(index)?.len();
            if self.lines[index + 1].is_empty() {
                self.lines.remove(index + 1);
                self.insert_char(index, end, start)?;
                changes.push(TextChange::Merged { line: index, join });
            } else {
                self.insert_char(index, end, start)?;
                changes.push(TextChange::Removed { line: index + 1, column: 0 });
                changes.push(TextChange::Inserted { line: index, column: end });
                last = last.max(index + 1);
            }
        }
        Ok(changes)
    }

    /// Line `index` ends in a lone terminator and the next line starts with
    /// the other one
    fn splits_pair(&self, index: usize) -> bool {
        match (self.lines.get(index), self.lines.get(index + 1)) {
            (Some(upper), Some(lower)) => match (upper.text().last(), lower.text().first()) {
                (Some(&end), Some(&start)) => {
                    upper.newline_width() == 1 && is_terminator(start) && start != end
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// All code points, terminators included
    pub fn to_text(&self) -> Vec<char> {
        self.lines.iter().flat_map(|line| line.text().iter().copied()).collect()
    }

    /// Whole text as a `String`, terminators included
    pub fn as_string(&self) -> String {
        self.lines.iter().flat_map(|line| line.text().iter()).collect()
    }

    /// Encode as UTF-8, optionally with a BOM
    pub fn to_utf8(&self, with_bom: bool) -> Vec<u8> {
        let mut bytes = Vec::new();
        if with_bom {
            bytes.extend_from_slice(&UTF8_BOM);
        }
        bytes.extend(encode_utf8(&self.to_text()));
        bytes
    }

    /// Total number of code points
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
