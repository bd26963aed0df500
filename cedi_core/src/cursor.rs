//! Cursor positions and navigation
//!
//! A cursor addresses the gap left of a character index. Every move returns a
//! new cursor that is valid for the document it was computed against.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::math;

/// Position in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Closest valid position
    pub fn clamped(self, doc: &Document, rules: CursorRules) -> Self {
        let line = self.line.min(doc.last_line_index());
        let column = self.column.min(doc.max_cursor_column(line, rules.draw_whitespace));
        Self { line, column }
    }

    pub fn is_valid(&self, doc: &Document, rules: CursorRules) -> bool {
        self.line < doc.line_count()
            && self.column <= doc.max_cursor_column(self.line, rules.draw_whitespace)
    }

    /// Column at which edits apply; never inside a terminator
    pub fn edit_column(&self, doc: &Document) -> usize {
        self.column.min(doc.newlineless_length(self.line))
    }
}

/// How up/down pick the destination column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum VerticalMove {
    /// Keep the column, clamped to the destination line
    #[default]
    ClampColumn,
    /// Keep the pixel x remembered across consecutive vertical moves
    NearestPixel,
}

impl VerticalMove {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalMove::ClampColumn => "clamp_column",
            VerticalMove::NearestPixel => "nearest_pixel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "clamp_column" => Some(VerticalMove::ClampColumn),
            "nearest_pixel" => Some(VerticalMove::NearestPixel),
            _ => None,
        }
    }
}

/// Options that change where the cursor may stand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorRules {
    pub draw_whitespace: bool,
    pub vertical_move: VerticalMove,
}

impl CursorRules {
    pub fn new(draw_whitespace: bool) -> Self {
        Self {
            draw_whitespace,
            vertical_move: VerticalMove::ClampColumn,
        }
    }
}

pub fn move_left(doc: &Document, cursor: Cursor, rules: CursorRules) -> Cursor {
    let cursor = cursor.clamped(doc, rules);
    if cursor.column > 0 {
        Cursor::new(cursor.line, cursor.column - 1)
    } else if cursor.line > 0 {
        let line = cursor.line - 1;
        Cursor::new(line, doc.max_cursor_column(line, rules.draw_whitespace))
    } else {
        cursor
    }
}

pub fn move_right(doc: &Document, cursor: Cursor, rules: CursorRules) -> Cursor {
    let cursor = cursor.clamped(doc, rules);
    if cursor.column < doc.max_cursor_column(cursor.line, rules.draw_whitespace) {
        Cursor::new(cursor.line, cursor.column + 1)
    } else if cursor.line < doc.last_line_index() {
        Cursor::new(cursor.line + 1, 0)
    } else {
        cursor
    }
}

pub fn move_up(doc: &Document, cursor: Cursor, rules: CursorRules) -> Cursor {
    let cursor = cursor.clamped(doc, rules);
    if cursor.line == 0 {
        return cursor;
    }
    Cursor::new(cursor.line - 1, cursor.column).clamped(doc, rules)
}

pub fn move_down(doc: &Document, cursor: Cursor, rules: CursorRules) -> Cursor {
    let cursor = cursor.clamped(doc, rules);
    if cursor.line >= doc.last_line_index() {
        return cursor;
    }
    Cursor::new(cursor.line + 1, cursor.column).clamped(doc, rules)
}

/// Column whose x position is closest to `x`.
///
/// `positions` holds one x per column, end-of-line slot included; ties go to
/// the left column. Columns past `max_column` are ignored.
pub fn nearest_column(positions: &[f32], x: f32, max_column: usize) -> usize {
    let mut best = 0;
    let mut best_distance = f32::MAX;
    for (column, position) in positions.iter().enumerate().take(max_column + 1) {
        let distance = math::abs(position - x);
        if distance < best_distance {
            best = column;
            best_distance = distance;
        }
    }
    best
}

/// Selection between an anchor and the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Cursor,
    pub cursor: Cursor,
}

impl Selection {
    pub fn new(anchor: Cursor, cursor: Cursor) -> Self {
        Self { anchor, cursor }
    }

    /// `(start, end)` in document order
    pub fn ordered(&self) -> (Cursor, Cursor) {
        if self.anchor <= self.cursor {
            (self.anchor, self.cursor)
        } else {
            (self.cursor, self.anchor)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.cursor
    }

    /// Whether the character at `(line, column)` is covered
    pub fn contains(&self, line: usize, column: usize) -> bool {
        let (start, end) = self.ordered();
        let here = Cursor::new(line, column);
        start <= here && here < end
    }
}
