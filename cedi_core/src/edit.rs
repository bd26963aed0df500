//! Text edits at the cursor
//!
//! Every operation validates before it mutates, so an edit either completes
//! with a consistent cursor or leaves the document as it was. A completed
//! edit also leaves no `\r\n` or `\n\r` spread over two lines.

use alloc::vec;
use alloc::vec::Vec;

use crate::cursor::{Cursor, CursorRules};
use crate::document::{BufferResult, Document, TextChange};
use crate::line::is_terminator;

/// Lines whose text changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDamage {
    /// A single line changed in place
    Line(usize),
    /// This line and everything below it changed (split or merge)
    From(usize),
}

impl TextDamage {
    /// Combine two damages into one covering both
    pub fn union(self, other: TextDamage) -> TextDamage {
        match (self, other) {
            (TextDamage::Line(a), TextDamage::Line(b)) if a == b => TextDamage::Line(a),
            _ => TextDamage::From(self.first_line().min(other.first_line())),
        }
    }

    /// First damaged line
    pub fn first_line(&self) -> usize {
        match self {
            TextDamage::Line(line) | TextDamage::From(line) => *line,
        }
    }
}

/// Cursor and damage after an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub cursor: Cursor,
    /// `None` when the edit was a no-op
    pub damage: Option<TextDamage>,
    /// Text movements in the order they happened
    pub changes: Vec<TextChange>,
    /// A terminator pair had to be fused across a line boundary
    pub fused: bool,
}

impl EditOutcome {
    fn unchanged(cursor: Cursor) -> Self {
        Self {
            cursor,
            damage: None,
            changes: Vec::new(),
            fused: false,
        }
    }

    /// Finish an edit: fuse terminators around lines `first..=last` and
    /// carry the cursor through whatever that moved.
    fn settle(
        doc: &mut Document,
        first: usize,
        last: usize,
        cursor: Cursor,
        damage: TextDamage,
        change: TextChange,
    ) -> BufferResult<Self> {
        let fused = doc.fuse_terminators(first, last)?;
        let mut outcome = Self {
            cursor,
            damage: Some(damage),
            changes: vec![change],
            fused: !fused.is_empty(),
        };
        if outcome.fused {
            outcome.damage = Some(damage.union(TextDamage::From(first)));
            outcome.cursor = map_through(&fused, cursor);
            outcome.changes.extend(fused);
        }
        Ok(outcome)
    }

    /// Whether the document was modified
    pub fn changed(&self) -> bool {
        self.damage.is_some()
    }

    /// Carry a position recorded before the edit to where its text now is
    pub fn map(&self, at: Cursor) -> Cursor {
        map_through(&self.changes, at)
    }
}

fn map_through(changes: &[TextChange], at: Cursor) -> Cursor {
    let (line, column) = changes
        .iter()
        .fold((at.line, at.column), |(line, column), change| change.map(line, column));
    Cursor::new(line, column)
}

/// Insert a code point; terminators become a line split
pub fn insert_char(
    doc: &mut Document,
    cursor: Cursor,
    rules: CursorRules,
    ch: char,
) -> BufferResult<EditOutcome> {
    if is_terminator(ch) {
        return insert_newline(doc, cursor, rules);
    }
    let cursor = cursor.clamped(doc, rules);
    let column = cursor.edit_column(doc);
    doc.insert_char(cursor.line, column, ch)?;
    // content only grows, so no terminator can pair up here
    Ok(EditOutcome {
        cursor: Cursor::new(cursor.line, column + 1),
        damage: Some(TextDamage::Line(cursor.line)),
        changes: vec![TextChange::Inserted {
            line: cursor.line,
            column,
        }],
        fused: false,
    })
}

/// Insert a literal tab
pub fn insert_tab(doc: &mut Document, cursor: Cursor, rules: CursorRules) -> BufferResult<EditOutcome> {
    insert_char(doc, cursor, rules, '\t')
}

/// Split the line at the cursor using the document's newline
pub fn insert_newline(
    doc: &mut Document,
    cursor: Cursor,
    rules: CursorRules,
) -> BufferResult<EditOutcome> {
    let cursor = cursor.clamped(doc, rules);
    let column = cursor.edit_column(doc);
    let newline = doc.newline();
    let new_line = doc.split(cursor.line, column, newline)?;
    EditOutcome::settle(
        doc,
        cursor.line.saturating_sub(1),
        new_line,
        Cursor::new(new_line, 0),
        TextDamage::From(cursor.line),
        TextChange::Split {
            line: cursor.line,
            column,
        },
    )
}

/// Backspace
pub fn delete_prev(doc: &mut Document, cursor: Cursor, rules: CursorRules) -> BufferResult<EditOutcome> {
    let cursor = cursor.clamped(doc, rules);
    let column = cursor.edit_column(doc);

    if column > 0 {
        doc.remove_char(cursor.line, column - 1)?;
        return EditOutcome::settle(
            doc,
            cursor.line.saturating_sub(1),
            cursor.line,
            Cursor::new(cursor.line, column - 1),
            TextDamage::Line(cursor.line),
            TextChange::Removed {
                line: cursor.line,
                column: column - 1,
            },
        );
    }
    if cursor.line == 0 {
        return Ok(EditOutcome::unchanged(cursor));
    }

    let previous = cursor.line - 1;
    let join = doc.newlineless_length(previous);
    doc.merge_with_next(previous)?;
    EditOutcome::settle(
        doc,
        previous.saturating_sub(1),
        previous,
        Cursor::new(previous, join),
        TextDamage::From(previous),
        TextChange::Merged { line: previous, join },
    )
}

/// Forward delete
pub fn delete_next(doc: &mut Document, cursor: Cursor, rules: CursorRules) -> BufferResult<EditOutcome> {
    let cursor = cursor.clamped(doc, rules);
    let column = cursor.edit_column(doc);
    let edited = Cursor::new(cursor.line, column);
    let join = doc.newlineless_length(cursor.line);

    if column < join {
        doc.remove_char(cursor.line, column)?;
        return EditOutcome::settle(
            doc,
            cursor.line.saturating_sub(1),
            cursor.line,
            edited,
            TextDamage::Line(cursor.line),
            TextChange::Removed {
                line: cursor.line,
                column,
            },
        );
    }
    if cursor.line >= doc.last_line_index() {
        return Ok(EditOutcome::unchanged(cursor));
    }

    doc.merge_with_next(cursor.line)?;
    EditOutcome::settle(
        doc,
        cursor.line.saturating_sub(1),
        cursor.line,
        edited,
        TextDamage::From(cursor.line),
        TextChange::Merged {
            line: cursor.line,
            join,
        },
    )
}
