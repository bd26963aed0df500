//! Text rendering of an editor session
//!
//! A console stand-in for a GPU render sink: draws the laid-out rows as
//! plain text, marking the cursor cell as `[c]`.

use cedi_core::{EditorSession, GlyphMetrics, Layout, LayoutLine};

/// Status shown under the text rows
#[derive(Debug, Clone, Default)]
pub struct StatusInfo<'a> {
    pub label: Option<&'a str>,
    pub message: &'a str,
}

/// Editor view for console output
#[derive(Debug, Clone, Copy, Default)]
pub struct TextView;

impl TextView {
    pub fn new() -> Self {
        Self
    }

    /// Render the visible rows followed by a status line
    pub fn render(
        &self,
        session: &EditorSession,
        metrics: &dyn GlyphMetrics,
        status: &StatusInfo<'_>,
    ) -> String {
        let layout = session.layout(metrics);
        let cursor = session.cursor();
        let visible = session.visible_line_count(metrics);
        let space = metrics.advance_width(' ').unwrap_or(0.0);
        let mut output = String::new();

        for row in 0..visible {
            let index = session.scroll() + row as i64;
            let laid_out = usize::try_from(index).ok().and_then(|index| layout.line(index));
            match laid_out {
                Some(laid_out) => {
                    let cursor_column = (laid_out.line == cursor.line).then_some(cursor.column);
                    output.push_str(&render_row(laid_out, cursor_column, space));
                }
                None => output.push('~'),
            }
            output.push('\n');
        }

        output.push_str(&self.render_status(session, &layout, status));
        output
    }

    pub fn render_status(
        &self,
        session: &EditorSession,
        layout: &Layout,
        status: &StatusInfo<'_>,
    ) -> String {
        let mut line = String::new();

        match status.label {
            Some(label) => line.push_str(label),
            None => line.push_str("[No Name]"),
        }
        if session.is_dirty() {
            line.push('*');
        }

        let cursor = session.cursor();
        line.push_str(&format!(
            " {}:{} tab={}",
            cursor.line + 1,
            cursor.column + 1,
            session.options().tab_spaces
        ));
        if session.options().draw_whitespace {
            line.push_str(" ws");
        }
        if layout.missing_glyphs > 0 {
            line.push_str(&format!(" missing={}", layout.missing_glyphs));
        }

        if !status.message.is_empty() {
            line.push_str(" | ");
            line.push_str(status.message);
        }
        line
    }
}

fn render_row(laid_out: &LayoutLine, cursor_column: Option<usize>, space: f32) -> String {
    let columns = laid_out.positions.len().saturating_sub(1);
    let mut glyphs = laid_out.glyphs.iter().peekable();
    let mut row = String::new();

    for column in 0..columns {
        let glyph = match glyphs.peek() {
            Some(placed) if placed.column == column => glyphs.next().map(|placed| placed.glyph),
            _ => None,
        };

        let cell = match glyph {
            Some(glyph) => glyph.to_string(),
            None => {
                let width = laid_out.positions[column + 1] - laid_out.positions[column];
                blank_cells(width, space)
            }
        };

        if cursor_column == Some(column) {
            let first = cell.chars().next().unwrap_or(' ');
            row.push('[');
            row.push(first);
            row.push(']');
            row.extend(cell.chars().skip(1));
        } else {
            row.push_str(&cell);
        }
    }

    if cursor_column.is_some_and(|column| column >= columns) {
        row.push_str("[ ]");
    }
    row
}

/// Spaces covering an undrawn character of the given width
fn blank_cells(width: f32, space: f32) -> String {
    if width <= 0.0 || space <= 0.0 {
        return String::new();
    }
    let cells = (width / space).round().max(1.0) as usize;
    " ".repeat(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedi_core::{Document, EditorCommand, EditorOptions, MonospaceMetrics, Viewport};

    const METRICS: MonospaceMetrics = MonospaceMetrics::new(10.0, 20.0);

    fn session(text: &str, rows: f32) -> EditorSession {
        EditorSession::with_document(
            Document::from_str(text),
            Viewport::new(200.0, rows * 20.0),
            EditorOptions::default(),
        )
    }

    #[test]
    fn test_render_shows_cursor_and_filler() {
        let session = session("ab\ncd", 3.0);
        let output = TextView::new().render(&session, &METRICS, &StatusInfo::default());
        let rows: Vec<&str> = output.lines().collect();

        assert_eq!(rows[0], "[a]b");
        assert_eq!(rows[1], "cd");
        assert_eq!(rows[2], "~");
        assert_eq!(rows[3], "[No Name] 1:1 tab=4");
    }

    #[test]
    fn test_cursor_on_hidden_terminator() {
        let mut session = session("ab\n", 1.0);
        session.apply_command(EditorCommand::MoveRight, &METRICS);
        session.apply_command(EditorCommand::MoveRight, &METRICS);
        let output = TextView::new().render(&session, &METRICS, &StatusInfo::default());
        assert!(output.starts_with("ab[ ]\n"));
    }

    #[test]
    fn test_tabs_render_as_blank_cells() {
        let session = session("a\tb", 1.0);
        let output = TextView::new().render(&session, &METRICS, &StatusInfo::default());
        assert!(output.starts_with("[a]   b\n"));
    }

    #[test]
    fn test_whitespace_glyphs_when_enabled() {
        let mut session = session("a b\n", 1.0);
        session.apply_command(EditorCommand::ToggleDrawWhitespace, &METRICS);
        let output = TextView::new().render(&session, &METRICS, &StatusInfo::default());
        assert!(output.starts_with("[a]·b¶\n"));
        assert!(output.contains(" ws"));
    }

    #[test]
    fn test_status_line_with_label_and_message() {
        let mut session = session("", 1.0);
        session.apply_command(EditorCommand::InsertChar('x'), &METRICS);
        let status = StatusInfo {
            label: Some("notes.txt"),
            message: "Saved",
        };
        let output = TextView::new().render(&session, &METRICS, &status);
        assert_eq!(output.lines().last(), Some("notes.txt* 1:2 tab=4 | Saved"));
    }
}
