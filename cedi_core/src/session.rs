//! Editor session
//!
//! `EditorSession` is the whole mutable state of one open document. The host
//! feeds it commands and ticks and gets back a [`Damage`] describing what to
//! redraw; anything needing the outside world comes back as a
//! [`CoreIoRequest`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::codec::DecodeError;
use crate::command::EditorCommand;
use crate::cursor::{self, Cursor, Selection, VerticalMove};
use crate::document::{BufferResult, Document};
use crate::edit::{self, EditOutcome, TextDamage};
use crate::glyph::GlyphMetrics;
use crate::layout::{generate_layout, line_positions, Layout};
use crate::options::EditorOptions;
use crate::render::{build_frame, Frame, Palette};
use crate::snapshot::SessionSnapshot;
use crate::viewport::{
    clamp_to_cursor, clamp_to_overscroll_limit, mouse_scroll, page_step, visible_line_count,
    SmoothScroll, Viewport,
};

/// I/O the host must perform for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreIoRequest {
    /// Read the file and hand it to [`EditorSession::load_bytes`]
    Open(String),
}

/// What changed as a result of a command or tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Damage {
    pub text: Option<TextDamage>,
    pub cursor_moved: bool,
    pub scroll_changed: bool,
    /// Layout must be regenerated (text, scroll or options changed)
    pub relayout: bool,
    /// Keep redrawing without waiting for input
    pub continuous_redraw: bool,
    pub request: Option<CoreIoRequest>,
}

impl Damage {
    pub fn needs_redraw(&self) -> bool {
        self.text.is_some()
            || self.cursor_moved
            || self.scroll_changed
            || self.relayout
            || self.continuous_redraw
    }
}

/// Summary of a document load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub lines: usize,
    pub bytes: usize,
    pub had_bom: bool,
    pub errors: Vec<DecodeError>,
}

pub struct EditorSession {
    document: Document,
    cursor: Cursor,
    select_cursor: Option<Cursor>,
    scroll: i64,
    smooth: SmoothScroll,
    viewport: Viewport,
    options: EditorOptions,
    /// Pixel x kept across consecutive vertical moves
    preferred_x: Option<f32>,
    dirty: bool,
    had_bom: bool,
}

impl EditorSession {
    pub fn new(viewport: Viewport, options: EditorOptions) -> Self {
        Self::with_document(Document::new(), viewport, options)
    }

    pub fn with_document(document: Document, viewport: Viewport, mut options: EditorOptions) -> Self {
        options.set_tab_spaces(options.tab_spaces);
        let mut session = Self {
            document,
            cursor: Cursor::zero(),
            select_cursor: None,
            scroll: 0,
            smooth: SmoothScroll::new(0),
            viewport,
            options,
            preferred_x: None,
            dirty: false,
            had_bom: false,
        };
        session.apply_newline_option();
        session
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn select_cursor(&self) -> Option<Cursor> {
        self.select_cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.select_cursor
            .map(|anchor| Selection::new(anchor, self.cursor))
    }

    pub fn scroll(&self) -> i64 {
        self.scroll
    }

    pub fn smooth_scroll(&self) -> f32 {
        self.smooth.value()
    }

    pub fn is_scrolling(&self) -> bool {
        self.smooth.is_continuous()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Replace the options, revalidating the cursor against them
    pub fn set_options(&mut self, mut options: EditorOptions) {
        options.set_tab_spaces(options.tab_spaces);
        self.options = options;
        self.apply_newline_option();
        self.revalidate();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn had_bom(&self) -> bool {
        self.had_bom
    }

    pub fn visible_line_count(&self, metrics: &dyn GlyphMetrics) -> usize {
        visible_line_count(
            self.viewport.height,
            metrics.line_height(),
            self.options.reserve_bottom_row,
        )
    }

    /// Replace the document with decoded file contents.
    ///
    /// Cursor, selection and scroll are reset; the document is clean.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> LoadReport {
        let decoded = Document::decode(bytes);
        self.document = decoded.document;
        self.had_bom = decoded.had_bom;
        self.cursor = Cursor::zero();
        self.select_cursor = None;
        self.preferred_x = None;
        self.scroll = 0;
        self.smooth.jump(0);
        self.dirty = false;
        self.apply_newline_option();

        LoadReport {
            lines: self.document.line_count(),
            bytes: bytes.len(),
            had_bom: self.had_bom,
            errors: decoded.errors,
        }
    }

    /// Encoded document, with the BOM it was loaded with
    pub fn to_bytes(&self) -> Vec<u8> {
        self.document.to_utf8(self.had_bom)
    }

    pub fn apply_command(&mut self, command: EditorCommand, metrics: &dyn GlyphMetrics) -> Damage {
        let cursor_before = self.cursor;
        let scroll_before = self.scroll;
        let visible = self.visible_line_count(metrics);
        let mut damage = Damage::default();
        let mut keep_preferred_x = false;

        match command {
            EditorCommand::MoveLeft => {
                self.cursor = cursor::move_left(&self.document, self.cursor, self.options.cursor_rules());
                self.follow_cursor(visible);
            }
            EditorCommand::MoveRight => {
                self.cursor = cursor::move_right(&self.document, self.cursor, self.options.cursor_rules());
                self.follow_cursor(visible);
            }
            EditorCommand::MoveUp => {
                self.move_vertical(false, metrics);
                keep_preferred_x = true;
                self.follow_cursor(visible);
            }
            EditorCommand::MoveDown => {
                self.move_vertical(true, metrics);
                keep_preferred_x = true;
                self.follow_cursor(visible);
            }
            EditorCommand::PageUp => self.page(false, visible),
            EditorCommand::PageDown => self.page(true, visible),
            EditorCommand::MouseScroll(delta) => {
                let scrolled = mouse_scroll(self.scroll, delta, self.options.mouse_scroll_lines);
                self.scroll = self.overscroll_clamped(scrolled, visible);
            }
            EditorCommand::InsertChar(ch) => {
                damage.text = self.edit(|doc, at, rules| edit::insert_char(doc, at, rules, ch));
                self.follow_cursor(visible);
            }
            EditorCommand::InsertTab => {
                damage.text = self.edit(edit::insert_tab);
                self.follow_cursor(visible);
            }
            EditorCommand::InsertNewline => {
                damage.text = self.edit(edit::insert_newline);
                self.follow_cursor(visible);
            }
            EditorCommand::DeletePrev => {
                damage.text = self.edit(edit::delete_prev);
                self.follow_cursor(visible);
            }
            EditorCommand::DeleteNext => {
                damage.text = self.edit(edit::delete_next);
                self.follow_cursor(visible);
            }
            EditorCommand::OpenFile(path) => {
                damage.request = Some(CoreIoRequest::Open(path));
            }
            EditorCommand::ToggleDrawWhitespace => {
                self.options.draw_whitespace = !self.options.draw_whitespace;
                damage.relayout = true;
            }
            EditorCommand::SetTabWidth(tab_spaces) => {
                self.options.set_tab_spaces(tab_spaces);
                damage.relayout = true;
            }
            EditorCommand::AdjustTabWidth(delta) => {
                self.options.adjust_tab_spaces(delta);
                damage.relayout = true;
            }
            EditorCommand::StartSelection => {
                self.select_cursor = Some(self.cursor);
                damage.relayout = true;
            }
            EditorCommand::CancelSelection => {
                damage.relayout = self.select_cursor.take().is_some();
            }
            EditorCommand::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                let visible = self.visible_line_count(metrics);
                self.follow_cursor(visible);
                damage.relayout = true;
            }
        }

        if !keep_preferred_x {
            self.preferred_x = None;
        }
        self.revalidate();
        self.finish(&mut damage, cursor_before, scroll_before);
        damage
    }

    /// Move the cursor to a position, e.g. from a mouse click
    pub fn place_cursor(&mut self, target: Cursor, metrics: &dyn GlyphMetrics) -> Damage {
        let cursor_before = self.cursor;
        let scroll_before = self.scroll;
        self.cursor = target.clamped(&self.document, self.options.cursor_rules());
        self.preferred_x = None;
        let visible = self.visible_line_count(metrics);
        self.follow_cursor(visible);

        let mut damage = Damage::default();
        self.revalidate();
        self.finish(&mut damage, cursor_before, scroll_before);
        damage
    }

    /// Advance smooth scrolling by the time since the last frame
    pub fn tick(&mut self, elapsed_secs: f32) -> Damage {
        let moved = self.smooth.tick(self.scroll, elapsed_secs, self.options.scroll_rate);
        Damage {
            relayout: moved,
            continuous_redraw: self.smooth.is_continuous(),
            ..Damage::default()
        }
    }

    pub fn layout(&self, metrics: &dyn GlyphMetrics) -> Layout {
        generate_layout(
            &self.document,
            self.scroll,
            self.smooth.value(),
            self.viewport,
            metrics,
            &self.options,
        )
    }

    pub fn frame(&self, metrics: &dyn GlyphMetrics, palette: &Palette) -> Frame {
        build_frame(&self.layout(metrics), self.cursor, palette)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            lines: self.document.lines().iter().map(|line| line.as_string()).collect(),
            cursor: self.cursor,
            select_cursor: self.select_cursor,
            scroll: self.scroll,
            draw_whitespace: self.options.draw_whitespace,
            tab_spaces: self.options.tab_spaces,
            dirty: self.dirty,
        }
    }

    fn apply_newline_option(&mut self) {
        if let Some(newline) = self.options.newline {
            self.document.set_newline(newline);
        }
    }

    fn edit<F>(&mut self, op: F) -> Option<TextDamage>
    where
        F: FnOnce(&mut Document, Cursor, cursor::CursorRules) -> BufferResult<EditOutcome>,
    {
        let result = op(&mut self.document, self.cursor, self.options.cursor_rules());
        debug_assert!(result.is_ok(), "edit rejected at a valid cursor: {:?}", result);
        match result {
            Ok(outcome) => {
                self.cursor = outcome.cursor;
                if outcome.changed() {
                    self.dirty = true;
                    self.select_cursor = self.select_cursor.map(|anchor| outcome.map(anchor));
                }
                outcome.damage
            }
            Err(_) => {
                self.cursor = self.cursor.clamped(&self.document, self.options.cursor_rules());
                None
            }
        }
    }

    fn move_vertical(&mut self, down: bool, metrics: &dyn GlyphMetrics) {
        let rules = self.options.cursor_rules();
        let target = if down {
            cursor::move_down(&self.document, self.cursor, rules)
        } else {
            cursor::move_up(&self.document, self.cursor, rules)
        };

        match rules.vertical_move {
            VerticalMove::ClampColumn => self.cursor = target,
            VerticalMove::NearestPixel => {
                if target.line == self.cursor.line {
                    return;
                }
                let x = match self.preferred_x {
                    Some(x) => x,
                    None => self.column_x(self.cursor, metrics),
                };
                let positions = match self.document.line(target.line) {
                    Some(line) => line_positions(line, metrics, &self.options),
                    None => Vec::new(),
                };
                let max_column = self
                    .document
                    .max_cursor_column(target.line, rules.draw_whitespace);
                self.cursor = Cursor::new(target.line, cursor::nearest_column(&positions, x, max_column));
                self.preferred_x = Some(x);
            }
        }
    }

    fn column_x(&self, at: Cursor, metrics: &dyn GlyphMetrics) -> f32 {
        self.document
            .line(at.line)
            .and_then(|line| line_positions(line, metrics, &self.options).get(at.column).copied())
            .unwrap_or(0.0)
    }

    fn page(&mut self, down: bool, visible: usize) {
        let step = page_step(visible);
        let line = if down {
            (self.cursor.line + step).min(self.document.last_line_index())
        } else {
            self.cursor.line.saturating_sub(step)
        };
        let scrolled = if down {
            self.scroll + step as i64
        } else {
            self.scroll - step as i64
        };

        self.cursor = Cursor::new(line, self.cursor.column).clamped(&self.document, self.options.cursor_rules());
        self.scroll = self.overscroll_clamped(scrolled, visible);
        self.follow_cursor(visible);
    }

    fn follow_cursor(&mut self, visible: usize) {
        self.scroll = clamp_to_cursor(self.scroll, self.cursor.line, visible);
    }

    fn overscroll_clamped(&self, scroll: i64, visible: usize) -> i64 {
        clamp_to_overscroll_limit(
            scroll,
            self.document.line_count(),
            visible,
            self.options.overscroll_fraction,
        )
    }

    fn revalidate(&mut self) {
        let rules = self.options.cursor_rules();
        self.cursor = self.cursor.clamped(&self.document, rules);
        self.select_cursor = self
            .select_cursor
            .map(|anchor| anchor.clamped(&self.document, rules));
    }

    fn finish(&mut self, damage: &mut Damage, cursor_before: Cursor, scroll_before: i64) {
        damage.cursor_moved = self.cursor != cursor_before;
        damage.scroll_changed = self.scroll != scroll_before;
        if damage.scroll_changed {
            if self.options.smooth_scroll {
                self.smooth.retarget(self.scroll);
            } else {
                self.smooth.jump(self.scroll);
            }
        }
        damage.relayout |= damage.text.is_some() || damage.scroll_changed;
        damage.continuous_redraw = self.smooth.is_continuous();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::MonospaceMetrics;
    use crate::line::Newline;
    use alloc::format;

    const METRICS: MonospaceMetrics = MonospaceMetrics::new(10.0, 20.0);

    fn session(text: &str) -> EditorSession {
        let mut session = EditorSession::new(Viewport::new(400.0, 210.0), EditorOptions::default());
        session.load_bytes(text.as_bytes());
        session
    }

    fn numbered(count: usize) -> String {
        (0..count).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_move_down_then_insert() {
        let mut s = session("ab\ncd\n");
        s.apply_command(EditorCommand::MoveDown, &METRICS);
        assert_eq!(s.cursor(), Cursor::new(1, 0));
        let damage = s.apply_command(EditorCommand::InsertChar('X'), &METRICS);
        assert_eq!(s.document().line(1).unwrap().as_string(), "Xcd\n");
        assert_eq!(s.cursor(), Cursor::new(1, 1));
        assert_eq!(damage.text, Some(TextDamage::Line(1)));
        assert!(damage.cursor_moved);
        assert!(s.is_dirty());
    }

    #[test]
    fn test_cursor_follow_scrolls_down() {
        let mut s = session(&numbered(100));
        // 210px / 20px is ten full rows plus a partial one
        assert_eq!(s.visible_line_count(&METRICS), 11);
        for _ in 0..99 {
            s.apply_command(EditorCommand::MoveDown, &METRICS);
        }
        assert_eq!(s.cursor().line, 99);
        assert_eq!(s.scroll(), 90);
    }

    #[test]
    fn test_mouse_scroll_leaves_cursor() {
        let mut s = session(&numbered(100));
        let damage = s.apply_command(EditorCommand::MouseScroll(4), &METRICS);
        assert_eq!(s.scroll(), 12);
        assert_eq!(s.cursor(), Cursor::zero());
        assert!(damage.scroll_changed);
        assert!(damage.continuous_redraw);
        assert!(!damage.cursor_moved);
    }

    #[test]
    fn test_mouse_scroll_up_on_single_line() {
        let mut s = session("only");
        s.apply_command(EditorCommand::MouseScroll(-5), &METRICS);
        assert_eq!(s.scroll(), -5);
        s.apply_command(EditorCommand::MouseScroll(-5), &METRICS);
        assert_eq!(s.scroll(), -5);
    }

    #[test]
    fn test_page_down_moves_cursor_and_scroll() {
        let mut s = session(&numbered(100));
        s.apply_command(EditorCommand::PageDown, &METRICS);
        assert_eq!(s.cursor().line, 9);
        assert_eq!(s.scroll(), 9);
        s.apply_command(EditorCommand::PageUp, &METRICS);
        assert_eq!(s.cursor().line, 0);
        assert_eq!(s.scroll(), 0);
    }

    #[test]
    fn test_page_down_at_end_stays_within_bounds() {
        let mut s = session(&numbered(12));
        for _ in 0..5 {
            s.apply_command(EditorCommand::PageDown, &METRICS);
        }
        assert_eq!(s.cursor().line, 11);
        // 12 lines, 11 visible, margin 5
        assert!(s.scroll() <= 6);
        assert!(s.scroll() >= 11 - 9);
    }

    #[test]
    fn test_open_file_is_a_request() {
        let mut s = session("keep me");
        let damage = s.apply_command(EditorCommand::OpenFile("other.txt".into()), &METRICS);
        assert_eq!(damage.request, Some(CoreIoRequest::Open("other.txt".into())));
        assert_eq!(s.document().as_string(), "keep me");
    }

    #[test]
    fn test_toggle_whitespace_reclamps_cursor() {
        let mut s = session("ab\r\ncd");
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        assert_eq!(s.cursor(), Cursor::new(0, 3));
        s.apply_command(EditorCommand::ToggleDrawWhitespace, &METRICS);
        assert!(s.options().draw_whitespace);
        assert_eq!(s.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_tab_width_commands() {
        let mut s = session("");
        s.apply_command(EditorCommand::SetTabWidth(0), &METRICS);
        assert_eq!(s.options().tab_spaces, 1);
        s.apply_command(EditorCommand::AdjustTabWidth(-1), &METRICS);
        assert_eq!(s.options().tab_spaces, 1);
        let damage = s.apply_command(EditorCommand::AdjustTabWidth(2), &METRICS);
        assert_eq!(s.options().tab_spaces, 3);
        assert!(damage.relayout);
    }

    #[test]
    fn test_selection_anchor_follows_edits() {
        let mut s = session("abc\ndef");
        s.apply_command(EditorCommand::MoveDown, &METRICS);
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        s.apply_command(EditorCommand::StartSelection, &METRICS);
        assert_eq!(s.select_cursor(), Some(Cursor::new(1, 2)));
        s.apply_command(EditorCommand::MoveLeft, &METRICS);
        s.apply_command(EditorCommand::MoveLeft, &METRICS);

        // joining carries the anchor onto the line above, still after "de"
        s.apply_command(EditorCommand::DeletePrev, &METRICS);
        assert_eq!(s.document().as_string(), "abcdef");
        assert_eq!(s.cursor(), Cursor::new(0, 3));
        assert_eq!(s.select_cursor(), Some(Cursor::new(0, 5)));

        s.apply_command(EditorCommand::InsertChar('x'), &METRICS);
        assert_eq!(s.select_cursor(), Some(Cursor::new(0, 6)));

        s.apply_command(EditorCommand::InsertNewline, &METRICS);
        assert_eq!(s.document().as_string(), "abcx\ndef");
        assert_eq!(s.select_cursor(), Some(Cursor::new(1, 2)));

        s.apply_command(EditorCommand::DeleteNext, &METRICS);
        assert_eq!(s.select_cursor(), Some(Cursor::new(1, 1)));

        s.apply_command(EditorCommand::CancelSelection, &METRICS);
        assert_eq!(s.selection(), None);
    }

    #[test]
    fn test_selection_anchor_at_line_end_after_join() {
        let mut s = session("abc\ndef");
        s.apply_command(EditorCommand::MoveDown, &METRICS);
        for _ in 0..3 {
            s.apply_command(EditorCommand::MoveRight, &METRICS);
        }
        s.apply_command(EditorCommand::StartSelection, &METRICS);
        for _ in 0..3 {
            s.apply_command(EditorCommand::MoveLeft, &METRICS);
        }
        s.apply_command(EditorCommand::DeletePrev, &METRICS);
        assert_eq!(s.select_cursor(), Some(Cursor::new(0, 6)));
    }

    #[test]
    fn test_backspace_fuses_split_terminator_pair() {
        let mut s = session("x\ry\n");
        s.apply_command(EditorCommand::MoveDown, &METRICS);
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        let damage = s.apply_command(EditorCommand::DeletePrev, &METRICS);

        assert_eq!(s.document().line_count(), 1);
        assert_eq!(s.document().as_string(), "x\r\n");
        assert_eq!(s.cursor(), Cursor::new(0, 1));
        assert_eq!(damage.text, Some(TextDamage::From(0)));

        let reloaded = Document::decode(&s.document().to_utf8(false)).document;
        assert_eq!(reloaded.lines(), s.document().lines());
    }

    #[test]
    fn test_nearest_pixel_vertical_move() {
        let options = EditorOptions {
            vertical_move: VerticalMove::NearestPixel,
            ..EditorOptions::default()
        };
        let mut s = EditorSession::new(Viewport::new(400.0, 200.0), options);
        // wide characters are two cells each
        s.load_bytes("abcd\nあい\nabcd".as_bytes());
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        s.apply_command(EditorCommand::MoveRight, &METRICS);
        s.apply_command(EditorCommand::MoveDown, &METRICS);
        // x = 30 sits between columns 1 (20) and 2 (40); ties go left
        assert_eq!(s.cursor(), Cursor::new(1, 1));
        s.apply_command(EditorCommand::MoveDown, &METRICS);
        assert_eq!(s.cursor(), Cursor::new(2, 3));
    }

    #[test]
    fn test_smooth_scroll_ticks_to_target() {
        let mut s = session(&numbered(100));
        let damage = s.apply_command(EditorCommand::MouseScroll(3), &METRICS);
        assert!(damage.continuous_redraw);
        let mut ticks = 0;
        loop {
            let damage = s.tick(1.0 / 60.0);
            ticks += 1;
            if !damage.continuous_redraw {
                break;
            }
            assert!(ticks < 100);
        }
        assert_eq!(s.smooth_scroll(), 9.0);
    }

    #[test]
    fn test_without_smooth_scroll_jumps() {
        let options = EditorOptions {
            smooth_scroll: false,
            ..EditorOptions::default()
        };
        let mut s = EditorSession::new(Viewport::new(400.0, 210.0), options);
        s.load_bytes(numbered(100).as_bytes());
        let damage = s.apply_command(EditorCommand::MouseScroll(2), &METRICS);
        assert!(!damage.continuous_redraw);
        assert_eq!(s.smooth_scroll(), 6.0);
    }

    #[test]
    fn test_bom_is_kept_on_save() {
        let mut s = EditorSession::new(Viewport::new(100.0, 100.0), EditorOptions::default());
        let report = s.load_bytes(&[0xEF, 0xBB, 0xBF, b'h', b'i']);
        assert!(report.had_bom);
        assert_eq!(s.to_bytes(), [0xEF, 0xBB, 0xBF, b'h', b'i']);
    }

    #[test]
    fn test_newline_option_overrides_document() {
        let options = EditorOptions {
            newline: Some(Newline::CrLf),
            ..EditorOptions::default()
        };
        let mut s = EditorSession::new(Viewport::new(100.0, 100.0), options);
        s.load_bytes(b"ab\ncd");
        s.apply_command(EditorCommand::InsertNewline, &METRICS);
        assert_eq!(s.document().as_string(), "\r\nab\ncd");
    }

    #[test]
    fn test_resize_changes_visible_lines() {
        let mut s = session(&numbered(50));
        for _ in 0..8 {
            s.apply_command(EditorCommand::MoveDown, &METRICS);
        }
        assert_eq!(s.scroll(), 0);
        let damage = s.apply_command(EditorCommand::Resize { width: 400.0, height: 100.0 }, &METRICS);
        assert!(damage.relayout);
        // five rows keep the cursor within [scroll, scroll + 3]
        assert_eq!(s.scroll(), 5);
    }

    #[test]
    fn test_place_cursor_clamps() {
        let mut s = session("abc\nd");
        let damage = s.place_cursor(Cursor::new(5, 9), &METRICS);
        assert_eq!(s.cursor(), Cursor::new(1, 1));
        assert!(damage.cursor_moved);
    }
}
