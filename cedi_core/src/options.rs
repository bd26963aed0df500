//! Editor options

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::cursor::{CursorRules, VerticalMove};
use crate::line::Newline;
use crate::viewport::DEFAULT_SCROLL_RATE;

/// Glyph drawn when no glyph exists for a character
pub const DEFAULT_FALLBACK_GLYPH: char = '!';

pub const DEFAULT_TAB_SPACES: usize = 4;

/// Glyphs substituted for whitespace when it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct WhitespaceGlyphs {
    pub tab: char,
    pub space: char,
    pub line_feed: char,
    pub carriage_return: char,
    pub nul: char,
}

impl WhitespaceGlyphs {
    /// Substitute for `ch`, if it is a visualised whitespace character
    pub fn substitute(&self, ch: char) -> Option<char> {
        match ch {
            '\t' => Some(self.tab),
            ' ' => Some(self.space),
            '\n' => Some(self.line_feed),
            '\r' => Some(self.carriage_return),
            '\0' => Some(self.nul),
            _ => None,
        }
    }
}

impl Default for WhitespaceGlyphs {
    fn default() -> Self {
        Self {
            tab: '→',
            space: '·',
            line_feed: '¶',
            carriage_return: '¤',
            nul: '∅',
        }
    }
}

/// Runtime-adjustable editor behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorOptions {
    pub draw_whitespace: bool,
    /// Tab stop distance in space widths, never below 1
    pub tab_spaces: usize,
    /// Fraction of a screenful that may be scrolled past either end
    pub overscroll_fraction: f32,
    pub smooth_scroll: bool,
    /// Smooth scroll interpolation per 60 Hz frame
    pub scroll_rate: f32,
    pub mouse_scroll_lines: u32,
    /// Keep the bottom row free (e.g. for a status line)
    pub reserve_bottom_row: bool,
    pub vertical_move: VerticalMove,
    pub min_cursor_width: f32,
    /// Newline for new line breaks; `None` keeps the loaded document's own
    pub newline: Option<Newline>,
    pub whitespace: WhitespaceGlyphs,
}

impl EditorOptions {
    pub fn cursor_rules(&self) -> CursorRules {
        CursorRules {
            draw_whitespace: self.draw_whitespace,
            vertical_move: self.vertical_move,
        }
    }

    pub fn set_tab_spaces(&mut self, tab_spaces: usize) {
        self.tab_spaces = tab_spaces.max(1);
    }

    pub fn adjust_tab_spaces(&mut self, delta: i32) {
        let adjusted = (self.tab_spaces as i64).saturating_add(i64::from(delta)).max(1);
        self.tab_spaces = usize::try_from(adjusted).unwrap_or(usize::MAX);
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            draw_whitespace: false,
            tab_spaces: DEFAULT_TAB_SPACES,
            overscroll_fraction: 0.5,
            smooth_scroll: true,
            scroll_rate: DEFAULT_SCROLL_RATE,
            mouse_scroll_lines: 3,
            reserve_bottom_row: false,
            vertical_move: VerticalMove::ClampColumn,
            min_cursor_width: 2.0,
            newline: None,
            whitespace: WhitespaceGlyphs::default(),
        }
    }
}
