//! Layout generation
//!
//! Turns the visible part of a document into per-character screen positions.
//! The same positions drive rendering, the cursor rectangle and hit-testing,
//! so all three always agree.

use alloc::vec::Vec;

use crate::cursor::{nearest_column, Cursor};
use crate::document::Document;
use crate::glyph::GlyphMetrics;
use crate::line::Line;
use crate::math;
use crate::options::EditorOptions;
use crate::viewport::{visible_line_count, Viewport};

/// How a laid-out glyph should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    Text,
    /// Substitute for a whitespace character
    Whitespace,
    /// Fallback for a character the font lacks
    Missing,
}

/// A glyph to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    /// Column of the source character
    pub column: usize,
    /// Character to draw (may differ from the source character)
    pub glyph: char,
    pub x: f32,
    pub kind: GlyphKind,
}

/// Screen rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One laid-out document line
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    pub line: usize,
    pub y: f32,
    /// x of every column, one more than the line length (end-of-line slot)
    pub positions: Vec<f32>,
    pub glyphs: Vec<PlacedGlyph>,
    /// Highest column the cursor may take on this line
    pub max_column: usize,
}

impl LayoutLine {
    pub fn x_of(&self, column: usize) -> Option<f32> {
        self.positions.get(column).copied()
    }

    /// Right edge of the last column
    pub fn width(&self) -> f32 {
        self.positions.last().copied().unwrap_or(0.0)
    }
}

/// Positions and glyphs for every visible line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub lines: Vec<LayoutLine>,
    pub line_height: f32,
    pub min_cursor_width: f32,
    /// Characters drawn with the fallback glyph
    pub missing_glyphs: usize,
}

impl Layout {
    pub fn line(&self, index: usize) -> Option<&LayoutLine> {
        self.lines.iter().find(|laid_out| laid_out.line == index)
    }

    /// Cursor rectangle, if the cursor line was laid out
    pub fn cursor_rect(&self, cursor: Cursor) -> Option<Rect> {
        let laid_out = self.line(cursor.line)?;
        let x = laid_out.x_of(cursor.column)?;
        let next = laid_out.x_of(cursor.column + 1).unwrap_or(x);
        Some(Rect {
            x,
            y: laid_out.y,
            width: (next - x).max(self.min_cursor_width),
            height: self.line_height,
        })
    }

    /// Cursor position under a point, nearest column on that row
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Cursor> {
        let laid_out = self
            .lines
            .iter()
            .find(|laid_out| y >= laid_out.y && y < laid_out.y + self.line_height)?;
        let column = nearest_column(&laid_out.positions, x, laid_out.max_column);
        Some(Cursor::new(laid_out.line, column))
    }
}

struct LineWalk {
    positions: Vec<f32>,
    glyphs: Vec<PlacedGlyph>,
    missing: usize,
}

fn walk_line(line: &Line, metrics: &dyn GlyphMetrics, options: &EditorOptions) -> LineWalk {
    let fallback = metrics.missing_glyph_fallback();
    let fallback_advance = metrics.advance_width(fallback).unwrap_or(0.0);
    let space_advance = metrics.advance_width(' ').unwrap_or(fallback_advance);
    let tab_stop = options.tab_spaces.max(1) as f32 * space_advance;

    let mut walk = LineWalk {
        positions: Vec::with_capacity(line.len() + 1),
        glyphs: Vec::new(),
        missing: 0,
    };
    let mut x = 0.0f32;

    for (column, &ch) in line.text().iter().enumerate() {
        walk.positions.push(x);

        let substitute = options.whitespace.substitute(ch);
        let (drawn, kind) = match substitute {
            Some(glyph) if options.draw_whitespace => (Some(glyph), GlyphKind::Whitespace),
            Some(_) => (None, GlyphKind::Whitespace),
            None => (Some(ch), GlyphKind::Text),
        };

        let mut advance = match ch {
            '\t' => {
                if tab_stop > 0.0 {
                    (math::floor(x / tab_stop) + 1.0) * tab_stop - x
                } else {
                    0.0
                }
            }
            ' ' => space_advance,
            _ => 0.0,
        };

        if let Some(mut glyph) = drawn {
            let mut kind = kind;
            let glyph_advance = match metrics.advance_width(glyph) {
                Some(width) => width,
                None => {
                    walk.missing += 1;
                    glyph = fallback;
                    kind = GlyphKind::Missing;
                    fallback_advance
                }
            };
            if ch != '\t' && ch != ' ' {
                advance = glyph_advance;
            }
            walk.glyphs.push(PlacedGlyph {
                column,
                glyph,
                x,
                kind,
            });
        }
        x += advance;
    }
    walk.positions.push(x);
    walk
}

/// x position of every column of a line (end-of-line slot included)
pub fn line_positions(line: &Line, metrics: &dyn GlyphMetrics, options: &EditorOptions) -> Vec<f32> {
    walk_line(line, metrics, options).positions
}

/// Lay out the lines visible at `scroll` while the view is drawn at `smooth_scroll`.
///
/// Lines between the two are included so an animated frame has no gaps.
pub fn generate_layout(
    doc: &Document,
    scroll: i64,
    smooth_scroll: f32,
    viewport: Viewport,
    metrics: &dyn GlyphMetrics,
    options: &EditorOptions,
) -> Layout {
    let line_height = metrics.line_height();
    let visible = visible_line_count(viewport.height, line_height, options.reserve_bottom_row) as i64;

    let top = (scroll as f32).min(smooth_scroll);
    let bottom = (scroll as f32).max(smooth_scroll);
    let first = (math::floor(top) as i64).max(0);
    let end = (math::ceil(bottom) as i64 + visible).min(doc.line_count() as i64);

    let mut layout = Layout {
        lines: Vec::new(),
        line_height,
        min_cursor_width: options.min_cursor_width,
        missing_glyphs: 0,
    };

    for index in first..end {
        let index = index as usize;
        let Some(line) = doc.line(index) else {
            break;
        };
        let walk = walk_line(line, metrics, options);
        layout.missing_glyphs += walk.missing;
        layout.lines.push(LayoutLine {
            line: index,
            y: (index as f32 - smooth_scroll) * line_height,
            positions: walk.positions,
            glyphs: walk.glyphs,
            max_column: line.max_cursor_column(options.draw_whitespace),
        });
    }
    layout
}
