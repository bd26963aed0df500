//! Render records for the GPU sink

use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::layout::{GlyphKind, Layout};

/// RGBA colour, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Palette {
    pub text: Color,
    pub whitespace: Color,
    pub missing: Color,
    pub cursor: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::rgb(0.9, 0.9, 0.9),
            whitespace: Color::rgba(0.5, 0.5, 0.5, 0.6),
            missing: Color::rgb(1.0, 0.3, 0.3),
            cursor: Color::rgba(1.0, 1.0, 1.0, 0.8),
        }
    }
}

/// One glyph instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRecord {
    /// Top-left corner in pixels
    pub position: (f32, f32),
    pub glyph: char,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorQuad {
    pub position: (f32, f32),
    pub size: (f32, f32),
    pub color: Color,
}

/// Everything the render sink draws for one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub glyphs: Vec<GlyphRecord>,
    pub cursor: Option<CursorQuad>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty() && self.cursor.is_none()
    }
}

/// Flatten a layout into glyph records and a cursor quad
pub fn build_frame(layout: &Layout, cursor: Cursor, palette: &Palette) -> Frame {
    let glyphs = layout
        .lines
        .iter()
        .flat_map(|laid_out| {
            laid_out.glyphs.iter().map(move |placed| GlyphRecord {
                position: (placed.x, laid_out.y),
                glyph: placed.glyph,
                color: match placed.kind {
                    GlyphKind::Text => palette.text,
                    GlyphKind::Whitespace => palette.whitespace,
                    GlyphKind::Missing => palette.missing,
                },
            })
        })
        .collect();

    let cursor = layout.cursor_rect(cursor).map(|rect| CursorQuad {
        position: (rect.x, rect.y),
        size: (rect.width, rect.height),
        color: palette.cursor,
    });

    Frame { glyphs, cursor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::glyph::GlyphTable;
    use crate::layout::generate_layout;
    use crate::options::EditorOptions;
    use crate::viewport::Viewport;

    #[test]
    fn test_frame_colours_by_kind() {
        let metrics = GlyphTable::ascii(8.0, 16.0).with_glyph('·', 8.0);
        let options = EditorOptions {
            draw_whitespace: true,
            ..EditorOptions::default()
        };
        let doc = Document::from_str("a é");
        let layout = generate_layout(&doc, 0, 0.0, Viewport::new(100.0, 100.0), &metrics, &options);
        let palette = Palette::default();
        let frame = build_frame(&layout, Cursor::new(0, 1), &palette);

        assert_eq!(frame.glyphs.len(), 3);
        assert_eq!(frame.glyphs[0].color, palette.text);
        assert_eq!(frame.glyphs[1].color, palette.whitespace);
        assert_eq!(frame.glyphs[2].color, palette.missing);
        assert_eq!(frame.glyphs[2].glyph, '!');
        assert_eq!(frame.glyphs[2].position, (16.0, 0.0));

        let quad = frame.cursor.unwrap();
        assert_eq!(quad.position, (8.0, 0.0));
        assert_eq!(quad.size, (8.0, 16.0));
    }

    #[test]
    fn test_cursor_off_screen_has_no_quad() {
        let metrics = GlyphTable::ascii(8.0, 16.0);
        let doc = Document::from_str("a\nb\nc");
        // only one 16px row is visible
        let layout = generate_layout(&doc, 0, 0.0, Viewport::new(100.0, 16.0), &metrics, &EditorOptions::default());
        let frame = build_frame(&layout, Cursor::new(2, 0), &Palette::default());
        assert!(frame.cursor.is_none());
        assert_eq!(frame.glyphs.len(), 1);
    }
}
