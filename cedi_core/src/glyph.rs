//! Glyph metrics supplied by the font backend

use alloc::collections::BTreeMap;
use unicode_width::UnicodeWidthChar;

use crate::options::DEFAULT_FALLBACK_GLYPH;

/// Per-character measurements of the active font
pub trait GlyphMetrics {
    /// Horizontal advance, `None` when the font has no glyph for `ch`
    fn advance_width(&self, ch: char) -> Option<f32>;

    fn line_height(&self) -> f32;

    /// Glyph drawn in place of missing ones
    fn missing_glyph_fallback(&self) -> char {
        DEFAULT_FALLBACK_GLYPH
    }

    fn is_monospace(&self) -> bool;
}

/// Fixed cell grid; wide characters take two cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub cell_width: f32,
    pub line_height: f32,
}

impl MonospaceMetrics {
    pub const fn new(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width,
            line_height,
        }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn advance_width(&self, ch: char) -> Option<f32> {
        if ch.is_control() {
            return None;
        }
        ch.width().map(|cells| cells as f32 * self.cell_width)
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn is_monospace(&self) -> bool {
        true
    }
}

/// Explicit advance per character, as loaded from a font atlas
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphTable {
    advances: BTreeMap<char, f32>,
    line_height: f32,
    fallback: Option<char>,
}

impl GlyphTable {
    pub fn new(line_height: f32) -> Self {
        Self {
            advances: BTreeMap::new(),
            line_height,
            fallback: None,
        }
    }

    /// Table covering printable ASCII with a single advance
    pub fn ascii(advance: f32, line_height: f32) -> Self {
        let mut table = Self::new(line_height);
        for ch in ' '..='~' {
            table.insert(ch, advance);
        }
        table
    }

    pub fn insert(&mut self, ch: char, advance: f32) {
        self.advances.insert(ch, advance);
    }

    pub fn with_glyph(mut self, ch: char, advance: f32) -> Self {
        self.insert(ch, advance);
        self
    }

    pub fn with_fallback(mut self, fallback: char) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn len(&self) -> usize {
        self.advances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advances.is_empty()
    }
}

impl GlyphMetrics for GlyphTable {
    fn advance_width(&self, ch: char) -> Option<f32> {
        self.advances.get(&ch).copied()
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn missing_glyph_fallback(&self) -> char {
        self.fallback.unwrap_or(DEFAULT_FALLBACK_GLYPH)
    }

    fn is_monospace(&self) -> bool {
        let mut advances = self.advances.values();
        match advances.next() {
            Some(first) => advances.all(|advance| advance == first),
            None => true,
        }
    }
}
