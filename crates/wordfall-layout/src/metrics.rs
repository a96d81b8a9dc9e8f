#![forbid(unsafe_code)]

//! Footprint sizing for word-cloud labels.
//!
//! A label renders as `word (count)` on one line. Its width is the display
//! width of that text in terminal-style columns (wide CJK glyphs count
//! double) times a fixed glyph advance.

use unicode_width::UnicodeWidthStr;
use wordfall_core::geometry::Size;

/// Font metrics used to size cloud labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMetrics {
    /// Horizontal advance per display column, in px (default: 10).
    pub glyph_advance: f32,
    /// Label height, in px (default: 28).
    pub line_height: f32,
    /// Padding on each side of the text, in px (default: 6).
    pub padding_x: f32,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            glyph_advance: 10.0,
            line_height: 28.0,
            padding_x: 6.0,
        }
    }
}

impl LabelMetrics {
    /// Display columns of `word (count)`.
    #[must_use]
    pub fn columns(label: &str, count: usize) -> usize {
        let digits = count.checked_ilog10().map_or(1, |d| d as usize + 1);
        // " (" + digits + ")"
        label.width() + digits + 3
    }

    /// Footprint of a label showing `count`.
    #[must_use]
    pub fn footprint(&self, label: &str, count: usize) -> Size {
        let columns = Self::columns(label, count) as f32;
        Size::new(
            columns * self.glyph_advance + 2.0 * self.padding_x,
            self.line_height,
        )
    }
}
