//! Text measurement callback used by layout and markup.
//!
//! Widths are plain `i32` units. The terminal host treats one unit as one
//! cell; a graphical host would return pixels.

use crate::markup::StyleMask;
use unicode_width::UnicodeWidthStr;

/// Measures the rendered width of `text` drawn with `style`.
///
/// Must be deterministic for identical inputs within one layout pass.
pub trait TextMeasure {
    fn measure(&self, text: &str, style: StyleMask) -> i32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, StyleMask) -> i32,
{
    fn measure(&self, text: &str, style: StyleMask) -> i32 {
        self(text, style)
    }
}

/// Measures display width in terminal cells, scaled by `cell_width`.
///
/// Bold and italic do not change cell widths in a terminal, so the style is
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMeasure {
    pub cell_width: i32,
}

impl Default for CellMeasure {
    fn default() -> Self {
        CellMeasure { cell_width: 1 }
    }
}

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str, _style: StyleMask) -> i32 {
        UnicodeWidthStr::width(text) as i32 * self.cell_width
    }
}

/// Display width of a single string in cells.
pub fn cell_width(text: &str) -> i32 {
    UnicodeWidthStr::width(text) as i32
}
