//! Text measurement used for label fitting.

use canopy_core::Size;

/// Measures rendered text extents.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> Size;
}

/// Width estimate from an average glyph advance.
///
/// There is no font backend behind SVG output, so labels are fitted against
/// a per-character estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxTextMeasurer {
    pub char_width_em: f32,
    pub line_height_em: f32,
}

impl Default for ApproxTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl TextMeasurer for ApproxTextMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> Size {
        Size::new(
            text.chars().count() as f32 * font_size * self.char_width_em,
            font_size * self.line_height_em,
        )
    }
}
