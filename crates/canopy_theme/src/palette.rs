//! Series color derivation from a single base color.

use canopy_core::Color;
use serde::{Deserialize, Serialize};

/// How sibling series colors are spread out from the base color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteStrategy {
    /// Rotate hue; the first series keeps the base color.
    #[default]
    Hue,
    /// Same hue from dark to light.
    Lightness,
    /// Same color with decreasing opacity.
    Opacity,
}

const MAX_HUE_STEP: f32 = 36.0;
const LIGHTNESS_SPREAD: f32 = 0.4;
const MIN_OPACITY: f32 = 0.35;

/// `count` colors derived from `base`.
pub fn series_colors(base: Color, count: usize, strategy: PaletteStrategy) -> Vec<Color> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![base];
    }
    let last = (count - 1) as f32;
    (0..count)
        .map(|i| {
            let f = i as f32 / last;
            match strategy {
                PaletteStrategy::Hue => {
                    let step = (360.0 / count as f32).min(MAX_HUE_STEP);
                    base.shift_hue(step * i as f32)
                }
                PaletteStrategy::Lightness => {
                    let (h, s, l) = base.to_hsl();
                    let l = (l + (f - 0.5) * LIGHTNESS_SPREAD).clamp(0.12, 0.88);
                    Color::from_hsl(h, s, l, base.a)
                }
                PaletteStrategy::Opacity => {
                    base.with_alpha(base.a * (1.0 - f * (1.0 - MIN_OPACITY)))
                }
            }
        })
        .collect()
}

/// Neutral colors for axes, grid lines and text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartInk {
    pub text: Color,
    pub muted: Color,
    pub grid: Color,
    pub axis: Color,
}

impl ChartInk {
    /// Neutrals tinted slightly towards `base`.
    pub fn tinted(base: Color) -> Self {
        let text = Color::from_hex(0x374151);
        let muted = Color::from_hex(0x6B7280);
        let grid = Color::from_hex(0xE5E7EB);
        Self {
            text,
            muted: muted.lerp(&base, 0.08),
            grid: grid.lerp(&base, 0.06),
            axis: Color::from_hex(0x9CA3AF).lerp(&base, 0.08),
        }
    }
}

/// Highlight used for hovered shapes.
pub fn hover_color(base: Color) -> Color {
    base.lighten(0.08)
}
