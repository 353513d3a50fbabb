//! Current theme selection.
//!
//! A `ThemeState` is owned by whichever component lets the user pick a color
//! and is handed down to charts by value. Nothing here is global.

use canopy_core::{Color, ColorError};

use crate::palette::{series_colors, ChartInk, PaletteStrategy};
use crate::presets::ThemePreset;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeState {
    color: Color,
    preset: Option<ThemePreset>,
}

impl ThemeState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            preset: ThemePreset::all().iter().copied().find(|p| p.base() == color),
        }
    }

    pub fn from_preset(preset: ThemePreset) -> Self {
        Self {
            color: preset.base(),
            preset: Some(preset),
        }
    }

    /// Parse a `#rrggbb` color or a preset id.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        if let Some(preset) = ThemePreset::from_id(value) {
            return Ok(Self::from_preset(preset));
        }
        Color::parse_hex(value).map(Self::new)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The preset whose base is the current color, if any.
    pub fn preset(&self) -> Option<ThemePreset> {
        self.preset
    }

    pub fn set_color(&mut self, color: Color) {
        tracing::debug!(color = %color.to_hex_string(), "theme color changed");
        *self = Self::new(color);
    }

    pub fn select_preset(&mut self, preset: ThemePreset) {
        tracing::debug!(preset = preset.id(), "theme preset selected");
        *self = Self::from_preset(preset);
    }

    pub fn series_colors(&self, count: usize, strategy: PaletteStrategy) -> Vec<Color> {
        series_colors(self.color, count, strategy)
    }

    pub fn ink(&self) -> ChartInk {
        ChartInk::tinted(self.color)
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::from_preset(ThemePreset::default())
    }
}

impl From<ThemePreset> for ThemeState {
    fn from(preset: ThemePreset) -> Self {
        Self::from_preset(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_hex_resolves_preset() {
        let t = ThemeState::parse("#0EA5E9").unwrap();
        assert_eq!(t.preset(), Some(ThemePreset::Ocean));
        let t = ThemeState::parse("#123456").unwrap();
        assert_eq!(t.preset(), None);
    }

    #[test]
    fn preset_id_parses() {
        let t = ThemeState::parse("ruby").unwrap();
        assert_eq!(t.color(), ThemePreset::Ruby.base());
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(ThemeState::parse("#12").is_err());
        assert!(ThemeState::parse("").is_err());
    }

    #[test]
    fn selection_replaces_color() {
        let mut t = ThemeState::default();
        assert_eq!(t.preset(), Some(ThemePreset::Forest));
        t.select_preset(ThemePreset::Gold);
        assert_eq!(t.color(), ThemePreset::Gold.base());
        t.set_color(Color::BLACK);
        assert_eq!(t.preset(), None);
    }
}
