//! Built-in theme color presets.

use canopy_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Built-in color preset catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Forest,
    Ocean,
    Sunset,
    Berry,
    Lavender,
    Ruby,
    Gold,
    Slate,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::Ocean => "ocean",
            Self::Sunset => "sunset",
            Self::Berry => "berry",
            Self::Lavender => "lavender",
            Self::Ruby => "ruby",
            Self::Gold => "gold",
            Self::Slate => "slate",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Forest => "Forest",
            Self::Ocean => "Ocean",
            Self::Sunset => "Sunset",
            Self::Berry => "Berry",
            Self::Lavender => "Lavender",
            Self::Ruby => "Ruby",
            Self::Gold => "Gold",
            Self::Slate => "Slate",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 8] = [
            ThemePreset::Forest,
            ThemePreset::Ocean,
            ThemePreset::Sunset,
            ThemePreset::Berry,
            ThemePreset::Lavender,
            ThemePreset::Ruby,
            ThemePreset::Gold,
            ThemePreset::Slate,
        ];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(id))
    }

    /// Base chart color.
    pub fn base(self) -> Color {
        Color::from_hex(self.hex()[1])
    }

    /// Light, base and dark stops used for swatches.
    pub fn gradient(self) -> [Color; 3] {
        self.hex().map(Color::from_hex)
    }

    fn hex(self) -> [u32; 3] {
        match self {
            Self::Forest => [0x4ADE80, 0x22C55E, 0x15803D],
            Self::Ocean => [0x38BDF8, 0x0EA5E9, 0x0369A1],
            Self::Sunset => [0xFB923C, 0xF97316, 0xC2410C],
            Self::Berry => [0xE879F9, 0xD946EF, 0xA21CAF],
            Self::Lavender => [0xA78BFA, 0x8B5CF6, 0x6D28D9],
            Self::Ruby => [0xFB7185, 0xE11D48, 0xBE123C],
            Self::Gold => [0xFACC15, 0xEAB308, 0xA16207],
            Self::Slate => [0x94A3B8, 0x64748B, 0x334155],
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for p in ThemePreset::all() {
            assert_eq!(ThemePreset::from_id(p.id()), Some(*p));
        }
        assert_eq!(ThemePreset::from_id(" OCEAN "), Some(ThemePreset::Ocean));
        assert_eq!(ThemePreset::from_id("teal"), None);
    }

    #[test]
    fn gradient_middle_stop_is_base() {
        for p in ThemePreset::all() {
            assert_eq!(p.gradient()[1], p.base());
        }
        assert_eq!(ThemePreset::Forest.base().to_hex_string(), "#22c55e");
    }
}
