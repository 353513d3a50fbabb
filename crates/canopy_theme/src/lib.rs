//! Canopy Theme
//!
//! Theme colors for charts: a small catalog of named presets, derivation of
//! per-series colors from one base color, and [`ThemeState`], the explicit
//! owner of the current selection.
//!
//! # Quick Start
//!
//! ```rust
//! use canopy_theme::{PaletteStrategy, ThemePreset, ThemeState};
//!
//! let mut theme = ThemeState::from_preset(ThemePreset::Ocean);
//! let colors = theme.series_colors(3, PaletteStrategy::Lightness);
//! assert_eq!(colors.len(), 3);
//!
//! theme.select_preset(ThemePreset::Sunset);
//! assert_eq!(theme.color(), ThemePreset::Sunset.base());
//! ```

pub mod palette;
pub mod presets;
pub mod state;

pub use palette::{hover_color, series_colors, ChartInk, PaletteStrategy};
pub use presets::ThemePreset;
pub use state::ThemeState;
