//! Color types and utilities

use thiserror::Error;

/// Errors produced while parsing a color string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color string is empty")]
    Empty,

    #[error("invalid hex color `{0}` (expected #RGB, #RRGGBB or #RRGGBBAA)")]
    InvalidHex(String),
}

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgba8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            255,
        )
    }

    /// Parse a CSS-style hex string: `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn parse_hex(s: &str) -> Result<Self, ColorError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ColorError::Empty);
        }
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || ColorError::InvalidHex(s.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255))
            }
            6 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb` (alpha is carried separately as an opacity attribute).
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Linear blend towards `other`.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Hue in degrees [0, 360), saturation and lightness in [0, 1].
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) * 0.5;
        let d = max - min;
        if d.abs() < 1e-6 {
            return (0.0, 0.0, l);
        }
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == self.r {
            (self.g - self.b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };
        ((h * 60.0).rem_euclid(360.0), s, l)
    }

    pub fn from_hsl(h: f32, s: f32, l: f32, a: f32) -> Color {
        let h = h.rem_euclid(360.0) / 360.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Color::rgba(l, l, l, a);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Color::rgba(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            a,
        )
    }

    /// Rotate hue by `degrees`.
    pub fn shift_hue(self, degrees: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Color::from_hsl(h + degrees, s, l, self.a)
    }

    /// Raise HSL lightness by `amount` (0..1).
    pub fn lighten(self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Color::from_hsl(h, s, l + amount, self.a)
    }

    /// Lower HSL lightness by `amount` (0..1).
    pub fn darken(self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Color::from_hsl(h, s, l - amount, self.a)
    }

    /// Scale HSL saturation by `factor`.
    pub fn saturate(self, factor: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Color::from_hsl(h, s * factor, l, self.a)
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        let c = Color::parse_hex("#22C55E").unwrap();
        assert_eq!(c.to_rgba8(), [0x22, 0xC5, 0x5E, 0xFF]);
        let s = Color::parse_hex("fff").unwrap();
        assert_eq!(s.to_rgba8(), [255, 255, 255, 255]);
        let a = Color::parse_hex("#00000080").unwrap();
        assert_eq!(a.to_rgba8()[3], 0x80);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::parse_hex("  "), Err(ColorError::Empty));
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn hsl_round_trips_through_rgb() {
        let c = Color::from_hex(0x22C55E);
        let (h, s, l) = c.to_hsl();
        let back = Color::from_hsl(h, s, l, 1.0);
        assert_eq!(back.to_rgba8(), c.to_rgba8());
    }

    #[test]
    fn hex_string_is_lowercase_rgb() {
        assert_eq!(Color::from_hex(0x22C55E).to_hex_string(), "#22c55e");
    }

    #[test]
    fn hue_shift_wraps() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let (h, _, _) = red.shift_hue(-30.0).to_hsl();
        assert!((h - 330.0).abs() < 0.5);
    }
}
