//! Colors and per-level color maps for decorated output

use super::error::{LoggerError, Result};
use super::log_level::Level;
use std::collections::HashMap;

/// An RGB color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse six hex digits, optionally prefixed with `#`.
    ///
    /// ```
    /// use rust_category_logger::core::Color;
    ///
    /// let red = Color::from_hex("#FF0000").unwrap();
    /// assert_eq!(red.to_rgb8(), (255, 0, 0));
    /// ```
    pub fn from_hex(input: &str) -> Result<Self> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LoggerError::invalid_color(input));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<f64> {
            u8::from_str_radix(&hex[range], 16)
                .map(|byte| f64::from(byte) / 255.0)
                .map_err(|_| LoggerError::invalid_color(input))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Channels scaled back to bytes, clamped to `[0, 255]`
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Foreground and background for one level; an absent channel is left at the
/// terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorSpec {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl ColorSpec {
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
        }
    }

    pub const fn new(fg: Option<Color>, bg: Option<Color>) -> Self {
        Self { fg, bg }
    }
}

/// Levels missing from the map are written undecorated.
pub type ColorMap = HashMap<Level, ColorSpec>;

/// Foreground colors used by the console destination out of the box.
pub fn default_color_map() -> ColorMap {
    const PALETTE: [(Level, (u8, u8, u8)); 6] = [
        (Level::Severe, (0xFF, 0x00, 0x00)),
        (Level::Error, (0xFF, 0x85, 0x03)),
        (Level::Warning, (0xFF, 0x03, 0xFB)),
        (Level::Info, (0x44, 0x44, 0x44)),
        (Level::Debug, (0x03, 0x5F, 0xFF)),
        (Level::Verbose, (0x66, 0x66, 0x66)),
    ];

    PALETTE
        .iter()
        .map(|&(level, (r, g, b))| {
            let color = Color::new(
                f64::from(r) / 255.0,
                f64::from(g) / 255.0,
                f64::from(b) / 255.0,
            );
            (level, ColorSpec::fg(color))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_normalizes_channels() {
        let color = Color::from_hex("FF8000").unwrap();
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < f64::EPSILON);
        assert_eq!(color.b, 0.0);

        assert_eq!(Color::from_hex("#035fff").unwrap().to_rgb8(), (3, 95, 255));
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("GG0000").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#ff00ff00").is_err());
    }

    #[test]
    fn test_default_map_covers_loggable_levels() {
        let map = default_color_map();
        assert!(!map.contains_key(&Level::Off));
        for level in &Level::ALL[1..] {
            assert!(map[level].fg.is_some(), "missing color for {}", level);
        }
        assert_eq!(map[&Level::Severe].fg.unwrap().to_rgb8(), (255, 0, 0));
    }
}
