//! RGBA colors for legends and tile borders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 is opaque)
    pub a: u8,
}

impl Color {
    /// Opaque red (`#FF0000`).
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Opaque green (`#008000`).
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    /// Opaque blue (`#0000FF`).
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Opaque yellow (`#FFFF00`).
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    /// Opaque orange (`#FFA500`).
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply every channel (alpha included) by `factor`.
    ///
    /// Used to fade preview tiles; premultiplied renderers treat the result
    /// as a translucent version of the same color.
    pub fn scale(&self, factor: f32) -> Self {
        let mul = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self {
            r: mul(self.r),
            g: mul(self.g),
            b: mul(self.b),
            a: mul(self.a),
        }
    }

    /// Look up one of the named colors accepted in color schemes.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            "yellow" => Some(Self::YELLOW),
            "orange" => Some(Self::ORANGE),
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "transparent" => Some(Self::TRANSPARENT),
            _ => None,
        }
    }
}

/// Error returned when a color string can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color '{}': expected #RRGGBB, #RRGGBBAA or a color name",
            self.0
        )
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some(hex) = trimmed.strip_prefix('#') else {
            return Self::from_name(trimmed).ok_or_else(|| ParseColorError(s.to_string()));
        };

        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };

        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}
