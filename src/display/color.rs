//! Packed RGBA colors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 32-bit color packed as `0xRRGGBBAA`.
///
/// This is the value layout of SDL's `RGBA8888` packed pixel format, so a color can be
/// written into a texture buffer with `to_ne_bytes()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x000000ff);
    pub const WHITE: Self = Self(0xffffffff);
    pub const RED: Self = Self(0xff0000ff);
    pub const GREEN: Self = Self(0x00ff00ff);
    pub const BLUE: Self = Self(0x0000ffff);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid color `{0}`: expected #RRGGBB, #RRGGBBAA or 0xRRGGBBAA")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| ParseColorError(s.to_string()))?;

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError(s.to_string()))?;
        match hex.len() {
            6 => Ok(Self((value << 8) | 0xff)),
            8 => Ok(Self(value)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// Accepted JSON forms: a hex string or a raw integer
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Text(String),
    Packed(u32),
}

impl TryFrom<ColorRepr> for Color {
    type Error = ParseColorError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Text(s) => s.parse(),
            ColorRepr::Packed(v) => Ok(Self(v)),
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
