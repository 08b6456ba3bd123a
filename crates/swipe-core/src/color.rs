use std::fmt;
use std::str::FromStr;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// Straight-alpha RGBA color, components in `[0, 1]`.
///
/// Serialized as a `#RRGGBB` or `#RRGGBBAA` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba(pub Vec4);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba(Vec4::ZERO);
    pub const BLACK: Rgba = Rgba(Vec4::W);
    pub const WHITE: Rgba = Rgba(Vec4::ONE);

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0)
    }

    /// `0xRRGGBB`, fully opaque.
    pub fn from_rgb_u32(rgb: u32) -> Self {
        let [_, r, g, b] = rgb.to_be_bytes();
        Self::from_rgba8(r, g, b, 255)
    }

    pub fn parse_hex(token: &str) -> Result<Self, ColorParseError> {
        let digits = token
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(token.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::Length(token.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit(token.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::Digit(token.to_string()))?;
        Ok(if digits.len() == 6 {
            Self::from_rgb_u32(value)
        } else {
            let [r, g, b, a] = value.to_be_bytes();
            Self::from_rgba8(r, g, b, a)
        })
    }

    pub fn alpha(self) -> f32 {
        self.0.w
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self(self.0.truncate().extend(alpha))
    }

    /// Color channels scaled by alpha.
    pub fn premultiplied(self) -> Vec4 {
        (self.0.truncate() * self.0.w).extend(self.0.w)
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba(self.0.lerp(other.0, t))
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let v = (self.0.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
        [v.x as u8, v.y as u8, v.z as u8, v.w as u8]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}
