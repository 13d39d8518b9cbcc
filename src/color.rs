//! Colors and the named palettes used by the presets
//!
//! Colors are stored as 8-bit RGB plus a float alpha, parsed from `#rrggbb`
//! strings in configuration files and emitted as CSS `rgba(...)` strings for
//! the canvas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named colors shared by the presets
pub mod palette {
    use super::Rgba;

    /// Indigo (#6366f1)
    pub const INDIGO: Rgba = Rgba::rgb(0x63, 0x66, 0xf1);
    /// Violet (#8b5cf6)
    pub const VIOLET: Rgba = Rgba::rgb(0x8b, 0x5c, 0xf6);
    /// Pink (#ec4899)
    pub const PINK: Rgba = Rgba::rgb(0xec, 0x48, 0x99);
    /// Emerald (#10b981)
    pub const EMERALD: Rgba = Rgba::rgb(0x10, 0xb9, 0x81);
    /// Amber (#f59e0b)
    pub const AMBER: Rgba = Rgba::rgb(0xf5, 0x9e, 0x0b);
    /// White (#ffffff)
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    /// Black (#000000)
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
}

/// An sRGB color with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in [0, 1]
    pub a: f64,
}

impl Rgba {
    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color at a different alpha (clamped to [0, 1])
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Fully transparent variant, used as the outer stop of glow gradients
    pub fn transparent(self) -> Self {
        self.with_alpha(0.0)
    }

    /// CSS color string understood by `CanvasRenderingContext2D`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// `#rrggbb` notation (alpha dropped)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::Invalid {
            field: "color".to_string(),
            reason: format!("expected #rrggbb, got {s:?}"),
        };

        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
