// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fmt;
use std::str::FromStr;

use image::Rgb;

use crate::error::VisError;

/// Color type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Red color.
    pub const RED: Self = Self(255, 0, 0);
    /// Green color.
    pub const GREEN: Self = Self(0, 255, 0);
    /// Blue color.
    pub const BLUE: Self = Self(0, 0, 255);
    /// White color.
    pub const WHITE: Self = Self(255, 255, 255);
    /// Black color.
    pub const BLACK: Self = Self(0, 0, 0);
    /// Light gray, used for scene guides.
    pub const LIGHT_GRAY: Self = Self(200, 200, 200);

    /// Create a new color from RGB values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Convert to an `image` pixel.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.0, self.1, self.2])
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        color.to_rgb()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Named colors accepted on the command line.
const NAMED: [(&str, Color); 10] = [
    ("red", Color::RED),
    ("green", Color::GREEN),
    ("blue", Color::BLUE),
    ("white", Color::WHITE),
    ("black", Color::BLACK),
    ("yellow", Color(255, 255, 0)),
    ("cyan", Color(0, 255, 255)),
    ("magenta", Color(255, 0, 255)),
    ("orange", Color(255, 165, 0)),
    ("gray", Color(128, 128, 128)),
];

impl FromStr for Color {
    type Err = VisError;

    /// Parse `blue`, `rgb(0, 0, 255)` or `#0000ff`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let invalid = || VisError::ConfigError(format!("invalid color '{s}'"));

        if let Some((_, color)) = NAMED.iter().find(|(name, _)| *name == s) {
            return Ok(*color);
        }

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self(channel(0)?, channel(2)?, channel(4)?));
        }

        if let Some(body) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let channels: Vec<u8> = body
                .split(',')
                .map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
                .collect::<Result<_, _>>()?;
            if let [r, g, b] = channels[..] {
                return Ok(Self(r, g, b));
            }
        }

        Err(invalid())
    }
}
