//! Value types shared by the compositor, the drag controller and the session.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest font size accepted by the session
pub const MIN_FONT_SIZE: u32 = 10;
/// Largest font size accepted by the session
pub const MAX_FONT_SIZE: u32 = 100;

/// A position in surface pixel space (identical to bitmap pixel space)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Parses `X,Y`
impl FromStr for Point {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| Error::ConfigError(format!("expected X,Y but got '{}'", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f32>()
                .map_err(|e| Error::ConfigError(format!("bad coordinate '{}': {}", v, e)))
        };
        Ok(Point::new(parse(x)?, parse(y)?))
    }
}

/// Opaque RGB color. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);

    /// Parse `#rrggbb` or `#rgb`; the leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex_str = s.trim().trim_start_matches('#');
        let expanded: String = match hex_str.len() {
            3 => hex_str.chars().flat_map(|c| [c, c]).collect(),
            6 => hex_str.to_string(),
            _ => return Err(Error::ConfigError(format!("invalid color '{}'", s))),
        };
        let bytes = hex::decode(&expanded)
            .map_err(|_| Error::ConfigError(format!("invalid color '{}'", s)))?;
        Ok(Rgb(bytes[0], bytes[1], bytes[2]))
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, 255])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.0, self.1, self.2]))
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Rgb::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// Horizontal text alignment relative to the anchor x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(Error::ConfigError(format!("unknown alignment '{}'", other))),
        }
    }
}

/// Text style applied to a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub font_size_px: u32,
    pub color: Rgb,
    pub alignment: Alignment,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_size_px: 40,
            color: Rgb::WHITE,
            alignment: Alignment::Center,
        }
    }
}

/// Outline (stroke) parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: Rgb,
    pub width: f32,
}

/// Which of the two text blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockId {
    Top,
    Bottom,
}

impl BlockId {
    /// Draw order and hit-test priority
    pub const ORDER: [BlockId; 2] = [BlockId::Top, BlockId::Bottom];
}

/// A text block: its content and an optional anchor override.
///
/// `anchor == None` means the compositor substitutes the computed default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub content: String,
    pub anchor: Option<Point>,
}
