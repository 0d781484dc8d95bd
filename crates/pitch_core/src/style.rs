//! Colors, glyphs and pass styles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PitchError;

/// RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREY: Self = Self::rgb(128, 128, 128);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const PURPLE: Self = Self::rgb(128, 0, 128);
    /// First entry of the default line color cycle
    pub const STEEL_BLUE: Self = Self::rgb(31, 119, 180);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid_color(s));
        }
        let named = match trimmed.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "grey" | "gray" => Color::GREY,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "orange" => Color::ORANGE,
            "yellow" => Color::YELLOW,
            "purple" => Color::PURPLE,
            _ => return Err(invalid_color(s)),
        };
        Ok(named)
    }
}

impl TryFrom<String> for Color {
    type Error = PitchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn invalid_color(s: &str) -> PitchError {
    PitchError::Configuration(format!("unrecognized color {:?}", s))
}

/// Point-marker shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Circle,
    Triangle,
    Star,
}

/// Line dash patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    Solid,
    Dashed,
}

/// Pass height category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassType {
    #[default]
    Low,
    Ground,
    High,
}

/// Visual treatment of a pass annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassStyle {
    pub dash: LineDash,
    pub start_glyph: Glyph,
}

impl PassType {
    pub const ALL: [PassType; 3] = [PassType::Low, PassType::Ground, PassType::High];

    pub fn as_str(self) -> &'static str {
        match self {
            PassType::Low => "low",
            PassType::Ground => "ground",
            PassType::High => "high",
        }
    }

    pub fn style(self) -> PassStyle {
        match self {
            PassType::Low => PassStyle { dash: LineDash::Solid, start_glyph: Glyph::Circle },
            PassType::Ground => PassStyle { dash: LineDash::Solid, start_glyph: Glyph::Triangle },
            PassType::High => PassStyle { dash: LineDash::Dashed, start_glyph: Glyph::Star },
        }
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassType {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PassType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PitchError::InvalidPassType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("Gray".parse::<Color>().unwrap(), Color::GREY);
        assert_eq!(" green ".parse::<Color>().unwrap(), Color::GREEN);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!("#1f77b4".parse::<Color>().unwrap(), Color::STEEL_BLUE);
        assert_eq!(Color::STEEL_BLUE.to_hex(), "#1f77b4");
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
        assert!("#+1+2+3".parse::<Color>().is_err());
        assert!("#-1-2-3".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::RED).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: Color = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(back, Color::BLUE);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn test_pass_type_parse() {
        assert_eq!("low".parse::<PassType>().unwrap(), PassType::Low);
        assert_eq!("GROUND".parse::<PassType>().unwrap(), PassType::Ground);
        assert_eq!("high".parse::<PassType>().unwrap(), PassType::High);
        match "diagonal".parse::<PassType>() {
            Err(PitchError::InvalidPassType(tag)) => assert_eq!(tag, "diagonal"),
            other => panic!("expected InvalidPassType, got {:?}", other),
        }
    }

    #[test]
    fn test_pass_styles_have_distinct_glyphs() {
        let glyphs: Vec<Glyph> = PassType::ALL.iter().map(|t| t.style().start_glyph).collect();
        assert_eq!(glyphs, vec![Glyph::Circle, Glyph::Triangle, Glyph::Star]);
        assert_eq!(PassType::default(), PassType::Low);
    }
}
