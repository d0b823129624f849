use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// An RGBA display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const NAMED: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("gray", Color::rgb(128, 128, 128)),
    ("silver", Color::rgb(192, 192, 192)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("teal", Color::rgb(0, 128, 128)),
    ("ghostwhite", Color::rgb(248, 248, 255)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a color name (`black`, `grey`, ...) or `#rrggbb` / `#rrggbbaa`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let text = input.trim().to_ascii_lowercase();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseError::UnknownColor(input.to_string()));
        }
        let name = if text == "grey" { "gray" } else { text.as_str() };
        NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
            .ok_or_else(|| ParseError::UnknownColor(input.to_string()))
    }

    pub fn name(&self) -> Option<&'static str> {
        NAMED.iter().find(|(_, c)| c == self).map(|(n, _)| *n)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Some(Color {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
        a,
    })
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors() {
        assert_eq!(Color::parse("black").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("Grey").unwrap(), Color::rgb(128, 128, 128));
        assert!(Color::parse("mauve-ish").is_err());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Color::parse("#ff8000").unwrap(), Color::rgb(255, 128, 0));
        let translucent = Color::parse("#10203040").unwrap();
        assert_eq!(translucent.a, 0x40);
        assert_eq!(translucent.to_string(), "#10203040");
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#gg0000").is_err());
    }

    #[test]
    fn display_prefers_names() {
        assert_eq!(Color::WHITE.to_string(), "white");
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
    }
}
