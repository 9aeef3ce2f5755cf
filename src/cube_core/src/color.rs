use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// An RGBA facelet color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorParseError {
    #[error("Unknown color `{0}`")]
    Unknown(String),
    #[error("Invalid hex color `{0}`")]
    Hex(String),
    #[error("Color channel {0} is outside of [0, 1]")]
    Channel(f64),
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    const NAMED: [(&'static str, char, Color); 11] = [
        ("black", 'K', Color::BLACK),
        ("white", 'W', Color::WHITE),
        ("red", 'R', Color::RED),
        ("orange", 'O', Color::ORANGE),
        ("yellow", 'Y', Color::YELLOW),
        ("green", 'G', Color::GREEN),
        ("blue", 'B', Color::BLUE),
        ("cyan", 'C', Color::CYAN),
        ("magenta", 'M', Color::MAGENTA),
        ("purple", 'P', Color::PURPLE),
        ("gray", 'A', Color::GRAY),
    ];

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Converts unit interval channels, rounding to the nearest byte.
    #[allow(clippy::cast_sign_loss)]
    pub fn from_unit_rgba(r: f64, g: f64, b: f64, a: f64) -> Result<Self, ColorParseError> {
        let channel = |value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok((value * 255.0).round() as u8)
            } else {
                Err(ColorParseError::Channel(value))
            }
        };
        Ok(Color {
            r: channel(r)?,
            g: channel(g)?,
            b: channel(b)?,
            a: channel(a)?,
        })
    }

    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, _, color)| *color == self)
            .map(|(name, _, _)| *name)
    }

    /// Single letter used by compact renderings, `?` for unnamed colors.
    #[must_use]
    pub fn letter(self) -> char {
        Self::NAMED
            .iter()
            .find(|(_, _, color)| *color == self)
            .map_or('?', |(_, letter, _)| *letter)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts a color name, its single letter, `#rrggbb[aa]`, or
    /// `r,g,b[,a]` unit interval channels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            let err = || ColorParseError::Hex(s.to_owned());
            if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
                return Err(err());
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
            return Ok(Color {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: if hex.len() == 8 { byte(6)? } else { 255 },
            });
        }

        if s.contains(',') {
            let channels = s
                .split(',')
                .map(|part| part.trim().parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| ColorParseError::Unknown(s.to_owned()))?;
            return match channels.as_slice() {
                &[r, g, b] => Color::from_unit_rgba(r, g, b, 1.0),
                &[r, g, b, a] => Color::from_unit_rgba(r, g, b, a),
                _ => Err(ColorParseError::Unknown(s.to_owned())),
            };
        }

        let mut chars = s.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            let letter = letter.to_ascii_uppercase();
            if let Some((_, _, color)) = Self::NAMED.iter().find(|(_, l, _)| *l == letter) {
                return Ok(*color);
            }
        }

        Self::NAMED
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, _, color)| *color)
            .ok_or_else(|| ColorParseError::Unknown(s.to_owned()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
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
    fn parse_tokens() {
        assert_eq!("red".parse(), Ok(Color::RED));
        assert_eq!("Orange".parse(), Ok(Color::ORANGE));
        assert_eq!("w".parse(), Ok(Color::WHITE));
        assert_eq!("K".parse(), Ok(Color::BLACK));
        assert_eq!("#00ff00".parse(), Ok(Color::rgb(0, 255, 0)));
        assert_eq!(
            "#10203040".parse(),
            Ok(Color { r: 0x10, g: 0x20, b: 0x30, a: 0x40 })
        );
        assert_eq!("1, 0, 0".parse(), Ok(Color::RED));
        assert_eq!("0,0,1,1".parse(), Ok(Color::BLUE));
        assert!("teal".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert_eq!("2,0,0".parse::<Color>(), Err(ColorParseError::Channel(2.0)));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let odd = Color { r: 1, g: 2, b: 3, a: 4 };
        assert_eq!(odd.to_string(), "#01020304");
        assert_eq!(odd.to_string().parse(), Ok(odd));
        assert_eq!(Color::GREEN.to_string(), "green");
        assert_eq!(Color::GREEN.letter(), 'G');
        assert_eq!(odd.letter(), '?');
    }
}
