use serde::Deserialize;
use thiserror::Error;

/// Straight (non-premultiplied) RGBA color with components in [0, 1]
///
/// Components are kept in the same gamma-encoded space a 2-D canvas uses, so
/// `#00e5ff` here blends exactly like `rgba(0, 229, 255, a)` on a web page.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    #[error("color `{0}` must have 3, 6 or 8 hex digits")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn from_srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(hex.to_string()))?;

        let nibble = |c: char| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ColorParseError::BadDigit(hex.to_string()))
        };
        let chars: Vec<char> = digits.chars().collect();

        let bytes: Vec<u8> = match chars.len() {
            3 => chars
                .iter()
                .map(|&c| nibble(c).map(|n| n * 17))
                .collect::<Result<_, _>>()?,
            6 | 8 => chars
                .chunks(2)
                .map(|pair| Ok(nibble(pair[0])? * 16 + nibble(pair[1])?))
                .collect::<Result<_, _>>()?,
            _ => return Err(ColorParseError::BadLength(hex.to_string())),
        };

        let alpha = bytes.get(3).copied().unwrap_or(255);
        Ok(Self::from_srgba(bytes[0], bytes[1], bytes[2], alpha))
    }

    /// Same color with alpha replaced, clamped to [0, 1]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to 8-bit RGBA for vertex upload
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_array()
            .map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

/// Colors used by the default constellation theme
pub mod palette {
    use super::Color;

    /// Link and particle cyan
    pub const CYAN: Color = Color::from_srgba(0, 229, 255, 255);
    /// Page background behind the canvas
    pub const NIGHT: Color = Color::from_srgba(10, 14, 23, 255);
    pub const DEEP_BLUE: Color = Color::from_srgba(17, 24, 39, 255);
    pub const WHITE: Color = Color::from_srgba(255, 255, 255, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let c = Color::from_hex("#00e5ff").unwrap();
        assert_eq!(c, palette::CYAN);
    }

    #[test]
    fn test_parse_short_and_alpha_hex() {
        assert_eq!(Color::from_hex("#fff").unwrap(), palette::WHITE);
        let c = Color::from_hex("#00000080").unwrap();
        assert_eq!(c.to_rgba8(), [0, 0, 0, 128]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Color::from_hex("00e5ff"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            Color::from_hex("#00e5f"),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            Color::from_hex("#00e5fg"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(palette::CYAN.with_alpha(1.5).a, 1.0);
        assert_eq!(palette::CYAN.with_alpha(-0.2).a, 0.0);
    }
}
