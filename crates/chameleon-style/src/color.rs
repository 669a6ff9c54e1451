//! RGBA color with CSS parsing and serialization.
//!
//! The sampler works on the string values a style query reports, but
//! deriving the placeholder tint needs real channel math. Parsing uses
//! the `cssparser` tokenizer and accepts the formats computed styles
//! are reported in: hex, a handful of named colors, and rgb()/rgba().

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use crate::error::{Error, Result};

/// An RGBA color with channels in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgba(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::from_rgba(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::from_rgba(0.0, 0.5, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::from_rgba(0.0, 0.0, 1.0, 1.0);
    /// Opaque gray.
    pub const GRAY: Self = Self::from_rgba(0.5, 0.5, 0.5, 1.0);

    /// Create a color from float channels.
    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let expand = |d: u8| d << 4 | d;
        let nibble = |c: u8| (c as char).to_digit(16).map(|d| d as u8);
        let bytes = digits.as_bytes();
        match bytes.len() {
            3 | 4 => {
                let mut channels = [0u8; 4];
                channels[3] = 255;
                for (i, &byte) in bytes.iter().enumerate() {
                    channels[i] = expand(nibble(byte)?);
                }
                Some(Self::from_rgba8(
                    channels[0],
                    channels[1],
                    channels[2],
                    channels[3],
                ))
            }
            6 | 8 => {
                let mut channels = [0u8; 4];
                channels[3] = 255;
                for (i, pair) in bytes.chunks(2).enumerate() {
                    channels[i] = nibble(pair[0])? << 4 | nibble(pair[1])?;
                }
                Some(Self::from_rgba8(
                    channels[0],
                    channels[1],
                    channels[2],
                    channels[3],
                ))
            }
            _ => None,
        }
    }

    /// Return the same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channel-wise comparison with an 8-bit tolerance, for comparing
    /// colors that round-tripped through formatted strings.
    pub fn approx_eq(self, other: Self) -> bool {
        const EPSILON: f32 = 0.5 / 255.0;
        (self.r - other.r).abs() <= EPSILON
            && (self.g - other.g).abs() <= EPSILON
            && (self.b - other.b).abs() <= EPSILON
            && (self.a - other.a).abs() <= EPSILON
    }

    /// Parse a CSS color value.
    pub fn parse(value: &str) -> Result<Self> {
        let mut input = ParserInput::new(value);
        let mut parser = Parser::new(&mut input);
        parse_color(&mut parser).map_err(|_| Error::invalid_color(value))
    }

    /// Format the color the way computed styles report it:
    /// `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(self) -> String {
        let r = (self.r * 255.0).round() as u8;
        let g = (self.g * 255.0).round() as u8;
        let b = (self.b * 255.0).round() as u8;
        if (self.a - 1.0).abs() < f32::EPSILON {
            format!("rgb({r}, {g}, {b})")
        } else {
            let alpha = (self.a * 100.0).round() / 100.0;
            format!("rgba({r}, {g}, {b}, {alpha})")
        }
    }
}

fn parse_color<'i>(parser: &mut Parser<'i, '_>) -> std::result::Result<Color, CssParseError<'i, ()>> {
    parser.skip_whitespace();

    let token = parser.next()?;

    match token.clone() {
        Token::Hash(hash) | Token::IDHash(hash) => {
            let hex_str = format!("#{}", hash);
            Color::from_hex(&hex_str).ok_or_else(|| parser.new_custom_error(()))
        }
        Token::Ident(name) => match name.as_ref().to_lowercase().as_str() {
            "transparent" => Ok(Color::TRANSPARENT),
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "red" => Ok(Color::RED),
            "green" => Ok(Color::GREEN),
            "blue" => Ok(Color::BLUE),
            "gray" | "grey" => Ok(Color::GRAY),
            _ => Err(parser.new_custom_error(())),
        },
        Token::Function(name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            let (r, g, b, a) = parser.parse_nested_block(|p| {
                let r = parse_color_component(p)?;
                p.expect_comma()?;
                let g = parse_color_component(p)?;
                p.expect_comma()?;
                let b = parse_color_component(p)?;
                let a = if p.try_parse(|p| p.expect_comma()).is_ok() {
                    parse_alpha_component(p)?
                } else {
                    1.0
                };
                Ok::<_, CssParseError<'_, ()>>((r, g, b, a))
            })?;
            Ok(Color::from_rgba(r, g, b, a))
        }
        _ => Err(parser.new_custom_error(())),
    }
}

fn parse_color_component<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<f32, CssParseError<'i, ()>> {
    parser.skip_whitespace();
    match parser.next()? {
        Token::Number { value, .. } => Ok(*value / 255.0),
        Token::Percentage { unit_value, .. } => Ok(*unit_value),
        _ => Err(parser.new_custom_error(())),
    }
}

fn parse_alpha_component<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<f32, CssParseError<'i, ()>> {
    parser.skip_whitespace();
    match parser.next()? {
        Token::Number { value, .. } => Ok(value.clamp(0.0, 1.0)),
        Token::Percentage { unit_value, .. } => Ok(*unit_value),
        _ => Err(parser.new_custom_error(())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_formats() {
        assert!(Color::parse("#333").unwrap().approx_eq(Color::from_rgb8(51, 51, 51)));
        assert!(
            Color::parse("#8080ff")
                .unwrap()
                .approx_eq(Color::from_rgb8(128, 128, 255))
        );
        assert!(
            Color::parse("rgb(51, 51, 51)")
                .unwrap()
                .approx_eq(Color::from_rgb8(51, 51, 51))
        );
        assert!(
            Color::parse("rgba(0, 0, 0, 0.45)")
                .unwrap()
                .approx_eq(Color::from_rgba(0.0, 0.0, 0.0, 0.45))
        );
        assert!(Color::parse("transparent").unwrap().approx_eq(Color::TRANSPARENT));
        assert!(Color::parse("not-a-color").is_err());
    }

    #[test]
    fn css_round_trip() {
        assert_eq!(Color::from_rgb8(51, 51, 51).to_css(), "rgb(51, 51, 51)");
        assert_eq!(
            Color::from_rgb8(51, 51, 51).with_alpha(0.45).to_css(),
            "rgba(51, 51, 51, 0.45)"
        );
        let parsed = Color::parse("rgba(51, 51, 51, 0.45)").unwrap();
        assert_eq!(parsed.to_css(), "rgba(51, 51, 51, 0.45)");
    }

    #[test]
    fn with_alpha_clamps() {
        let color = Color::BLACK.with_alpha(1.5);
        assert_eq!(color.a, 1.0);
        let color = Color::BLACK.with_alpha(-0.2);
        assert_eq!(color.a, 0.0);
    }
}
