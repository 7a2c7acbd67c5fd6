use std::fmt;

/// Straight-alpha sRGB color, one byte per channel.
///
/// Invariant:
/// - channels are *not* premultiplied; compositing in [`Image::blit`]
///   applies alpha itself.
///
/// [`Image::blit`]: crate::surface::Image
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error returned by [`Color::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}'", self.0)
    }
}

impl std::error::Error for ColorParseError {}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Parses a hex literal (`#rgb`, `#rrggbb`, `#rrggbbaa`) or a CSS color
    /// keyword (`white`, `navy`, ...). Keywords are case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            Self::from_hex(hex).ok_or_else(|| ColorParseError(value.to_string()))
        } else {
            Self::named(value).ok_or_else(|| ColorParseError(value.to_string()))
        }
    }

    /// Parses the digits of a hex literal, without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Looks up a CSS color keyword.
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let color = match name.as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "gray" | "grey" => Self::GRAY,
            "silver" => Self::rgb(192, 192, 192),
            "lightgray" | "lightgrey" => Self::rgb(211, 211, 211),
            "darkgray" | "darkgrey" => Self::rgb(169, 169, 169),
            "red" => Self::rgb(255, 0, 0),
            "maroon" => Self::rgb(128, 0, 0),
            "orange" => Self::rgb(255, 165, 0),
            "yellow" => Self::rgb(255, 255, 0),
            "olive" => Self::rgb(128, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "green" => Self::rgb(0, 128, 0),
            "aqua" | "cyan" => Self::rgb(0, 255, 255),
            "teal" => Self::rgb(0, 128, 128),
            "blue" => Self::rgb(0, 0, 255),
            "navy" => Self::rgb(0, 0, 128),
            "fuchsia" | "magenta" => Self::rgb(255, 0, 255),
            "purple" => Self::rgb(128, 0, 128),
            "pink" => Self::rgb(255, 192, 203),
            "brown" => Self::rgb(165, 42, 42),
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    /// Source-over compositing of `self` onto an opaque-or-not `dst` pixel.
    #[inline]
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let sa = a as u32;
                let da = dst.a as u32 * (255 - sa) / 255;
                let out_a = sa + da;
                let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da) / out_a.max(1)) as u8;
                Color::rgba(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), out_a as u8)
            }
        }
    }

    /// Returns this color with its alpha scaled by `coverage / 255`.
    #[inline]
    pub fn with_coverage(self, coverage: u8) -> Color {
        Color::rgba(self.r, self.g, self.b, ((self.a as u32 * coverage as u32) / 255) as u8)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse("#fff"), Ok(Color::WHITE));
        assert_eq!(Color::parse("#102030"), Ok(Color::rgb(0x10, 0x20, 0x30)));
        assert_eq!(Color::parse("#10203040"), Ok(Color::rgba(0x10, 0x20, 0x30, 0x40)));
    }

    #[test]
    fn parses_keywords_case_insensitively() {
        assert_eq!(Color::parse("Black"), Ok(Color::BLACK));
        assert_eq!(Color::parse("grey"), Ok(Color::GRAY));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse("#xyz").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn over_with_opaque_source_replaces() {
        assert_eq!(Color::BLACK.over(Color::WHITE), Color::BLACK);
    }

    #[test]
    fn over_with_transparent_source_keeps_destination() {
        assert_eq!(Color::TRANSPARENT.over(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn over_half_alpha_blends() {
        let c = Color::rgba(0, 0, 0, 128).over(Color::WHITE);
        assert_eq!(c.a, 255);
        assert!(c.r > 120 && c.r < 135, "got {}", c.r);
    }
}
