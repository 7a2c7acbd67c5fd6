use screenflow_engine::paint::Color;

use crate::error::StyleError;

use super::types::{BoxStyle, ButtonStyle, FontStyle};

/// The part of a screen style a declaration writes into.
pub enum StyleTarget<'a> {
    /// Selector without a component: the screen itself.
    Base(&'a mut BoxStyle),
    /// `primary` or `secondary`.
    Font(&'a mut FontStyle, &'static str),
    Button(&'a mut ButtonStyle),
}

impl StyleTarget<'_> {
    pub fn component(&self) -> &'static str {
        match self {
            StyleTarget::Base(_) => "screen",
            StyleTarget::Font(_, name) => *name,
            StyleTarget::Button(_) => "button",
        }
    }

    /// Box part of the target, if it has one.
    pub fn box_style(&mut self) -> Option<&mut BoxStyle> {
        match self {
            StyleTarget::Base(b) => Some(&mut **b),
            StyleTarget::Button(b) => Some(&mut b.frame),
            StyleTarget::Font(..) => None,
        }
    }

    /// Font part of the target, if it has one.
    pub fn font_style(&mut self) -> Option<&mut FontStyle> {
        match self {
            StyleTarget::Font(f, _) => Some(&mut **f),
            StyleTarget::Button(b) => Some(&mut b.font),
            StyleTarget::Base(_) => None,
        }
    }
}

/// Applies one declaration value to a target.
pub type PropertyParser = Box<dyn Fn(&str, StyleTarget<'_>) -> Result<(), StyleError>>;

pub(crate) fn builtin() -> Vec<(&'static str, PropertyParser)> {
    vec![
        ("background-color", Box::new(background_color) as PropertyParser),
        ("padding", Box::new(padding) as PropertyParser),
        ("color", Box::new(color) as PropertyParser),
        ("font-size", Box::new(font_size) as PropertyParser),
        ("font-family", Box::new(font_family) as PropertyParser),
    ]
}

fn unsupported(property: &str, target: &StyleTarget<'_>) -> StyleError {
    StyleError::Unsupported { property: property.to_string(), component: target.component() }
}

fn invalid(property: &str, value: &str, reason: impl Into<String>) -> StyleError {
    StyleError::InvalidValue {
        property: property.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn parse_color(property: &str, value: &str) -> Result<Color, StyleError> {
    Color::parse(value).map_err(|e| invalid(property, value, e.to_string()))
}

/// Largest length a declaration may set.
pub const MAX_LENGTH: u32 = 10_000;

/// Pixel length in `0..=MAX_LENGTH`, with or without a `px` suffix.
/// Fractions round.
pub fn parse_length(property: &str, value: &str) -> Result<u32, StyleError> {
    let number = value.trim();
    let number = number.strip_suffix("px").unwrap_or(number).trim_end();
    match number.parse::<f32>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n.round() <= MAX_LENGTH as f32 => Ok(n.round() as u32),
        Ok(n) if n.is_finite() && n >= 0.0 => {
            Err(invalid(property, value, format!("must be at most {MAX_LENGTH}px")))
        }
        Ok(_) => Err(invalid(property, value, "must be a non-negative number")),
        Err(_) => Err(invalid(property, value, "expected a number of pixels")),
    }
}

fn background_color(value: &str, mut target: StyleTarget<'_>) -> Result<(), StyleError> {
    let parsed = parse_color("background-color", value)?;
    let err = unsupported("background-color", &target);
    target.box_style().ok_or(err)?.background_color = Some(parsed);
    Ok(())
}

fn padding(value: &str, mut target: StyleTarget<'_>) -> Result<(), StyleError> {
    let parsed = parse_length("padding", value)?;
    let err = unsupported("padding", &target);
    target.box_style().ok_or(err)?.padding = Some(parsed);
    Ok(())
}

fn color(value: &str, mut target: StyleTarget<'_>) -> Result<(), StyleError> {
    let parsed = parse_color("color", value)?;
    let err = unsupported("color", &target);
    target.font_style().ok_or(err)?.color = Some(parsed);
    Ok(())
}

fn font_size(value: &str, mut target: StyleTarget<'_>) -> Result<(), StyleError> {
    let parsed = parse_length("font-size", value)?;
    if parsed == 0 {
        return Err(invalid("font-size", value, "must be at least one pixel"));
    }
    let err = unsupported("font-size", &target);
    target.font_style().ok_or(err)?.size = Some(parsed);
    Ok(())
}

/// First family of a comma-separated list, quotes removed.
fn font_family(value: &str, mut target: StyleTarget<'_>) -> Result<(), StyleError> {
    let first = value.split(',').next().unwrap_or_default().trim();
    let family = first.trim_matches(|c| c == '"' || c == '\'').trim();
    if family.is_empty() {
        return Err(invalid("font-family", value, "empty family name"));
    }
    let err = unsupported("font-family", &target);
    target.font_style().ok_or(err)?.family = Some(family.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── values ────────────────────────────────────────────────────────────

    #[test]
    fn lengths_accept_px_suffix_and_fractions() {
        assert_eq!(parse_length("padding", "12"), Ok(12));
        assert_eq!(parse_length("padding", " 12px "), Ok(12));
        assert_eq!(parse_length("padding", "7.6"), Ok(8));
        assert!(parse_length("padding", "-3").is_err());
        assert!(parse_length("padding", "wide").is_err());
    }

    #[test]
    fn lengths_above_the_limit_are_invalid() {
        assert_eq!(parse_length("padding", "10000px"), Ok(MAX_LENGTH));
        let err = parse_length("padding", "3000000000px").unwrap_err();
        assert!(matches!(err, StyleError::InvalidValue { ref property, .. } if property == "padding"));
        assert!(parse_length("font-size", "1e30").is_err());
    }

    #[test]
    fn family_takes_first_unquoted_name() {
        let mut font = FontStyle::default();
        font_family("'DejaVu Sans', arial", StyleTarget::Font(&mut font, "primary")).unwrap();
        assert_eq!(font.family.as_deref(), Some("DejaVu Sans"));
    }

    #[test]
    fn zero_font_size_is_invalid() {
        let mut font = FontStyle::default();
        assert!(font_size("0", StyleTarget::Font(&mut font, "primary")).is_err());
        assert_eq!(font.size, None);
    }

    // ── component support ─────────────────────────────────────────────────

    #[test]
    fn base_rejects_font_properties() {
        let mut base = BoxStyle::default();
        let err = color("red", StyleTarget::Base(&mut base)).unwrap_err();
        assert_eq!(
            err,
            StyleError::Unsupported { property: "color".into(), component: "screen" }
        );
    }

    #[test]
    fn fonts_reject_box_properties() {
        let mut font = FontStyle::default();
        let err = padding("4", StyleTarget::Font(&mut font, "secondary")).unwrap_err();
        assert!(matches!(err, StyleError::Unsupported { component: "secondary", .. }));
    }

    #[test]
    fn button_accepts_everything() {
        let mut button = ButtonStyle::default();
        for (name, parser) in builtin() {
            let value = match name {
                "background-color" | "color" => "#123456",
                "font-family" => "mono",
                _ => "9",
            };
            parser(value, StyleTarget::Button(&mut button)).unwrap();
        }
        assert_eq!(button.frame.padding, Some(9));
        assert_eq!(button.frame.background_color, Some(Color::rgb(0x12, 0x34, 0x56)));
        assert_eq!(button.font.size, Some(9));
        assert_eq!(button.font.family.as_deref(), Some("mono"));
    }
}
