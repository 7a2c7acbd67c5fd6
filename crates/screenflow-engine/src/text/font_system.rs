use std::collections::HashMap;
use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::{Point, Size};
use crate::paint::Color;
use crate::surface::Image;

/// Error returned when font bytes cannot be parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts and the family-name table.
///
/// Family names are matched case-insensitively. The first font loaded becomes
/// the default, used whenever a requested family is unknown.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    families: HashMap<String, FontId>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new(), families: HashMap::new() }
    }

    /// Parses and stores a TrueType or OpenType font without a family name.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Loads a font and registers it under `family`.
    ///
    /// Re-registering a family replaces the previous mapping.
    pub fn load_family(&mut self, family: &str, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let id = self.load_font(bytes)?;
        self.families.insert(family.to_ascii_lowercase(), id);
        log::debug!("font family '{family}' registered as {id:?}");
        Ok(id)
    }

    /// Returns the font registered for `family`, if any.
    pub fn family(&self, family: &str) -> Option<FontId> {
        self.families.get(&family.to_ascii_lowercase()).copied()
    }

    pub fn default_font(&self) -> Option<FontId> {
        (!self.fonts.is_empty()).then_some(FontId(0))
    }

    /// Font for `family`, falling back to the default font.
    pub fn resolve(&self, family: &str) -> Option<FontId> {
        self.family(family).or_else(|| self.default_font())
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    fn line_height(&self, font: Option<&fontdue::Font>, size: f32) -> f32 {
        font.and_then(|f| f.horizontal_line_metrics(size))
            .map(|m| m.new_line_size)
            .unwrap_or(size * 1.2)
    }

    fn layout(font: &fontdue::Font, text: &str, size: f32) -> Layout<()> {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(std::slice::from_ref(font), &TextStyle::new(text, size, 0));
        layout
    }

    /// Size of `text` laid out on a single line, rounded up to whole pixels.
    ///
    /// Unknown fonts and empty strings measure as zero width and one line high.
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Size {
        let font = self.get(id);
        let line = self.line_height(font, size);
        let Some(font) = font else {
            return Size::new(0, line.ceil() as u32);
        };

        let layout = Self::layout(font, text, size);
        // Pen position after each glyph rather than the bitmap edge, so trailing
        // advance is included and measurements stay additive.
        let width = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let height = layout.height().max(line);

        Size::new(width.ceil() as u32, height.ceil() as u32)
    }

    /// Rasterizes `text` into a transparent image sized by [`measure_text`].
    ///
    /// [`measure_text`]: FontSystem::measure_text
    pub fn render_text(&self, text: &str, id: FontId, size: f32, color: Color) -> Image {
        let mut image = Image::new(self.measure_text(text, id, size));
        let Some(font) = self.get(id) else { return image; };

        let layout = Self::layout(font, text, size);
        for glyph in layout.glyphs() {
            if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = font.rasterize_config(glyph.key);
            let origin = Point::from_f32(glyph.x, glyph.y);
            for (i, c) in coverage.iter().enumerate() {
                if *c == 0 {
                    continue;
                }
                let x = origin.x + (i % metrics.width) as i32;
                let y = origin.y + (i / metrics.width) as i32;
                image.blend_pixel(x, y, color.with_coverage(*c));
            }
        }
        image
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    #[test]
    fn empty_system_has_no_default() {
        let fonts = FontSystem::new();
        assert!(fonts.is_empty());
        assert_eq!(fonts.default_font(), None);
        assert_eq!(fonts.resolve("arial"), None);
    }

    #[test]
    fn unknown_font_measures_one_line_high() {
        let fonts = FontSystem::new();
        assert_eq!(fonts.measure_text("hello", FontId(3), 10.0), Size::new(0, 12));
    }

    #[test]
    fn unknown_font_renders_empty_image() {
        let fonts = FontSystem::new();
        let img = fonts.render_text("hello", FontId(0), 20.0, Color::BLACK);
        assert_eq!(img.size(), Size::new(0, 24));
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let mut fonts = FontSystem::new();
        assert!(fonts.load_family("broken", b"not a font").is_err());
        assert_eq!(fonts.family("broken"), None);
    }
}
