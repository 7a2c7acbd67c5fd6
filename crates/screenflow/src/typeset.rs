use screenflow_engine::coords::Size;
use screenflow_engine::surface::Image;
use screenflow_engine::text::FontSystem;

use crate::style::ResolvedFont;

/// Measures and rasterizes single lines of text in a resolved font.
///
/// Shared by every screen of a flow. Implemented for the engine's
/// [`FontSystem`]; tests use a fixed-width double.
pub trait Typesetter {
    fn measure(&self, text: &str, font: &ResolvedFont) -> Size;

    /// Transparent image of [`measure`](Typesetter::measure) size with the
    /// text drawn in `font.color`.
    fn render(&self, text: &str, font: &ResolvedFont) -> Image;

    /// Height of one line, measured on a representative glyph.
    fn line_height(&self, font: &ResolvedFont) -> u32 {
        self.measure("Ag", font).height
    }
}

impl Typesetter for FontSystem {
    fn measure(&self, text: &str, font: &ResolvedFont) -> Size {
        match self.resolve(&font.family) {
            Some(id) => self.measure_text(text, id, font.size as f32),
            None => Size::new(0, (font.size as f32 * 1.2).ceil() as u32),
        }
    }

    fn render(&self, text: &str, font: &ResolvedFont) -> Image {
        match self.resolve(&font.family) {
            Some(id) => self.render_text(text, id, font.size as f32, font.color),
            None => Image::new(Typesetter::measure(self, text, font)),
        }
    }
}
