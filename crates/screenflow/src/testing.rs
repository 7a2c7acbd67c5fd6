//! Test doubles shared by the unit tests.

use std::rc::Rc;

use screenflow_engine::coords::{Point, Size};
use screenflow_engine::paint::Color;
use screenflow_engine::surface::{Image, Surface};

use crate::screens::ScreenContext;
use crate::style::{ResolvedFont, ScreenStyle};
use crate::typeset::Typesetter;

/// 10 px per character, one pixel high.
pub(crate) fn ten_px_per_char(text: &str) -> Size {
    Size::new(text.chars().count() as u32 * 10, 1)
}

/// Every character is `char_width` wide and a line is `font.size` high.
/// Rendering produces a solid block in the font color.
pub(crate) struct FixedWidthTypesetter {
    pub char_width: u32,
}

impl Default for FixedWidthTypesetter {
    fn default() -> Self {
        Self { char_width: 10 }
    }
}

impl Typesetter for FixedWidthTypesetter {
    fn measure(&self, text: &str, font: &ResolvedFont) -> Size {
        Size::new(text.chars().count() as u32 * self.char_width, font.size)
    }

    fn render(&self, text: &str, font: &ResolvedFont) -> Image {
        Image::filled(self.measure(text, font), font.color)
    }
}

/// Default style drawn with a [`FixedWidthTypesetter`].
pub(crate) fn context() -> ScreenContext {
    ScreenContext {
        fonts: Rc::new(FixedWidthTypesetter::default()),
        style: ScreenStyle::default(),
    }
}

/// Surface that only records where images were blitted.
pub(crate) struct RecordingSurface {
    size: Size,
    pub blits: Vec<Point>,
    pub fills: Vec<Color>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self { size, blits: Vec::new(), fills: Vec::new() }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, color: Color) {
        self.fills.push(color);
    }

    fn blit(&mut self, _source: &Image, position: Point) {
        self.blits.push(position);
    }
}
