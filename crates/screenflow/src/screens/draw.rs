//! Layout and painting helpers shared by the built-in screens.

use screenflow_engine::coords::{Point, Rect, Size};
use screenflow_engine::surface::{Image, Surface};

use crate::style::{ResolvedButton, ResolvedFont};
use crate::text::TextMeasure;
use crate::typeset::Typesetter;

/// Adapts a typesetter and a font to the wrapping engine.
pub(crate) struct FontMeasure<'a> {
    pub fonts: &'a dyn Typesetter,
    pub font: &'a ResolvedFont,
}

impl TextMeasure for FontMeasure<'_> {
    fn measure(&self, text: &str) -> Size {
        self.fonts.measure(text, self.font)
    }
}

/// Size of `lines` stacked at a uniform line height.
pub(crate) fn block_size(fonts: &dyn Typesetter, font: &ResolvedFont, lines: &[String]) -> Size {
    let width = lines.iter().map(|l| fonts.measure(l, font).width).max().unwrap_or(0);
    Size::new(width, fonts.line_height(font) * lines.len() as u32)
}

/// Draws `lines` top to bottom from `area`'s top edge, each one centered
/// horizontally.
pub(crate) fn draw_lines_centered(
    surface: &mut Image,
    fonts: &dyn Typesetter,
    font: &ResolvedFont,
    lines: &[String],
    area: Rect,
) {
    let line_height = fonts.line_height(font);
    for (i, line) in lines.iter().enumerate() {
        let row = Rect::new(
            area.origin.x,
            area.origin.y + (i as u32 * line_height) as i32,
            area.size.width,
            line_height,
        );
        let image = fonts.render(line, font);
        surface.blit(&image, row.centered(Size::new(image.width(), image.height())).origin);
    }
}

/// Draws one line with its top-left corner at `at`.
pub(crate) fn draw_text(
    surface: &mut Image,
    fonts: &dyn Typesetter,
    font: &ResolvedFont,
    text: &str,
    at: Point,
) {
    let image = fonts.render(text, font);
    surface.blit(&image, at);
}

/// Smallest button that fits every label plus padding on each side.
pub(crate) fn button_size<'a>(
    fonts: &dyn Typesetter,
    button: &ResolvedButton,
    labels: impl IntoIterator<Item = &'a str>,
) -> Size {
    let label = labels
        .into_iter()
        .map(|l| fonts.measure(l, &button.font))
        .fold(Size::new(0, fonts.line_height(&button.font)), Size::max);
    let padding = button.padding.saturating_mul(2);
    Size::new(label.width.saturating_add(padding), label.height.saturating_add(padding))
}

pub(crate) fn draw_button(
    surface: &mut Image,
    fonts: &dyn Typesetter,
    button: &ResolvedButton,
    label: &str,
    rect: Rect,
) {
    surface.fill_rect(rect, button.background);
    let image = fonts.render(label, &button.font);
    surface.blit(&image, rect.centered(Size::new(image.width(), image.height())).origin);
}

/// Top edges of blocks of the given heights, stacked with `gap` between
/// them and the whole stack centered vertically in `area`.
pub(crate) fn stack_vertically(area: Rect, heights: &[u32], gap: u32) -> Vec<i32> {
    let gaps = i64::from(gap) * heights.len().saturating_sub(1) as i64;
    let total = heights.iter().map(|h| i64::from(*h)).sum::<i64>() + gaps;
    let mut y = i64::from(area.origin.y) + (i64::from(area.size.height) - total) / 2;
    heights
        .iter()
        .map(|h| {
            let top = clamp_i32(y);
            y += i64::from(*h) + i64::from(gap);
            top
        })
        .collect()
}

/// `count` cells of `cell` size in a row or column with `gap` between
/// neighbours, centered on `center_x` horizontally and starting at `top`.
pub(crate) fn cells(count: usize, cell: Size, gap: u32, horizontal: bool, center_x: i32, top: i32) -> Vec<Rect> {
    let offset = |i: usize, extent: u32| i as i64 * (i64::from(extent) + i64::from(gap));
    if horizontal {
        let span = i64::from(cells_size(count, cell, gap, true).width);
        let left = i64::from(center_x) - span / 2;
        (0..count)
            .map(|i| Rect::new(clamp_i32(left + offset(i, cell.width)), top, cell.width, cell.height))
            .collect()
    } else {
        let left = center_x.saturating_sub((cell.width / 2) as i32);
        let top = i64::from(top);
        (0..count)
            .map(|i| Rect::new(left, clamp_i32(top + offset(i, cell.height)), cell.width, cell.height))
            .collect()
    }
}

/// Total size of [`cells`] laid out with the same arguments.
pub(crate) fn cells_size(count: usize, cell: Size, gap: u32, horizontal: bool) -> Size {
    let n = u32::try_from(count).unwrap_or(u32::MAX);
    let gaps = gap.saturating_mul(n.saturating_sub(1));
    let span = |extent: u32| extent.saturating_mul(n).saturating_add(gaps);
    if horizontal {
        Size::new(span(cell.width), if count == 0 { 0 } else { cell.height })
    } else {
        Size::new(if count == 0 { 0 } else { cell.width }, span(cell.height))
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use screenflow_engine::paint::Color;

    use super::*;
    use crate::testing::FixedWidthTypesetter;

    fn font() -> ResolvedFont {
        ResolvedFont::new("mono", 10, Color::BLACK)
    }

    // ── measuring ─────────────────────────────────────────────────────────

    #[test]
    fn block_uses_widest_line() {
        let fonts = FixedWidthTypesetter::default();
        let lines = vec!["ab".to_string(), "abcd".to_string()];
        assert_eq!(block_size(&fonts, &font(), &lines), Size::new(40, 20));
    }

    #[test]
    fn button_fits_widest_label() {
        let fonts = FixedWidthTypesetter::default();
        let button = ResolvedButton { background: Color::BLACK, padding: 5, font: font() };
        assert_eq!(button_size(&fonts, &button, ["a", "abc"]), Size::new(40, 20));
    }

    #[test]
    fn oversized_padding_saturates() {
        let fonts = FixedWidthTypesetter::default();
        let button = ResolvedButton { background: Color::BLACK, padding: u32::MAX / 2 + 1, font: font() };
        assert_eq!(button_size(&fonts, &button, ["a"]), Size::new(u32::MAX, u32::MAX));
        assert_eq!(cells_size(3, Size::new(u32::MAX, 1), u32::MAX, true).width, u32::MAX);
        assert_eq!(stack_vertically(Rect::new(0, 0, 10, 10), &[u32::MAX, 1], u32::MAX).len(), 2);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn stack_is_centered_with_gaps() {
        let area = Rect::new(0, 0, 100, 100);
        assert_eq!(stack_vertically(area, &[20, 30], 10), [20, 50]);
    }

    #[test]
    fn cells_have_one_gap_fewer_than_cells() {
        let cell = Size::new(10, 10);
        let rects = cells(3, cell, 5, true, 50, 0);
        assert_eq!(rects[0], Rect::new(30, 0, 10, 10));
        assert_eq!(rects[2], Rect::new(60, 0, 10, 10));
        assert_eq!(cells_size(3, cell, 5, true), Size::new(40, 10));
        assert_eq!(cells_size(3, cell, 5, false), Size::new(10, 40));
    }

    // ── painting ──────────────────────────────────────────────────────────

    #[test]
    fn lines_are_centered_per_row() {
        let fonts = FixedWidthTypesetter::default();
        let mut surface = Image::filled(Size::new(100, 40), Color::WHITE);
        let lines = vec!["abcd".to_string(), "ab".to_string()];
        draw_lines_centered(&mut surface, &fonts, &font(), &lines, Rect::new(0, 0, 100, 40));
        assert_eq!(surface.pixel(30, 0), Some(Color::BLACK));
        assert_eq!(surface.pixel(29, 0), Some(Color::WHITE));
        assert_eq!(surface.pixel(40, 10), Some(Color::BLACK));
        assert_eq!(surface.pixel(39, 10), Some(Color::WHITE));
    }

    #[test]
    fn button_fills_background_behind_label() {
        let fonts = FixedWidthTypesetter::default();
        let white_label = ResolvedFont::new("mono", 10, Color::WHITE);
        let button = ResolvedButton { background: Color::BLACK, padding: 5, font: white_label };
        let mut surface = Image::filled(Size::new(50, 50), Color::GRAY);
        draw_button(&mut surface, &fonts, &button, "a", Rect::new(0, 0, 20, 20));
        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(surface.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(surface.pixel(20, 20), Some(Color::GRAY));
    }
}
