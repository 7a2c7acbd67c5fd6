use super::wrap::{normalize, wrap_paragraph, TextMeasure, WrappedText};

/// Message text with its wrapped lines cached by width.
///
/// The lines are recomputed only when asked for a different width than last
/// time, or after [`invalidate`](Message::invalidate) (fonts changed).
#[derive(Debug, Clone, Default)]
pub struct Message {
    paragraphs: Vec<String>,
    wrapped: WrappedText,
    width: Option<u32>,
    layouts: usize,
}

impl Message {
    pub fn new(raw: &str) -> Self {
        Self { paragraphs: normalize(raw), ..Self::default() }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Normalized text, paragraphs joined by `\n`.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    pub fn set_text(&mut self, raw: &str) {
        self.paragraphs = normalize(raw);
        self.invalidate();
    }

    /// Wrapped lines for `width`, computed on demand.
    pub fn lines<M>(&mut self, measure: &M, width: u32) -> &[String]
    where
        M: TextMeasure + ?Sized,
    {
        if self.width != Some(width) {
            let mut wrapped = WrappedText::default();
            for paragraph in &self.paragraphs {
                let mut part = wrap_paragraph(paragraph, measure, width);
                wrapped.lines.append(&mut part.lines);
                wrapped.overflowing.append(&mut part.overflowing);
            }
            self.wrapped = wrapped;
            self.width = Some(width);
            self.layouts += 1;
        }
        &self.wrapped.lines
    }

    /// Lines that overflowed during the last layout.
    pub fn overflowing(&self) -> &[String] {
        &self.wrapped.overflowing
    }

    pub fn invalidate(&mut self) {
        self.width = None;
    }

    /// How many times the lines were actually recomputed.
    pub fn layout_count(&self) -> usize {
        self.layouts
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::ten_px_per_char;

    #[test]
    fn same_width_is_served_from_cache() {
        let mut message = Message::new("hello world");
        message.lines(&ten_px_per_char, 100);
        message.lines(&ten_px_per_char, 100);
        assert_eq!(message.layout_count(), 1);
    }

    #[test]
    fn width_change_recomputes() {
        let mut message = Message::new("hello world");
        assert_eq!(message.lines(&ten_px_per_char, 200), ["hello world"]);
        assert_eq!(message.lines(&ten_px_per_char, 60), ["hello", "world"]);
        assert_eq!(message.layout_count(), 2);
    }

    #[test]
    fn invalidate_forces_a_layout() {
        let mut message = Message::new("a");
        message.lines(&ten_px_per_char, 50);
        message.invalidate();
        message.lines(&ten_px_per_char, 50);
        assert_eq!(message.layout_count(), 2);
    }

    #[test]
    fn set_text_normalizes_and_relayouts() {
        let mut message = Message::new("a");
        message.lines(&ten_px_per_char, 50);
        message.set_text("b   c\n d");
        assert_eq!(message.text(), "b c\nd");
        assert_eq!(message.lines(&ten_px_per_char, 50), ["b c", "d"]);
    }

    #[test]
    fn overflow_is_reported() {
        let mut message = Message::new("unbreakable");
        message.lines(&ten_px_per_char, 50);
        assert_eq!(message.overflowing(), ["unbreakable"]);
    }

    proptest! {
        #[test]
        fn recomputes_iff_width_changes(widths in prop::collection::vec(1u32..5, 1..40)) {
            let mut message = Message::new("the quick brown fox");
            let mut expected = 0;
            let mut last = None;
            for width in widths {
                let width = width * 40;
                if last != Some(width) {
                    expected += 1;
                    last = Some(width);
                }
                message.lines(&ten_px_per_char, width);
                prop_assert_eq!(message.layout_count(), expected);
            }
        }
    }
}
