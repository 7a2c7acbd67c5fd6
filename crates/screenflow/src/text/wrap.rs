use std::collections::VecDeque;

use screenflow_engine::coords::Size;

/// Measures a single line of text in pixels.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> Size;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> Size,
{
    fn measure(&self, text: &str) -> Size {
        self(text)
    }
}

/// Result of wrapping: the lines to draw, and the subset that could not be
/// made narrow enough.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    pub overflowing: Vec<String>,
}

impl WrappedText {
    fn append(&mut self, mut other: WrappedText) {
        self.lines.append(&mut other.lines);
        self.overflowing.append(&mut other.overflowing);
    }
}

/// Splits `raw` into paragraphs on `\n` and collapses runs of whitespace
/// inside each one. Blank paragraphs are kept as empty strings.
pub fn normalize(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// Wraps every paragraph of `raw` to `max_width`.
pub fn wrap<M>(raw: &str, measure: &M, max_width: u32) -> WrappedText
where
    M: TextMeasure + ?Sized,
{
    let mut out = WrappedText::default();
    for paragraph in normalize(raw) {
        out.append(wrap_paragraph(&paragraph, measure, max_width));
    }
    out
}

/// Wraps one paragraph by recursive midpoint splitting.
///
/// A candidate line is accepted when it is strictly narrower than
/// `max_width`. Otherwise its words are split in two halves (the first half
/// gets `n / 2` words) and both halves are processed in order. A single word
/// that is still too wide is emitted as-is and reported in `overflowing`.
pub fn wrap_paragraph<M>(paragraph: &str, measure: &M, max_width: u32) -> WrappedText
where
    M: TextMeasure + ?Sized,
{
    let mut out = WrappedText::default();
    let mut queue = VecDeque::from([paragraph.to_string()]);

    while let Some(line) = queue.pop_front() {
        if measure.measure(&line).width < max_width {
            out.lines.push(line);
            continue;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() <= 1 {
            log::warn!("cannot split {line:?} to fit in {max_width}px, it will overflow");
            out.overflowing.push(line.clone());
            out.lines.push(line);
            continue;
        }

        let mid = words.len() / 2;
        let (head, tail) = words.split_at(mid);
        queue.push_front(tail.join(" "));
        queue.push_front(head.join(" "));
    }

    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::ten_px_per_char;

    // ── normalize ─────────────────────────────────────────────────────────

    #[test]
    fn normalize_collapses_whitespace_per_paragraph() {
        assert_eq!(normalize("  a \t b  \n\n c   d "), ["a b", "", "c d"]);
    }

    #[test]
    fn normalize_handles_crlf() {
        assert_eq!(normalize("one\r\ntwo"), ["one", "two"]);
    }

    // ── wrap ──────────────────────────────────────────────────────────────

    #[test]
    fn sample_sentence_splits_at_midpoints() {
        let text = "This is a very long text which requires to be splitted";
        let wrapped = wrap(text, &ten_px_per_char, 100);
        assert_eq!(
            wrapped.lines,
            ["This is", "a", "very long", "text", "which", "requires", "to", "be", "splitted"]
        );
        assert!(wrapped.overflowing.is_empty());
    }

    #[test]
    fn fitting_line_is_untouched() {
        let wrapped = wrap("short", &ten_px_per_char, 100);
        assert_eq!(wrapped.lines, ["short"]);
    }

    #[test]
    fn exact_width_is_split() {
        // 10 chars = 100px, which is not strictly narrower than 100.
        let wrapped = wrap("abcd efghi", &ten_px_per_char, 100);
        assert_eq!(wrapped.lines, ["abcd", "efghi"]);
    }

    #[test]
    fn unsplittable_token_overflows() {
        let token = "x".repeat(30);
        let wrapped = wrap(&token, &ten_px_per_char, 200);
        assert_eq!(wrapped.lines, [token.clone()]);
        assert_eq!(wrapped.overflowing, [token]);
    }

    #[test]
    fn paragraphs_wrap_independently() {
        let wrapped = wrap("aa bb\ncc", &ten_px_per_char, 100);
        assert_eq!(wrapped.lines, ["aa bb", "cc"]);
    }

    #[test]
    fn closures_with_captures_measure() {
        let char_width = 3;
        let measure = |s: &str| Size::new(s.len() as u32 * char_width, 1);
        assert_eq!(wrap("aaa bbb", &measure, 10).lines, ["aaa", "bbb"]);
    }

    // ── properties ────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn lines_fit_or_are_single_words(
            words in prop::collection::vec("[a-z]{1,12}", 0..30),
            width in 1u32..200,
        ) {
            let paragraph = words.join(" ");
            let wrapped = wrap_paragraph(&paragraph, &ten_px_per_char, width);
            for line in &wrapped.lines {
                let fits = ten_px_per_char(line).width < width;
                prop_assert!(fits || line.split_whitespace().count() <= 1, "{line:?}");
            }
        }

        #[test]
        fn words_are_preserved_in_order(
            words in prop::collection::vec("[a-z]{1,12}", 1..30),
            width in 1u32..200,
        ) {
            let paragraph = words.join(" ");
            let wrapped = wrap_paragraph(&paragraph, &ten_px_per_char, width);
            let rejoined: Vec<&str> = wrapped.lines.iter().flat_map(|l| l.split_whitespace()).collect();
            prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
