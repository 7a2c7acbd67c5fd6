use super::{Point, Size};

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` whose center matches the center of `self`.
    ///
    /// Odd remainders are dropped on the left/top side, like integer halving.
    #[inline]
    pub fn centered(self, size: Size) -> Self {
        let x = self.origin.x.saturating_add(half_gap(self.size.width, size.width));
        let y = self.origin.y.saturating_add(half_gap(self.size.height, size.height));
        Rect::from_origin_size(Point::new(x, y), size)
    }

    #[inline]
    pub fn min(self) -> Point {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Point {
        Point::new(
            self.origin.x.saturating_add(extent(self.size.width)),
            self.origin.y.saturating_add(extent(self.size.height)),
        )
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.is_empty()
    }

    /// Insets all four sides by `inset`, keeping the rectangle non-negative.
    #[inline]
    #[must_use]
    pub fn inset(self, inset: u32) -> Self {
        let size = self.size.shrink(inset);
        let dx = ((self.size.width - size.width) / 2) as i32;
        let dy = ((self.size.height - size.height) / 2) as i32;
        Rect::from_origin_size(Point::new(self.origin.x.saturating_add(dx), self.origin.y.saturating_add(dy)), size)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.max().x.min(other.max().x);
        let y1 = self.max().y.min(other.max().y);

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1.abs_diff(x0), y1.abs_diff(y0)))
        }
    }
}

/// Offset that centers `inner` in `outer`; negative when `inner` is larger.
#[inline]
fn half_gap(outer: u32, inner: u32) -> i32 {
    ((i64::from(outer) - i64::from(inner)) / 2) as i32
}

/// Pixel extent as a signed offset, saturating at `i32::MAX`.
#[inline]
fn extent(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: i32, y: i32, w: u32, h: u32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        assert!(r(0, 0, 10, 10).contains(Point::new(5, 5)));
    }

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0, 0, 10, 10).contains(Point::new(0, 0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        // Half-open [min, max); the max edge is not contained.
        assert!(!r(0, 0, 10, 10).contains(Point::new(10, 10)));
    }

    #[test]
    fn contains_outside() {
        assert!(!r(0, 0, 10, 10).contains(Point::new(-1, 5)));
        assert!(!r(0, 0, 10, 10).contains(Point::new(5, -1)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0, 0, 10, 10);
        let b = r(5, 5, 10, 10);
        assert_eq!(a.intersect(b), Some(r(5, 5, 5, 5)));
    }

    #[test]
    fn intersect_negative_origin_is_clipped() {
        let surface = r(0, 0, 100, 50);
        let sliding = r(-30, 0, 100, 50);
        assert_eq!(surface.intersect(sliding), Some(r(0, 0, 70, 50)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        // Rects share an edge; zero-width overlap is not a valid intersection.
        let a = r(0, 0, 10, 10);
        let b = r(10, 0, 10, 10);
        assert!(a.intersect(b).is_none());
    }

    // ── centered / inset ──────────────────────────────────────────────────

    #[test]
    fn centered_places_child_in_the_middle() {
        let outer = r(0, 0, 100, 60);
        assert_eq!(outer.centered(Size::new(40, 20)), r(30, 20, 40, 20));
    }

    #[test]
    fn centered_allows_overflowing_child() {
        let outer = r(0, 0, 100, 60);
        assert_eq!(outer.centered(Size::new(140, 60)), r(-20, 0, 140, 60));
    }

    #[test]
    fn max_saturates_far_from_the_origin() {
        let far = r(i32::MAX - 5, 0, 100, u32::MAX);
        assert_eq!(far.max(), Point::new(i32::MAX, i32::MAX));
        assert!(!far.contains(Point::new(0, 0)));
        assert_eq!(r(0, 0, 10, 10).intersect(far), None);
    }

    #[test]
    fn inset_shrinks_and_moves_origin() {
        assert_eq!(r(10, 10, 100, 50).inset(5), r(15, 15, 90, 40));
    }
}
