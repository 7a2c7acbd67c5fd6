/// Surface or text extent in logical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { width: 0, height: 0 }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrinks both axes by `inset` on each side, saturating at zero.
    #[inline]
    #[must_use]
    pub fn shrink(self, inset: u32) -> Self {
        Self::new(
            self.width.saturating_sub(inset.saturating_mul(2)),
            self.height.saturating_sub(inset.saturating_mul(2)),
        )
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}

impl From<(u32, u32)> for Size {
    #[inline]
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_removes_inset_on_both_sides() {
        assert_eq!(Size::new(100, 50).shrink(10), Size::new(80, 30));
    }

    #[test]
    fn shrink_saturates() {
        assert_eq!(Size::new(10, 50).shrink(20), Size::new(0, 10));
    }

    #[test]
    fn empty_when_any_axis_is_zero() {
        assert!(Size::new(0, 5).is_empty());
        assert!(Size::new(5, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }
}
