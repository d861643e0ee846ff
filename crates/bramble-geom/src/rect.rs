use super::{Insets, Point, Size};

/// A rectangle in node-local coordinates: the origin is relative to the parent.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A zero rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// A rectangle at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.w, size.h)
    }

    /// A rectangle at `origin` with the given size.
    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.w, size.h)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// One past the right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// One past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Does this rect have a zero area?
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Does the rectangle contain the point?
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Does the rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// Shift the rectangle by an offset.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.w,
            self.h,
        )
    }

    /// Shrink the rectangle by `insets`. The size floors at zero.
    pub fn inset(&self, insets: Insets) -> Self {
        Self::new(
            self.x.saturating_add(insets.left),
            self.y.saturating_add(insets.top),
            self.w.saturating_sub(insets.horizontal()).max(0),
            self.h.saturating_sub(insets.vertical()).max(0),
        )
    }

    /// Grow the rectangle by `insets`.
    pub fn outset(&self, insets: Insets) -> Self {
        Self::new(
            self.x.saturating_sub(insets.left),
            self.y.saturating_sub(insets.top),
            self.w.saturating_add(insets.horizontal()),
            self.h.saturating_add(insets.vertical()),
        )
    }

    /// The overlapping region of two rectangles, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn contains_edges() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(10, 10));
        assert!(r.contains(14, 14));
        assert!(!r.contains(15, 10));
        assert!(!r.contains(9, 12));
        assert!(!Rect::zero().contains(0, 0));
    }

    #[test]
    fn inset_outset() {
        let r = Rect::new(0, 0, 10, 10);
        let i = Insets::new(1, 2, 3, 4);
        assert_eq!(r.inset(i), Rect::new(1, 2, 6, 4));
        assert_eq!(r.inset(i).outset(i), r);
        assert_eq!(Rect::new(0, 0, 2, 2).inset(i), Rect::new(1, 2, 0, 0));
    }

    #[test]
    fn intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(
            a.intersect(&Rect::new(5, 5, 10, 10)),
            Some(Rect::new(5, 5, 5, 5))
        );
        assert_eq!(a.intersect(&Rect::new(10, 0, 5, 5)), None);
    }

    proptest! {
        #[test]
        fn inset_stays_inside(x in -100..100i32, y in -100..100i32, w in 0..200i32, h in 0..200i32, e in 0..50i32) {
            let r = Rect::new(x, y, w, h);
            let inner = r.inset(Insets::all(e));
            prop_assert!(inner.w >= 0 && inner.h >= 0);
            prop_assert!(inner.w <= r.w && inner.h <= r.h);
        }
    }
}
