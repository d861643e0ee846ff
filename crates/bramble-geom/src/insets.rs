use std::ops::Add;

use super::Size;

/// Four-sided spacing around or inside a rectangle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Insets {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

/// Spacing a node reserves outside its own bounds. The parent subtracts it from
/// the budget it offers the node.
pub type Margin = Insets;

/// Spacing a container reserves inside its own bounds before laying out children.
pub type Padding = Insets;

impl Insets {
    /// No spacing.
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Construct insets in left, top, right, bottom order.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same spacing on every edge.
    pub const fn all(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    /// Total spacing as a size.
    pub fn size(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }

    /// Replace negative edges with zero.
    pub fn non_negative(self) -> Self {
        Self::new(
            self.left.max(0),
            self.top.max(0),
            self.right.max(0),
            self.bottom.max(0),
        )
    }
}

impl Add for Insets {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.left.saturating_add(other.left),
            self.top.saturating_add(other.top),
            self.right.saturating_add(other.right),
            self.bottom.saturating_add(other.bottom),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals() {
        let i = Insets::new(1, 2, 3, 4);
        assert_eq!(i.horizontal(), 4);
        assert_eq!(i.vertical(), 6);
        assert_eq!(i.size(), Size::new(4, 6));
        assert_eq!(i + Insets::all(1), Insets::new(2, 3, 4, 5));
        assert_eq!(Insets::new(-1, 2, -3, 4).non_negative(), Insets::new(0, 2, 0, 4));
    }
}
