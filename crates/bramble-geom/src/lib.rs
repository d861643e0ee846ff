//! Geometry primitives used by the bramble layout core.
//!
//! All values are integer pixels. Sizes carry one sentinel, [`INFINITE`], which
//! marks an unbounded axis in a measurement budget. Arithmetic that shrinks or
//! grows a size preserves the sentinel, so `INFINITE - margin` stays unbounded.

/// Inset pairs: margin and padding.
mod insets;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;

pub use insets::{Insets, Margin, Padding};
pub use point::Point;
pub use rect::Rect;
pub use size::{INFINITE, Size};

/// Subtract `amount` from one axis of a budget, keeping an unbounded axis unbounded
/// and flooring finite results at zero.
pub fn shrink_axis(value: i32, amount: i32) -> i32 {
    if value == INFINITE {
        INFINITE
    } else {
        value.saturating_sub(amount).max(0)
    }
}

/// Add `amount` to one axis, keeping an unbounded axis unbounded.
pub fn grow_axis(value: i32, amount: i32) -> i32 {
    if value == INFINITE {
        INFINITE
    } else {
        value.saturating_add(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_arithmetic_keeps_infinity() {
        assert_eq!(shrink_axis(INFINITE, 10), INFINITE);
        assert_eq!(grow_axis(INFINITE, 10), INFINITE);
        assert_eq!(shrink_axis(5, 10), 0);
        assert_eq!(grow_axis(5, 10), 15);
    }
}
