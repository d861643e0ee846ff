use std::ops::{Add, Sub};

/// A position in node-local or screen coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Shift the point by an offset.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.offset(other.x, other.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let p = Point::new(3, 4);
        assert_eq!(p + Point::new(1, -1), Point::new(4, 3));
        assert_eq!(p - Point::new(3, 4), Point::zero());
        assert_eq!(Point::from((2, 2)).offset(-2, 0), Point::new(0, 2));
    }
}
