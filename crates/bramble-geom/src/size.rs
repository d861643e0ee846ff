use std::ops::{Add, Sub};

use super::{Insets, grow_axis, shrink_axis};

/// Sentinel for an unbounded axis.
pub const INFINITE: i32 = i32::MAX;

/// A width and height with no location.
///
/// Either axis may hold [`INFINITE`] when the value describes a measurement
/// budget. Sizes produced by measurement are always finite.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Size {
    /// A zero-valued size.
    pub const ZERO: Self = Self { w: 0, h: 0 };
    /// A size unbounded on both axes.
    pub const INFINITE: Self = Self {
        w: INFINITE,
        h: INFINITE,
    };

    /// Construct a size.
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// True if either axis is unbounded.
    pub fn is_infinite(&self) -> bool {
        self.w == INFINITE || self.h == INFINITE
    }

    /// Per-axis minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.w.min(other.w), self.h.min(other.h))
    }

    /// Per-axis maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.w.max(other.w), self.h.max(other.h))
    }

    /// Clamp each axis into `[min, max]`. When a minimum exceeds its maximum the
    /// maximum wins.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            clamp_axis(self.w, min.w, max.w),
            clamp_axis(self.h, min.h, max.h),
        )
    }

    /// Remove `dw`/`dh` from the size, flooring at zero. Unbounded axes stay
    /// unbounded.
    pub fn shrink(self, dw: i32, dh: i32) -> Self {
        Self::new(shrink_axis(self.w, dw), shrink_axis(self.h, dh))
    }

    /// Add `dw`/`dh` to the size. Unbounded axes stay unbounded.
    pub fn grow(self, dw: i32, dh: i32) -> Self {
        Self::new(grow_axis(self.w, dw), grow_axis(self.h, dh))
    }

    /// Replace negative axes with zero.
    pub fn non_negative(self) -> Self {
        Self::new(self.w.max(0), self.h.max(0))
    }
}

/// Clamp a single axis. A minimum greater than the maximum is lowered to it.
fn clamp_axis(value: i32, min: i32, max: i32) -> i32 {
    let min = min.min(max);
    value.min(max).max(min)
}

impl Sub<Insets> for Size {
    type Output = Self;

    fn sub(self, insets: Insets) -> Self {
        self.shrink(insets.horizontal(), insets.vertical())
    }
}

impl Add<Insets> for Size {
    type Output = Self;

    fn add(self, insets: Insets) -> Self {
        self.grow(insets.horizontal(), insets.vertical())
    }
}

impl From<(i32, i32)> for Size {
    fn from(v: (i32, i32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
