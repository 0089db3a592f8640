//! Offsets between points.

use num_traits::Float;
use std::ops::{Add, Sub};

/// The difference of two [`Point2`](super::Point2)s.
///
/// Only what the orientation and circle predicates need: the signed area
/// spanned by two offsets and the squared length of one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Twice the signed area of the triangle spanned by `self` and `other`.
    ///
    /// Positive when `other` turns counter-clockwise from `self`.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn magnitude_squared(self) -> F {
        self.x * self.x + self.y * self.y
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_is_twice_signed_area() {
        // Unit right triangle, counter-clockwise then clockwise
        let e0: Vec2<f64> = Vec2::new(1.0, 0.0);
        let e1 = Vec2::new(0.0, 1.0);
        assert_eq!(e0.cross(e1), 1.0);
        assert_eq!(e1.cross(e0), -1.0);

        // Parallel offsets span nothing
        assert_eq!(e0.cross(Vec2::new(-3.0, 0.0)), 0.0);
    }

    #[test]
    fn test_magnitude_squared() {
        assert_eq!(Vec2::new(3.0_f64, -4.0).magnitude_squared(), 25.0);
        assert_eq!(Vec2::<f32>::default().magnitude_squared(), 0.0);
    }

    #[test]
    fn test_offsets_compose() {
        let ab: Vec2<f64> = Vec2::new(2.0, 1.0);
        let bc = Vec2::new(-1.0, 3.0);
        let ac = ab + bc;
        assert_eq!(ac, Vec2::new(1.0, 4.0));
        assert_eq!(ac - bc, ab);
    }
}
