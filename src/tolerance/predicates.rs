//! Geometric predicates with explicit tolerance.

use crate::primitives::Point2;
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

impl Orientation {
    /// Returns `true` unless the orientation is strictly clockwise.
    ///
    /// With `orient2d(a, b, p, eps)` this reads "`p` is left of or on the
    /// directed line `a -> b`".
    #[inline]
    pub fn is_left_or_on(self) -> bool {
        self != Orientation::Clockwise
    }
}

/// Computes the orientation of three points with tolerance.
///
/// Returns the orientation of the triangle formed by points `a`, `b`, `c`:
/// - `CounterClockwise` if `c` is to the left of the line from `a` to `b`
/// - `Clockwise` if `c` is to the right of the line from `a` to `b`
/// - `Collinear` if `c` is on the line (within `eps` tolerance)
///
/// # Arguments
///
/// * `a`, `b`, `c` - The three points to test
/// * `eps` - Tolerance for collinearity. This is compared against the absolute
///   value of the cross product (twice the signed area).
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    // Twice the signed area of triangle ABC
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Checks if `p` lies on the line through `a` and `b` within tolerance.
///
/// Only the line is tested, not the segment. Callers that already know `p`
/// is inside a triangle with edge `(a, b)` get the segment test for free.
#[inline]
pub fn point_on_line<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, eps: F) -> bool {
    orient2d(a, b, p, eps) == Orientation::Collinear
}

/// Tests if a point lies strictly inside the circumcircle of a triangle.
///
/// The triangle `a`, `b`, `c` must be counter-clockwise. No tolerance is
/// applied: a point exactly on the circle is not inside.
///
/// # Example
///
/// ```
/// use delaunay_dual::tolerance::in_circumcircle;
/// use delaunay_dual::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.5, 0.866);
///
/// assert!(in_circumcircle(Point2::new(0.5, 0.29), a, b, c));
/// assert!(!in_circumcircle(Point2::new(10.0, 10.0), a, b, c));
/// ```
pub fn in_circumcircle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    // | ax-px  ay-py  (ax-px)²+(ay-py)² |
    // | bx-px  by-py  (bx-px)²+(by-py)² | > 0  iff p is inside circumcircle (CCW triangle)
    // | cx-px  cy-py  (cx-px)²+(cy-py)² |
    let ax = a.x - p.x;
    let ay = a.y - p.y;
    let bx = b.x - p.x;
    let by = b.y - p.y;
    let cx = c.x - p.x;
    let cy = c.y - p.y;

    let aa = ax * ax + ay * ay;
    let bb = bx * bx + by * by;
    let cc = cx * cx + cy * cy;

    let det = ax * (by * cc - cy * bb) - ay * (bx * cc - cx * bb) + aa * (bx * cy - cx * by);

    det > F::zero()
}

/// Computes the center of the circle through `a`, `b` and `c`.
///
/// Returns `None` when the points are collinear within `eps` (the same
/// tolerance [`orient2d`] uses) or the result overflows.
pub fn circumcenter<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Option<Point2<F>> {
    let ab = b - a;
    let ac = c - a;

    let d = ab.cross(ac);
    if d.abs() <= eps {
        return None;
    }

    let ab_len = ab.magnitude_squared();
    let ac_len = ac.magnitude_squared();
    let scale = F::one() / (d + d);

    let center = Point2::new(
        a.x + (ac.y * ab_len - ab.y * ac_len) * scale,
        a.y + (ab.x * ac_len - ac.x * ab_len) * scale,
    );

    center.is_finite().then_some(center)
}

/// Computes the centroid of a triangle.
#[inline]
pub fn barycenter<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Point2<F> {
    let three = F::one() + F::one() + F::one();
    Point2::new((a.x + b.x + c.x) / three, (a.y + b.y + c.y) / three)
}
