//! Vertex references that may point at infinity.
//!
//! The bounding triangle of the incremental construction uses two symbolic
//! vertices instead of real far-away coordinates. Treat them as points
//! infinitely far away:
//!
//! - [`PointRef::Upper`] lies to the left of and above every input point, so
//!   it ranks above all of them in (y, x) order.
//! - [`PointRef::Lower`] lies to the right of and below every input point, so
//!   it ranks below all of them.
//!
//! Every predicate that may see a sentinel goes through [`PointSet`], which
//! matches on the variant instead of reading coordinates.

use crate::primitives::Point2;
use crate::tolerance::{in_circumcircle, orient2d, point_on_line, Orientation};
use num_traits::Float;

/// A vertex of a triangle node: an input point or one of two sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PointRef {
    /// Index into the input point slice.
    Finite(u32),
    /// Sentinel ranking above every input point.
    Upper,
    /// Sentinel ranking below every input point.
    Lower,
}

impl PointRef {
    /// Index into the input slice, `None` for sentinels.
    #[inline]
    pub(crate) fn index(self) -> Option<usize> {
        match self {
            PointRef::Finite(i) => Some(i as usize),
            PointRef::Upper | PointRef::Lower => None,
        }
    }

    #[inline]
    pub(crate) fn is_finite(self) -> bool {
        matches!(self, PointRef::Finite(_))
    }
}

/// Input points plus the tolerance for one triangulation call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PointSet<'a, F> {
    points: &'a [Point2<F>],
    eps: F,
}

impl<'a, F: Float> PointSet<'a, F> {
    pub(crate) fn new(points: &'a [Point2<F>], eps: F) -> Self {
        Self { points, eps }
    }

    #[inline]
    pub(crate) fn point(&self, index: u32) -> Point2<F> {
        self.points[index as usize]
    }

    /// Returns `true` if `a` ranks strictly above `b`.
    pub(crate) fn ranks_above(&self, a: PointRef, b: PointRef) -> bool {
        match (a, b) {
            (_, PointRef::Upper) => false,
            (_, PointRef::Lower) => true,
            (PointRef::Upper, _) => true,
            (PointRef::Lower, _) => false,
            (PointRef::Finite(a), PointRef::Finite(b)) => self.point(a).is_above(self.point(b)),
        }
    }

    /// Is input point `p` left of, or on, the directed edge `a -> b`?
    ///
    /// For an edge with a sentinel end the line runs (nearly) horizontal
    /// through the finite end, so the test reduces to the (y, x) ranking.
    pub(crate) fn left_of(&self, p: u32, a: PointRef, b: PointRef) -> bool {
        let pr = PointRef::Finite(p);
        match (a, b) {
            (PointRef::Upper, _) => self.ranks_above(pr, b),
            (PointRef::Lower, _) => self.ranks_above(b, pr),
            (_, PointRef::Upper) => self.ranks_above(a, pr),
            (_, PointRef::Lower) => self.ranks_above(pr, a),
            (PointRef::Finite(a), PointRef::Finite(b)) => {
                orient2d(self.point(a), self.point(b), self.point(p), self.eps).is_left_or_on()
            }
        }
    }

    /// Is input point `p` inside or on the boundary of the triangle?
    #[inline]
    pub(crate) fn contains(&self, p: u32, vertices: [PointRef; 3]) -> bool {
        let [v0, v1, v2] = vertices;
        self.left_of(p, v0, v1) && self.left_of(p, v1, v2) && self.left_of(p, v2, v0)
    }

    /// Is input point `p` on the line through a finite edge `(a, b)`?
    ///
    /// Edges with a sentinel end never report a hit.
    pub(crate) fn on_edge(&self, p: u32, a: PointRef, b: PointRef) -> bool {
        match (a, b) {
            (PointRef::Finite(a), PointRef::Finite(b)) => {
                point_on_line(self.point(p), self.point(a), self.point(b), self.eps)
            }
            _ => false,
        }
    }

    /// Is the edge `(e0, e1)` between triangles `(p, e0, e1)` and
    /// `(e1, e0, q)` locally Delaunay?
    ///
    /// With a sentinel endpoint the circumcircle of `(p, e0, e1)` becomes a
    /// half-plane bounded by the line through `p` and the finite endpoint.
    /// Points on that line are legal, so a flip never produces a zero-area
    /// triangle.
    pub(crate) fn is_legal(&self, p: u32, q: PointRef, e0: PointRef, e1: PointRef) -> bool {
        let PointRef::Finite(q) = q else {
            return true;
        };
        let pp = self.point(p);
        let pq = self.point(q);

        match (e0, e1) {
            (PointRef::Finite(i), PointRef::Finite(j)) => {
                !in_circumcircle(pq, pp, self.point(i), self.point(j))
            }
            (_, PointRef::Finite(j)) => {
                orient2d(pp, self.point(j), pq, self.eps) != Orientation::Clockwise
            }
            (PointRef::Finite(i), _) => {
                orient2d(pp, self.point(i), pq, self.eps) != Orientation::CounterClockwise
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
            Point2::new(0.5, 0.25),
        ]
    }

    #[test]
    fn test_index() {
        assert_eq!(PointRef::Finite(7).index(), Some(7));
        assert_eq!(PointRef::Upper.index(), None);
        assert!(!PointRef::Lower.is_finite());
        assert!(PointRef::Finite(0).is_finite());
    }

    #[test]
    fn test_ranking_with_sentinels() {
        let pts = points();
        let set = PointSet::new(&pts, 0.0);
        let a = PointRef::Finite(0);
        let top = PointRef::Finite(2);

        assert!(set.ranks_above(PointRef::Upper, top));
        assert!(!set.ranks_above(top, PointRef::Upper));
        assert!(set.ranks_above(a, PointRef::Lower));
        assert!(!set.ranks_above(PointRef::Lower, a));
        assert!(set.ranks_above(top, a));
        assert!(!set.ranks_above(a, a));
        // (1, 0) is right of (0, 0) at the same height
        assert!(set.ranks_above(PointRef::Finite(1), a));
    }

    #[test]
    fn test_bounding_triangle_contains_everything() {
        let pts = points();
        let set = PointSet::new(&pts, 0.0);
        let root = [PointRef::Upper, PointRef::Lower, PointRef::Finite(2)];
        // Point 2 is the apex itself and is never located
        for p in [0, 1, 3] {
            assert!(set.contains(p, root), "point {} not in bounding triangle", p);
        }
    }

    #[test]
    fn test_contains_finite_triangle() {
        let pts = points();
        let set = PointSet::new(&pts, 0.0);
        let tri = [PointRef::Finite(0), PointRef::Finite(1), PointRef::Finite(2)];
        assert!(set.contains(3, tri));
        // Vertices count as contained
        assert!(set.contains(0, tri));
    }

    #[test]
    fn test_on_edge_ignores_sentinels() {
        let pts = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 0.0),
        ];
        let set = PointSet::new(&pts, 1e-12);
        assert!(set.on_edge(2, PointRef::Finite(0), PointRef::Finite(1)));
        assert!(!set.on_edge(2, PointRef::Finite(0), PointRef::Upper));
        assert!(!set.on_edge(2, PointRef::Lower, PointRef::Finite(1)));
    }

    #[test]
    fn test_is_legal_circle_case() {
        // p = 3 is inside the circle through 0, 1, 2
        let pts = points();
        let set = PointSet::new(&pts, 0.0);
        // Triangle (p, e0, e1) = (0, 1, 2), opposite vertex q = 3 is inside
        assert!(!set.is_legal(0, PointRef::Finite(3), PointRef::Finite(1), PointRef::Finite(2)));
        // A far-away opposite vertex is fine
        let far = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
            Point2::new(10.0, -10.0),
        ];
        let set = PointSet::new(&far, 0.0);
        assert!(set.is_legal(0, PointRef::Finite(3), PointRef::Finite(1), PointRef::Finite(2)));
    }

    #[test]
    fn test_is_legal_sentinel_opposite() {
        let pts = points();
        let set = PointSet::new(&pts, 0.0);
        assert!(set.is_legal(0, PointRef::Upper, PointRef::Finite(1), PointRef::Finite(2)));
        assert!(set.is_legal(0, PointRef::Lower, PointRef::Finite(1), PointRef::Finite(2)));
    }

    #[test]
    fn test_is_legal_collinear_with_sentinel_edge() {
        let pts = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let set = PointSet::new(&pts, 0.0);
        // Flipping would create the zero-area triangle (2, 1, 0)
        assert!(set.is_legal(2, PointRef::Finite(0), PointRef::Finite(1), PointRef::Lower));
        assert!(set.is_legal(2, PointRef::Finite(0), PointRef::Upper, PointRef::Finite(1)));
    }

    #[test]
    fn test_is_legal_half_plane() {
        let pts = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
            Point2::new(0.5, -1.0),
        ];
        let set = PointSet::new(&pts, 0.0);
        // e1 sentinel: illegal iff q strictly left of p -> e0
        assert!(!set.is_legal(0, PointRef::Finite(2), PointRef::Finite(1), PointRef::Lower));
        assert!(set.is_legal(0, PointRef::Finite(3), PointRef::Finite(1), PointRef::Lower));
        // e0 sentinel: illegal iff q strictly right of p -> e1
        assert!(!set.is_legal(0, PointRef::Finite(3), PointRef::Upper, PointRef::Finite(1)));
        assert!(set.is_legal(0, PointRef::Finite(2), PointRef::Upper, PointRef::Finite(1)));
    }
}
