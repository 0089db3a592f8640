//! Delaunay triangulation by incremental Bowyer-Watson insertion.
//!
//! Points are inserted one at a time into a triangle tree that starts from a
//! single bounding triangle. Two of its corners are symbolic points at
//! infinity, so no coordinate-based super-triangle is needed and no
//! precision is lost to its size.
//!
//! # Algorithm
//!
//! 1. Seed the tree with `(upper, lower, apex)` where `apex` is the highest
//!    input point.
//! 2. For every other point, walk the tree to the leaf containing it and
//!    split that leaf in three, or split the two leaves sharing an edge the
//!    point lies on.
//! 3. Legalize every edge opposite the new point, flipping it when the
//!    neighbouring vertex lies inside the circumcircle.
//! 4. Emit the leaves whose vertices are all real points.
//!
//! # Complexity
//!
//! - Time: O(n log n) expected for random insertion order
//! - Space: O(n); the tree keeps every triangle ever created
//!
//! # Example
//!
//! ```
//! use delaunay_dual::triangulation::{delaunay_triangulation, TriangulationOptions};
//! use delaunay_dual::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(0.5, 0.5),
//! ];
//!
//! let triangulation = delaunay_triangulation(&points, &TriangulationOptions::default()).unwrap();
//! assert_eq!(triangulation.triangle_count(), 4);
//! ```

use super::arena::{NodeId, TriangleArena};
use super::point_ref::{PointRef, PointSet};
use super::result::Triangulation;
use crate::error::{GeometryError, GeometryResult};
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// Options for a single triangulation call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangulationOptions<F> {
    /// Emit triangles in clockwise instead of counter-clockwise order.
    pub clockwise: bool,
    /// Tolerance below which an orientation determinant counts as zero,
    /// relative to the squared extent of the input's bounding box.
    pub epsilon: F,
}

impl<F: Float> Default for TriangulationOptions<F> {
    fn default() -> Self {
        Self {
            clockwise: false,
            epsilon: F::epsilon(),
        }
    }
}

impl<F: Float> TriangulationOptions<F> {
    /// Sets the output winding.
    pub fn with_clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    /// Sets the relative orientation tolerance.
    pub fn with_epsilon(mut self, epsilon: F) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// Counters describing the work done by one triangulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertionStatistics {
    /// Points that landed strictly inside a triangle.
    pub interior_splits: usize,
    /// Points that landed on an existing edge.
    pub edge_splits: usize,
    /// Edge flips performed while legalizing.
    pub flips: usize,
    /// Nodes in the triangle tree when insertion finished.
    pub arena_nodes: usize,
}

/// An edge waiting to be checked: the edge `(e0, e1)` of `node`, opposite
/// the inserted point, and the neighbour handle stored across it.
#[derive(Debug, Clone, Copy)]
struct Legalization {
    node: NodeId,
    neighbor: Option<NodeId>,
    e0: PointRef,
    e1: PointRef,
}

/// Reusable Delaunay triangulator.
///
/// Holds the triangle tree and the legalization stack between calls so
/// repeated triangulations do not reallocate. Each call starts from and
/// leaves behind empty buffers.
#[derive(Debug, Default)]
pub struct DelaunayBuilder {
    arena: TriangleArena,
    pending: Vec<Legalization>,
    statistics: InsertionStatistics,
}

impl DelaunayBuilder {
    /// Creates a builder with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the Delaunay triangulation of `points`.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::InsufficientPoints`], [`GeometryError::TooManyPoints`]
    ///   or [`GeometryError::NonFiniteCoordinate`] for unusable input
    /// - [`GeometryError::DuplicatePoint`] if two points are identical
    /// - [`GeometryError::AllCollinear`] if no triangle can be formed
    /// - other degenerate-geometry errors when a point cannot be inserted
    pub fn calculate_triangulation<F: Float>(
        &mut self,
        points: &[Point2<F>],
        options: &TriangulationOptions<F>,
    ) -> GeometryResult<Triangulation<F>> {
        self.calculate_triangulation_with_statistics(points, options)
            .map(|(triangulation, _)| triangulation)
    }

    /// Like [`calculate_triangulation`](Self::calculate_triangulation), also
    /// returning what the insertion loop did.
    pub fn calculate_triangulation_with_statistics<F: Float>(
        &mut self,
        points: &[Point2<F>],
        options: &TriangulationOptions<F>,
    ) -> GeometryResult<(Triangulation<F>, InsertionStatistics)> {
        self.reset();
        let result = self.run(points, options);
        let statistics = self.statistics;
        self.reset();

        match result {
            Ok(triangulation) => {
                tracing::debug!(
                    points = points.len(),
                    triangles = triangulation.triangle_count(),
                    interior_splits = statistics.interior_splits,
                    edge_splits = statistics.edge_splits,
                    flips = statistics.flips,
                    nodes = statistics.arena_nodes,
                    "delaunay triangulation complete"
                );
                Ok((triangulation, statistics))
            }
            Err(err) => {
                if err.is_degenerate() {
                    tracing::warn!(points = points.len(), error = %err, "delaunay triangulation failed");
                }
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.arena.clear();
        self.pending.clear();
        self.statistics = InsertionStatistics::default();
    }

    fn run<F: Float>(
        &mut self,
        points: &[Point2<F>],
        options: &TriangulationOptions<F>,
    ) -> GeometryResult<Triangulation<F>> {
        validate_input(points)?;

        let eps = scaled_epsilon(points, options.epsilon);
        let set = PointSet::new(points, eps);
        let apex = highest_point(points);
        self.arena.seed(apex as u32);

        for i in 0..points.len() {
            if i != apex {
                self.insert(&set, i as u32)?;
            }
        }
        self.statistics.arena_nodes = self.arena.len();

        let triangles: Vec<[usize; 3]> = self.arena.inner_leaves().collect();
        if triangles.is_empty() {
            return Err(GeometryError::AllCollinear {
                count: points.len(),
            });
        }

        Triangulation::assemble(points, &triangles, options.clockwise, eps)
    }

    fn insert<F: Float>(&mut self, set: &PointSet<'_, F>, p: u32) -> GeometryResult<()> {
        let leaf = self.arena.find_leaf(set, p)?;
        let vertices = self.arena.node(leaf).vertices;

        let mut hits = (0..3).filter(|&slot| {
            set.on_edge(p, vertices[(slot + 1) % 3], vertices[(slot + 2) % 3])
        });
        let on_edge = match (hits.next(), hits.next()) {
            (None, _) => None,
            (Some(slot), None) => Some(slot),
            (Some(_), Some(_)) => {
                return Err(GeometryError::CoincidentPoint { index: p as usize });
            }
        };

        let point = PointRef::Finite(p);
        match on_edge {
            None => {
                tracing::trace!(point = p, "interior split");
                let created = self.arena.split_interior(leaf, point)?;
                self.statistics.interior_splits += 1;
                self.schedule(&created);
            }
            Some(slot) => {
                tracing::trace!(point = p, slot, "edge split");
                let created = self.arena.split_edge(leaf, slot, point)?;
                self.statistics.edge_splits += 1;
                self.schedule(&created);
            }
        }

        self.legalize(set, p)
    }

    /// Queues the outer edge of each new node so the first one is checked
    /// first.
    fn schedule(&mut self, created: &[NodeId]) {
        for &id in created.iter().rev() {
            let node = self.arena.node(id);
            self.pending.push(Legalization {
                node: id,
                neighbor: node.adjacent[0],
                e0: node.vertices[1],
                e1: node.vertices[2],
            });
        }
    }

    fn legalize<F: Float>(&mut self, set: &PointSet<'_, F>, p: u32) -> GeometryResult<()> {
        while let Some(edge) = self.pending.pop() {
            let Some(across) = edge.neighbor else {
                continue;
            };
            let far = self.arena.leaf_with_edge(across, edge.e0, edge.e1)?;
            let q = self
                .arena
                .node(far)
                .other_vertex(edge.e0, edge.e1)
                .ok_or(GeometryError::InconsistentTopology {
                    node: far.index() as u32,
                })?;

            if set.is_legal(p, q, edge.e0, edge.e1) {
                continue;
            }

            let created =
                self.arena
                    .flip(edge.node, far, PointRef::Finite(p), edge.e0, edge.e1, q)?;
            self.statistics.flips += 1;
            self.schedule(&created);
        }
        Ok(())
    }
}

/// Computes the Delaunay triangulation of `points` with a throwaway builder.
///
/// # Example
///
/// ```
/// use delaunay_dual::triangulation::{delaunay_triangulation, TriangulationOptions};
/// use delaunay_dual::Point2;
///
/// let points = vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(1.0, 1.0),
/// ];
///
/// let triangulation = delaunay_triangulation(&points, &TriangulationOptions::default()).unwrap();
/// assert_eq!(triangulation.triangle_count(), 2);
/// assert_eq!(triangulation.hull_half_edges().count(), 4);
/// ```
pub fn delaunay_triangulation<F: Float>(
    points: &[Point2<F>],
    options: &TriangulationOptions<F>,
) -> GeometryResult<Triangulation<F>> {
    DelaunayBuilder::new().calculate_triangulation(points, options)
}

fn validate_input<F: Float>(points: &[Point2<F>]) -> GeometryResult<()> {
    if points.len() < 3 {
        return Err(GeometryError::InsufficientPoints {
            expected: 3,
            actual: points.len(),
        });
    }
    if points.len() > u32::MAX as usize {
        return Err(GeometryError::TooManyPoints {
            max: u32::MAX as usize,
            actual: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate { index });
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (points[a], points[b]);
        pa.y.partial_cmp(&pb.y)
            .unwrap_or(Ordering::Equal)
            .then(pa.x.partial_cmp(&pb.x).unwrap_or(Ordering::Equal))
    });
    for pair in order.windows(2) {
        if points[pair[0]] == points[pair[1]] {
            return Err(GeometryError::DuplicatePoint {
                first: pair[0].min(pair[1]),
                second: pair[0].max(pair[1]),
            });
        }
    }
    Ok(())
}

/// Converts a relative tolerance into one for cross products of `points`.
///
/// Cross products grow with the square of the coordinate scale, so the
/// tolerance does too.
fn scaled_epsilon<F: Float>(points: &[Point2<F>], epsilon: F) -> F {
    let (mut min, mut max) = (points[0], points[0]);
    for p in &points[1..] {
        min = Point2::new(min.x.min(p.x), min.y.min(p.y));
        max = Point2::new(max.x.max(p.x), max.y.max(p.y));
    }
    let extent = (max.x - min.x).max(max.y - min.y);
    epsilon * extent * extent
}

/// Index of the point with the largest y, ties broken by the largest x.
fn highest_point<F: Float>(points: &[Point2<F>]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.is_above(points[best]) {
            best = i;
        }
    }
    best
}
