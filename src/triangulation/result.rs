//! The finished triangulation handed to callers.

use crate::error::{GeometryError, GeometryResult};
use crate::primitives::Point2;
use crate::tolerance::{barycenter, circumcenter};
use num_traits::Float;
use std::collections::HashMap;

/// A directed edge of a triangle.
///
/// Half-edge `3 * t + k` of triangle `t` runs from its `k`-th vertex to the
/// next one in emitted winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfEdge {
    /// Point index the edge starts at.
    pub origin: usize,
    /// Point index the edge ends at.
    pub destination: usize,
    /// Triangle owning this half-edge.
    pub triangle: usize,
    /// The half-edge running the other way in the neighbouring triangle,
    /// `None` on the convex hull.
    pub opposite: Option<usize>,
}

impl HalfEdge {
    /// Returns `true` if the edge lies on the convex hull.
    #[inline]
    pub fn is_hull(&self) -> bool {
        self.opposite.is_none()
    }
}

/// A Delaunay triangulation of a point set.
///
/// Produced by [`DelaunayBuilder`](super::DelaunayBuilder); read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangulation<F> {
    pub(crate) points: Vec<Point2<F>>,
    pub(crate) indices: Vec<usize>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) barycenters: Vec<Point2<F>>,
    pub(crate) circumcenters: Vec<Point2<F>>,
    pub(crate) clockwise: bool,
}

impl<F: Float> Triangulation<F> {
    /// Builds the result from vertex triples in counter-clockwise order.
    ///
    /// Half-edge pairing is recomputed from the emitted indices alone, so it
    /// does not depend on how the triangle tree wired its adjacency.
    pub(crate) fn assemble(
        points: &[Point2<F>],
        triangles: &[[usize; 3]],
        clockwise: bool,
        eps: F,
    ) -> GeometryResult<Self> {
        let mut indices = Vec::with_capacity(triangles.len() * 3);
        for &[a, b, c] in triangles {
            if clockwise {
                indices.extend_from_slice(&[a, c, b]);
            } else {
                indices.extend_from_slice(&[a, b, c]);
            }
        }

        let mut half_edges: Vec<HalfEdge> = indices
            .chunks_exact(3)
            .enumerate()
            .flat_map(|(t, tri)| {
                (0..3).map(move |k| HalfEdge {
                    origin: tri[k],
                    destination: tri[(k + 1) % 3],
                    triangle: t,
                    opposite: None,
                })
            })
            .collect();

        let by_endpoints: HashMap<(usize, usize), usize> = half_edges
            .iter()
            .enumerate()
            .map(|(i, e)| ((e.origin, e.destination), i))
            .collect();
        for edge in &mut half_edges {
            edge.opposite = by_endpoints.get(&(edge.destination, edge.origin)).copied();
        }

        let mut barycenters = Vec::with_capacity(triangles.len());
        let mut circumcenters = Vec::with_capacity(triangles.len());
        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (points[tri[0]], points[tri[1]], points[tri[2]]);
            barycenters.push(barycenter(a, b, c));
            circumcenters.push(circumcenter(a, b, c, eps).ok_or(
                GeometryError::CollinearTriangle {
                    a: tri[0],
                    b: tri[1],
                    c: tri[2],
                },
            )?);
        }

        Ok(Self {
            points: points.to_vec(),
            indices,
            half_edges,
            barycenters,
            circumcenters,
            clockwise,
        })
    }

    /// The input points.
    #[inline]
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    /// Flat vertex index triples, one per triangle.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Three half-edges per triangle.
    #[inline]
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// Centroid of each triangle.
    #[inline]
    pub fn barycenters(&self) -> &[Point2<F>] {
        &self.barycenters
    }

    /// Circumcircle center of each triangle.
    #[inline]
    pub fn circumcenters(&self) -> &[Point2<F>] {
        &self.circumcenters
    }

    /// Returns `true` if triangles were emitted clockwise.
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of triangle `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t` is out of range.
    #[inline]
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        [
            self.indices[3 * t],
            self.indices[3 * t + 1],
            self.indices[3 * t + 2],
        ]
    }

    /// Iterates over the vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns `true` if half-edge `e` has no neighbouring triangle.
    #[inline]
    pub fn is_hull_edge(&self, e: usize) -> bool {
        self.half_edges[e].is_hull()
    }

    /// Indices of the half-edges on the convex hull.
    pub fn hull_half_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.half_edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_hull())
            .map(|(i, _)| i)
    }
}
