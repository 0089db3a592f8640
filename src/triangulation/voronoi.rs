//! Voronoi diagram computation from a Delaunay triangulation.
//!
//! A Voronoi diagram partitions the plane into cells, where each cell contains
//! all points closer to its generating site than to any other site.
//!
//! # How It Works
//!
//! The Voronoi diagram is the dual of the Delaunay triangulation:
//! - Each triangle's circumcenter (or barycenter) becomes a Voronoi vertex
//! - Each interior triangle edge becomes a pair of Voronoi half-edges joining
//!   the centers of the two triangles sharing it
//! - Hull edges either leave their cells open or, with
//!   [`DiagramOptions::create_hull`], are closed through the edge midpoint
//!   and a corner at the hull site itself
//!
//! Half-edges of a cell run counter-clockwise around their site, whichever
//! winding the triangulation was emitted with.
//!
//! # Example
//!
//! ```
//! use delaunay_dual::triangulation::{
//!     delaunay_triangulation, voronoi_diagram, DiagramOptions, TriangulationOptions,
//! };
//! use delaunay_dual::Point2;
//!
//! let sites: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 1.0),
//! ];
//!
//! let triangulation = delaunay_triangulation(&sites, &TriangulationOptions::default()).unwrap();
//! let voronoi = voronoi_diagram(&triangulation, &DiagramOptions::default()).unwrap();
//!
//! // One triangle means one Voronoi vertex (the circumcenter)
//! assert_eq!(voronoi.vertices().len(), 1);
//!
//! // Three sites means three cells
//! assert_eq!(voronoi.cells().len(), 3);
//! ```

use super::result::Triangulation;
use crate::error::{GeometryError, GeometryResult};
use crate::primitives::Point2;
use num_traits::Float;

/// Options for a single diagram call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagramOptions {
    /// Use triangle barycenters instead of circumcenters as vertices.
    pub from_barycenter: bool,
    /// Close the cells of hull sites.
    pub create_hull: bool,
}

impl DiagramOptions {
    pub fn with_barycenters(mut self, from_barycenter: bool) -> Self {
        self.from_barycenter = from_barycenter;
        self
    }

    pub fn with_hull(mut self, create_hull: bool) -> Self {
        self.create_hull = create_hull;
        self
    }
}

/// A directed edge of the diagram between two Voronoi vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DualHalfEdge {
    /// Vertex index the edge starts at.
    pub origin: usize,
    /// Vertex index the edge ends at.
    pub destination: usize,
    /// Site whose cell this edge bounds.
    pub site: usize,
    /// The same edge seen from the neighbouring cell.
    pub opposite: Option<usize>,
}

/// A Voronoi cell for a site.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoronoiCell {
    /// Index of the site this cell belongs to.
    pub site: usize,
    /// Indices of the half-edges bounding the cell, in creation order.
    pub half_edges: Vec<usize>,
}

/// A Voronoi diagram.
///
/// Vertices are ordered as triangle centers first (one per triangle, same
/// order as the triangulation), then vertices synthesized to close hull
/// cells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoronoiDiagram<F> {
    sites: Vec<Point2<F>>,
    vertices: Vec<Point2<F>>,
    cells: Vec<VoronoiCell>,
    half_edges: Vec<DualHalfEdge>,
    center_count: usize,
    corner_start: usize,
}

impl<F: Float> VoronoiDiagram<F> {
    /// The generating sites.
    #[inline]
    pub fn sites(&self) -> &[Point2<F>] {
        &self.sites
    }

    /// The Voronoi vertices.
    #[inline]
    pub fn vertices(&self) -> &[Point2<F>] {
        &self.vertices
    }

    /// One cell per site, indexed like the sites.
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    #[inline]
    pub fn half_edges(&self) -> &[DualHalfEdge] {
        &self.half_edges
    }

    /// Number of vertices that are triangle centers.
    #[inline]
    pub fn center_count(&self) -> usize {
        self.center_count
    }

    /// Returns `true` if `vertex` was added to close a hull cell.
    #[inline]
    pub fn is_synthesized(&self, vertex: usize) -> bool {
        vertex >= self.center_count
    }

    /// Sites followed by vertices, the point buffer for [`fan_indices`](Self::fan_indices).
    pub fn all_points(&self) -> Vec<Point2<F>> {
        let mut points = Vec::with_capacity(self.sites.len() + self.vertices.len());
        points.extend_from_slice(&self.sites);
        points.extend_from_slice(&self.vertices);
        points
    }

    /// Converts a vertex index into an index into [`all_points`](Self::all_points).
    #[inline]
    pub fn real_point_index(&self, vertex: usize) -> usize {
        self.sites.len() + vertex
    }

    /// Triangulates every cell as a fan around its site.
    ///
    /// Each half-edge contributes `(site, origin, destination)` over
    /// [`all_points`](Self::all_points), counter-clockwise. Edges through a
    /// hull corner would give zero-area triangles and are skipped.
    pub fn fan_indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.half_edges.len() * 3);
        for edge in &self.half_edges {
            if edge.origin >= self.corner_start || edge.destination >= self.corner_start {
                continue;
            }
            indices.push(edge.site);
            indices.push(self.real_point_index(edge.origin));
            indices.push(self.real_point_index(edge.destination));
        }
        indices
    }

    /// The vertices of a closed cell in counter-clockwise order.
    ///
    /// Returns `None` for an empty or open cell, or if `site` is out of range.
    pub fn cell_polygon(&self, site: usize) -> Option<Vec<usize>> {
        let edges = &self.cells.get(site)?.half_edges;
        let first = *edges.first()?;

        let mut polygon = Vec::with_capacity(edges.len());
        let mut current = first;
        loop {
            let edge = self.half_edges[current];
            polygon.push(edge.origin);
            if polygon.len() > edges.len() {
                return None;
            }
            current = edges
                .iter()
                .copied()
                .find(|&e| self.half_edges[e].origin == edge.destination)?;
            if current == first {
                break;
            }
        }

        (polygon.len() == edges.len()).then_some(polygon)
    }
}

/// Reusable Voronoi diagram builder.
///
/// Keeps its per-edge lookup tables between calls.
#[derive(Debug, Default)]
pub struct VoronoiBuilder {
    dual_of: Vec<Option<usize>>,
    hull_in: Vec<Option<usize>>,
    hull_out: Vec<Option<usize>>,
}

impl VoronoiBuilder {
    /// Creates a builder with empty lookup tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the dual diagram of `triangulation`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::EmptyTriangulation`] if the triangulation has no
    /// triangles.
    pub fn calculate_diagram<F: Float>(
        &mut self,
        triangulation: &Triangulation<F>,
        options: &DiagramOptions,
    ) -> GeometryResult<VoronoiDiagram<F>> {
        if triangulation.triangle_count() == 0 {
            return Err(GeometryError::EmptyTriangulation);
        }

        self.reset();
        let diagram = self.build(triangulation, options);
        self.reset();

        tracing::debug!(
            sites = diagram.sites.len(),
            vertices = diagram.vertices.len(),
            half_edges = diagram.half_edges.len(),
            create_hull = options.create_hull,
            "voronoi diagram complete"
        );
        Ok(diagram)
    }

    fn reset(&mut self) {
        self.dual_of.clear();
        self.hull_in.clear();
        self.hull_out.clear();
    }

    fn build<F: Float>(
        &mut self,
        triangulation: &Triangulation<F>,
        options: &DiagramOptions,
    ) -> VoronoiDiagram<F> {
        let sites = triangulation.points();
        let mut vertices: Vec<Point2<F>> = if options.from_barycenter {
            triangulation.barycenters().to_vec()
        } else {
            triangulation.circumcenters().to_vec()
        };
        let center_count = vertices.len();

        let mut half_edges: Vec<DualHalfEdge> = Vec::new();
        let mut cells: Vec<VoronoiCell> = (0..sites.len())
            .map(|site| VoronoiCell {
                site,
                half_edges: Vec::new(),
            })
            .collect();

        let mut push = |half_edges: &mut Vec<DualHalfEdge>, edge: DualHalfEdge| {
            cells[edge.site].half_edges.push(half_edges.len());
            half_edges.push(edge);
            half_edges.len() - 1
        };

        let tri_edges = triangulation.half_edges();
        self.dual_of.resize(tri_edges.len(), None);
        self.hull_in.resize(sites.len(), None);
        self.hull_out.resize(sites.len(), None);

        for (h, edge) in tri_edges.iter().enumerate() {
            let center = edge.triangle;
            match edge.opposite {
                Some(o) => {
                    let id = push(
                        &mut half_edges,
                        DualHalfEdge {
                            origin: center,
                            destination: tri_edges[o].triangle,
                            site: edge.destination,
                            opposite: None,
                        },
                    );
                    self.dual_of[h] = Some(id);
                }
                None if options.create_hull => {
                    let mid = vertices.len();
                    vertices.push(sites[edge.origin].midpoint(sites[edge.destination]));
                    let inward = half_edges.len() + 1;
                    let outward = push(
                        &mut half_edges,
                        DualHalfEdge {
                            origin: center,
                            destination: mid,
                            site: edge.destination,
                            opposite: Some(inward),
                        },
                    );
                    push(
                        &mut half_edges,
                        DualHalfEdge {
                            origin: mid,
                            destination: center,
                            site: edge.origin,
                            opposite: Some(outward),
                        },
                    );
                    self.hull_in[edge.destination] = Some(mid);
                    self.hull_out[edge.origin] = Some(mid);
                }
                None => {}
            }
        }

        for (h, edge) in tri_edges.iter().enumerate() {
            if let (Some(id), Some(o)) = (self.dual_of[h], edge.opposite) {
                half_edges[id].opposite = self.dual_of[o];
            }
        }

        let corner_start = vertices.len();
        for site in 0..sites.len() {
            if let (Some(m_in), Some(m_out)) = (self.hull_in[site], self.hull_out[site]) {
                let corner = vertices.len();
                vertices.push(sites[site]);
                push(
                    &mut half_edges,
                    DualHalfEdge {
                        origin: m_in,
                        destination: corner,
                        site,
                        opposite: None,
                    },
                );
                push(
                    &mut half_edges,
                    DualHalfEdge {
                        origin: corner,
                        destination: m_out,
                        site,
                        opposite: None,
                    },
                );
            }
        }

        // Crossing a clockwise triangulation's edges walks each cell clockwise
        if triangulation.is_clockwise() {
            for edge in &mut half_edges {
                std::mem::swap(&mut edge.origin, &mut edge.destination);
            }
        }

        VoronoiDiagram {
            sites: sites.to_vec(),
            vertices,
            cells,
            half_edges,
            center_count,
            corner_start,
        }
    }
}

/// Computes the dual diagram of `triangulation` with a throwaway builder.
pub fn voronoi_diagram<F: Float>(
    triangulation: &Triangulation<F>,
    options: &DiagramOptions,
) -> GeometryResult<VoronoiDiagram<F>> {
    VoronoiBuilder::new().calculate_diagram(triangulation, options)
}
