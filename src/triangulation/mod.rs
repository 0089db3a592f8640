//! Delaunay triangulation of point sets and its Voronoi dual.
//!
//! [`DelaunayBuilder`] turns points into a [`Triangulation`];
//! [`VoronoiBuilder`] turns a triangulation into a [`VoronoiDiagram`]. Both
//! builders can be reused across calls; the free functions
//! [`delaunay_triangulation`] and [`voronoi_diagram`] are one-shot
//! shortcuts.

mod arena;
mod delaunay;
mod point_ref;
mod result;
mod voronoi;

pub use delaunay::{
    delaunay_triangulation, DelaunayBuilder, InsertionStatistics, TriangulationOptions,
};
pub use result::{HalfEdge, Triangulation};
pub use voronoi::{
    voronoi_diagram, DiagramOptions, DualHalfEdge, VoronoiBuilder, VoronoiCell, VoronoiDiagram,
};
