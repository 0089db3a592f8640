//! delaunay-dual - Planar Delaunay triangulation and Voronoi diagrams
//!
//! Points go in, a Delaunay triangulation with half-edge adjacency comes out,
//! and its Voronoi dual can be derived from that. All predicates take an
//! explicit tolerance; nothing is global.
//!
//! ```
//! use delaunay_dual::{
//!     delaunay_triangulation, voronoi_diagram, DiagramOptions, Point2, TriangulationOptions,
//! };
//!
//! let points = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(1.0, 1.0),
//! ];
//!
//! let triangulation = delaunay_triangulation(&points, &TriangulationOptions::default())?;
//! let diagram = voronoi_diagram(&triangulation, &DiagramOptions::default().with_hull(true))?;
//!
//! assert_eq!(triangulation.triangle_count(), 2);
//! assert!(diagram.cell_polygon(0).is_some());
//! # Ok::<(), delaunay_dual::GeometryError>(())
//! ```

pub mod error;
pub mod primitives;
pub mod tolerance;
pub mod triangulation;

pub use error::{ErrorKind, GeometryError, GeometryResult};
pub use primitives::{Point2, Vec2};
pub use tolerance::{orient2d, Orientation};
pub use triangulation::{
    delaunay_triangulation, voronoi_diagram, DelaunayBuilder, DiagramOptions, Triangulation,
    TriangulationOptions, VoronoiBuilder, VoronoiDiagram,
};
