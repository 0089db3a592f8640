//! Error types for triangulation and diagram construction.

use thiserror::Error;

/// The two failure categories a caller has to distinguish.
///
/// Neither is transient: the algorithms are pure, so retrying with the same
/// input always fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied input the algorithms cannot accept.
    InvalidInput,
    /// The input is acceptable but numerically degenerate (collinear,
    /// duplicate or nearly coincident points).
    DegenerateGeometry,
}

/// Errors that can occur while building a triangulation or its dual.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Fewer points than the operation needs.
    #[error("invalid input: expected at least {expected} points, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points.
        expected: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// More points than a `u32` handle can address.
    #[error("invalid input: {actual} points exceed the supported maximum of {max}")]
    TooManyPoints {
        /// Largest supported point count.
        max: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("invalid input: point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },

    /// The triangle tree outgrew its `u32` handles.
    #[error("invalid input: triangle tree exhausted its handles at {nodes} nodes")]
    ArenaExhausted {
        /// Number of nodes when the limit was hit.
        nodes: usize,
    },

    /// The triangulation handed to the diagram builder has no triangles.
    #[error("invalid input: triangulation contains no triangles")]
    EmptyTriangulation,

    /// Two input points share the exact same coordinates.
    #[error("degenerate geometry: points {first} and {second} are identical")]
    DuplicatePoint {
        /// Lower index of the pair.
        first: usize,
        /// Higher index of the pair.
        second: usize,
    },

    /// A point lies within tolerance of an existing vertex.
    #[error("degenerate geometry: point {index} coincides with an existing vertex")]
    CoincidentPoint {
        /// Index of the point being inserted.
        index: usize,
    },

    /// No child of a triangle node contains the point being located.
    #[error("degenerate geometry: could not locate point {index} in the triangle tree")]
    PointLocationFailed {
        /// Index of the point being inserted.
        index: usize,
    },

    /// The triangle tree lost track of an edge while resolving adjacency.
    #[error("degenerate geometry: triangle tree is inconsistent at node {node}")]
    InconsistentTopology {
        /// Arena handle of the node where the walk failed.
        node: u32,
    },

    /// The circumcenter of a triangle is undefined.
    #[error("degenerate geometry: triangle ({a}, {b}, {c}) is collinear")]
    CollinearTriangle {
        /// First vertex index.
        a: usize,
        /// Second vertex index.
        b: usize,
        /// Third vertex index.
        c: usize,
    },

    /// Every input point lies on one line, so no triangle exists.
    #[error("degenerate geometry: all {count} points are collinear")]
    AllCollinear {
        /// Number of input points.
        count: usize,
    },
}

impl GeometryError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeometryError::InsufficientPoints { .. }
            | GeometryError::TooManyPoints { .. }
            | GeometryError::NonFiniteCoordinate { .. }
            | GeometryError::ArenaExhausted { .. }
            | GeometryError::EmptyTriangulation => ErrorKind::InvalidInput,
            GeometryError::DuplicatePoint { .. }
            | GeometryError::CoincidentPoint { .. }
            | GeometryError::PointLocationFailed { .. }
            | GeometryError::InconsistentTopology { .. }
            | GeometryError::CollinearTriangle { .. }
            | GeometryError::AllCollinear { .. } => ErrorKind::DegenerateGeometry,
        }
    }

    /// Returns `true` for caller errors.
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    /// Returns `true` for numerically degenerate input.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.kind() == ErrorKind::DegenerateGeometry
    }
}

/// Result alias used throughout the crate.
pub type GeometryResult<T> = Result<T, GeometryError>;
