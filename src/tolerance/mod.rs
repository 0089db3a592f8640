//! Epsilon-aware geometric predicates and triangle centers.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used.

mod predicates;

pub use predicates::{
    barycenter, circumcenter, in_circumcircle, orient2d, point_on_line, Orientation,
};
