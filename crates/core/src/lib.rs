//! # Platenest Core
//!
//! Exact 2D geometry kernel for the platenest nesting engine.
//!
//! Coordinates are arbitrary-precision rationals ([`Exact`]), so the
//! Boolean overlay and the Minkowski sums that drive no-fit-polygon
//! computation are robust: edges either coincide exactly or they do not,
//! and every result is a deterministic function of the input.
//!
//! ## Components
//!
//! - [`exact`]: the rational scalar type
//! - [`geometry`]: points, vectors, polygons, polygons-with-holes
//! - [`transform`]: affine maps (rotation, translation, point reflection)
//! - [`overlay`]: Boolean operations on polygon sets
//! - [`triangulate`]: ear clipping with hole bridging
//! - [`minkowski`]: convex and general Minkowski sums

pub mod error;
pub mod exact;
pub mod geometry;
pub mod minkowski;
pub mod overlay;
pub mod transform;
pub mod triangulate;

pub use error::{Error, Result};
pub use exact::Exact;
pub use geometry::{Bounds, Orientation, Point, Polygon, PolygonWithHoles, Vector};
pub use minkowski::{minkowski_sum, minkowski_sum_convex};
pub use overlay::{Containment, OverlayRule, PolygonSet};
pub use transform::Transform;
pub use triangulate::triangulate;
