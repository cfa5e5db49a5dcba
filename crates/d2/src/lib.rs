//! # Platenest 2D
//!
//! A 2D irregular nesting engine: places arbitrary simple polygons
//! (possibly with holes) onto rectangular sheets with forbidden regions,
//! without overlaps, packing tightly and using few sheets.
//!
//! The search is driven by no-fit polygons computed as exact Minkowski
//! sums, reduced to a finite candidate set by polygon-set Booleans, and
//! ranked by an incremental bounding-box heuristic. A reusable
//! [`PackingState`] interns canonical polygons and memoizes NFPs so that
//! repeated calls with recurring shapes get cheaper over time.
//!
//! The engine is a greedy first-fit-decreasing heuristic: it does not
//! backtrack and does not minimize a global objective exactly. It is
//! single-threaded, synchronous and deterministic: identical inputs and
//! identically initialized states produce bit-identical outputs.
//!
//! ## Quick start
//!
//! ```rust
//! use platenest_d2::{pack_decreasing, PackConfig, PackingState, Polygon, PolygonWithHoles, Sheet};
//!
//! let sheets = vec![Sheet::new(100.0, 100.0)];
//! let polygons = vec![
//!     PolygonWithHoles::new(Polygon::rectangle(10.0, 10.0)),
//!     PolygonWithHoles::new(Polygon::rectangle(20.0, 5.0)),
//! ];
//!
//! let mut state = PackingState::new();
//! let config = PackConfig::new().with_rotations(4);
//! let placements = pack_decreasing(&sheets, &polygons, &mut state, &config).unwrap();
//!
//! for (sheet_id, sheet) in placements.iter().enumerate() {
//!     for placement in sheet {
//!         println!(
//!             "polygon {} -> sheet {} at ({}, {}) rotated {} deg",
//!             placement.polygon_id,
//!             sheet_id,
//!             placement.transform.translate.x,
//!             placement.transform.translate.y,
//!             placement.transform.rotate,
//!         );
//!     }
//! }
//! ```
//!
//! ## Feature flags
//!
//! - `serde`: serialization support for the input and output types.

pub mod boundary;
pub mod candidates;
pub mod geometry;
pub mod heuristic;
pub mod nester;
pub mod nfp;
pub mod placement;
pub mod state;

pub use boundary::Sheet;
pub use candidates::CandidatePoints;
pub use geometry::{Point, Polygon, PolygonWithHoles};
pub use heuristic::BoundingBoxHeuristic;
pub use nester::{pack_decreasing, PackConfig};
pub use placement::{Placement, Transform};
pub use state::{CanonicalId, NfpKey, PackingState};

pub use platenest_core::{Error, Result};
