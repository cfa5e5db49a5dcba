//! Output types: the transform assigned to each placed polygon.

use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A translation plus a rotation in **degrees** (`i * 360 / rotations`
/// for the i-th step of the rotation sweep). Internally the engine works
/// in radians; degrees appear only here, at the output boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub translate: Point,
    pub rotate: f64,
}

impl Transform {
    pub fn new(translate: Point, rotate: f64) -> Self {
        Transform { translate, rotate }
    }
}

/// A committed placement: which input polygon went where.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Index of the polygon in the input list.
    pub polygon_id: usize,
    pub transform: Transform,
}

impl Placement {
    pub fn new(polygon_id: usize, transform: Transform) -> Self {
        Placement {
            polygon_id,
            transform,
        }
    }
}
