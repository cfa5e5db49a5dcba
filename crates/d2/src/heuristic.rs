//! Incremental bounding-box scoring for placements.
//!
//! The score of a sheet is the sum of two bounding-box areas: the box
//! around everything relevant (newly placed parts plus the sheet's
//! pre-existing holes) and the box around the newly placed parts alone.
//! The second term rewards packing the new parts tightly; the first
//! additionally rewards tucking them against or inside existing holes.
//! Both boxes update in O(1) per commit and can be evaluated for a trial
//! part without mutating anything.
//!
//! This heuristic runs on `f64` even though the kernel is exact: it only
//! *ranks* candidate placements and is never used for feasibility.
//! Determinism holds because the same operations run in the same order
//! for the same inputs.

use platenest_core::geometry::Bounds;

use crate::boundary::Sheet;

/// Bounding box in `f64`, with the empty box encoded as inverted
/// infinities so that folding a point in works without special cases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Aabb {
    pub fn empty() -> Self {
        Aabb {
            xmin: f64::INFINITY,
            ymin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymax: f64::NEG_INFINITY,
        }
    }

    pub fn from_bounds(bounds: &Bounds) -> Self {
        Aabb {
            xmin: bounds.xmin.to_f64(),
            ymin: bounds.ymin.to_f64(),
            xmax: bounds.xmax.to_f64(),
            ymax: bounds.ymax.to_f64(),
        }
    }

    pub fn expand(&mut self, other: &Aabb) {
        self.xmin = self.xmin.min(other.xmin);
        self.ymin = self.ymin.min(other.ymin);
        self.xmax = self.xmax.max(other.xmax);
        self.ymax = self.ymax.max(other.ymax);
    }

    /// Area, zero for the empty box.
    pub fn area(&self) -> f64 {
        let width = self.xmax - self.xmin;
        let height = self.ymax - self.ymin;
        if width < 0.0 || height < 0.0 {
            0.0
        } else {
            width * height
        }
    }
}

/// The dual bounding-box score of one sheet.
#[derive(Debug, Clone)]
pub struct BoundingBoxHeuristic {
    /// Parts plus the sheet's holes.
    combined: Aabb,
    /// Newly placed parts only.
    parts: Aabb,
}

impl BoundingBoxHeuristic {
    /// Seeds the combined box with the sheet's holes; the parts box
    /// starts empty.
    pub fn for_sheet(sheet: &Sheet) -> Self {
        let mut combined = Aabb::empty();
        for hole in &sheet.holes {
            for point in &hole.boundary.points {
                combined.xmin = combined.xmin.min(point.x);
                combined.ymin = combined.ymin.min(point.y);
                combined.xmax = combined.xmax.max(point.x);
                combined.ymax = combined.ymax.max(point.y);
            }
        }
        BoundingBoxHeuristic {
            combined,
            parts: Aabb::empty(),
        }
    }

    /// Current score of the sheet.
    pub fn eval(&self) -> f64 {
        self.combined.area() + self.parts.area()
    }

    /// Score the sheet would have with `part` added; no mutation.
    pub fn eval_if_added(&self, part: &Aabb) -> f64 {
        let mut combined = self.combined;
        combined.expand(part);
        let mut parts = self.parts;
        parts.expand(part);
        combined.area() + parts.area()
    }

    /// Commits `part` to the sheet.
    pub fn commit(&mut self, part: &Aabb) {
        self.combined.expand(part);
        self.parts.expand(part);
    }
}
