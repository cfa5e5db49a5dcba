//! Sheets: the rectangular containers polygons are packed onto.

use platenest_core::geometry as exact;
use platenest_core::{Error, Result};

use crate::geometry::PolygonWithHoles;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `width` x `height` rectangle anchored at the origin with axis-aligned
/// sides, carrying forbidden regions ("holes") that placements must not
/// overlap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sheet {
    pub width: f64,
    pub height: f64,
    pub holes: Vec<PolygonWithHoles>,
}

impl Sheet {
    pub fn new(width: f64, height: f64) -> Self {
        Sheet {
            width,
            height,
            holes: Vec::new(),
        }
    }

    /// Attaches forbidden regions to the sheet.
    pub fn add_holes(&mut self, holes: Vec<PolygonWithHoles>) {
        self.holes.extend(holes);
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(Error::InvalidBoundary(
                "sheet dimensions must be finite".into(),
            ));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidBoundary(format!(
                "sheet dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// The sheet rectangle as an exact polygon-with-holes (the container
    /// argument of the inner-fit computation).
    pub(crate) fn boundary_polygon(&self) -> Result<exact::PolygonWithHoles> {
        let corners = [
            (0.0, 0.0),
            (self.width, 0.0),
            (self.width, self.height),
            (0.0, self.height),
        ];
        let points = corners
            .iter()
            .map(|&(x, y)| exact::Point::from_f64(x, y))
            .collect::<Result<Vec<_>>>()?;
        Ok(exact::PolygonWithHoles::from_outer(exact::Polygon::new(
            points,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert!(Sheet::new(100.0, 50.0).validate().is_ok());
        assert!(Sheet::new(0.0, 50.0).validate().is_err());
        assert!(Sheet::new(100.0, -1.0).validate().is_err());
        assert!(Sheet::new(f64::INFINITY, 1.0).validate().is_err());
    }

    #[test]
    fn boundary_polygon_is_ccw() {
        let sheet = Sheet::new(20.0, 10.0);
        let rect = sheet.boundary_polygon().unwrap();
        assert!(rect.outer_boundary().orientation().is_ccw());
        assert_eq!(rect.outer_boundary().len(), 4);
    }
}
