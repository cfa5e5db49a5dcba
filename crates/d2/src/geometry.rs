//! Plain-`f64` input geometry and its promotion to the exact kernel.
//!
//! These are the types callers hand to the engine. Coordinates are
//! accepted in any winding; promotion normalizes outer boundaries to
//! counter-clockwise and holes to clockwise, and rejects geometry the
//! kernel cannot work with (non-finite coordinates, fewer than three
//! vertices, zero-area boundaries).

use platenest_core::geometry as exact;
use platenest_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D point with `f64` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A simple polygon given as an ordered vertex list, without a repeated
/// closing vertex.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Polygon { points }
    }

    pub fn from_coords(coords: Vec<(f64, f64)>) -> Self {
        Polygon {
            points: coords.into_iter().map(|(x, y)| Point::new(x, y)).collect(),
        }
    }

    /// Axis-aligned `width` x `height` rectangle anchored at the origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Polygon::from_coords(vec![
            (0.0, 0.0),
            (width, 0.0),
            (width, height),
            (0.0, height),
        ])
    }

    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
    }

    pub(crate) fn to_exact(&self) -> Result<exact::Polygon> {
        if self.points.len() < 3 {
            return Err(Error::InvalidGeometry(format!(
                "polygon needs at least 3 vertices, got {}",
                self.points.len()
            )));
        }
        let points = self
            .points
            .iter()
            .map(|p| exact::Point::from_f64(p.x, p.y))
            .collect::<Result<Vec<_>>>()?;
        Ok(exact::Polygon::new(points))
    }
}

/// A polygon with zero or more holes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonWithHoles {
    pub boundary: Polygon,
    pub holes: Vec<Polygon>,
}

impl PolygonWithHoles {
    pub fn new(boundary: Polygon) -> Self {
        PolygonWithHoles {
            boundary,
            holes: Vec::new(),
        }
    }

    /// Builder-style hole attachment.
    pub fn with_hole(mut self, hole: Polygon) -> Self {
        self.holes.push(hole);
        self
    }

    pub fn add_hole(&mut self, hole: Polygon) {
        self.holes.push(hole);
    }

    /// Promotes to the exact kernel, normalizing the outer boundary to
    /// counter-clockwise and every hole to clockwise.
    pub(crate) fn to_exact(&self) -> Result<exact::PolygonWithHoles> {
        let mut boundary = self.boundary.to_exact()?;
        match boundary.orientation() {
            o if o.is_cw() => boundary.reverse(),
            o if o.is_ccw() => {}
            _ => {
                return Err(Error::InvalidGeometry(
                    "polygon boundary has zero area".into(),
                ))
            }
        }
        let mut result = exact::PolygonWithHoles::from_outer(boundary);
        for hole in &self.holes {
            let mut hole = hole.to_exact()?;
            match hole.orientation() {
                o if o.is_ccw() => hole.reverse(),
                o if o.is_cw() => {}
                _ => return Err(Error::InvalidGeometry("hole has zero area".into())),
            }
            result.add_hole(hole);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_constructor() {
        let rect = Polygon::rectangle(20.0, 10.0);
        assert_eq!(rect.points.len(), 4);
        assert_eq!(rect.points[2], Point::new(20.0, 10.0));
    }

    #[test]
    fn promotion_normalizes_windings() {
        // Clockwise boundary, counter-clockwise hole: both get flipped.
        let boundary = Polygon::from_coords(vec![
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
        ]);
        let hole = Polygon::from_coords(vec![(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)]);
        let exact = PolygonWithHoles::new(boundary).with_hole(hole).to_exact().unwrap();
        assert!(exact.outer_boundary().orientation().is_ccw());
        assert!(exact.holes()[0].orientation().is_cw());
    }

    #[test]
    fn rejects_degenerate_input() {
        let two_points = Polygon::from_coords(vec![(0.0, 0.0), (1.0, 0.0)]);
        assert!(PolygonWithHoles::new(two_points).to_exact().is_err());

        let zero_area = Polygon::from_coords(vec![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        assert!(PolygonWithHoles::new(zero_area).to_exact().is_err());

        let non_finite = Polygon::from_coords(vec![
            (0.0, 0.0),
            (f64::NAN, 0.0),
            (1.0, 1.0),
        ]);
        assert!(PolygonWithHoles::new(non_finite).to_exact().is_err());
    }
}
