//! Candidate placement point generation.
//!
//! The feasible region for the next placement is the inner-fit polygon of
//! the sheet minus the union of the no-fit polygons of everything already
//! on it. Any translation-monotone objective attains its optimum at a
//! vertex of that region, so enumerating the vertices reduces the
//! continuous search to a finite one.

use platenest_core::exact::Exact;
use platenest_core::geometry::{Point, Polygon, PolygonWithHoles};
use platenest_core::overlay::{Containment, PolygonSet};
use platenest_core::Result;

/// Accumulates the sheet boundary (IFP) and the NFPs of placed shapes,
/// then enumerates candidate placement points.
#[derive(Debug, Default)]
pub struct CandidatePoints {
    boundary: Option<Polygon>,
    nfps: Vec<PolygonWithHoles>,
}

impl CandidatePoints {
    pub fn new() -> Self {
        CandidatePoints::default()
    }

    /// Sets the inner-fit polygon of the container. An empty boundary
    /// means the shape does not fit the sheet at all: no candidates.
    pub fn set_boundary(&mut self, inner_fit: Polygon) {
        self.boundary = Some(inner_fit);
    }

    /// Adds the NFP of one already-placed shape.
    pub fn add_nfp(&mut self, nfp: PolygonWithHoles) {
        self.nfps.push(nfp);
    }

    /// Enumerates candidate placement points.
    ///
    /// With a boundary: every vertex of `boundary \ union(nfps)`. The
    /// empty boundary is the empty set, not the plane, so it yields no
    /// candidates. A zero-area boundary (the inner-fit polygon of a snug
    /// sheet degenerates to a segment or a point) cannot go through the
    /// regularized Boolean difference; it is clipped against the NFP
    /// union directly instead.
    ///
    /// Without a boundary: every vertex of the NFP union, matching the
    /// convention that a touching placement is desired.
    pub fn points(&self) -> Result<Vec<Point>> {
        match &self.boundary {
            Some(boundary) => {
                if boundary.is_empty() {
                    return Ok(Vec::new());
                }
                let union = PolygonSet::union_all(&self.nfps)?;
                if boundary.signed_area2().is_zero() {
                    return Ok(degenerate_boundary_points(boundary, &union));
                }
                let boundary_set = PolygonSet::union_all(&[PolygonWithHoles::from_outer(
                    boundary.clone(),
                )])?;
                let feasible = boundary_set.difference(&union)?;
                Ok(vertices_of(feasible.polygons_with_holes()))
            }
            None => {
                let union = PolygonSet::union_all(&self.nfps)?;
                Ok(vertices_of(union.polygons_with_holes()))
            }
        }
    }
}

fn vertices_of(polygons: &[PolygonWithHoles]) -> Vec<Point> {
    let mut points = Vec::new();
    for pwh in polygons {
        points.extend(pwh.outer_boundary().points().iter().cloned());
        for hole in pwh.holes() {
            points.extend(hole.points().iter().cloned());
        }
    }
    points
}

/// Candidates on a zero-area boundary: the endpoints of the carrier
/// segment plus every exact crossing with the NFP union boundary, keeping
/// the points not strictly inside the union. For a point-degenerate
/// boundary the single point is kept on the same condition.
fn degenerate_boundary_points(boundary: &Polygon, union: &PolygonSet) -> Vec<Point> {
    let mut corners: Vec<&Point> = boundary.points().iter().collect();
    corners.sort();
    corners.dedup();

    let lo = match corners.first() {
        Some(p) => (*p).clone(),
        None => return Vec::new(),
    };
    let hi = match corners.last() {
        Some(p) => (*p).clone(),
        None => return Vec::new(),
    };

    if lo == hi {
        return match union.contains(&lo) {
            Containment::Inside => Vec::new(),
            _ => vec![lo],
        };
    }

    let mut params = union.clip_segment_params(&lo, &hi);
    params.insert(0, Exact::zero());
    params.push(Exact::one());
    params.sort();
    params.dedup();

    let span = hi.sub(&lo);
    let mut points = Vec::new();
    for t in params {
        let p = Point::new(&lo.x + &(&span.x * &t), &lo.y + &(&span.y * &t));
        if union.contains(&p) != Containment::Inside {
            points.push(p);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i64, y: i64) -> Point {
        Point::new(Exact::from_int(x), Exact::from_int(y))
    }

    fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Polygon {
        Polygon::new(vec![pt(x0, y0), pt(x1, y0), pt(x1, y1), pt(x0, y1)])
    }

    #[test]
    fn empty_boundary_yields_no_candidates() {
        let mut candidates = CandidatePoints::new();
        candidates.set_boundary(Polygon::new(Vec::new()));
        candidates.add_nfp(PolygonWithHoles::from_outer(rect(0, 0, 10, 10)));
        assert!(candidates.points().unwrap().is_empty());
    }

    #[test]
    fn boundary_without_nfps_yields_its_corners() {
        let mut candidates = CandidatePoints::new();
        candidates.set_boundary(rect(0, 0, 90, 90));
        let points = candidates.points().unwrap();
        assert_eq!(points.len(), 4);
        assert!(points.contains(&pt(0, 0)));
        assert!(points.contains(&pt(90, 90)));
    }

    #[test]
    fn nfp_carves_the_boundary() {
        let mut candidates = CandidatePoints::new();
        candidates.set_boundary(rect(0, 0, 10, 10));
        // NFP covering the left half: feasible region is [5,10]x[0,10].
        candidates.add_nfp(PolygonWithHoles::from_outer(rect(-5, -5, 5, 15)));
        let points = candidates.points().unwrap();
        assert!(points.contains(&pt(5, 0)));
        assert!(points.contains(&pt(10, 10)));
        assert!(!points.contains(&pt(0, 0)));
    }

    #[test]
    fn no_boundary_enumerates_union_vertices() {
        let mut candidates = CandidatePoints::new();
        candidates.add_nfp(PolygonWithHoles::from_outer(rect(0, 0, 10, 10)));
        let points = candidates.points().unwrap();
        assert_eq!(points.len(), 4);
        assert!(points.contains(&pt(10, 10)));
    }

    #[test]
    fn nfp_holes_contribute_candidates() {
        let mut candidates = CandidatePoints::new();
        candidates.set_boundary(rect(-20, -20, 20, 20));
        let mut nfp = PolygonWithHoles::from_outer(rect(-10, -10, 10, 10));
        let mut hole = rect(-2, -2, 2, 2);
        hole.reverse();
        nfp.add_hole(hole);
        candidates.add_nfp(nfp);
        let points = candidates.points().unwrap();
        // Hole vertices are placements nesting inside the placed shape.
        assert!(points.contains(&pt(-2, -2)));
        assert!(points.contains(&pt(2, 2)));
        assert!(points.contains(&pt(-20, -20)));
    }

    #[test]
    fn degenerate_segment_boundary() {
        let mut candidates = CandidatePoints::new();
        // Snug sheet: the IFP collapsed to the segment y=0, x in [0,10].
        candidates.set_boundary(Polygon::new(vec![
            pt(0, 0),
            pt(10, 0),
            pt(10, 0),
            pt(0, 0),
        ]));
        // A placed square blocks translations strictly inside (-10,10)^2.
        candidates.add_nfp(PolygonWithHoles::from_outer(rect(-10, -10, 10, 10)));
        let points = candidates.points().unwrap();
        assert_eq!(points, vec![pt(10, 0)]);
    }

    #[test]
    fn degenerate_point_boundary() {
        let mut candidates = CandidatePoints::new();
        candidates.set_boundary(Polygon::new(vec![pt(10, 0); 4]));
        let free = candidates.points().unwrap();
        assert_eq!(free, vec![pt(10, 0)]);

        let mut blocked = CandidatePoints::new();
        blocked.set_boundary(Polygon::new(vec![pt(0, 0); 4]));
        blocked.add_nfp(PolygonWithHoles::from_outer(rect(-10, -10, 10, 10)));
        assert!(blocked.points().unwrap().is_empty());
    }
}
