//! Minkowski sums of polygons-with-holes.
//!
//! Two convex boundaries are summed directly with the O(n+m) edge merge.
//! Everything else goes through decomposition: triangulate the material of
//! both operands, sum every triangle pair convexly, and union the parts.
//! Holes of the result emerge from the union: they are the regions where
//! one operand nests entirely inside a hole of the other.

use crate::error::{Error, Result};
use crate::geometry::{Point, Polygon, PolygonWithHoles, Vector};
use crate::overlay::PolygonSet;
use crate::triangulate::triangulate;

/// Minkowski sum of two convex counter-clockwise polygons.
///
/// Classic edge merge: both edge sequences, taken from the bottom-most
/// vertex, are sorted by direction angle; merging them yields the edge
/// sequence of the sum.
pub fn minkowski_sum_convex(a: &Polygon, b: &Polygon) -> Polygon {
    let pa = rotate_to_bottom(a.points());
    let pb = rotate_to_bottom(b.points());
    let ea = edge_vectors(&pa);
    let eb = edge_vectors(&pb);

    let start = Point::new(&pa[0].x + &pb[0].x, &pa[0].y + &pb[0].y);
    let mut points = Vec::with_capacity(ea.len() + eb.len());
    points.push(start);
    let mut i = 0;
    let mut j = 0;
    while i < ea.len() || j < eb.len() {
        let take_a = if i == ea.len() {
            false
        } else if j == eb.len() {
            true
        } else {
            !angle_greater(&ea[i], &eb[j])
        };
        let step = if take_a {
            i += 1;
            &ea[i - 1]
        } else {
            j += 1;
            &eb[j - 1]
        };
        let next = points.last().expect("seeded with start point").add(step);
        points.push(next);
    }
    // The final step closes the loop back onto the start point.
    points.pop();
    Polygon::new(points)
}

/// Minkowski sum of two polygons-with-holes. The sum of two connected
/// sets is connected, so the result is a single polygon-with-holes; the
/// empty set absorbs everything.
pub fn minkowski_sum(a: &PolygonWithHoles, b: &PolygonWithHoles) -> Result<PolygonWithHoles> {
    if a.is_empty() || b.is_empty() {
        return Ok(PolygonWithHoles::empty());
    }
    let a = normalized(a);
    let b = normalized(b);

    if a.holes().is_empty()
        && b.holes().is_empty()
        && a.outer_boundary().is_convex()
        && b.outer_boundary().is_convex()
    {
        return Ok(PolygonWithHoles::from_outer(minkowski_sum_convex(
            a.outer_boundary(),
            b.outer_boundary(),
        )));
    }

    let tris_a = triangulate(&a)?;
    let tris_b = triangulate(&b)?;
    if tris_a.is_empty() || tris_b.is_empty() {
        return Ok(PolygonWithHoles::empty());
    }

    let mut parts = Vec::with_capacity(tris_a.len() * tris_b.len());
    for ta in &tris_a {
        let poly_a = Polygon::new(ta.to_vec());
        for tb in &tris_b {
            let poly_b = Polygon::new(tb.to_vec());
            parts.push(PolygonWithHoles::from_outer(minkowski_sum_convex(
                &poly_a, &poly_b,
            )));
        }
    }

    let mut components = PolygonSet::union_all(&parts)?.into_polygons();
    if components.len() != 1 {
        return Err(Error::Internal(format!(
            "minkowski sum produced {} components",
            components.len()
        )));
    }
    Ok(components.remove(0))
}

/// Outer boundary counter-clockwise, holes clockwise.
fn normalized(pwh: &PolygonWithHoles) -> PolygonWithHoles {
    let mut outer = pwh.outer_boundary().clone();
    if outer.orientation().is_cw() {
        outer.reverse();
    }
    let mut result = PolygonWithHoles::from_outer(outer);
    for hole in pwh.holes() {
        let mut hole = hole.clone();
        if hole.orientation().is_ccw() {
            hole.reverse();
        }
        result.add_hole(hole);
    }
    result
}

/// Reorders a cyclic vertex sequence to start at the bottom-most (then
/// left-most) vertex, so edge angles run monotonically through [0, 2pi).
fn rotate_to_bottom(points: &[Point]) -> Vec<Point> {
    let start = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (&a.y, &a.x).cmp(&(&b.y, &b.x)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let mut out = Vec::with_capacity(points.len());
    for k in 0..points.len() {
        out.push(points[(start + k) % points.len()].clone());
    }
    out
}

fn edge_vectors(points: &[Point]) -> Vec<Vector> {
    let n = points.len();
    (0..n)
        .map(|i| points[(i + 1) % n].sub(&points[i]))
        .collect()
}

/// True if `u`'s direction angle in [0, 2pi) is strictly greater than
/// `v`'s. Measured from the positive x axis; the half containing angles
/// below pi compares first.
fn angle_greater(u: &Vector, v: &Vector) -> bool {
    let hu = upper_half(u);
    let hv = upper_half(v);
    if hu != hv {
        return hu > hv;
    }
    u.cross(v).is_negative()
}

fn upper_half(v: &Vector) -> u8 {
    if v.y.is_positive() || (v.y.is_zero() && v.x.is_positive()) {
        0
    } else {
        1
    }
}
