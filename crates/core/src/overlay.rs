//! Exact Boolean operations on polygon sets.
//!
//! The overlay works on collections of polygons-with-holes whose outer
//! boundaries wind counter-clockwise and whose holes wind clockwise, so
//! that material is exactly the region of positive winding. Inputs may
//! touch, nest or overlap arbitrarily; outputs are simple loops with
//! disjoint interiors, grouped into polygons-with-holes.
//!
//! The algorithm is a planar overlay over the exact kernel:
//!
//! 1. split every edge at every pairwise intersection (point and
//!    collinear-overlap cases; all intersections of segments with
//!    rational endpoints are rational);
//! 2. merge coincident sub-edges, accumulating a net multiplicity per
//!    operand (slit edges traversed equally in both directions cancel
//!    and disappear here);
//! 3. classify the two faces of every surviving sub-edge by exact
//!    winding-number ray counts with the half-open rule;
//! 4. keep the sub-edges where the overlay rule changes sides, oriented
//!    with the result region on the left, and stitch them into loops by
//!    always taking the leftmost turn.
//!
//! Counter-clockwise loops are outer boundaries, clockwise loops are
//! holes; each hole attaches to the smallest outer that contains it. All
//! intermediate orderings go through sorted containers, so the output is
//! a deterministic function of the input.
//!
//! Operations are regularized: a result with empty interior is the empty
//! set. An empty polygon-with-holes is the empty set, never the plane.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::exact::Exact;
use crate::geometry::{Point, Polygon, PolygonWithHoles, Vector};

/// Boolean operation applied by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRule {
    Union,
    Difference,
}

impl OverlayRule {
    fn selects(self, w: &[i64; 2]) -> bool {
        let a = w[0] > 0;
        let b = w[1] > 0;
        match self {
            OverlayRule::Union => a || b,
            OverlayRule::Difference => a && !b,
        }
    }
}

/// Result of locating a point against a polygon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    OnBoundary,
    Outside,
}

/// A set of points in the plane, canonically represented as
/// interior-disjoint polygons-with-holes.
#[derive(Clone, Debug, Default)]
pub struct PolygonSet {
    polygons: Vec<PolygonWithHoles>,
}

impl PolygonSet {
    pub fn new() -> Self {
        PolygonSet::default()
    }

    /// Canonical union of arbitrarily overlapping polygons-with-holes.
    pub fn union_all(items: &[PolygonWithHoles]) -> Result<PolygonSet> {
        let mut edges = Vec::new();
        gather_edges(items, 0, &mut edges);
        Ok(PolygonSet {
            polygons: overlay(edges, OverlayRule::Union)?,
        })
    }

    /// Set difference `self \ other`.
    pub fn difference(&self, other: &PolygonSet) -> Result<PolygonSet> {
        let mut edges = Vec::new();
        gather_edges(&self.polygons, 0, &mut edges);
        gather_edges(&other.polygons, 1, &mut edges);
        Ok(PolygonSet {
            polygons: overlay(edges, OverlayRule::Difference)?,
        })
    }

    /// Component polygons-with-holes, outer boundary first then holes,
    /// ordered by their lexicographically smallest vertex.
    pub fn polygons_with_holes(&self) -> &[PolygonWithHoles] {
        &self.polygons
    }

    /// Consumes the set, yielding its component polygons-with-holes.
    pub fn into_polygons(self) -> Vec<PolygonWithHoles> {
        self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Exact point location.
    pub fn contains(&self, p: &Point) -> Containment {
        let mut winding = 0i64;
        for pwh in &self.polygons {
            for ring in
                std::iter::once(pwh.outer_boundary()).chain(pwh.holes().iter())
            {
                match locate_in_ring(ring, p) {
                    RingLocation::OnBoundary => return Containment::OnBoundary,
                    RingLocation::Winding(w) => winding += w,
                }
            }
        }
        if winding != 0 {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }

    /// Parameters in `[0, 1]` at which the segment `a..b` meets the
    /// boundary of the set, sorted and deduplicated. Collinear overlaps
    /// contribute their clamped endpoints.
    pub fn clip_segment_params(&self, a: &Point, b: &Point) -> Vec<Exact> {
        let d = b.sub(a);
        if d.x.is_zero() && d.y.is_zero() {
            return Vec::new();
        }
        let zero = Exact::zero();
        let one = Exact::one();
        let mut params = Vec::new();
        for pwh in &self.polygons {
            for ring in
                std::iter::once(pwh.outer_boundary()).chain(pwh.holes().iter())
            {
                let pts = ring.points();
                for i in 0..pts.len() {
                    let p = &pts[i];
                    let q = &pts[(i + 1) % pts.len()];
                    let e = q.sub(p);
                    let sep = p.sub(a);
                    let denom = d.cross(&e);
                    if !denom.is_zero() {
                        let s = &sep.cross(&e) / &denom;
                        let t = &sep.cross(&d) / &denom;
                        if s >= zero && s <= one && t >= zero && t <= one {
                            params.push(s);
                        }
                    } else if sep.cross(&d).is_zero() {
                        let len2 = d.dot(&d);
                        for point in [p, q] {
                            let t = &d.dot(&point.sub(a)) / &len2;
                            if t >= zero && t <= one {
                                params.push(t);
                            }
                        }
                    }
                }
            }
        }
        params.sort();
        params.dedup();
        params
    }
}

// ---------------------------------------------------------------------
// Overlay internals
// ---------------------------------------------------------------------

struct DirEdge {
    a: Point,
    b: Point,
    operand: usize,
}

fn gather_edges(items: &[PolygonWithHoles], operand: usize, out: &mut Vec<DirEdge>) {
    for pwh in items {
        if pwh.is_empty() {
            continue;
        }
        gather_ring(pwh.outer_boundary(), operand, out);
        for hole in pwh.holes() {
            gather_ring(hole, operand, out);
        }
    }
}

fn gather_ring(ring: &Polygon, operand: usize, out: &mut Vec<DirEdge>) {
    let pts = ring.points();
    if pts.len() < 3 {
        return;
    }
    for i in 0..pts.len() {
        let a = &pts[i];
        let b = &pts[(i + 1) % pts.len()];
        if a != b {
            out.push(DirEdge {
                a: a.clone(),
                b: b.clone(),
                operand,
            });
        }
    }
}

/// A canonical (lexicographically directed) sub-edge with its net
/// traversal multiplicity per operand.
struct Seg {
    u: Point,
    v: Point,
    mult: [i64; 2],
}

impl Seg {
    fn is_vertical(&self) -> bool {
        self.u.x == self.v.x
    }

    /// y of the supporting line at `x`; only valid for non-vertical segments.
    fn y_at(&self, x: &Exact) -> Exact {
        &self.u.y + &(&(&(x - &self.u.x) * &(&self.v.y - &self.u.y)) / &(&self.v.x - &self.u.x))
    }

    /// x of the supporting line at `y`; only valid for non-horizontal segments.
    fn x_at(&self, y: &Exact) -> Exact {
        if self.is_vertical() {
            return self.u.x.clone();
        }
        &self.u.x + &(&(&(y - &self.u.y) * &(&self.v.x - &self.u.x)) / &(&self.v.y - &self.u.y))
    }
}

fn overlay(edges: Vec<DirEdge>, rule: OverlayRule) -> Result<Vec<PolygonWithHoles>> {
    if edges.is_empty() {
        return Ok(Vec::new());
    }
    let segs = merge_canonical(subdivide(edges));
    let directed = boundary_edges(&segs, rule);
    let loops = stitch_loops(directed)?;
    assemble(loops)
}

/// Splits every edge at every pairwise intersection.
fn subdivide(edges: Vec<DirEdge>) -> Vec<DirEdge> {
    let zero = Exact::zero();
    let one = Exact::one();
    let n = edges.len();
    let dirs: Vec<Vector> = edges.iter().map(|e| e.b.sub(&e.a)).collect();
    let mut cuts: Vec<Vec<Exact>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            let di = &dirs[i];
            let dj = &dirs[j];
            let sep = edges[j].a.sub(&edges[i].a);
            let denom = di.cross(dj);
            if !denom.is_zero() {
                let s = &sep.cross(dj) / &denom;
                let t = &sep.cross(di) / &denom;
                if s >= zero && s <= one && t >= zero && t <= one {
                    if s > zero && s < one {
                        cuts[i].push(s);
                    }
                    if t > zero && t < one {
                        cuts[j].push(t);
                    }
                }
            } else if sep.cross(di).is_zero() {
                // Collinear pair: cut each at the other's interior endpoints.
                let len2_i = di.dot(di);
                for p in [&edges[j].a, &edges[j].b] {
                    let t = &di.dot(&p.sub(&edges[i].a)) / &len2_i;
                    if t > zero && t < one {
                        cuts[i].push(t);
                    }
                }
                let len2_j = dj.dot(dj);
                for p in [&edges[i].a, &edges[i].b] {
                    let t = &dj.dot(&p.sub(&edges[j].a)) / &len2_j;
                    if t > zero && t < one {
                        cuts[j].push(t);
                    }
                }
            }
        }
    }

    let mut result = Vec::new();
    for (i, edge) in edges.into_iter().enumerate() {
        let ts = &mut cuts[i];
        ts.sort();
        ts.dedup();
        let mut prev = edge.a.clone();
        for t in ts.iter() {
            let p = Point::new(
                &edge.a.x + &(&dirs[i].x * t),
                &edge.a.y + &(&dirs[i].y * t),
            );
            result.push(DirEdge {
                a: prev,
                b: p.clone(),
                operand: edge.operand,
            });
            prev = p;
        }
        result.push(DirEdge {
            a: prev,
            b: edge.b,
            operand: edge.operand,
        });
    }
    result
}

/// Merges coincident sub-edges into canonical segments with net
/// per-operand multiplicities; fully cancelled segments vanish.
fn merge_canonical(sub: Vec<DirEdge>) -> Vec<Seg> {
    let mut map: BTreeMap<(Point, Point), [i64; 2]> = BTreeMap::new();
    for e in sub {
        let (key, sign) = if e.a < e.b {
            ((e.a, e.b), 1)
        } else {
            ((e.b, e.a), -1)
        };
        map.entry(key).or_default()[e.operand] += sign;
    }
    map.into_iter()
        .filter(|(_, mult)| mult[0] != 0 || mult[1] != 0)
        .map(|((u, v), mult)| Seg { u, v, mult })
        .collect()
}

/// A boundary edge of the result, oriented with the result on its left.
struct Directed {
    a: Point,
    b: Point,
}

/// Classifies both faces of every canonical segment and keeps those where
/// the rule changes sides.
///
/// Winding numbers are counted with exact ray casts from the segment
/// midpoint (which, after subdivision, lies on no other segment): a
/// downward ray with a half-open x-span rule for non-vertical segments, a
/// leftward ray with a half-open y-span rule for vertical ones. The
/// half-open rule is equivalent to perturbing the ray infinitesimally, so
/// rays through vertices count consistently.
fn boundary_edges(segs: &[Seg], rule: OverlayRule) -> Vec<Directed> {
    let mut result = Vec::new();
    for seg in segs {
        let m = seg.u.midpoint(&seg.v);
        // Winding of the face right of the canonical direction, per operand.
        let mut right = [0i64; 2];
        if !seg.is_vertical() {
            // Canonical direction points in +x; right of it is below.
            for t in segs {
                if t.u.x <= m.x && m.x < t.v.x && t.y_at(&m.x) < m.y {
                    right[0] += t.mult[0];
                    right[1] += t.mult[1];
                }
            }
        } else {
            // Canonical direction points in +y; right of it is east. Count
            // the west side first, then step across the segment itself.
            let mut west = [0i64; 2];
            for t in segs {
                let (ylo, yhi) = if t.u.y <= t.v.y {
                    (&t.u.y, &t.v.y)
                } else {
                    (&t.v.y, &t.u.y)
                };
                if ylo <= &m.y && &m.y < yhi && t.x_at(&m.y) < m.x {
                    let sign = if t.v.y > t.u.y { -1 } else { 1 };
                    west[0] += sign * t.mult[0];
                    west[1] += sign * t.mult[1];
                }
            }
            right = [west[0] - seg.mult[0], west[1] - seg.mult[1]];
        }
        let left = [right[0] + seg.mult[0], right[1] + seg.mult[1]];

        let keep_left = rule.selects(&left);
        let keep_right = rule.selects(&right);
        if keep_left && !keep_right {
            result.push(Directed {
                a: seg.u.clone(),
                b: seg.v.clone(),
            });
        } else if keep_right && !keep_left {
            result.push(Directed {
                a: seg.v.clone(),
                b: seg.u.clone(),
            });
        }
    }
    result
}

/// Orders candidate continuations by counter-clockwise turn angle from the
/// incoming direction, smallest first (the leftmost turn). Angles 0 and pi
/// cannot occur between distinct boundary edges at a shared vertex.
fn turn_class(d_in: &Vector, c: &Vector) -> u8 {
    match d_in.cross(c).signum() {
        1 => 0,
        0 => 1,
        _ => 2,
    }
}

fn stitch_loops(directed: Vec<Directed>) -> Result<Vec<Vec<Point>>> {
    let mut directed = directed;
    directed.sort_by(|l, r| (&l.a, &l.b).cmp(&(&r.a, &r.b)));

    let mut outgoing: BTreeMap<&Point, Vec<usize>> = BTreeMap::new();
    for (i, e) in directed.iter().enumerate() {
        outgoing.entry(&e.a).or_default().push(i);
    }

    let successor = |cur: usize| -> Result<usize> {
        let at = &directed[cur].b;
        let d_in = at.sub(&directed[cur].a);
        let candidates = outgoing
            .get(at)
            .ok_or_else(|| Error::Internal("open boundary chain in overlay".into()))?;
        let mut best: Option<(usize, u8, Vector)> = None;
        for &idx in candidates {
            let dir = directed[idx].b.sub(&directed[idx].a);
            let class = turn_class(&d_in, &dir);
            let better = match &best {
                None => true,
                Some((_, best_class, best_dir)) => {
                    class < *best_class
                        || (class == *best_class && dir.cross(best_dir).is_positive())
                }
            };
            if better {
                best = Some((idx, class, dir));
            }
        }
        best.map(|(idx, _, _)| idx)
            .ok_or_else(|| Error::Internal("open boundary chain in overlay".into()))
    };

    let mut used = vec![false; directed.len()];
    let mut loops = Vec::new();
    for start in 0..directed.len() {
        if used[start] {
            continue;
        }
        let mut points = Vec::new();
        let mut cur = start;
        let mut steps = 0usize;
        loop {
            used[cur] = true;
            points.push(directed[cur].a.clone());
            steps += 1;
            if steps > directed.len() {
                return Err(Error::Internal("non-closing boundary loop in overlay".into()));
            }
            let next = successor(cur)?;
            if next == start {
                break;
            }
            cur = next;
        }
        loops.push(points);
    }
    Ok(loops)
}

enum RingLocation {
    OnBoundary,
    Winding(i64),
}

/// Winding contribution of a single ring around `p`, or the fact that `p`
/// lies on the ring.
fn locate_in_ring(ring: &Polygon, p: &Point) -> RingLocation {
    let pts = ring.points();
    let n = pts.len();
    let mut winding = 0i64;
    for i in 0..n {
        let a = &pts[i];
        let b = &pts[(i + 1) % n];
        if a == b {
            continue;
        }
        let d = b.sub(a);
        let ap = p.sub(a);
        if d.cross(&ap).is_zero() {
            let along = d.dot(&ap);
            if !along.is_negative() && along <= d.dot(&d) {
                return RingLocation::OnBoundary;
            }
        }
        if a.x <= p.x && p.x < b.x {
            let y = &a.y + &(&(&(&p.x - &a.x) * &(&b.y - &a.y)) / &(&b.x - &a.x));
            if y < p.y {
                winding += 1;
            }
        } else if b.x <= p.x && p.x < a.x {
            let y = &a.y + &(&(&(&p.x - &a.x) * &(&b.y - &a.y)) / &(&b.x - &a.x));
            if y < p.y {
                winding -= 1;
            }
        }
    }
    RingLocation::Winding(winding)
}

/// Groups traced loops into polygons-with-holes. Counter-clockwise loops
/// are outers; each clockwise loop attaches to the smallest outer
/// containing its anchor vertex.
fn assemble(loops: Vec<Vec<Point>>) -> Result<Vec<PolygonWithHoles>> {
    let mut outers: Vec<(PolygonWithHoles, Exact)> = Vec::new();
    let mut holes: Vec<Polygon> = Vec::new();
    for points in loops {
        let poly = Polygon::new(points);
        let area2 = poly.signed_area2();
        match area2.signum() {
            1 => outers.push((PolygonWithHoles::from_outer(poly), area2)),
            -1 => holes.push(poly),
            _ => {}
        }
    }

    for hole in holes {
        let anchor = &hole.points()[0];
        let mut best: Option<usize> = None;
        for (i, (pwh, area2)) in outers.iter().enumerate() {
            if matches!(
                locate_in_ring(pwh.outer_boundary(), anchor),
                RingLocation::Winding(0)
            ) {
                continue;
            }
            let smaller = match best {
                None => true,
                Some(j) => *area2 < outers[j].1,
            };
            if smaller {
                best = Some(i);
            }
        }
        match best {
            Some(i) => outers[i].0.add_hole(hole),
            None => {
                return Err(Error::Internal("overlay hole without containing outer".into()))
            }
        }
    }

    Ok(outers.into_iter().map(|(pwh, _)| pwh).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i64, y: i64) -> Point {
        Point::new(Exact::from_int(x), Exact::from_int(y))
    }

    fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> PolygonWithHoles {
        PolygonWithHoles::from_outer(Polygon::new(vec![
            pt(x0, y0),
            pt(x1, y0),
            pt(x1, y1),
            pt(x0, y1),
        ]))
    }

    fn total_area2(set: &PolygonSet) -> Exact {
        let mut sum = Exact::zero();
        for pwh in set.polygons_with_holes() {
            sum = sum + pwh.outer_boundary().signed_area2();
            for hole in pwh.holes() {
                sum = sum + hole.signed_area2();
            }
        }
        sum
    }

    #[test]
    fn union_of_overlapping_squares() {
        let set =
            PolygonSet::union_all(&[rect(0, 0, 10, 10), rect(5, 5, 15, 15)]).unwrap();
        assert_eq!(set.polygons_with_holes().len(), 1);
        // 100 + 100 - 25 = 175
        assert_eq!(total_area2(&set), Exact::from_int(350));
        assert_eq!(set.polygons_with_holes()[0].outer_boundary().len(), 8);
    }

    #[test]
    fn union_of_disjoint_squares_keeps_components() {
        let set =
            PolygonSet::union_all(&[rect(20, 0, 30, 10), rect(0, 0, 10, 10)]).unwrap();
        let polys = set.polygons_with_holes();
        assert_eq!(polys.len(), 2);
        // Deterministic order by smallest vertex.
        assert_eq!(polys[0].outer_boundary().points()[0], pt(0, 0));
        assert_eq!(polys[1].outer_boundary().points()[0], pt(20, 0));
    }

    #[test]
    fn union_of_edge_adjacent_squares_merges() {
        let set =
            PolygonSet::union_all(&[rect(0, 0, 1, 1), rect(1, 0, 2, 1)]).unwrap();
        let polys = set.polygons_with_holes();
        assert_eq!(polys.len(), 1);
        assert!(polys[0].holes().is_empty());
        assert_eq!(total_area2(&set), Exact::from_int(4));
    }

    #[test]
    fn union_with_empty_is_identity() {
        let square = rect(0, 0, 10, 10);
        let set =
            PolygonSet::union_all(&[square.clone(), PolygonWithHoles::empty()]).unwrap();
        assert_eq!(set.polygons_with_holes().len(), 1);
        assert_eq!(total_area2(&set), Exact::from_int(200));
    }

    #[test]
    fn difference_cuts_a_hole() {
        let outer = PolygonSet::union_all(&[rect(0, 0, 10, 10)]).unwrap();
        let inner = PolygonSet::union_all(&[rect(4, 4, 6, 6)]).unwrap();
        let diff = outer.difference(&inner).unwrap();
        let polys = diff.polygons_with_holes();
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].holes().len(), 1);
        assert_eq!(total_area2(&diff), Exact::from_int(192));
        assert!(polys[0].holes()[0].orientation().is_cw());
    }

    #[test]
    fn difference_of_identical_sets_is_empty() {
        let a = PolygonSet::union_all(&[rect(0, 0, 10, 10)]).unwrap();
        let b = PolygonSet::union_all(&[rect(0, 0, 10, 10)]).unwrap();
        assert!(a.difference(&b).unwrap().is_empty());
    }

    #[test]
    fn difference_from_empty_is_empty() {
        let empty = PolygonSet::new();
        let b = PolygonSet::union_all(&[rect(0, 0, 10, 10)]).unwrap();
        assert!(empty.difference(&b).unwrap().is_empty());
    }

    #[test]
    fn difference_with_empty_is_identity() {
        let a = PolygonSet::union_all(&[rect(0, 0, 10, 10)]).unwrap();
        let diff = a.difference(&PolygonSet::new()).unwrap();
        assert_eq!(diff.polygons_with_holes().len(), 1);
        assert_eq!(total_area2(&diff), Exact::from_int(200));
    }

    #[test]
    fn island_inside_a_hole_survives_union() {
        let mut frame = rect(0, 0, 10, 10);
        let mut hole_ring = Polygon::new(vec![pt(2, 2), pt(8, 2), pt(8, 8), pt(2, 8)]);
        hole_ring.reverse();
        frame.add_hole(hole_ring);
        let island = rect(4, 4, 6, 6);
        let set = PolygonSet::union_all(&[frame, island]).unwrap();
        let polys = set.polygons_with_holes();
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].holes().len(), 1);
        assert!(polys[1].holes().is_empty());
        // frame (100 - 36) + island 4
        assert_eq!(total_area2(&set), Exact::from_int(136));
    }

    #[test]
    fn point_location() {
        let mut frame = rect(0, 0, 10, 10);
        let mut hole_ring = Polygon::new(vec![pt(2, 2), pt(8, 2), pt(8, 8), pt(2, 8)]);
        hole_ring.reverse();
        frame.add_hole(hole_ring);
        let set = PolygonSet::union_all(&[frame]).unwrap();
        assert_eq!(set.contains(&pt(1, 1)), Containment::Inside);
        assert_eq!(set.contains(&pt(5, 5)), Containment::Outside);
        assert_eq!(set.contains(&pt(0, 5)), Containment::OnBoundary);
        assert_eq!(set.contains(&pt(2, 5)), Containment::OnBoundary);
        assert_eq!(set.contains(&pt(11, 5)), Containment::Outside);
    }

    #[test]
    fn clip_segment_against_square() {
        let set = PolygonSet::union_all(&[rect(2, -1, 5, 1)]).unwrap();
        let params = set.clip_segment_params(&pt(0, 0), &pt(10, 0));
        let expected: Vec<Exact> = vec![
            &Exact::from_int(2) / &Exact::from_int(10),
            &Exact::from_int(5) / &Exact::from_int(10),
        ];
        assert_eq!(params, expected);
    }
}
