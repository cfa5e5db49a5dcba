//! Ear-clipping triangulation of polygons-with-holes.
//!
//! Holes are eliminated first by splicing each one into the outer ring
//! through a bridge to a mutually visible vertex, then the resulting
//! (weakly simple) ring is ear-clipped. All predicates run on exact
//! coordinates, so near-degenerate ears are decided correctly.

use crate::error::{Error, Result};
use crate::exact::Exact;
use crate::geometry::{Point, PolygonWithHoles};

/// Triangulates the material of `pwh` (outer boundary minus holes) into
/// counter-clockwise triangles. Degenerate input yields no triangles.
pub fn triangulate(pwh: &PolygonWithHoles) -> Result<Vec<[Point; 3]>> {
    if pwh.is_empty() {
        return Ok(Vec::new());
    }

    let mut ring: Vec<Point> = pwh.outer_boundary().points().to_vec();
    if ring.len() < 3 {
        return Ok(Vec::new());
    }
    match pwh.outer_boundary().orientation() {
        o if o.is_cw() => ring.reverse(),
        o if o.is_ccw() => {}
        _ => return Ok(Vec::new()),
    }

    let mut holes: Vec<Vec<Point>> = Vec::new();
    for hole in pwh.holes() {
        if hole.len() < 3 || hole.signed_area2().is_zero() {
            continue;
        }
        let mut pts = hole.points().to_vec();
        if hole.orientation().is_ccw() {
            pts.reverse();
        }
        holes.push(pts);
    }
    // Left-to-right keeps earlier bridges out of the way of later ones.
    holes.sort_by(|a, b| min_vertex(a).cmp(min_vertex(b)));

    for i in 0..holes.len() {
        let rest = &holes[i..];
        bridge_hole(&mut ring, &rest[0], &rest[1..])?;
    }

    ear_clip(ring)
}

fn min_vertex(points: &[Point]) -> &Point {
    points.iter().min().expect("non-empty ring")
}

fn sq_distance(a: &Point, b: &Point) -> Exact {
    let d = b.sub(a);
    d.dot(&d)
}

/// Splices `hole` (clockwise) into the counter-clockwise `ring` through a
/// bridge from the hole's leftmost vertex to the nearest visible ring
/// vertex.
fn bridge_hole(ring: &mut Vec<Point>, hole: &[Point], pending: &[Vec<Point>]) -> Result<()> {
    let mi = hole
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
        .expect("non-empty hole");
    let m = &hole[mi];

    let mut order: Vec<usize> = (0..ring.len()).collect();
    order.sort_by(|&i, &j| {
        sq_distance(m, &ring[i])
            .cmp(&sq_distance(m, &ring[j]))
            .then(i.cmp(&j))
    });

    for &vi in &order {
        let v = &ring[vi];
        if v == m {
            continue;
        }
        if bridge_is_visible(m, v, ring, hole, pending) {
            // ..., v, m, hole cycle from m, m, v, ...
            let mut spliced = Vec::with_capacity(ring.len() + hole.len() + 2);
            spliced.extend_from_slice(&ring[..=vi]);
            for k in 0..hole.len() {
                spliced.push(hole[(mi + k) % hole.len()].clone());
            }
            spliced.push(m.clone());
            spliced.extend_from_slice(&ring[vi..]);
            *ring = spliced;
            return Ok(());
        }
    }
    Err(Error::Internal("no visible bridge vertex for hole".into()))
}

/// The bridge must not properly cross or overlap any edge of the ring,
/// the hole itself, or a hole that has not been spliced yet. Touching at
/// its own endpoints is allowed.
fn bridge_is_visible(
    m: &Point,
    v: &Point,
    ring: &[Point],
    hole: &[Point],
    pending: &[Vec<Point>],
) -> bool {
    let check_ring = |pts: &[Point]| -> bool {
        let n = pts.len();
        for i in 0..n {
            let a = &pts[i];
            let b = &pts[(i + 1) % n];
            if a == b {
                continue;
            }
            if segments_obstruct(m, v, a, b) {
                return false;
            }
        }
        true
    };
    if !check_ring(ring) || !check_ring(hole) {
        return false;
    }
    pending.iter().all(|h| check_ring(h))
}

/// True if segment `a..b` blocks the bridge `m..v`: they intersect at a
/// point that is not an endpoint of the bridge, or they overlap
/// collinearly, or an endpoint of `a..b` lies in the bridge's interior.
fn segments_obstruct(m: &Point, v: &Point, a: &Point, b: &Point) -> bool {
    let zero = Exact::zero();
    let one = Exact::one();
    let d = v.sub(m);
    let e = b.sub(a);
    let sep = a.sub(m);
    let denom = d.cross(&e);
    if denom.is_zero() {
        if !sep.cross(&d).is_zero() {
            return false;
        }
        // Collinear: any overlap beyond shared endpoints blocks.
        let len2 = d.dot(&d);
        let ta = &d.dot(&a.sub(m)) / &len2;
        let tb = &d.dot(&b.sub(m)) / &len2;
        let (lo, hi) = if ta <= tb { (ta, tb) } else { (tb, ta) };
        return lo < one && hi > zero && !(lo == hi && (lo == zero || lo == one));
    }
    let s = &sep.cross(&e) / &denom;
    let t = &sep.cross(&d) / &denom;
    if s < zero || s > one || t < zero || t > one {
        return false;
    }
    // Meeting exactly at a bridge endpoint is fine; anything else blocks.
    !(s == zero || s == one)
}

fn point_blocks_ear(p: &Point, a: &Point, b: &Point, c: &Point) -> bool {
    let o1 = b.sub(a).cross(&p.sub(a)).signum();
    let o2 = c.sub(b).cross(&p.sub(b)).signum();
    let o3 = a.sub(c).cross(&p.sub(c)).signum();
    o1 >= 0 && o2 >= 0 && o3 >= 0
}

fn ear_clip(mut ring: Vec<Point>) -> Result<Vec<[Point; 3]>> {
    let mut triangles = Vec::new();
    while ring.len() > 3 {
        let n = ring.len();
        let mut clipped = false;
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let a = &ring[prev];
            let b = &ring[i];
            let c = &ring[next];
            let turn = b.sub(a).cross(&c.sub(b));
            if turn.is_zero() {
                // Collinear or spike vertex carries no area.
                ring.remove(i);
                clipped = true;
                break;
            }
            if turn.is_negative() {
                continue;
            }
            let blocked = ring.iter().enumerate().any(|(j, p)| {
                j != prev
                    && j != i
                    && j != next
                    && p != a
                    && p != b
                    && p != c
                    && point_blocks_ear(p, a, b, c)
            });
            if !blocked {
                triangles.push([a.clone(), b.clone(), c.clone()]);
                ring.remove(i);
                clipped = true;
                break;
            }
        }
        if !clipped {
            return Err(Error::Internal("ear clipping made no progress".into()));
        }
    }
    if ring.len() == 3 {
        let turn = ring[1].sub(&ring[0]).cross(&ring[2].sub(&ring[1]));
        if turn.is_positive() {
            triangles.push([ring[0].clone(), ring[1].clone(), ring[2].clone()]);
        }
    }
    Ok(triangles)
}
