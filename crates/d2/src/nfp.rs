//! No-fit and inner-fit polygon computation via Minkowski sums.
//!
//! The NFP of an orbiting polygon B around a fixed polygon A is the set
//! of translations of B's reference vertex at which B touches A without
//! overlapping its interior: `minkowski(A, -B)`, with -B the point
//! reflection of B through the origin. Holes of the NFP are translations
//! where B nests entirely inside a hole of A.
//!
//! The inner-fit polygon is only needed for rectangular containers,
//! where it is itself a (possibly degenerate) rectangle.

use platenest_core::geometry::{Point, Polygon, PolygonWithHoles, Vector};
use platenest_core::minkowski::minkowski_sum;
use platenest_core::transform::Transform;
use platenest_core::Result;

use crate::state::{CanonicalId, NfpKey, PackingState};

/// NFP of two simple polygons without holes.
///
/// Orientations are normalized, B is referenced to its first vertex and
/// reflected through the origin before summing.
pub fn nfp_simple(a: &Polygon, b: &Polygon) -> Result<PolygonWithHoles> {
    nfp(
        &PolygonWithHoles::from_outer(a.clone()),
        &PolygonWithHoles::from_outer(b.clone()),
    )
}

/// NFP of two polygons-with-holes.
pub fn nfp(a: &PolygonWithHoles, b: &PolygonWithHoles) -> Result<PolygonWithHoles> {
    let a = with_ccw_outer(a);
    let b = with_ccw_outer(b);
    let first = match b.first_vertex() {
        Some(first) => first.clone(),
        None => return Ok(PolygonWithHoles::empty()),
    };
    let minus_b = b
        .translated(&first.to_vector().neg())
        .transformed(&Transform::point_reflection());
    minkowski_sum(&a, &minus_b)
}

/// Inner-fit polygon of `b` inside a rectangular container.
///
/// Returns the rectangle of translations `t` with `b + t` inside the
/// container, or the empty set when `b`'s bounding box exceeds the
/// container in either axis. The rectangle degenerates to a segment or a
/// point for snug fits.
pub fn ifp(rect: &PolygonWithHoles, b: &PolygonWithHoles) -> PolygonWithHoles {
    let rect_bounds = match rect.bounds() {
        Some(bounds) => bounds,
        None => return PolygonWithHoles::empty(),
    };
    let first = match b.first_vertex() {
        Some(first) => first.clone(),
        None => return PolygonWithHoles::empty(),
    };
    let shifted = b
        .outer_boundary()
        .translated(&first.to_vector().neg());
    let b_bounds = match shifted.bounds() {
        Some(bounds) => bounds,
        None => return PolygonWithHoles::empty(),
    };

    if rect_bounds.width() < b_bounds.width() || rect_bounds.height() < b_bounds.height() {
        return PolygonWithHoles::empty();
    }

    let xmin = &rect_bounds.xmin - &b_bounds.xmin;
    let xmax = &rect_bounds.xmax - &b_bounds.xmax;
    let ymin = &rect_bounds.ymin - &b_bounds.ymin;
    let ymax = &rect_bounds.ymax - &b_bounds.ymax;
    PolygonWithHoles::from_outer(Polygon::new(vec![
        Point::new(xmin.clone(), ymin.clone()),
        Point::new(xmax.clone(), ymin),
        Point::new(xmax, ymax.clone()),
        Point::new(xmin, ymax),
    ]))
}

/// Memoized NFP between two canonical polygons, the hot path of the
/// placement loop.
///
/// `a` is assumed rotated by `rotation_a` and translated by
/// `translate_a`; `b` is rotated by `rotation_b`. The memo stores the
/// translation-free NFP of the rotated shapes: the NFP depends only on
/// shapes and rotations, and translating A translates the NFP with it,
/// so one entry serves every placement of A. Unlike [`nfp`], B is not
/// re-referenced to its first vertex: canonical polygons already have it
/// at the origin.
pub fn nfp_cached(
    state: &mut PackingState,
    a: CanonicalId,
    translate_a: &Vector,
    rotation_a: f64,
    b: CanonicalId,
    rotation_b: f64,
) -> Result<PolygonWithHoles> {
    let key = NfpKey::new(a, b, rotation_a, rotation_b);
    if let Some(cached) = state.cached_nfp(&key) {
        return Ok(cached.translated(translate_a));
    }
    let rotated_a = state.canonical(a).transformed(&Transform::rotation(rotation_a));
    let minus_b = state
        .canonical(b)
        .transformed(&Transform::rotation(rotation_b))
        .transformed(&Transform::point_reflection());
    let nfp = minkowski_sum(&rotated_a, &minus_b)?;
    let translated = nfp.translated(translate_a);
    state.insert_nfp(key, nfp);
    Ok(translated)
}

fn with_ccw_outer(pwh: &PolygonWithHoles) -> PolygonWithHoles {
    if pwh.outer_boundary().orientation().is_cw() {
        let mut outer = pwh.outer_boundary().clone();
        outer.reverse();
        let mut result = PolygonWithHoles::from_outer(outer);
        for hole in pwh.holes() {
            result.add_hole(hole.clone());
        }
        result
    } else {
        pwh.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platenest_core::exact::Exact;
    use platenest_core::geometry::Bounds;

    fn pt(x: i64, y: i64) -> Point {
        Point::new(Exact::from_int(x), Exact::from_int(y))
    }

    fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Polygon {
        Polygon::new(vec![pt(x0, y0), pt(x1, y0), pt(x1, y1), pt(x0, y1)])
    }

    fn bounds_ints(bounds: &Bounds) -> (i64, i64, i64, i64) {
        (
            bounds.xmin.to_f64() as i64,
            bounds.ymin.to_f64() as i64,
            bounds.xmax.to_f64() as i64,
            bounds.ymax.to_f64() as i64,
        )
    }

    #[test]
    fn nfp_of_two_squares() {
        let nfp = nfp_simple(&rect(0, 0, 10, 10), &rect(0, 0, 5, 5)).unwrap();
        // Translations span [-5, 10] in both axes.
        let bounds = nfp.bounds().unwrap();
        assert_eq!(bounds_ints(&bounds), (-5, -5, 10, 10));
        assert!(nfp.holes().is_empty());
    }

    #[test]
    fn nfp_reference_vertex_is_translated_out() {
        // Moving B does not change its NFP: only the shape matters.
        let b_near = rect(0, 0, 5, 5);
        let b_far = rect(100, 100, 105, 105);
        let a = rect(0, 0, 10, 10);
        let nfp_near = nfp_simple(&a, &b_near).unwrap();
        let nfp_far = nfp_simple(&a, &b_far).unwrap();
        assert_eq!(nfp_near, nfp_far);
    }

    #[test]
    fn ifp_of_fitting_square() {
        let container = PolygonWithHoles::from_outer(rect(0, 0, 100, 100));
        let item = PolygonWithHoles::from_outer(rect(0, 0, 10, 10));
        let ifp = ifp(&container, &item);
        let bounds = ifp.bounds().unwrap();
        assert_eq!(bounds_ints(&bounds), (0, 0, 90, 90));
    }

    #[test]
    fn ifp_of_oversized_square_is_empty() {
        let container = PolygonWithHoles::from_outer(rect(0, 0, 5, 5));
        let item = PolygonWithHoles::from_outer(rect(0, 0, 10, 10));
        assert!(ifp(&container, &item).is_empty());
    }

    #[test]
    fn ifp_degenerates_for_snug_fit() {
        let container = PolygonWithHoles::from_outer(rect(0, 0, 20, 10));
        let item = PolygonWithHoles::from_outer(rect(0, 0, 10, 10));
        let ifp = ifp(&container, &item);
        let bounds = ifp.bounds().unwrap();
        // A segment: x in [0, 10], y pinned to 0.
        assert_eq!(bounds_ints(&bounds), (0, 0, 10, 0));
        assert!(ifp.outer_boundary().signed_area2().is_zero());
    }

    #[test]
    fn cached_nfp_matches_direct_nfp() {
        let mut state = PackingState::new();
        let a = state.intern(PolygonWithHoles::from_outer(rect(0, 0, 10, 10)));
        let b = state.intern(PolygonWithHoles::from_outer(rect(0, 0, 5, 5)));
        let shift = Vector::new(Exact::from_int(7), Exact::from_int(3));

        let from_cache = nfp_cached(&mut state, a, &shift, 0.0, b, 0.0).unwrap();
        assert_eq!(state.nfp_count(), 1);

        let direct = nfp(
            &state
                .canonical(a)
                .translated(&shift),
            state.canonical(b),
        )
        .unwrap();
        assert_eq!(from_cache, direct);

        // Second lookup hits the memo.
        let again = nfp_cached(&mut state, a, &shift, 0.0, b, 0.0).unwrap();
        assert_eq!(state.nfp_count(), 1);
        assert_eq!(from_cache, again);
    }

    #[test]
    fn cached_nfp_distinguishes_rotations() {
        let mut state = PackingState::new();
        let a = state.intern(PolygonWithHoles::from_outer(rect(0, 0, 10, 10)));
        let b = state.intern(PolygonWithHoles::from_outer(rect(0, 0, 4, 2)));
        let origin = Vector::zero();
        let flat = nfp_cached(&mut state, a, &origin, 0.0, b, 0.0).unwrap();
        let turned =
            nfp_cached(&mut state, a, &origin, 0.0, b, std::f64::consts::FRAC_PI_2).unwrap();
        assert_eq!(state.nfp_count(), 2);
        assert_ne!(flat, turned);
    }
}
