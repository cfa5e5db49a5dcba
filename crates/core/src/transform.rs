//! Affine transformations over the exact kernel.
//!
//! The engine only ever composes rotations about the origin, translations
//! and the point reflection through the origin (the `-B` of the Minkowski
//! construction), so a transform is stored as an exact 2x2 linear part
//! plus an exact translation.

use std::f64::consts::FRAC_PI_2;

use crate::exact::Exact;
use crate::geometry::{Point, Vector};

/// Tolerance under which a rotation angle is treated as an exact multiple
/// of a quarter turn.
const QUARTER_TURN_EPS: f64 = 1e-9;

/// An affine map `p -> M p + t` with exact coefficients.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Transform {
    m00: Exact,
    m01: Exact,
    m10: Exact,
    m11: Exact,
    tx: Exact,
    ty: Exact,
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            m00: Exact::one(),
            m01: Exact::zero(),
            m10: Exact::zero(),
            m11: Exact::one(),
            tx: Exact::zero(),
            ty: Exact::zero(),
        }
    }

    pub fn translation(v: &Vector) -> Self {
        Transform {
            m00: Exact::one(),
            m01: Exact::zero(),
            m10: Exact::zero(),
            m11: Exact::one(),
            tx: v.x.clone(),
            ty: v.y.clone(),
        }
    }

    /// Rotation about the origin by `radians`.
    ///
    /// Angles within [`QUARTER_TURN_EPS`] of a multiple of pi/2 use the
    /// exact quarter-turn matrix; a promoted `cos(pi/2)` is a nonzero
    /// dyadic rational and would skew axis-aligned shapes just enough to
    /// spoil snug fits. All other angles promote `sin`/`cos` exactly as
    /// computed in `f64`.
    pub fn rotation(radians: f64) -> Self {
        let quarters = radians / FRAC_PI_2;
        let nearest = quarters.round();
        if (quarters - nearest).abs() < QUARTER_TURN_EPS {
            return Self::quarter_turns(nearest.rem_euclid(4.0) as u8 % 4);
        }
        let s = Exact::from_f64(radians.sin()).unwrap_or_else(Exact::zero);
        let c = Exact::from_f64(radians.cos()).unwrap_or_else(Exact::zero);
        Transform {
            m00: c.clone(),
            m01: -&s,
            m10: s,
            m11: c,
            tx: Exact::zero(),
            ty: Exact::zero(),
        }
    }

    fn quarter_turns(k: u8) -> Self {
        let (sin, cos) = match k {
            0 => (0, 1),
            1 => (1, 0),
            2 => (0, -1),
            _ => (-1, 0),
        };
        let s = Exact::from_int(sin);
        let c = Exact::from_int(cos);
        Transform {
            m00: c.clone(),
            m01: -&s,
            m10: s,
            m11: c,
            tx: Exact::zero(),
            ty: Exact::zero(),
        }
    }

    /// Point reflection through the origin (uniform scaling by -1).
    ///
    /// Note this is a rotation by pi, not a mirror: orientation is
    /// preserved.
    pub fn point_reflection() -> Self {
        Self::quarter_turns(2)
    }

    pub fn apply(&self, p: &Point) -> Point {
        Point {
            x: &(&self.m00 * &p.x) + &(&self.m01 * &p.y) + &self.tx,
            y: &(&self.m10 * &p.x) + &(&self.m11 * &p.y) + &self.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn pt(x: i64, y: i64) -> Point {
        Point::new(Exact::from_int(x), Exact::from_int(y))
    }

    #[test]
    fn quarter_turns_are_exact() {
        let quarter = Transform::rotation(PI / 2.0);
        assert_eq!(quarter.apply(&pt(1, 0)), pt(0, 1));
        assert_eq!(quarter.apply(&pt(0, 1)), pt(-1, 0));

        let half = Transform::rotation(PI);
        assert_eq!(half.apply(&pt(3, 4)), pt(-3, -4));

        let three_quarters = Transform::rotation(3.0 * PI / 2.0);
        assert_eq!(three_quarters.apply(&pt(1, 0)), pt(0, -1));

        assert_eq!(Transform::rotation(0.0).apply(&pt(7, -2)), pt(7, -2));
    }

    #[test]
    fn reflection_preserves_orientation() {
        use crate::geometry::Polygon;
        let triangle = Polygon::new(vec![pt(0, 0), pt(4, 0), pt(0, 4)]);
        let reflected = triangle.transformed(&Transform::point_reflection());
        assert_eq!(reflected.signed_area2(), triangle.signed_area2());
        assert_eq!(reflected.points()[1], pt(-4, 0));
    }

    #[test]
    fn translation_moves_points() {
        let t = Transform::translation(&Vector::new(Exact::from_int(5), Exact::from_int(-1)));
        assert_eq!(t.apply(&pt(1, 1)), pt(6, 0));
    }

    #[test]
    fn generic_rotation_promotes_sin_cos() {
        let t = Transform::rotation(0.3);
        let p = t.apply(&pt(1, 0));
        assert_eq!(p.x, Exact::from_f64(0.3f64.cos()).unwrap());
        assert_eq!(p.y, Exact::from_f64(0.3f64.sin()).unwrap());
    }
}
