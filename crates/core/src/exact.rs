//! Exact rational coordinate arithmetic.
//!
//! Every coordinate that enters the kernel is promoted from `f64` to an
//! arbitrary-precision rational. Addition, subtraction, multiplication,
//! division and comparison are then error-free, which is what keeps the
//! Boolean overlay and the Minkowski sums robust: near-coincident edges
//! either coincide exactly or they do not, and structural hashing of
//! polygons is deterministic across runs.
//!
//! Conversion back to `f64` happens only at output boundaries and in the
//! (approximate) placement heuristic.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// An exact rational scalar, kept in reduced form.
///
/// `Ord` and `Hash` agree with numeric equality, so `Exact` values can key
/// B-tree orderings and content hashes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Exact(BigRational);

impl Exact {
    pub fn zero() -> Self {
        Exact(BigRational::zero())
    }

    pub fn one() -> Self {
        Exact(BigRational::one())
    }

    pub fn from_int(value: i64) -> Self {
        Exact(BigRational::from_integer(value.into()))
    }

    /// Promotes a finite `f64` to its exact rational value.
    ///
    /// Every finite double is a dyadic rational, so the promotion is
    /// lossless. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        BigRational::from_float(value).map(Exact)
    }

    /// Nearest-`f64` approximation, for use at output boundaries only.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Sign of the value: -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        if self.0.is_zero() {
            0
        } else if self.0.is_positive() {
            1
        } else {
            -1
        }
    }
}

impl fmt::Debug for Exact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Exact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Exact {
            type Output = Exact;
            fn $method(self, rhs: Exact) -> Exact {
                Exact((self.0).$method(rhs.0))
            }
        }

        impl<'a> $trait<&'a Exact> for &'a Exact {
            type Output = Exact;
            fn $method(self, rhs: &'a Exact) -> Exact {
                Exact((&self.0).$method(&rhs.0))
            }
        }

        impl<'a> $trait<&'a Exact> for Exact {
            type Output = Exact;
            fn $method(self, rhs: &'a Exact) -> Exact {
                Exact((self.0).$method(&rhs.0))
            }
        }

        impl<'a> $trait<Exact> for &'a Exact {
            type Output = Exact;
            fn $method(self, rhs: Exact) -> Exact {
                Exact((&self.0).$method(rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl Neg for Exact {
    type Output = Exact;
    fn neg(self) -> Exact {
        Exact(-self.0)
    }
}

impl Neg for &Exact {
    type Output = Exact;
    fn neg(self) -> Exact {
        Exact(-&self.0)
    }
}
