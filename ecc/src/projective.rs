//! Homogeneous projective points with complete addition formulas.
//!
//! The formulas are exception-free: the same sequence of field operations
//! runs for every pair of inputs, including the identity and doubling cases,
//! which is what the Montgomery ladder relies on.

use crate::{AffinePoint, CurveParams, Field, point::Coordinates};
use bigint::U256;
use subtle::{Choice, ConditionallySelectable};

/// Curve constants used by the projective formulas.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CurveArithmetic {
    pub(crate) field: Field,
    a: U256,
    b3: U256,
}

impl CurveArithmetic {
    pub(crate) fn new(params: &CurveParams) -> Self {
        let field = params.base_field();
        let b3 = field.add(&field.double(params.b()), params.b());

        Self {
            field,
            a: *params.a(),
            b3,
        }
    }
}

/// Point in homogeneous coordinates `(X : Y : Z)` standing for the affine
/// point `(X/Z, Y/Z)`. The identity is `(0 : 1 : 0)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectivePoint {
    x: U256,
    y: U256,
    z: U256,
}

impl ProjectivePoint {
    /// Additive identity of the group: the point at infinity.
    pub(crate) const IDENTITY: Self = Self {
        x: U256::ZERO,
        y: U256::ONE,
        z: U256::ZERO,
    };

    pub(crate) fn from_affine(point: &AffinePoint) -> Self {
        match point {
            AffinePoint::Infinity => Self::IDENTITY,
            AffinePoint::Affine(coords) => Self {
                x: *coords.x(),
                y: *coords.y(),
                z: U256::ONE,
            },
        }
    }

    /// Is this the point at infinity?
    pub(crate) fn is_identity(&self, arith: &CurveArithmetic) -> Choice {
        arith.field.is_zero(&self.z)
    }

    /// Returns the affine representation of this point.
    pub(crate) fn to_affine(&self, arith: &CurveArithmetic) -> AffinePoint {
        let fp = &arith.field;

        // inversion runs for the identity too; z = 0 yields zinv = 0
        let zinv = fp.invert_or_zero(&self.z);
        let coords = Coordinates::new_unchecked(fp.mul(&self.x, &zinv), fp.mul(&self.y, &zinv));

        if bool::from(self.is_identity(arith)) {
            AffinePoint::Infinity
        } else {
            AffinePoint::Affine(coords)
        }
    }

    /// Implements complete addition for curves with any `a`.
    ///
    /// Renes-Costello-Batina 2015, Algorithm 1
    /// (<https://eprint.iacr.org/2015/1060>). The comments after each line
    /// indicate which algorithm steps are being performed.
    pub(crate) fn add(&self, other: &Self, arith: &CurveArithmetic) -> Self {
        let fp = &arith.field;
        let (a, b3) = (&arith.a, &arith.b3);

        let t0 = fp.mul(&self.x, &other.x); // 1
        let t1 = fp.mul(&self.y, &other.y); // 2
        let t2 = fp.mul(&self.z, &other.z); // 3
        let t3 = fp.add(&self.x, &self.y); // 4
        let t4 = fp.add(&other.x, &other.y); // 5
        let t3 = fp.mul(&t3, &t4); // 6
        let t4 = fp.add(&t0, &t1); // 7
        let t3 = fp.sub(&t3, &t4); // 8
        let t4 = fp.add(&self.x, &self.z); // 9
        let t5 = fp.add(&other.x, &other.z); // 10
        let t4 = fp.mul(&t4, &t5); // 11
        let t5 = fp.add(&t0, &t2); // 12
        let t4 = fp.sub(&t4, &t5); // 13
        let t5 = fp.add(&self.y, &self.z); // 14
        let x3 = fp.add(&other.y, &other.z); // 15
        let t5 = fp.mul(&t5, &x3); // 16
        let x3 = fp.add(&t1, &t2); // 17
        let t5 = fp.sub(&t5, &x3); // 18
        let z3 = fp.mul(a, &t4); // 19
        let x3 = fp.mul(b3, &t2); // 20
        let z3 = fp.add(&x3, &z3); // 21
        let x3 = fp.sub(&t1, &z3); // 22
        let z3 = fp.add(&t1, &z3); // 23
        let y3 = fp.mul(&x3, &z3); // 24
        let t1 = fp.add(&t0, &t0); // 25
        let t1 = fp.add(&t1, &t0); // 26
        let t2 = fp.mul(a, &t2); // 27
        let t4 = fp.mul(b3, &t4); // 28
        let t1 = fp.add(&t1, &t2); // 29
        let t2 = fp.sub(&t0, &t2); // 30
        let t2 = fp.mul(a, &t2); // 31
        let t4 = fp.add(&t4, &t2); // 32
        let t0 = fp.mul(&t1, &t4); // 33
        let y3 = fp.add(&y3, &t0); // 34
        let t0 = fp.mul(&t5, &t4); // 35
        let x3 = fp.mul(&t3, &x3); // 36
        let x3 = fp.sub(&x3, &t0); // 37
        let t0 = fp.mul(&t3, &t1); // 38
        let z3 = fp.mul(&t5, &z3); // 39
        let z3 = fp.add(&z3, &t0); // 40

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Implements exception-free doubling for curves with any `a`.
    ///
    /// Renes-Costello-Batina 2015, Algorithm 3.
    pub(crate) fn double(&self, arith: &CurveArithmetic) -> Self {
        let fp = &arith.field;
        let (a, b3) = (&arith.a, &arith.b3);

        let t0 = fp.square(&self.x); // 1
        let t1 = fp.square(&self.y); // 2
        let t2 = fp.square(&self.z); // 3
        let t3 = fp.mul(&self.x, &self.y); // 4
        let t3 = fp.add(&t3, &t3); // 5
        let z3 = fp.mul(&self.x, &self.z); // 6
        let z3 = fp.add(&z3, &z3); // 7
        let x3 = fp.mul(a, &z3); // 8
        let y3 = fp.mul(b3, &t2); // 9
        let y3 = fp.add(&x3, &y3); // 10
        let x3 = fp.sub(&t1, &y3); // 11
        let y3 = fp.add(&t1, &y3); // 12
        let y3 = fp.mul(&x3, &y3); // 13
        let x3 = fp.mul(&t3, &x3); // 14
        let z3 = fp.mul(b3, &z3); // 15
        let t2 = fp.mul(a, &t2); // 16
        let t3 = fp.sub(&t0, &t2); // 17
        let t3 = fp.mul(a, &t3); // 18
        let t3 = fp.add(&t3, &z3); // 19
        let z3 = fp.add(&t0, &t0); // 20
        let t0 = fp.add(&z3, &t0); // 21
        let t0 = fp.add(&t0, &t2); // 22
        let t0 = fp.mul(&t0, &t3); // 23
        let y3 = fp.add(&y3, &t0); // 24
        let t2 = fp.mul(&self.y, &self.z); // 25
        let t2 = fp.add(&t2, &t2); // 26
        let t0 = fp.mul(&t2, &t3); // 27
        let x3 = fp.sub(&x3, &t0); // 28
        let z3 = fp.mul(&t2, &t1); // 29
        let z3 = fp.add(&z3, &z3); // 30
        let z3 = fp.add(&z3, &z3); // 31

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: U256::conditional_select(&a.x, &b.x, choice),
            y: U256::conditional_select(&a.y, &b.y, choice),
            z: U256::conditional_select(&a.z, &b.z, choice),
        }
    }
}
