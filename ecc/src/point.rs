//! Affine points and the elliptic curve group law.
//!
//! The affine formulas here branch on their inputs and are only used for
//! public data (verification, encoding). Secret scalars go through the
//! Montgomery ladder in [`crate::mul`].

use crate::{CurveParams, Error, Result};
use bigint::U256;

/// Affine coordinates `(x, y)` of a finite point, both reduced modulo `p`.
///
/// Obtained through [`CurveParams::point`] or as the output of group
/// operations, so a value of this type always satisfies the curve equation of
/// the curve it was produced on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Coordinates {
    x: U256,
    y: U256,
}

impl Coordinates {
    pub(crate) const fn new_unchecked(x: U256, y: U256) -> Self {
        Self { x, y }
    }

    /// Affine `x`-coordinate.
    pub fn x(&self) -> &U256 {
        &self.x
    }

    /// Affine `y`-coordinate.
    pub fn y(&self) -> &U256 {
        &self.y
    }
}

/// Point on a short Weierstrass curve in affine form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AffinePoint {
    /// Point at infinity, the group identity `O`.
    Infinity,

    /// Finite point.
    Affine(Coordinates),
}

impl AffinePoint {
    /// Group identity.
    pub const IDENTITY: Self = AffinePoint::Infinity;

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        matches!(self, AffinePoint::Infinity)
    }

    /// Coordinates of a finite point.
    pub fn coordinates(&self) -> Option<&Coordinates> {
        match self {
            AffinePoint::Infinity => None,
            AffinePoint::Affine(coords) => Some(coords),
        }
    }

    /// Affine `x`-coordinate, if finite.
    pub fn x(&self) -> Option<&U256> {
        self.coordinates().map(Coordinates::x)
    }

    /// Affine `y`-coordinate, if finite.
    pub fn y(&self) -> Option<&U256> {
        self.coordinates().map(Coordinates::y)
    }
}

impl CurveParams {
    /// Construct a finite point, checking that both coordinates are reduced
    /// and satisfy the curve equation.
    pub fn point(&self, x: U256, y: U256) -> Result<AffinePoint> {
        let point = AffinePoint::Affine(Coordinates::new_unchecked(x, y));

        if self.is_on_curve(&point) {
            Ok(point)
        } else {
            Err(Error::PointNotOnCurve)
        }
    }

    /// Is `point` on this curve? The identity is.
    pub fn is_on_curve(&self, point: &AffinePoint) -> bool {
        let AffinePoint::Affine(coords) = point else {
            return true;
        };

        let fp = self.base_field();
        if !bool::from(fp.is_reduced(&coords.x) & fp.is_reduced(&coords.y)) {
            return false;
        }

        fp.square(&coords.y) == self.curve_rhs(&coords.x)
    }

    /// Evaluate `x³ + ax + b`.
    pub(crate) fn curve_rhs(&self, x: &U256) -> U256 {
        let fp = self.base_field();
        let x3 = fp.mul(&fp.square(x), x);
        fp.add(&fp.add(&x3, &fp.mul(self.a(), x)), self.b())
    }

    /// Compute `-P`.
    pub fn negate(&self, point: &AffinePoint) -> AffinePoint {
        match point {
            AffinePoint::Infinity => AffinePoint::Infinity,
            AffinePoint::Affine(coords) => AffinePoint::Affine(Coordinates::new_unchecked(
                coords.x,
                self.base_field().negate(&coords.y),
            )),
        }
    }

    /// Compute `P + Q`.
    pub fn add(&self, lhs: &AffinePoint, rhs: &AffinePoint) -> AffinePoint {
        let (p, q) = match (lhs, rhs) {
            (AffinePoint::Infinity, _) => return *rhs,
            (_, AffinePoint::Infinity) => return *lhs,
            (AffinePoint::Affine(p), AffinePoint::Affine(q)) => (p, q),
        };

        if p.x == q.x {
            // Either Q = P, or Q = -P
            return if p.y == q.y {
                self.double(lhs)
            } else {
                AffinePoint::Infinity
            };
        }

        let fp = self.base_field();
        let lambda = fp.mul(
            &fp.sub(&q.y, &p.y),
            &fp.invert_or_zero(&fp.sub(&q.x, &p.x)),
        );
        self.chord_tangent(&lambda, p, q)
    }

    /// Compute `2P`.
    pub fn double(&self, point: &AffinePoint) -> AffinePoint {
        let p = match point {
            AffinePoint::Infinity => return AffinePoint::Infinity,
            AffinePoint::Affine(p) => p,
        };

        let fp = self.base_field();
        if bool::from(fp.is_zero(&p.y)) {
            return AffinePoint::Infinity;
        }

        // λ = (3x² + a) / 2y
        let x2 = fp.square(&p.x);
        let numerator = fp.add(&fp.add(&fp.double(&x2), &x2), self.a());
        let lambda = fp.mul(&numerator, &fp.invert_or_zero(&fp.double(&p.y)));
        self.chord_tangent(&lambda, p, p)
    }

    /// Third intersection of the line with slope `lambda` through `p` and `q`,
    /// reflected over the `x`-axis.
    fn chord_tangent(&self, lambda: &U256, p: &Coordinates, q: &Coordinates) -> AffinePoint {
        let fp = self.base_field();
        let x = fp.sub(&fp.sub(&fp.square(lambda), &p.x), &q.x);
        let y = fp.sub(&fp.mul(lambda, &fp.sub(&p.x, &x)), &p.y);
        AffinePoint::Affine(Coordinates::new_unchecked(x, y))
    }
}
