//! Constant-time scalar multiplication.

use crate::{
    AffinePoint, CurveParams, Error, Result,
    field::bit,
    projective::{CurveArithmetic, ProjectivePoint},
};
use bigint::U256;
use subtle::{ConditionallySelectable, ConstantTimeLess};

impl CurveParams {
    /// Compute `k·P` with the Montgomery ladder.
    ///
    /// `k` must be in `[0, n-1]` and `P` on the curve. The sequence of field
    /// operations depends only on the bit length of `n`, never on the value of
    /// `k` or on the coordinates of `P`.
    pub fn mul(&self, scalar: &U256, point: &AffinePoint) -> Result<AffinePoint> {
        if !bool::from(scalar.ct_lt(self.n())) {
            return Err(Error::ScalarOutOfRange);
        }

        if !self.is_on_curve(point) {
            return Err(Error::PointNotOnCurve);
        }

        let arith = CurveArithmetic::new(self);
        let point = ProjectivePoint::from_affine(point);
        let product = ladder(&arith, scalar, self.order_bits(), &point);
        Ok(product.to_affine(&arith))
    }

    /// Compute `k·G`.
    pub fn mul_base(&self, scalar: &U256) -> Result<AffinePoint> {
        self.mul(scalar, &self.generator())
    }

    /// Is `point` a finite point with `n·P = O`?
    pub(crate) fn has_prime_order(&self, point: &AffinePoint) -> bool {
        if point.is_identity() || !self.is_on_curve(point) {
            return false;
        }

        let arith = CurveArithmetic::new(self);
        let point = ProjectivePoint::from_affine(point);
        let product = ladder(&arith, self.n(), self.order_bits(), &point);
        bool::from(product.is_identity(&arith))
    }
}

/// Montgomery ladder over the low `bits` bits of `scalar`.
///
/// Maintains `R1 - R0 = P`. Each step performs one addition and one doubling
/// regardless of the scalar bit, swapping the registers in constant time.
pub(crate) fn ladder(
    arith: &CurveArithmetic,
    scalar: &U256,
    bits: usize,
    point: &ProjectivePoint,
) -> ProjectivePoint {
    let mut r0 = ProjectivePoint::IDENTITY;
    let mut r1 = *point;

    for i in (0..bits).rev() {
        let choice = bit(scalar, i);
        ProjectivePoint::conditional_swap(&mut r0, &mut r1, choice);
        r1 = r0.add(&r1, arith);
        r0 = r0.double(arith);
        ProjectivePoint::conditional_swap(&mut r0, &mut r1, choice);
    }

    r0
}
