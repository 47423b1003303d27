//! Arithmetic modulo an odd prime.
//!
//! A [`Field`] is used both for base field arithmetic (modulo `p`) and for
//! scalar arithmetic (modulo the group order `n`). Elements are plain
//! [`U256`] values which are expected to be reduced into `[0, m)`; every
//! operation returns a reduced value.

use crate::{Error, Result};
use bigint::{
    Limb, U256,
    modular::runtime_mod::{DynResidue, DynResidueParams},
};
use core::fmt;
use subtle::{Choice, ConstantTimeEq, ConstantTimeLess, CtOption};

const LIMBS: usize = U256::LIMBS;

/// Prime field with a modulus chosen at runtime.
///
/// Multiplication uses Montgomery reduction; addition, subtraction and
/// negation are branch-free modular operations from `crypto-bigint`.
#[derive(Clone, Copy)]
pub struct Field {
    modulus: U256,
    params: DynResidueParams<LIMBS>,
}

impl Field {
    /// Create a field for the given modulus.
    ///
    /// The modulus must be odd and greater than one. Primality is not checked
    /// here; see [`CurveParams::validate`](crate::CurveParams::validate).
    pub fn new(modulus: &U256) -> Result<Self> {
        if modulus.as_words()[0] & 1 == 0 || !bool::from(U256::ONE.ct_lt(modulus)) {
            return Err(Error::InvalidCurveParameters);
        }

        Ok(Self::from_odd_modulus(modulus))
    }

    /// Modulus of a curve constant, known to be odd.
    pub(crate) fn from_odd_modulus(modulus: &U256) -> Self {
        Self {
            modulus: *modulus,
            params: DynResidueParams::new(modulus),
        }
    }

    /// Field modulus.
    pub fn modulus(&self) -> &U256 {
        &self.modulus
    }

    /// Is `a` in `[0, m)`?
    pub fn is_reduced(&self, a: &U256) -> Choice {
        a.ct_lt(&self.modulus)
    }

    /// Is `a` zero?
    pub fn is_zero(&self, a: &U256) -> Choice {
        a.ct_eq(&U256::ZERO)
    }

    /// Reduce an arbitrary 256-bit integer modulo `m`.
    pub fn reduce(&self, a: &U256) -> U256 {
        DynResidue::new(a, self.params).retrieve()
    }

    /// Compute `a + b mod m`.
    pub fn add(&self, a: &U256, b: &U256) -> U256 {
        a.add_mod(b, &self.modulus)
    }

    /// Compute `a - b mod m`.
    pub fn sub(&self, a: &U256, b: &U256) -> U256 {
        a.sub_mod(b, &self.modulus)
    }

    /// Compute `-a mod m`.
    pub fn negate(&self, a: &U256) -> U256 {
        a.neg_mod(&self.modulus)
    }

    /// Compute `2a mod m`.
    pub fn double(&self, a: &U256) -> U256 {
        self.add(a, a)
    }

    /// Compute `a * b mod m`.
    pub fn mul(&self, a: &U256, b: &U256) -> U256 {
        #[cfg(test)]
        op_count::bump();

        let a = DynResidue::new(a, self.params);
        let b = DynResidue::new(b, self.params);
        a.mul(&b).retrieve()
    }

    /// Compute `a^2 mod m`.
    pub fn square(&self, a: &U256) -> U256 {
        #[cfg(test)]
        op_count::bump();

        DynResidue::new(a, self.params).square().retrieve()
    }

    /// Compute `base^exponent mod m` by square-and-multiply.
    ///
    /// Runs in constant time with respect to `base`; the exponent is treated
    /// as public.
    pub fn pow_vartime(&self, base: &U256, exponent: &U256) -> U256 {
        let mut acc = U256::ONE;

        for i in (0..exponent.bits_vartime()).rev() {
            acc = self.square(&acc);

            if bool::from(bit(exponent, i)) {
                acc = self.mul(&acc, base);
            }
        }

        acc
    }

    /// Compute the multiplicative inverse of `a`.
    ///
    /// Uses Fermat's little theorem (`a^(m-2)`), so the running time does not
    /// depend on `a`. Returns [`Error::NotInvertible`] for zero.
    pub fn invert(&self, a: &U256) -> Result<U256> {
        let inverse = self.invert_or_zero(a);

        if bool::from(self.is_zero(a)) {
            Err(Error::NotInvertible)
        } else {
            Ok(inverse)
        }
    }

    /// Compute `a^(m-2)`, which is zero for `a = 0`.
    pub(crate) fn invert_or_zero(&self, a: &U256) -> U256 {
        let exponent = self.modulus.wrapping_sub(&U256::from_u8(2));
        self.pow_vartime(a, &exponent)
    }

    /// Compute a square root of `a`, if one exists.
    ///
    /// Only moduli with `m ≡ 3 (mod 4)` are supported, where the root is
    /// `a^((m+1)/4)`. Returns none when `a` is a non-residue or the modulus
    /// has another form.
    pub fn sqrt(&self, a: &U256) -> CtOption<U256> {
        let supported = Choice::from(u8::from(self.modulus.as_words()[0] & 3 == 3));
        let exponent = self.modulus.wrapping_add(&U256::ONE).shr_vartime(2);
        let root = self.pow_vartime(a, &exponent);
        CtOption::new(root, supported & self.square(&root).ct_eq(a))
    }

    /// Run a Miller-Rabin test of the modulus against the given witnesses.
    ///
    /// Variable time; only for checking public curve constants.
    pub(crate) fn is_probable_prime_vartime(&self, witnesses: &[u8]) -> bool {
        let minus_one = self.modulus.wrapping_sub(&U256::ONE);

        let mut shift = 0;
        while !bool::from(bit(&minus_one, shift)) {
            shift += 1;
        }
        let odd_part = minus_one.shr_vartime(shift);

        'witness: for &witness in witnesses {
            let witness = self.reduce(&U256::from_u8(witness));
            if bool::from(self.is_zero(&witness)) {
                continue;
            }

            let mut x = self.pow_vartime(&witness, &odd_part);
            if x == U256::ONE || x == minus_one {
                continue;
            }

            for _ in 1..shift {
                x = self.square(&x);
                if x == minus_one {
                    continue 'witness;
                }
            }

            return false;
        }

        true
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("modulus", &self.modulus)
            .finish_non_exhaustive()
    }
}

/// Bit `index` of `value`, counting from the least significant bit.
pub(crate) fn bit(value: &U256, index: usize) -> Choice {
    let word = value.as_words()[index / Limb::BITS];
    Choice::from(((word >> (index % Limb::BITS)) & 1) as u8)
}
