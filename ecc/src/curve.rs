//! Curve identifiers and domain parameters.

use crate::{AffinePoint, Error, Field, Result, point::Coordinates};
use bigint::U256;
use core::{
    fmt::{self, Display},
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

/// Built-in tables already checked by [`Curve::params`], indexed by [`Curve`].
static VALIDATED: [AtomicBool; 2] = [AtomicBool::new(false), AtomicBool::new(false)];

/// Miller-Rabin witnesses used when checking curve constants.
const PRIMALITY_WITNESSES: &[u8] = &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Supported short Weierstrass curves.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Curve {
    /// secp256k1 (SEC 2), `y² = x³ + 7`.
    Secp256k1,

    /// secp256r1 (SEC 2), a.k.a. NIST P-256 or prime256v1.
    Secp256r1,
}

impl Curve {
    /// All supported curves.
    pub const ALL: [Curve; 2] = [Curve::Secp256k1, Curve::Secp256r1];

    /// Domain parameters of this curve.
    ///
    /// With debug assertions enabled, the first call for each curve runs
    /// [`CurveParams::validate`] on the built-in table.
    pub fn params(self) -> &'static CurveParams {
        let params = match self {
            Curve::Secp256k1 => &SECP256K1,
            Curve::Secp256r1 => &SECP256R1,
        };

        if cfg!(debug_assertions) && !VALIDATED[self as usize].swap(true, Ordering::Relaxed) {
            debug_assert_eq!(params.validate(), Ok(()), "{self} domain parameters");
        }

        params
    }

    /// Canonical SEC 2 name.
    pub fn name(self) -> &'static str {
        self.params().name
    }
}

impl Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "secp256k1" => Ok(Curve::Secp256k1),
            "secp256r1" | "prime256v1" | "P-256" => Ok(Curve::Secp256r1),
            _ => Err(Error::UnknownCurve),
        }
    }
}

/// Domain parameters of a short Weierstrass curve `y² = x³ + ax + b` over
/// `GF(p)` with a base point `G` of prime order `n`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveParams {
    curve: Curve,
    name: &'static str,
    p: U256,
    a: U256,
    b: U256,
    gx: U256,
    gy: U256,
    n: U256,
    h: u32,
}

/// secp256k1 domain parameters.
static SECP256K1: CurveParams = CurveParams {
    curve: Curve::Secp256k1,
    name: "secp256k1",
    p: U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F"),
    a: U256::ZERO,
    b: U256::from_u8(7),
    gx: U256::from_be_hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
    gy: U256::from_be_hex("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"),
    n: U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141"),
    h: 1,
};

/// secp256r1 domain parameters.
static SECP256R1: CurveParams = CurveParams {
    curve: Curve::Secp256r1,
    name: "secp256r1",
    p: U256::from_be_hex("FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF"),
    a: U256::from_be_hex("FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFC"),
    b: U256::from_be_hex("5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B"),
    gx: U256::from_be_hex("6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296"),
    gy: U256::from_be_hex("4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5"),
    n: U256::from_be_hex("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551"),
    h: 1,
};

impl CurveParams {
    /// Curve identifier.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Base field prime `p`.
    pub fn p(&self) -> &U256 {
        &self.p
    }

    /// Curve coefficient `a`.
    pub fn a(&self) -> &U256 {
        &self.a
    }

    /// Curve coefficient `b`.
    pub fn b(&self) -> &U256 {
        &self.b
    }

    /// Order `n` of the base point.
    pub fn n(&self) -> &U256 {
        &self.n
    }

    /// Cofactor `h`.
    pub fn cofactor(&self) -> u32 {
        self.h
    }

    /// Bit length of `n`.
    pub fn order_bits(&self) -> usize {
        self.n.bits_vartime()
    }

    /// Base point `G`.
    pub fn generator(&self) -> AffinePoint {
        AffinePoint::Affine(Coordinates::new_unchecked(self.gx, self.gy))
    }

    /// Arithmetic modulo `p`.
    pub fn base_field(&self) -> Field {
        Field::from_odd_modulus(&self.p)
    }

    /// Arithmetic modulo `n`.
    pub fn scalar_field(&self) -> Field {
        Field::from_odd_modulus(&self.n)
    }

    /// Check the domain parameters.
    ///
    /// Verifies that `p` and `n` are odd probable primes, that `a`, `b` and
    /// the base point coordinates are reduced, that `4a³ + 27b² ≠ 0 (mod p)`,
    /// and that `G` lies on the curve with `n·G = O`.
    ///
    /// Variable time. Release builds never run this for the built-in
    /// tables; debug builds run it once per curve from [`Curve::params`].
    pub fn validate(&self) -> Result<()> {
        let fp = Field::new(&self.p)?;
        let fn_ = Field::new(&self.n)?;

        if !fp.is_probable_prime_vartime(PRIMALITY_WITNESSES)
            || !fn_.is_probable_prime_vartime(PRIMALITY_WITNESSES)
        {
            return Err(Error::InvalidCurveParameters);
        }

        if self.h == 0 || !bool::from(fp.is_reduced(&self.a) & fp.is_reduced(&self.b)) {
            return Err(Error::InvalidCurveParameters);
        }

        // 4a³ + 27b²
        let a3 = fp.mul(&fp.square(&self.a), &self.a);
        let b2 = fp.square(&self.b);
        let discriminant = fp.add(
            &fp.mul(&U256::from_u8(4), &a3),
            &fp.mul(&U256::from_u8(27), &b2),
        );
        if bool::from(fp.is_zero(&discriminant)) {
            return Err(Error::InvalidCurveParameters);
        }

        let generator = self
            .point(self.gx, self.gy)
            .map_err(|_| Error::InvalidCurveParameters)?;
        if !self.has_prime_order(&generator) {
            return Err(Error::InvalidCurveParameters);
        }

        Ok(())
    }
}
