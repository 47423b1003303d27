//! Public keys and their SEC1 encoding.

use crate::{
    AffinePoint, Curve, CurveParams, Error, NonZeroScalar, Result,
    mul::ladder,
    point::Coordinates,
    projective::{CurveArithmetic, ProjectivePoint},
    scalar::SCALAR_SIZE,
};
use bigint::{Encoding, U256};
use subtle::ConditionallySelectable;

/// Size of a compressed SEC1 point.
pub const COMPRESSED_POINT_SIZE: usize = 1 + SCALAR_SIZE;

/// Size of an uncompressed SEC1 point.
pub const UNCOMPRESSED_POINT_SIZE: usize = 1 + 2 * SCALAR_SIZE;

/// Elliptic curve public key `Q = d·G`.
///
/// Always a finite point on its curve with `n·Q = O`; every constructor
/// checks this.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PublicKey {
    curve: Curve,
    point: AffinePoint,
}

impl PublicKey {
    /// Create a public key from an affine point, failing with
    /// [`Error::InvalidPublicKey`] if it does not pass
    /// [`validate_public_key`].
    pub fn from_affine(curve: Curve, point: AffinePoint) -> Result<Self> {
        if !validate_public_key(curve.params(), &point) {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { curve, point })
    }

    /// Create a public key from affine coordinates.
    pub fn from_coordinates(curve: Curve, x: U256, y: U256) -> Result<Self> {
        let point = curve.params().point(x, y)?;
        Self::from_affine(curve, point)
    }

    /// Decode a SEC1 encoded point, either compressed (`0x02`/`0x03`) or
    /// uncompressed (`0x04`).
    pub fn from_sec1_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        let params = curve.params();

        let point = match (bytes.first(), bytes.len()) {
            (Some(0x04), UNCOMPRESSED_POINT_SIZE) => {
                let x = U256::from_be_slice(&bytes[1..COMPRESSED_POINT_SIZE]);
                let y = U256::from_be_slice(&bytes[COMPRESSED_POINT_SIZE..]);
                params.point(x, y)?
            }
            (Some(&tag @ (0x02 | 0x03)), COMPRESSED_POINT_SIZE) => {
                let x = U256::from_be_slice(&bytes[1..]);
                decompress(params, &x, tag & 1 == 1)?
            }
            (Some(0x00), 1) => return Err(Error::InvalidPublicKey),
            _ => return Err(Error::InvalidEncoding),
        };

        Self::from_affine(curve, point)
    }

    /// Derive the public key of a secret scalar.
    pub(crate) fn from_secret_scalar(scalar: &NonZeroScalar) -> Self {
        let curve = scalar.curve();
        let params = curve.params();
        let arith = CurveArithmetic::new(params);
        let generator = ProjectivePoint::from_affine(&params.generator());
        let point = ladder(&arith, scalar.as_uint(), params.order_bits(), &generator);

        Self {
            curve,
            point: point.to_affine(&arith),
        }
    }

    /// Curve this key belongs to.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Borrow the affine point.
    pub fn point(&self) -> &AffinePoint {
        &self.point
    }

    /// Affine `x`-coordinate.
    pub fn x(&self) -> &U256 {
        self.coordinates().x()
    }

    /// Affine `y`-coordinate.
    pub fn y(&self) -> &U256 {
        self.coordinates().y()
    }

    fn coordinates(&self) -> &Coordinates {
        self.point
            .coordinates()
            .expect("public key ensured finite in constructor")
    }

    /// Encode as a SEC1 point.
    pub fn to_encoded_point(&self, compress: bool) -> EncodedPoint {
        let x = self.x().to_be_bytes();
        let y = self.y().to_be_bytes();

        if compress {
            let mut bytes = [0u8; COMPRESSED_POINT_SIZE];
            bytes[0] = 0x02 | (y[SCALAR_SIZE - 1] & 1);
            bytes[1..].copy_from_slice(&x);
            EncodedPoint::Compressed(bytes)
        } else {
            let mut bytes = [0u8; UNCOMPRESSED_POINT_SIZE];
            bytes[0] = 0x04;
            bytes[1..COMPRESSED_POINT_SIZE].copy_from_slice(&x);
            bytes[COMPRESSED_POINT_SIZE..].copy_from_slice(&y);
            EncodedPoint::Uncompressed(bytes)
        }
    }
}

/// Check that `point` is usable as a public key on the given curve: it is not
/// the identity, it satisfies the curve equation with reduced coordinates,
/// and `n·Q = O`.
pub fn validate_public_key(params: &CurveParams, point: &AffinePoint) -> bool {
    params.has_prime_order(point)
}

/// Recover `y` from `x` and the parity of `y`.
fn decompress(params: &CurveParams, x: &U256, y_is_odd: bool) -> Result<AffinePoint> {
    let fp = params.base_field();
    if !bool::from(fp.is_reduced(x)) {
        return Err(Error::PointNotOnCurve);
    }

    let beta = Option::<U256>::from(fp.sqrt(&params.curve_rhs(x)))
        .ok_or(Error::PointNotOnCurve)?;
    let beta_is_odd = beta.as_words()[0] & 1 == 1;
    let y = U256::conditional_select(
        &beta,
        &fp.negate(&beta),
        u8::from(beta_is_odd != y_is_odd).into(),
    );

    params.point(*x, y)
}

/// SEC1 encoded point.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EncodedPoint {
    /// `0x02 | 0x03 ‖ x`
    Compressed([u8; COMPRESSED_POINT_SIZE]),

    /// `0x04 ‖ x ‖ y`
    Uncompressed([u8; UNCOMPRESSED_POINT_SIZE]),
}

impl EncodedPoint {
    /// Borrow the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            EncodedPoint::Compressed(bytes) => bytes,
            EncodedPoint::Uncompressed(bytes) => bytes,
        }
    }

    /// Is this the compressed form?
    pub fn is_compressed(&self) -> bool {
        matches!(self, EncodedPoint::Compressed(_))
    }
}

impl AsRef<[u8]> for EncodedPoint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::{EncodedPoint, PublicKey, validate_public_key};
    use crate::{AffinePoint, Curve, Error, SecretKey, point::Coordinates};
    use bigint::U256;
    use hex_literal::hex;

    const P256_UNCOMPRESSED_BASEPOINT: &[u8] = &hex!(
        "04 6B17D1F2 E12C4247 F8BCE6E5 63A440F2 77037D81 2DEB33A0 F4A13945 D898C296
            4FE342E2 FE1A7F9B 8EE7EB4A 7C0F9E16 2BCE3357 6B315ECE CBB64068 37BF51F5"
    );
    const P256_COMPRESSED_BASEPOINT: &[u8] =
        &hex!("03 6B17D1F2 E12C4247 F8BCE6E5 63A440F2 77037D81 2DEB33A0 F4A13945 D898C296");
    const K256_COMPRESSED_BASEPOINT: &[u8] =
        &hex!("02 79BE667E F9DCBBAC 55A06295 CE870B07 029BFCDB 2DCE28D9 59F2815B 16F81798");

    fn generator_key(curve: Curve) -> PublicKey {
        SecretKey::new(curve, U256::ONE).unwrap().public_key()
    }

    #[test]
    fn uncompressed_round_trip() {
        let key = PublicKey::from_sec1_bytes(Curve::Secp256r1, P256_UNCOMPRESSED_BASEPOINT).unwrap();
        assert_eq!(key, generator_key(Curve::Secp256r1));
        assert_eq!(key.to_encoded_point(false).as_bytes(), P256_UNCOMPRESSED_BASEPOINT);
    }

    #[test]
    fn compressed_round_trip() {
        let key = PublicKey::from_sec1_bytes(Curve::Secp256r1, P256_COMPRESSED_BASEPOINT).unwrap();
        assert_eq!(key, generator_key(Curve::Secp256r1));
        let encoded = key.to_encoded_point(true);
        assert!(encoded.is_compressed());
        assert_eq!(encoded.as_bytes(), P256_COMPRESSED_BASEPOINT);

        let key = PublicKey::from_sec1_bytes(Curve::Secp256k1, K256_COMPRESSED_BASEPOINT).unwrap();
        assert_eq!(key, generator_key(Curve::Secp256k1));
        assert_eq!(key.to_encoded_point(true).as_ref(), K256_COMPRESSED_BASEPOINT);
    }

    #[test]
    fn decompress_negated_generator() {
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(K256_COMPRESSED_BASEPOINT);
        bytes[0] = 0x03;

        let key = PublicKey::from_sec1_bytes(Curve::Secp256k1, &bytes).unwrap();
        let params = Curve::Secp256k1.params();
        assert_eq!(key.point(), &params.negate(&params.generator()));
        assert_eq!(key.to_encoded_point(true), EncodedPoint::Compressed(bytes));
    }

    #[test]
    fn rejects_bad_encodings() {
        let curve = Curve::Secp256r1;
        assert_eq!(PublicKey::from_sec1_bytes(curve, &[]), Err(Error::InvalidEncoding));
        assert_eq!(PublicKey::from_sec1_bytes(curve, &[0x00]), Err(Error::InvalidPublicKey));
        assert_eq!(
            PublicKey::from_sec1_bytes(curve, &P256_UNCOMPRESSED_BASEPOINT[..64]),
            Err(Error::InvalidEncoding)
        );

        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(P256_UNCOMPRESSED_BASEPOINT);
        bytes[0] = 0x05;
        assert_eq!(PublicKey::from_sec1_bytes(curve, &bytes), Err(Error::InvalidEncoding));

        bytes[0] = 0x04;
        bytes[64] ^= 1;
        assert_eq!(PublicKey::from_sec1_bytes(curve, &bytes), Err(Error::PointNotOnCurve));
    }

    #[test]
    fn rejects_x_without_square_root() {
        // x = 5 gives a non-residue on secp256k1 (5³ + 7 = 132)
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        bytes[32] = 5;
        assert_eq!(
            PublicKey::from_sec1_bytes(Curve::Secp256k1, &bytes),
            Err(Error::PointNotOnCurve)
        );
    }

    #[test]
    fn rejects_identity_and_off_curve() {
        for curve in Curve::ALL {
            let params = curve.params();
            assert!(!validate_public_key(params, &AffinePoint::IDENTITY));
            assert_eq!(
                PublicKey::from_affine(curve, AffinePoint::IDENTITY),
                Err(Error::InvalidPublicKey)
            );

            let bogus = AffinePoint::Affine(Coordinates::new_unchecked(U256::ONE, U256::ONE));
            assert!(!validate_public_key(params, &bogus));
            assert_eq!(PublicKey::from_affine(curve, bogus), Err(Error::InvalidPublicKey));
            assert_eq!(
                PublicKey::from_coordinates(curve, U256::ONE, U256::ONE),
                Err(Error::PointNotOnCurve)
            );
        }
    }

    #[test]
    fn rejects_point_from_other_curve() {
        let g = Curve::Secp256r1.params().generator();
        assert_eq!(
            PublicKey::from_affine(Curve::Secp256k1, g),
            Err(Error::InvalidPublicKey)
        );
    }
}
