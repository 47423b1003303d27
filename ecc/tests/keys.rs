//! Key generation and public key validation tests.

use core::num::NonZeroU32;
use ecc::{Curve, EncodedPoint, Error, KeyPair, PublicKey, SecretKey, U256, validate_public_key};
use proptest::prelude::*;
use rand_core::{CryptoRng, Error as RngError, OsRng, RngCore};

/// RNG which always reports failure.
struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), RngError> {
        Err(RngError::from(
            NonZeroU32::new(RngError::CUSTOM_START).unwrap(),
        ))
    }
}

impl CryptoRng for FailingRng {}

/// RNG which produces only zeroes.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ZeroRng {}

#[test]
fn generate_key_pairs() {
    for curve in Curve::ALL {
        let pair = KeyPair::generate(curve, &mut OsRng).unwrap();
        let params = curve.params();
        assert!(validate_public_key(params, pair.public_key().point()));
        assert_eq!(pair.secret_key().public_key(), *pair.public_key());
    }
}

#[test]
fn generate_os() {
    for curve in Curve::ALL {
        let a = KeyPair::generate_os(curve).unwrap();
        let b = KeyPair::generate_os(curve).unwrap();
        assert_ne!(a.secret_key(), b.secret_key());
        assert_ne!(a.public_key(), b.public_key());

        assert!(SecretKey::generate_os(curve).is_ok());
    }
}

#[test]
fn failing_rng() {
    for curve in Curve::ALL {
        assert_eq!(
            KeyPair::generate(curve, &mut FailingRng),
            Err(Error::InsufficientRandomness)
        );
    }
}

#[test]
fn zero_rng() {
    for curve in Curve::ALL {
        assert_eq!(
            SecretKey::random(curve, &mut ZeroRng),
            Err(Error::InsufficientRandomness)
        );
    }
}

#[test]
fn public_key_from_coordinates() {
    for curve in Curve::ALL {
        let g = curve.params().generator();
        let key = PublicKey::from_coordinates(curve, *g.x().unwrap(), *g.y().unwrap()).unwrap();
        assert_eq!(key.point(), &g);
        assert_eq!(key.curve(), curve);
    }
}

#[test]
fn public_key_rejects_identity() {
    for curve in Curve::ALL {
        assert_eq!(
            PublicKey::from_affine(curve, ecc::AffinePoint::IDENTITY),
            Err(Error::InvalidPublicKey)
        );
    }
}

#[test]
fn public_key_rejects_unreduced_coordinates() {
    let curve = Curve::Secp256r1;
    let y = U256::from_be_hex("66485C780E2F83D72433BD5D84A06BB6541C2AF31DAE871728BF856A174F93F4");
    assert!(PublicKey::from_coordinates(curve, U256::ZERO, y).is_ok());

    // x = p is congruent to 0 but not reduced
    let x = *curve.params().p();
    assert_eq!(
        PublicKey::from_coordinates(curve, x, y),
        Err(Error::PointNotOnCurve)
    );
}

#[test]
fn sec1_round_trip() {
    for curve in Curve::ALL {
        let pair = KeyPair::generate(curve, &mut OsRng).unwrap();
        let public_key = pair.public_key();

        for compress in [false, true] {
            let encoded = public_key.to_encoded_point(compress);
            assert_eq!(encoded.is_compressed(), compress);
            assert_eq!(
                encoded.as_bytes().len(),
                if compress { 33 } else { 65 }
            );
            assert_eq!(
                PublicKey::from_sec1_bytes(curve, encoded.as_bytes()).as_ref(),
                Ok(public_key)
            );
        }
    }
}

#[test]
fn sec1_uncompressed_layout() {
    let secret_key = SecretKey::new(Curve::Secp256k1, U256::ONE).unwrap();
    let EncodedPoint::Uncompressed(bytes) = secret_key.public_key().to_encoded_point(false) else {
        panic!("expected uncompressed encoding");
    };
    assert_eq!(bytes[0], 0x04);
    assert_eq!(&bytes[1..5], &[0x79, 0xBE, 0x66, 0x7E]);
    assert_eq!(&bytes[33..37], &[0x48, 0x3A, 0xDA, 0x77]);
}

prop_compose! {
    fn key_pair(curve: Curve)(bytes in any::<[u8; 32]>()) -> KeyPair {
        let value = curve.params().scalar_field().reduce(&U256::from_be_slice(&bytes));
        let secret_key = SecretKey::new(curve, value)
            .unwrap_or_else(|_| SecretKey::new(curve, U256::ONE).unwrap());
        KeyPair::from_secret_key(secret_key)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn secret_key_bytes_round_trip(pair in key_pair(Curve::Secp256k1)) {
        let bytes = pair.secret_key().to_bytes();
        let decoded = SecretKey::from_bytes(Curve::Secp256k1, &bytes[..]).unwrap();
        prop_assert_eq!(&decoded, pair.secret_key());
        prop_assert_eq!(decoded.public_key(), *pair.public_key());
    }

    #[test]
    fn compressed_round_trip(pair in key_pair(Curve::Secp256r1)) {
        let encoded = pair.public_key().to_encoded_point(true);
        let decoded = PublicKey::from_sec1_bytes(Curve::Secp256r1, encoded.as_ref()).unwrap();
        prop_assert_eq!(&decoded, pair.public_key());
    }
}
