//! Secret keys and key pairs.

use crate::{Curve, Error, NonZeroScalar, PublicKey, Result, scalar::SCALAR_SIZE};
use bigint::U256;
use core::fmt;
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

#[cfg(feature = "getrandom")]
use rand_core::OsRng;

/// Elliptic curve secret key `d ∈ [1, n-1]`.
///
/// The secret scalar is zeroized on drop. Equality comparisons run in
/// constant time.
#[derive(Clone)]
pub struct SecretKey {
    scalar: NonZeroScalar,
}

impl SecretKey {
    /// Create a secret key from an integer, failing with
    /// [`Error::ScalarOutOfRange`] unless it lies in `[1, n-1]`.
    pub fn new(curve: Curve, value: U256) -> Result<Self> {
        NonZeroScalar::new(curve, value).map(Self::from)
    }

    /// Deserialize a 32-byte big-endian secret key.
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        NonZeroScalar::from_bytes(curve, bytes).map(Self::from)
    }

    /// Generate a random secret key.
    pub fn random<R>(curve: Curve, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        NonZeroScalar::random(curve, rng).map(Self::from)
    }

    /// Generate a random secret key using the operating system's RNG.
    #[cfg(feature = "getrandom")]
    pub fn generate_os(curve: Curve) -> Result<Self> {
        Self::random(curve, &mut OsRng)
    }

    /// Curve this key belongs to.
    pub fn curve(&self) -> Curve {
        self.scalar.curve()
    }

    /// Borrow the secret scalar value.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material. Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &NonZeroScalar {
        &self.scalar
    }

    /// Serialize as 32 big-endian bytes.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SCALAR_SIZE]> {
        self.scalar.to_bytes()
    }

    /// Derive the public key `Q = d·G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_scalar(&self.scalar)
    }
}

impl From<NonZeroScalar> for SecretKey {
    fn from(scalar: NonZeroScalar) -> Self {
        Self { scalar }
    }
}

impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.scalar.ct_eq(&other.scalar)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}

/// A secret key together with its public key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyPair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a random key pair.
    pub fn generate<R>(curve: Curve, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        SecretKey::random(curve, rng).map(Self::from_secret_key)
    }

    /// Generate a random key pair using the operating system's RNG.
    #[cfg(feature = "getrandom")]
    pub fn generate_os(curve: Curve) -> Result<Self> {
        Self::generate(curve, &mut OsRng)
    }

    /// Complete a key pair from its secret key.
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }

    /// Pair a secret key with a public key, checking that they correspond.
    pub fn new(secret_key: SecretKey, public_key: PublicKey) -> Result<Self> {
        if secret_key.curve() != public_key.curve() {
            return Err(Error::CurveMismatch);
        }

        if secret_key.public_key() != public_key {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self {
            secret_key,
            public_key,
        })
    }

    /// Curve both keys belong to.
    pub fn curve(&self) -> Curve {
        self.public_key.curve()
    }

    /// Borrow the secret key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Borrow the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyPair, SecretKey};
    use crate::{Curve, Error};
    use bigint::U256;
    use hex_literal::hex;
    use rand_core::OsRng;

    const P256_SECRET: [u8; 32] =
        hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721");
    const P256_PUBLIC_X: [u8; 32] =
        hex!("60FED4BA255A9D31C961EB74C6356D68C049B8923B61FA6CE669622E60F29FB6");
    const P256_PUBLIC_Y: [u8; 32] =
        hex!("7903FE1008B8BC99A41AE9E95628BC64F2F1B20C2D7E9F5177A3C294D4462299");

    #[test]
    fn derive_public_key() {
        let secret_key = SecretKey::from_bytes(Curve::Secp256r1, &P256_SECRET).unwrap();
        let public_key = secret_key.public_key();
        assert_eq!(public_key.x(), &U256::from_be_slice(&P256_PUBLIC_X));
        assert_eq!(public_key.y(), &U256::from_be_slice(&P256_PUBLIC_Y));
    }

    #[test]
    fn secret_key_one() {
        for curve in Curve::ALL {
            let secret_key = SecretKey::new(curve, U256::ONE).unwrap();
            assert_eq!(secret_key.public_key().point(), &curve.params().generator());
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for curve in Curve::ALL {
            assert_eq!(SecretKey::new(curve, U256::ZERO), Err(Error::ScalarOutOfRange));
            assert_eq!(
                SecretKey::new(curve, *curve.params().n()),
                Err(Error::ScalarOutOfRange)
            );
            assert_eq!(
                SecretKey::from_bytes(curve, &[0u8; 32]),
                Err(Error::ScalarOutOfRange)
            );
            assert_eq!(SecretKey::from_bytes(curve, &[1u8; 33]), Err(Error::InvalidEncoding));
        }
    }

    #[test]
    fn bytes_round_trip() {
        let secret_key = SecretKey::from_bytes(Curve::Secp256r1, &P256_SECRET).unwrap();
        assert_eq!(*secret_key.to_bytes(), P256_SECRET);
    }

    #[test]
    fn debug_hides_secret() {
        let secret_key = SecretKey::from_bytes(Curve::Secp256r1, &P256_SECRET).unwrap();
        let debug = std::format!("{secret_key:?}");
        assert!(debug.contains("Secp256r1"));
        assert!(!debug.to_lowercase().contains("c9afa9"));
    }

    #[test]
    fn key_pair_generate() {
        for curve in Curve::ALL {
            let pair = KeyPair::generate(curve, &mut OsRng).unwrap();
            assert_eq!(pair.curve(), curve);
            assert_eq!(&pair.secret_key().public_key(), pair.public_key());
        }
    }

    #[test]
    fn key_pair_new_checks_correspondence() {
        let a = KeyPair::generate(Curve::Secp256k1, &mut OsRng).unwrap();
        let b = KeyPair::generate(Curve::Secp256k1, &mut OsRng).unwrap();
        let c = KeyPair::generate(Curve::Secp256r1, &mut OsRng).unwrap();

        assert_eq!(
            KeyPair::new(a.secret_key().clone(), a.public_key().clone()),
            Ok(a.clone())
        );
        assert_eq!(
            KeyPair::new(a.secret_key().clone(), b.public_key().clone()),
            Err(Error::InvalidPublicKey)
        );
        assert_eq!(
            KeyPair::new(a.secret_key().clone(), c.public_key().clone()),
            Err(Error::CurveMismatch)
        );
    }
}
