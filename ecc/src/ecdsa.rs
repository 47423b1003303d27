//! Elliptic Curve Digital Signature Algorithm (ECDSA) as specified in
//! [SEC 1] §4.1, with deterministic nonces per [RFC 6979].
//!
//! ## Usage
//!
//! ```
//! # #[cfg(feature = "getrandom")]
//! # {
//! use ecc::{Curve, KeyPair, ecdsa};
//!
//! let pair = KeyPair::generate_os(Curve::Secp256k1).unwrap();
//! let message = b"ECDSA proves knowledge of a secret number in the context of a single message";
//!
//! let signature = ecdsa::sign(pair.secret_key(), message).unwrap();
//! assert!(ecdsa::verify(pair.public_key(), message, &signature).unwrap());
//! # }
//! ```
//!
//! [SEC 1]: https://www.secg.org/sec1-v2.pdf
//! [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979

use crate::{
    AffinePoint, CurveParams, Error, NonZeroScalar, PublicKey, Result, SecretKey,
    public_key::validate_public_key, rfc6979, scalar::SCALAR_SIZE, scalar::bits2int,
};
use bigint::{Encoding, U256};
use sha2::{Digest, Sha256};
use subtle::{ConstantTimeEq, ConstantTimeLess};

/// Size of a serialized signature (`r ‖ s`) in bytes.
pub const SIGNATURE_SIZE: usize = 2 * SCALAR_SIZE;

/// ECDSA signature `(r, s)`.
///
/// Decoding does not range-check the components; [`verify`] rejects
/// signatures with `r` or `s` outside of `[1, n-1]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Signature {
    r: U256,
    s: U256,
}

impl Signature {
    /// Create a signature from its components.
    pub fn from_scalars(r: U256, s: U256) -> Self {
        Self { r, s }
    }

    /// Parse a fixed-size `r ‖ s` signature.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Self {
        Self {
            r: U256::from_be_slice(&bytes[..SCALAR_SIZE]),
            s: U256::from_be_slice(&bytes[SCALAR_SIZE..]),
        }
    }

    /// Parse a signature from a slice, which must be exactly
    /// [`SIGNATURE_SIZE`] bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        <&[u8; SIGNATURE_SIZE]>::try_from(bytes)
            .map(Self::from_bytes)
            .map_err(|_| Error::InvalidEncoding)
    }

    /// Serialize as `r ‖ s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..SCALAR_SIZE].copy_from_slice(&self.r.to_be_bytes());
        bytes[SCALAR_SIZE..].copy_from_slice(&self.s.to_be_bytes());
        bytes
    }

    /// The `r` component.
    pub fn r(&self) -> &U256 {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &U256 {
        &self.s
    }
}

/// Sign `msg` with its SHA-256 digest.
pub fn sign(secret_key: &SecretKey, msg: &[u8]) -> Result<Signature> {
    sign_prehashed(secret_key, &Sha256::digest(msg))
}

/// Sign a message digest using an RFC 6979 nonce.
///
/// Digests longer than the group order are truncated to its bit length.
pub fn sign_prehashed(secret_key: &SecretKey, digest: &[u8]) -> Result<Signature> {
    let nonces = rfc6979::derive_nonce(secret_key.as_scalar(), digest);
    sign_with_nonces(secret_key, digest, nonces)
}

/// Sign a message digest with a caller-provided nonce.
///
/// # ⚠️ Warning
///
/// Reusing a nonce for two different digests, or using a nonce which is not
/// uniformly random or derived per RFC 6979, discloses the secret key. Fails
/// with [`Error::NonceExhausted`] if `k` yields `r = 0` or `s = 0`.
pub fn sign_prehashed_with_nonce(
    secret_key: &SecretKey,
    digest: &[u8],
    k: &NonZeroScalar,
) -> Result<Signature> {
    if k.curve() != secret_key.curve() {
        return Err(Error::CurveMismatch);
    }

    sign_with_nonces(secret_key, digest, core::iter::once(k.clone()))
}

/// Try nonces in order until one yields a non-degenerate signature.
pub(crate) fn sign_with_nonces<I>(
    secret_key: &SecretKey,
    digest: &[u8],
    nonces: I,
) -> Result<Signature>
where
    I: IntoIterator<Item = NonZeroScalar>,
{
    let params = secret_key.curve().params();
    let fn_ = params.scalar_field();
    let d = secret_key.as_scalar().as_uint();
    let e = fn_.reduce(&bits2int(digest, params.order_bits()));

    for k in nonces {
        let Some(r) = x_coordinate_mod_n(params, &params.mul_base(k.as_uint())?) else {
            continue;
        };

        if bool::from(r.ct_eq(&U256::ZERO)) {
            continue;
        }

        // s = k⁻¹(e + rd) mod n
        let k_inv = fn_.invert(k.as_uint())?;
        let s = fn_.mul(&k_inv, &fn_.add(&e, &fn_.mul(&r, d)));

        if bool::from(s.ct_eq(&U256::ZERO)) {
            continue;
        }

        return Ok(Signature { r, s });
    }

    Err(Error::NonceExhausted)
}

/// Verify a signature over `msg` with its SHA-256 digest.
pub fn verify(public_key: &PublicKey, msg: &[u8], signature: &Signature) -> Result<bool> {
    verify_prehashed(public_key, &Sha256::digest(msg), signature)
}

/// Verify a signature over a message digest.
///
/// Returns `Ok(false)` for a well-formed signature which does not match.
/// Fails with [`Error::InvalidSignatureRange`] if `r` or `s` is outside of
/// `[1, n-1]` and with [`Error::InvalidPublicKey`] if the key does not pass
/// [`validate_public_key`].
pub fn verify_prehashed(
    public_key: &PublicKey,
    digest: &[u8],
    signature: &Signature,
) -> Result<bool> {
    let params = public_key.curve().params();

    let in_range = |value: &U256| {
        bool::from(!value.ct_eq(&U256::ZERO) & value.ct_lt(params.n()))
    };
    if !in_range(&signature.r) || !in_range(&signature.s) {
        return Err(Error::InvalidSignatureRange);
    }

    if !validate_public_key(params, public_key.point()) {
        return Err(Error::InvalidPublicKey);
    }

    let fn_ = params.scalar_field();
    let e = fn_.reduce(&bits2int(digest, params.order_bits()));

    let w = fn_.invert(&signature.s)?;
    let u1 = fn_.mul(&e, &w);
    let u2 = fn_.mul(&signature.r, &w);

    // R = u1·G + u2·Q
    let point = params.add(
        &params.mul_base(&u1)?,
        &params.mul(&u2, public_key.point())?,
    );

    Ok(x_coordinate_mod_n(params, &point) == Some(signature.r))
}

/// `x mod n` for a finite point.
fn x_coordinate_mod_n(params: &CurveParams, point: &AffinePoint) -> Option<U256> {
    point.x().map(|x| params.scalar_field().reduce(x))
}
