//! Elliptic Curve Diffie-Hellman (Ephemeral) Support.
//!
//! This module contains a high-level interface for performing ephemeral
//! Diffie-Hellman key exchanges using the supported curves.
//!
//! # ECDH Ephemeral (ECDHE) Usage
//!
//! Ephemeral Diffie-Hellman provides a one-time key exchange between two peers
//! using a randomly generated secret key for each exchange.
//!
//! ```
//! # #[cfg(feature = "getrandom")]
//! # {
//! use ecc::{Curve, KeyPair, ecdh};
//!
//! // Alice
//! let alice = KeyPair::generate_os(Curve::Secp256r1).unwrap();
//!
//! // Bob
//! let bob = KeyPair::generate_os(Curve::Secp256r1).unwrap();
//!
//! // Alice computes shared secret from Bob's public key
//! let alice_shared = ecdh::diffie_hellman(alice.secret_key(), bob.public_key()).unwrap();
//!
//! // Bob computes the same shared secret from Alice's public key
//! let bob_shared = ecdh::diffie_hellman(bob.secret_key(), alice.public_key()).unwrap();
//!
//! assert_eq!(alice_shared.raw_secret_bytes(), bob_shared.raw_secret_bytes());
//! # }
//! ```

use crate::{Error, PublicKey, Result, SecretKey, scalar::SCALAR_SIZE};
use bigint::Encoding;
use zeroize::Zeroize;

/// Compute the shared secret `x(d·Q)`.
///
/// The scalar multiplication runs in constant time with respect to the
/// secret key. Fails with [`Error::CurveMismatch`] if the keys belong to
/// different curves.
pub fn diffie_hellman(secret_key: &SecretKey, public_key: &PublicKey) -> Result<SharedSecret> {
    if secret_key.curve() != public_key.curve() {
        return Err(Error::CurveMismatch);
    }

    let params = public_key.curve().params();
    let shared = params.mul(secret_key.as_scalar().as_uint(), public_key.point())?;
    let x = shared.x().ok_or(Error::InvalidPublicKey)?;

    Ok(SharedSecret {
        secret_bytes: x.to_be_bytes(),
    })
}

/// Shared secret value computed via ECDH key agreement.
///
/// This value is the `x`-coordinate of the shared point, zeroized on drop.
/// It is not uniformly random and should be passed through a KDF before use
/// as a symmetric key.
pub struct SharedSecret {
    secret_bytes: [u8; SCALAR_SIZE],
}

impl SharedSecret {
    /// Shared secret value, serialized as 32 big-endian bytes.
    ///
    /// # ⚠️ WARNING: NOT UNIFORMLY RANDOM! ⚠️
    ///
    /// Do not use this value directly as a symmetric encryption key.
    pub fn raw_secret_bytes(&self) -> &[u8; SCALAR_SIZE] {
        &self.secret_bytes
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.secret_bytes.zeroize();
    }
}
