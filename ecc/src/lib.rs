//! Elliptic curve cryptography core for the secp256k1 and secp256r1 short
//! Weierstrass curves.
//!
//! Provides prime field arithmetic, the elliptic curve group law, a
//! constant-time Montgomery ladder for scalar multiplication, key generation
//! and validation, deterministic ECDSA ([RFC 6979]) and ECDH.
//!
//! ## Usage
//!
//! ```
//! use ecc::{Curve, SecretKey, ecdsa};
//! use hex_literal::hex;
//!
//! let curve: Curve = "secp256r1".parse().unwrap();
//! let secret_key = SecretKey::from_bytes(
//!     curve,
//!     &hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721"),
//! )
//! .unwrap();
//! let public_key = secret_key.public_key();
//!
//! let signature = ecdsa::sign(&secret_key, b"sample").unwrap();
//! assert!(ecdsa::verify(&public_key, b"sample", &signature).unwrap());
//! assert!(!ecdsa::verify(&public_key, b"other", &signature).unwrap());
//! ```
//!
//! ## Constant-time operation
//!
//! Scalar multiplication uses complete projective addition formulas inside a
//! Montgomery ladder with constant-time conditional swaps, so the sequence of
//! field operations does not depend on secret scalars. Field inversion uses
//! Fermat's little theorem with a public exponent. The affine group law in
//! [`CurveParams::add`] branches on its inputs and is only applied to public
//! values.
//!
//! [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod ecdh;
pub mod ecdsa;
pub mod rfc6979;

mod curve;
mod error;
mod field;
mod mul;
mod point;
mod projective;
mod public_key;
mod scalar;
mod secret_key;

pub use crate::{
    curve::{Curve, CurveParams},
    error::{Error, Result},
    field::Field,
    point::{AffinePoint, Coordinates},
    public_key::{
        COMPRESSED_POINT_SIZE, EncodedPoint, PublicKey, UNCOMPRESSED_POINT_SIZE,
        validate_public_key,
    },
    scalar::{NonZeroScalar, SCALAR_SIZE},
    secret_key::{KeyPair, SecretKey},
};
pub use bigint::{self, U256};
pub use rand_core;
pub use subtle;
