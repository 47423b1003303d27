//! Error type

use core::fmt::{self, Display};

/// Result type with the `ecc` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Elliptic curve errors.
///
/// A signature that simply fails to verify is not an error: verification
/// reports it as `Ok(false)`. The variants below indicate malformed input or
/// an operation which could not be carried out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Curve constants are malformed (singular curve, base point off the
    /// curve, base point of the wrong order, even modulus).
    InvalidCurveParameters,

    /// Affine coordinates do not satisfy the curve equation, or are not
    /// reduced modulo the field prime.
    PointNotOnCurve,

    /// Inverse of zero was requested.
    NotInvertible,

    /// Private key, nonce or other scalar outside of `[1, n-1]`.
    ScalarOutOfRange,

    /// Public key is the identity, lies off the curve, or is not in the
    /// prime-order subgroup.
    InvalidPublicKey,

    /// Signature component `r` or `s` outside of `[1, n-1]`.
    InvalidSignatureRange,

    /// The random number generator failed or did not produce usable output.
    InsufficientRandomness,

    /// The deterministic nonce generator exceeded its retry bound.
    NonceExhausted,

    /// Operands belong to different curves.
    CurveMismatch,

    /// Byte input has the wrong length or tag.
    InvalidEncoding,

    /// Curve name is not one of the supported curves.
    UnknownCurve,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidCurveParameters => "invalid curve parameters",
            Error::PointNotOnCurve => "point is not on the curve",
            Error::NotInvertible => "element is not invertible",
            Error::ScalarOutOfRange => "scalar out of range [1, n-1]",
            Error::InvalidPublicKey => "invalid public key",
            Error::InvalidSignatureRange => "signature component out of range [1, n-1]",
            Error::InsufficientRandomness => "random number generator failure",
            Error::NonceExhausted => "deterministic nonce retry bound exceeded",
            Error::CurveMismatch => "operands belong to different curves",
            Error::InvalidEncoding => "invalid encoding",
            Error::UnknownCurve => "unknown curve",
        })
    }
}

impl core::error::Error for Error {}
