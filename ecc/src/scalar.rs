//! Scalars in `[1, n-1]`.

use crate::{Curve, Error, Result};
use bigint::{Encoding, U256};
use core::fmt;
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq, ConstantTimeLess, CtOption};
use zeroize::{Zeroize, Zeroizing};

/// Size of a serialized scalar or field element in bytes.
pub const SCALAR_SIZE: usize = 32;

/// Number of RNG draws attempted before giving up on rejection sampling.
///
/// For both supported curves a single draw is rejected with probability
/// below 2⁻³², so exhausting this bound indicates a broken RNG.
const MAX_RNG_ATTEMPTS: usize = 64;

/// Non-zero integer modulo `n` for a particular curve.
///
/// Used for private keys and ECDSA nonces. The value is wiped from memory
/// when dropped.
#[derive(Clone)]
pub struct NonZeroScalar {
    curve: Curve,
    value: U256,
}

impl NonZeroScalar {
    /// Create a scalar, checking that `value` is in `[1, n-1]`.
    pub fn new(curve: Curve, value: U256) -> Result<Self> {
        Option::from(Self::new_ct(curve, value)).ok_or(Error::ScalarOutOfRange)
    }

    /// Create a scalar in constant time.
    pub fn new_ct(curve: Curve, value: U256) -> CtOption<Self> {
        let in_range = !value.ct_eq(&U256::ZERO) & value.ct_lt(curve.params().n());
        CtOption::new(Self { curve, value }, in_range)
    }

    /// Decode a 32-byte big-endian scalar.
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SCALAR_SIZE {
            return Err(Error::InvalidEncoding);
        }

        Self::new(curve, U256::from_be_slice(bytes))
    }

    /// Draw a uniformly random scalar by rejection sampling.
    ///
    /// Fails with [`Error::InsufficientRandomness`] if `rng` reports an error
    /// or keeps producing out-of-range values.
    pub fn random<R>(curve: Curve, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let bits = curve.params().order_bits();
        let mask = U256::MAX.shr_vartime(256 - bits);
        let mut bytes = Zeroizing::new([0u8; SCALAR_SIZE]);

        for _ in 0..MAX_RNG_ATTEMPTS {
            rng.try_fill_bytes(&mut bytes[..])
                .map_err(|_| Error::InsufficientRandomness)?;

            let candidate = Zeroizing::new(U256::from_be_bytes(*bytes) & mask);
            if let Ok(scalar) = Self::new(curve, *candidate) {
                return Ok(scalar);
            }
        }

        Err(Error::InsufficientRandomness)
    }

    /// Curve this scalar belongs to.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Integer value in `[1, n-1]`.
    pub fn as_uint(&self) -> &U256 {
        &self.value
    }

    /// Serialize as 32 big-endian bytes.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SCALAR_SIZE]> {
        Zeroizing::new(self.value.to_be_bytes())
    }
}

impl ConstantTimeEq for NonZeroScalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        Choice::from(u8::from(self.curve == other.curve)) & self.value.ct_eq(&other.value)
    }
}

impl PartialEq for NonZeroScalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for NonZeroScalar {}

impl fmt::Debug for NonZeroScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonZeroScalar")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

impl Drop for NonZeroScalar {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Convert the leftmost `qbits` bits of `bytes` to an integer (SEC 1 §4.1.3,
/// RFC 6979 §2.3.2).
///
/// Input longer than 32 bytes is truncated to its first 32 bytes before the
/// shift.
pub(crate) fn bits2int(bytes: &[u8], qbits: usize) -> U256 {
    let len = bytes.len().min(SCALAR_SIZE);
    let mut buf = [0u8; SCALAR_SIZE];
    buf[SCALAR_SIZE - len..].copy_from_slice(&bytes[..len]);

    let value = U256::from_be_bytes(buf);
    let blen = len * 8;

    if blen > qbits {
        value.shr_vartime(blen - qbits)
    } else {
        value
    }
}
