//! Deterministic nonce generation as described in [RFC 6979].
//!
//! The nonce `k` is derived from the secret key and the message digest with
//! HMAC-SHA256 used as a DRBG. Candidates outside `[1, n-1]` are skipped, and
//! the signer may ask for further candidates if the first one produces a
//! degenerate signature.
//!
//! [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979

use crate::{Curve, NonZeroScalar, scalar::bits2int};
use bigint::{Encoding, U256};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

/// Number of DRBG outputs tried before giving up.
pub const MAX_NONCE_ATTEMPTS: usize = 1000;

/// Output size of HMAC-SHA256 in bytes.
const HASH_SIZE: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Derive the RFC 6979 nonce sequence for the secret scalar `x` and message
/// digest `h`.
///
/// The returned iterator yields valid nonces in order and ends after
/// [`MAX_NONCE_ATTEMPTS`] DRBG outputs.
pub fn derive_nonce(x: &NonZeroScalar, h: &[u8]) -> NonceGenerator {
    NonceGenerator::new(x, h, MAX_NONCE_ATTEMPTS)
}

/// HMAC-DRBG state for deterministic nonce generation.
///
/// `K` and `V` are zeroized on drop.
pub struct NonceGenerator {
    curve: Curve,
    k: [u8; HASH_SIZE],
    v: [u8; HASH_SIZE],
    remaining: usize,
}

impl NonceGenerator {
    /// Initialize the DRBG (RFC 6979 §3.2 steps a. through g.) with a custom
    /// retry bound.
    pub fn new(x: &NonZeroScalar, h: &[u8], max_attempts: usize) -> Self {
        let curve = x.curve();
        let params = curve.params();

        let x_octets = x.to_bytes();
        let h1 = params
            .scalar_field()
            .reduce(&bits2int(h, params.order_bits()))
            .to_be_bytes();

        let mut k = [0u8; HASH_SIZE];
        let mut v = [0x01u8; HASH_SIZE];

        for tag in [0x00, 0x01] {
            k = hmac(&k, &[&v, &[tag], &x_octets[..], &h1]);
            v = hmac(&k, &[&v]);
        }

        Self {
            curve,
            k,
            v,
            remaining: max_attempts,
        }
    }

    /// Produce the next DRBG output as an integer (§3.2 step h.), and advance
    /// the state so that a subsequent call yields the following candidate.
    fn next_output(&mut self) -> U256 {
        let rlen = self.curve.params().order_bits().div_ceil(8);
        let mut t = [0u8; HASH_SIZE];

        // tlen = hlen ≥ qlen for both supported curves, so one block suffices
        self.v = hmac(&self.k, &[&self.v]);
        t.copy_from_slice(&self.v);
        let k = bits2int(&t[..rlen], self.curve.params().order_bits());
        t.zeroize();

        self.k = hmac(&self.k, &[&self.v, &[0x00]]);
        self.v = hmac(&self.k, &[&self.v]);

        k
    }
}

impl Iterator for NonceGenerator {
    type Item = NonZeroScalar;

    fn next(&mut self) -> Option<NonZeroScalar> {
        while self.remaining > 0 {
            self.remaining -= 1;

            if let Ok(nonce) = NonZeroScalar::new(self.curve, self.next_output()) {
                return Some(nonce);
            }
        }

        None
    }
}

impl Drop for NonceGenerator {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

/// Compute HMAC-SHA256 of the concatenation of `parts` under `key`.
fn hmac(key: &[u8; HASH_SIZE], parts: &[&[u8]]) -> [u8; HASH_SIZE] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");

    for part in parts {
        mac.update(part);
    }

    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::{NonceGenerator, derive_nonce};
    use crate::{Curve, NonZeroScalar};
    use bigint::U256;
    use hex_literal::hex;
    use sha2::{Digest, Sha256};

    /// RFC 6979 appendix A.2.5 (P-256)
    const P256_SECRET: [u8; 32] =
        hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721");

    fn p256_secret() -> NonZeroScalar {
        NonZeroScalar::from_bytes(Curve::Secp256r1, &P256_SECRET).unwrap()
    }

    #[test]
    fn p256_sample() {
        let digest = Sha256::digest(b"sample");
        let k = derive_nonce(&p256_secret(), &digest).next().unwrap();
        assert_eq!(
            *k.to_bytes(),
            hex!("A6E3C57DD01ABE90086538398355DD4C3B17AA873382B0F24D6129493D8AAD60")
        );
    }

    #[test]
    fn p256_test() {
        let digest = Sha256::digest(b"test");
        let k = derive_nonce(&p256_secret(), &digest).next().unwrap();
        assert_eq!(
            *k.to_bytes(),
            hex!("D16B6AE827F17175E040871A1C7EC3500192C4C92677336EC2537ACAEE0008E0")
        );
    }

    #[test]
    fn second_candidate() {
        // K/V update after a rejected candidate (RFC 6979 §3.2 step h.3)
        let digest = Sha256::digest(b"sample");
        let mut nonces = derive_nonce(&p256_secret(), &digest);
        let first = nonces.next().unwrap();
        let second = nonces.next().unwrap();
        assert_ne!(first, second);
        assert_eq!(
            *second.to_bytes(),
            hex!("8E83DC490BC5FC4D5992BD63CD87F254ADFFCB930F8A8011702A88870F638FDB")
        );
    }

    #[test]
    fn secp256k1_satoshi() {
        let x = NonZeroScalar::new(Curve::Secp256k1, U256::ONE).unwrap();
        let digest = Sha256::digest(b"Satoshi Nakamoto");
        let k = derive_nonce(&x, &digest).next().unwrap();
        assert_eq!(
            *k.to_bytes(),
            hex!("8F8A276C19F4149656B280621E358CCE24F5F52542772691EE69063B74F15D15")
        );
    }

    #[test]
    fn deterministic() {
        let digest = Sha256::digest("Bu gizli bir test mesajıdır.".as_bytes());
        let a = derive_nonce(&p256_secret(), &digest).next();
        let b = derive_nonce(&p256_secret(), &digest).next();
        assert_eq!(a, b);

        let other = Sha256::digest("Bu mesaj değiştirildi.".as_bytes());
        assert_ne!(a, derive_nonce(&p256_secret(), &other).next());
    }

    #[test]
    fn bounded() {
        let digest = Sha256::digest(b"sample");
        assert_eq!(NonceGenerator::new(&p256_secret(), &digest, 0).count(), 0);
        assert_eq!(NonceGenerator::new(&p256_secret(), &digest, 3).count(), 3);
    }
}
