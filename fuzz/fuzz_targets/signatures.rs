#![no_main]
use ecc::{Curve, SecretKey, ecdsa, ecdsa::Signature};
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};

fuzz_target!(|input: ([u8; 32], Vec<u8>)| {
    let (seed, message) = input;
    for curve in Curve::ALL {
        let mut rng = ChaChaRng::from_seed(seed);
        let secret_key = SecretKey::random(curve, &mut rng).unwrap();
        let public_key = secret_key.public_key();

        let signature = ecdsa::sign(&secret_key, &message).unwrap();
        assert_eq!(ecdsa::sign(&secret_key, &message), Ok(signature));
        assert_eq!(ecdsa::verify(&public_key, &message, &signature), Ok(true));

        let swapped = Signature::from_scalars(*signature.s(), *signature.r());
        if swapped != signature {
            assert_eq!(ecdsa::verify(&public_key, &message, &swapped), Ok(false));
        }
    }
});
