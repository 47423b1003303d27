#![no_main]
use ecc::{AffinePoint, Curve, PublicKey, U256};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for curve in Curve::ALL {
        let params = curve.params();
        let Ok(public_key) = PublicKey::from_sec1_bytes(curve, data) else {
            continue;
        };
        let point = *public_key.point();
        assert!(params.is_on_curve(&point));

        // Encodings round trip
        for compress in [false, true] {
            let encoded = public_key.to_encoded_point(compress);
            assert_eq!(PublicKey::from_sec1_bytes(curve, encoded.as_bytes()), Ok(public_key));
        }

        // Group law
        let doubled = params.double(&point);
        assert_eq!(doubled, params.add(&point, &point));
        assert_eq!(params.add(&point, &params.negate(&point)), AffinePoint::IDENTITY);
        assert_eq!(params.mul(&U256::from_u8(2), &point), Ok(doubled));
    }
});
