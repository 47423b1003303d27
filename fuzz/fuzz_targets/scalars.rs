#![no_main]
use ecc::{Curve, Field, U256};
use libfuzzer_sys::fuzz_target;

fn test_field(field: &Field, a: &U256, b: &U256, c: &U256) {
    // Associativity
    assert_eq!(field.add(a, &field.add(b, c)), field.add(&field.add(a, b), c));
    assert_eq!(field.mul(a, &field.mul(b, c)), field.mul(&field.mul(a, b), c));

    // Commutativity
    assert_eq!(field.add(a, b), field.add(b, a));
    assert_eq!(field.mul(a, b), field.mul(b, a));

    // Identity
    assert_eq!(field.add(a, &U256::ZERO), *a);
    assert_eq!(field.mul(a, &U256::ONE), *a);
    assert_eq!(field.sub(a, a), U256::ZERO);

    // Distributivity
    assert_eq!(
        field.mul(a, &field.add(b, c)),
        field.add(&field.mul(a, b), &field.mul(a, c))
    );

    assert_eq!(field.add(a, &field.negate(a)), U256::ZERO);
    assert_eq!(field.double(a), field.add(a, a));
    assert_eq!(field.square(a), field.mul(a, a));

    match field.invert(a) {
        Ok(inverse) => assert_eq!(field.mul(a, &inverse), U256::ONE),
        Err(_) => assert!(bool::from(field.is_zero(a))),
    }
}

fuzz_target!(|data: [[u8; 32]; 3]| {
    for curve in Curve::ALL {
        let params = curve.params();
        for field in [params.base_field(), params.scalar_field()] {
            let [a, b, c] = data.map(|bytes| field.reduce(&U256::from_be_slice(&bytes)));
            test_field(&field, &a, &b, &c);
        }
    }
});
