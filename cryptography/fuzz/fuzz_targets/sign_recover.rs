#![no_main]

use arbitrary::Arbitrary;
use eosio_cryptography::{KeyType, PrivateKey};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    r1: bool,
    scalar: [u8; 32],
    message: Vec<u8>,
}

fn fuzz(input: FuzzInput) {
    let key_type = if input.r1 { KeyType::R1 } else { KeyType::K1 };
    let Ok(private_key) = PrivateKey::from_scalar(&input.scalar, key_type) else {
        return;
    };
    if !private_key.is_valid() {
        return;
    }
    let public_key = private_key.public_key().unwrap();
    let signature = private_key.sign(&input.message).unwrap();
    if key_type == KeyType::K1 {
        assert!(signature.to_parts().unwrap().is_canonical());
    }
    assert!(signature.verify(&input.message, &public_key));
    assert_eq!(signature.recover(&input.message).unwrap(), public_key);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
