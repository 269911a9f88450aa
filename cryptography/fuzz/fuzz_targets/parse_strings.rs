#![no_main]

use arbitrary::Arbitrary;
use eosio_cryptography::{convert_legacy_public_key, PrivateKey, PublicKey, Signature};
use libfuzzer_sys::fuzz_target;

const PREFIXES: [&str; 9] = [
    "PUB_K1_", "PUB_R1_", "PUB_WA_", "PVT_K1_", "PVT_R1_", "SIG_K1_", "SIG_R1_", "SIG_WA_", "EOS",
];

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    prefix: u8,
    body: String,
}

fn fuzz(input: FuzzInput) {
    let body: String = input.body.chars().take(256).collect();
    let s = match PREFIXES.get(input.prefix as usize) {
        Some(prefix) => format!("{prefix}{body}"),
        None => body,
    };

    // Anything that parses must re-encode to a string that parses to the same value
    if let Ok(key) = PublicKey::from_string(&s) {
        assert_eq!(PublicKey::from_string(&key.to_string()).unwrap(), key);
        let converted = convert_legacy_public_key(&s).unwrap();
        assert_eq!(PublicKey::from_string(&converted).unwrap(), key);
    }
    if let Ok(key) = PrivateKey::from_string(&s) {
        assert_eq!(PrivateKey::from_string(&key.to_string()).unwrap(), key);
    }
    if let Ok(signature) = Signature::from_string(&s) {
        assert_eq!(Signature::from_string(&signature.to_string()).unwrap(), signature);
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
