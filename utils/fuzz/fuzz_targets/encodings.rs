#![no_main]

use arbitrary::Arbitrary;
use eosio_utils::{
    base58_to_binary, base64_to_binary, binary_to_base58, binary_to_decimal, decimal_to_binary,
    signed_binary_to_decimal, signed_decimal_to_binary,
};
use libfuzzer_sys::fuzz_target;

const MAX_SIZE: usize = 128;

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Base58RoundTrip(Vec<u8>),
    Base58Decode(u8, String),
    Base64Decode(String),
    DecimalRoundTrip(Vec<u8>),
    SignedDecimalRoundTrip(Vec<u8>),
    DecimalDecode(u8, String),
}

fn truncate(s: String) -> String {
    s.chars().take(MAX_SIZE).collect()
}

fn fuzz(input: Vec<FuzzInput>) {
    for op in input {
        match op {
            FuzzInput::Base58RoundTrip(mut bytes) => {
                bytes.truncate(MAX_SIZE);
                let encoded = binary_to_base58(&bytes);
                assert_eq!(base58_to_binary(0, &encoded).unwrap(), bytes);
                if !bytes.is_empty() {
                    assert_eq!(base58_to_binary(bytes.len(), &encoded).unwrap(), bytes);
                }
            }

            FuzzInput::Base58Decode(size, s) => {
                let size = size as usize;
                if let Ok(decoded) = base58_to_binary(size, &truncate(s)) {
                    if size != 0 {
                        assert_eq!(decoded.len(), size);
                    }
                }
            }

            FuzzInput::Base64Decode(s) => {
                let s = truncate(s);
                if let Ok(decoded) = base64_to_binary(&s) {
                    assert!(decoded.len() <= s.len());
                }
            }

            FuzzInput::DecimalRoundTrip(mut bytes) => {
                bytes.truncate(MAX_SIZE);
                let decimal = binary_to_decimal(&bytes, 1);
                assert_eq!(decimal_to_binary(bytes.len(), &decimal).unwrap(), bytes);
            }

            FuzzInput::SignedDecimalRoundTrip(mut bytes) => {
                bytes.truncate(MAX_SIZE);
                if bytes.is_empty() {
                    continue;
                }
                let decimal = signed_binary_to_decimal(&bytes, 1);
                assert_eq!(signed_decimal_to_binary(bytes.len(), &decimal).unwrap(), bytes);
            }

            FuzzInput::DecimalDecode(size, s) => {
                let size = size as usize;
                if let Ok(decoded) = decimal_to_binary(size, &truncate(s)) {
                    assert_eq!(decoded.len(), size);
                }
            }
        }
    }
}

fuzz_target!(|input: Vec<FuzzInput>| {
    fuzz(input);
});
