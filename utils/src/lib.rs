//! Convert between big numbers and their textual encodings.
//!
//! Numbers handled here are plain byte buffers. Decimal numbers are stored
//! least-significant byte first (so a fixed-size buffer can be sign-extended in place),
//! while base-58 and base-64 numbers are stored most-significant byte first (so leading
//! zero bytes survive the round trip).

use thiserror::Error;

pub mod base58;
pub use base58::{base58_to_binary, binary_to_base58};
pub mod base64;
pub use base64::base64_to_binary;
pub mod bignum;
pub use bignum::{
    binary_to_decimal, decimal_to_binary, is_negative, negate, signed_binary_to_decimal,
    signed_decimal_to_binary,
};

/// Errors that can occur when converting numbers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid number")]
    InvalidNumber,
    #[error("number is out of range")]
    NumberOutOfRange,
    #[error("invalid base-58 value")]
    InvalidBase58Value,
    #[error("base-58 value is out of range")]
    Base58ValueOutOfRange,
    #[error("invalid base-64 value")]
    InvalidBase64Value,
    #[error("base-64 value is not padded correctly")]
    Base64NotPaddedCorrectly,
}

/// Converts bytes to a hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes.iter() {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Converts a hexadecimal string to bytes.
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Converts a hexadecimal string to bytes, stripping whitespace and/or a `0x` prefix. Commonly used
/// in testing to encode external test vectors without modification.
pub fn from_hex_formatted(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.replace(['\t', '\n', '\r', ' '], "");
    let res = hex.strip_prefix("0x").unwrap_or(&hex);
    from_hex(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        // Test case 0: empty bytes
        let b = &[];
        let h = hex(b);
        assert_eq!(h, "");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 1: single byte
        let b = &[0x01];
        let h = hex(b);
        assert_eq!(h, "01");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 2: multiple bytes
        let b = &[0x01, 0x02, 0x03];
        let h = hex(b);
        assert_eq!(h, "010203");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 3: odd number of bytes
        let h = "0102030";
        assert!(from_hex(h).is_none());

        // Test case 4: invalid hexadecimal character
        let h = "01g3";
        assert!(from_hex(h).is_none());

        // Test case 5: multi-byte character
        let h = "0é";
        assert!(from_hex(h).is_none());
    }

    #[test]
    fn test_from_hex_formatted() {
        // Test case 0: whitespace and newlines
        let h = "
            01 02
            03
        ";
        assert_eq!(from_hex_formatted(h).unwrap(), vec![0x01, 0x02, 0x03]);

        // Test case 1: 0x prefix
        let h = "0x0a0b";
        assert_eq!(from_hex_formatted(h).unwrap(), vec![0x0a, 0x0b]);

        // Test case 2: invalid after stripping
        let h = "0x0g";
        assert!(from_hex_formatted(h).is_none());
    }
}
