//! Base-64 numbers (standard alphabet).

use crate::Error;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Maps an ASCII byte to its base-64 digit (or `-1` if it is not in the alphabet).
///
/// Padding decodes as zero.
const DIGITS: [i8; 256] = {
    let mut digits = [-1i8; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        digits[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    digits[b'=' as usize] = 0;
    digits
};

fn digit(c: u8) -> Result<u8, Error> {
    match DIGITS[c as usize] {
        d if d < 0 => Err(Error::InvalidBase64Value),
        d => Ok(d as u8),
    }
}

/// Converts the base-64 value in `s` to bytes.
///
/// A single surplus `=` (as appended by some serializers) is tolerated.
pub fn base64_to_binary(s: &str) -> Result<Vec<u8>, Error> {
    let s = s.as_bytes();
    let mut len = s.len();
    if len & 3 == 1 && s[len - 1] == b'=' {
        len -= 1;
    }
    if len & 3 != 0 {
        return Err(Error::Base64NotPaddedCorrectly);
    }
    let groups = len >> 2;
    let mut bytes = groups * 3;
    if len > 0 && s[len - 1] == b'=' {
        if s[len - 2] == b'=' {
            bytes -= 2;
        } else {
            bytes -= 1;
        }
    }

    let mut result = Vec::with_capacity(bytes);
    for group in s[..len].chunks_exact(4) {
        let d0 = digit(group[0])?;
        let d1 = digit(group[1])?;
        let d2 = digit(group[2])?;
        let d3 = digit(group[3])?;
        for byte in [
            (d0 << 2) | (d1 >> 4),
            ((d1 & 15) << 4) | (d2 >> 2),
            ((d2 & 3) << 6) | d3,
        ] {
            if result.len() < bytes {
                result.push(byte);
            }
        }
    }
    Ok(result)
}
