//! Base-58 numbers (Bitcoin alphabet).

use crate::Error;

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Maps an ASCII byte to its base-58 digit (or `-1` if it is not in the alphabet).
const DIGITS: [i8; 256] = {
    let mut digits = [-1i8; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        digits[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    digits
};

fn digit(c: u8) -> Result<u16, Error> {
    match DIGITS[c as usize] {
        d if d < 0 => Err(Error::InvalidBase58Value),
        d => Ok(d as u16),
    }
}

/// Converts the unsigned base-58 number in `s` to a big-endian bignum.
///
/// If `size` is non-zero, the result is exactly `size` bytes (zero-padded on the left) and a
/// number that does not fit is rejected. If `size` is zero, the result is as short as possible
/// while preserving one leading zero byte for every leading `'1'` in `s`.
pub fn base58_to_binary(size: usize, s: &str) -> Result<Vec<u8>, Error> {
    if size == 0 {
        return base58_to_binary_var_size(s);
    }
    let mut result = vec![0u8; size];
    for c in s.bytes() {
        let mut carry = digit(c)?;
        for byte in result.iter_mut() {
            let x = *byte as u16 * 58 + carry;
            *byte = x as u8;
            carry = x >> 8;
        }
        if carry != 0 {
            return Err(Error::Base58ValueOutOfRange);
        }
    }
    result.reverse();
    Ok(result)
}

fn base58_to_binary_var_size(s: &str) -> Result<Vec<u8>, Error> {
    let mut result = Vec::new();
    for c in s.bytes() {
        let mut carry = digit(c)?;
        for byte in result.iter_mut() {
            let x = *byte as u16 * 58 + carry;
            *byte = x as u8;
            carry = x >> 8;
        }
        if carry != 0 {
            result.push(carry as u8);
        }
    }
    let zeros = s.bytes().take_while(|&c| c == b'1').count();
    result.extend(std::iter::repeat(0).take(zeros));
    result.reverse();
    Ok(result)
}

/// Converts the big-endian `bignum` to a base-58 number.
///
/// Every leading zero byte is encoded as a leading `'1'`.
pub fn binary_to_base58(bignum: &[u8]) -> String {
    let mut result: Vec<u8> = Vec::new();
    for &byte in bignum {
        let mut carry = byte as u32;
        for digit in result.iter_mut() {
            let x = ((*digit as u32) << 8) + carry;
            *digit = (x % 58) as u8;
            carry = x / 58;
        }
        while carry != 0 {
            result.push((carry % 58) as u8);
            carry /= 58;
        }
    }
    let zeros = bignum.iter().take_while(|&&byte| byte == 0).count();
    result.extend(std::iter::repeat(0).take(zeros));
    result
        .iter()
        .rev()
        .map(|&digit| ALPHABET[digit as usize] as char)
        .collect()
}
