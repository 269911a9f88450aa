//! Fixed-size decimal bignums.
//!
//! A bignum is a little-endian byte buffer interpreted as an unsigned (or, for the
//! `signed_*` variants, two's-complement) integer.

use crate::Error;

/// Returns whether `bignum` is negative when interpreted as two's-complement.
///
/// An empty buffer is not negative.
pub fn is_negative(bignum: &[u8]) -> bool {
    bignum.last().is_some_and(|byte| byte & 0x80 != 0)
}

/// Negates `bignum` in place (two's-complement).
///
/// Empty buffers are left untouched and zero negates to zero.
pub fn negate(bignum: &mut [u8]) {
    let mut carry = 1u16;
    for byte in bignum.iter_mut() {
        let x = (!*byte as u16) + carry;
        *byte = x as u8;
        carry = x >> 8;
    }
}

/// Converts the unsigned decimal number in `s` to a bignum of `size` bytes.
pub fn decimal_to_binary(size: usize, s: &str) -> Result<Vec<u8>, Error> {
    let mut result = vec![0u8; size];
    for digit in s.bytes() {
        if !digit.is_ascii_digit() {
            return Err(Error::InvalidNumber);
        }
        let mut carry = (digit - b'0') as u16;
        for byte in result.iter_mut() {
            let x = *byte as u16 * 10 + carry;
            *byte = x as u8;
            carry = x >> 8;
        }
        if carry != 0 {
            return Err(Error::NumberOutOfRange);
        }
    }
    Ok(result)
}

/// Converts the signed decimal number in `s` to a bignum of `size` bytes.
///
/// Values whose sign does not fit in `size` bytes are rejected (including `-0`, which
/// negates to a non-negative zero).
pub fn signed_decimal_to_binary(size: usize, s: &str) -> Result<Vec<u8>, Error> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, s),
    };
    let mut result = decimal_to_binary(size, digits)?;
    if negative {
        negate(&mut result);
        if !is_negative(&result) {
            return Err(Error::NumberOutOfRange);
        }
    } else if is_negative(&result) {
        return Err(Error::NumberOutOfRange);
    }
    Ok(result)
}

/// Converts `bignum` to an unsigned decimal number, zero-padded to at least `min_digits`.
pub fn binary_to_decimal(bignum: &[u8], min_digits: usize) -> String {
    let mut result = vec![b'0'; min_digits];
    for &byte in bignum.iter().rev() {
        let mut carry = byte as u32;
        for digit in result.iter_mut() {
            let x = (((*digit - b'0') as u32) << 8) + carry;
            *digit = b'0' + (x % 10) as u8;
            carry = x / 10;
        }
        while carry != 0 {
            result.push(b'0' + (carry % 10) as u8);
            carry /= 10;
        }
    }
    result.reverse();
    // Only ASCII digits are ever pushed.
    result.into_iter().map(char::from).collect()
}

/// Converts `bignum` to a signed decimal number, zero-padded to at least `min_digits`.
pub fn signed_binary_to_decimal(bignum: &[u8], min_digits: usize) -> String {
    if is_negative(bignum) {
        let mut magnitude = bignum.to_vec();
        negate(&mut magnitude);
        return format!("-{}", binary_to_decimal(&magnitude, min_digits));
    }
    binary_to_decimal(bignum, min_digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_is_negative() {
        assert!(!is_negative(&[]));
        assert!(!is_negative(&[0xff, 0x7f]));
        assert!(is_negative(&[0x00, 0x80]));
    }

    #[test]
    fn test_negate_empty() {
        let mut bignum: [u8; 0] = [];
        negate(&mut bignum);
        assert!(bignum.is_empty());
    }

    #[test]
    fn test_negate_zero() {
        let mut bignum = [0u8];
        negate(&mut bignum);
        assert_eq!(bignum, [0]);
    }

    #[test]
    fn test_negate_twice() {
        let mut bignum = [0x39, 0x30, 0x00];
        negate(&mut bignum);
        assert_eq!(bignum, [0xc7, 0xcf, 0xff]);
        negate(&mut bignum);
        assert_eq!(bignum, [0x39, 0x30, 0x00]);
    }

    #[test_case(1, "2", &[2]; "size 1")]
    #[test_case(5, "2", &[2, 0, 0, 0, 0]; "size 5")]
    #[test_case(2, "12345", &[0x39, 0x30]; "two bytes")]
    #[test_case(1, "255", &[0xff]; "max single byte")]
    #[test_case(3, "", &[0, 0, 0]; "empty string")]
    fn test_decimal_to_binary(size: usize, s: &str, expected: &[u8]) {
        assert_eq!(decimal_to_binary(size, s).unwrap(), expected);
    }

    #[test_case(5, "A"; "letter")]
    #[test_case(5, "-2"; "sign")]
    #[test_case(5, "1 2"; "space")]
    fn test_decimal_to_binary_invalid(size: usize, s: &str) {
        assert_eq!(decimal_to_binary(size, s), Err(Error::InvalidNumber));
    }

    #[test]
    fn test_decimal_to_binary_out_of_range() {
        assert_eq!(decimal_to_binary(1, "256"), Err(Error::NumberOutOfRange));
        assert_eq!(decimal_to_binary(0, "1"), Err(Error::NumberOutOfRange));
    }

    #[test_case(1, "-2", &[254]; "size 1")]
    #[test_case(5, "-2", &[254, 255, 255, 255, 255]; "size 5")]
    #[test_case(1, "-128", &[0x80]; "min single byte")]
    #[test_case(1, "127", &[0x7f]; "max single byte")]
    fn test_signed_decimal_to_binary(size: usize, s: &str, expected: &[u8]) {
        assert_eq!(signed_decimal_to_binary(size, s).unwrap(), expected);
    }

    #[test]
    fn test_signed_decimal_to_binary_invalid() {
        assert_eq!(signed_decimal_to_binary(5, "A"), Err(Error::InvalidNumber));
        assert_eq!(signed_decimal_to_binary(5, "--2"), Err(Error::InvalidNumber));
    }

    #[test]
    fn test_signed_decimal_to_binary_out_of_range() {
        assert_eq!(
            signed_decimal_to_binary(1, "128"),
            Err(Error::NumberOutOfRange)
        );
        assert_eq!(
            signed_decimal_to_binary(1, "-129"),
            Err(Error::NumberOutOfRange)
        );
        assert_eq!(signed_decimal_to_binary(1, "-0"), Err(Error::NumberOutOfRange));
    }

    #[test]
    fn test_binary_to_decimal() {
        assert_eq!(binary_to_decimal(&[2], 1), "2");
        assert_eq!(binary_to_decimal(&[2, 0, 0, 0, 0], 1), "2");
        assert_eq!(binary_to_decimal(&[], 1), "0");
        assert_eq!(binary_to_decimal(&[7], 4), "0007");
        assert_eq!(binary_to_decimal(&[0xff; 8], 1), u64::MAX.to_string());
    }

    #[test]
    fn test_decimal_round_trip() {
        let bignum = decimal_to_binary(8, "12345").unwrap();
        assert_eq!(binary_to_decimal(&bignum, 1), "12345");

        let bignum = decimal_to_binary(16, "340282366920938463463374607431768211455").unwrap();
        assert_eq!(bignum, vec![0xff; 16]);
        assert_eq!(
            binary_to_decimal(&bignum, 1),
            "340282366920938463463374607431768211455"
        );
    }

    #[test]
    fn test_signed_binary_to_decimal() {
        assert_eq!(signed_binary_to_decimal(&[254, 255, 255, 255, 255], 1), "-2");
        assert_eq!(signed_binary_to_decimal(&[0x80], 1), "-128");
        assert_eq!(signed_binary_to_decimal(&[0x7f], 1), "127");
    }

    #[test]
    fn test_signed_round_trip() {
        for value in ["-2", "-1", "0", "1", "-32768", "32767", "-9000"] {
            let bignum = signed_decimal_to_binary(2, value).unwrap();
            assert_eq!(signed_binary_to_decimal(&bignum, 1), value);
        }
    }
}
