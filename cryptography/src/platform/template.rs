//! Fixed DER templates for P-256 keys exchanged with a [super::Platform].
//!
//! Platforms emit exactly these layouts for P-256 keys, so keys are wrapped and unwrapped by
//! splicing hex at fixed offsets rather than by parsing ASN.1.

use crate::{
    curve::{PRIVATE_KEY_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH},
    Error,
};
use eosio_utils::{from_hex, hex};
use zeroize::Zeroizing;

/// PKCS#8 `PrivateKeyInfo` up to (and including) the `privateKey` octet string header.
pub const PKCS8_PREFIX: &str =
    "308187020100301306072a8648ce3d020106082a8648ce3d030107046d306b0201010420";

/// Bytes between the scalar and the public point in a PKCS#8 key.
pub const PKCS8_SEPARATOR: &str = "a144034200";

/// `SubjectPublicKeyInfo` up to (and including) the bit string header.
pub const SPKI_PREFIX: &str = "3059301306072a8648ce3d020106082a8648ce3d030107034200";

const SCALAR_HEX_LENGTH: usize = PRIVATE_KEY_LENGTH * 2;
const POINT_HEX_LENGTH: usize = UNCOMPRESSED_PUBLIC_KEY_LENGTH * 2;

/// Wraps a scalar and its uncompressed point as PKCS#8 DER.
pub fn wrap_private(
    scalar: &[u8; PRIVATE_KEY_LENGTH],
    point: &[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH],
) -> Result<Zeroizing<Vec<u8>>, Error> {
    let scalar = Zeroizing::new(hex(scalar));
    let der = Zeroizing::new(format!(
        "{PKCS8_PREFIX}{}{PKCS8_SEPARATOR}{}",
        scalar.as_str(),
        hex(point)
    ));
    from_hex(&der)
        .map(Zeroizing::new)
        .ok_or(Error::UnrecognizedPrivateKeyFormat)
}

/// Extracts the scalar from PKCS#8 DER produced by [wrap_private] (or a platform).
pub fn unwrap_private(der: &[u8]) -> Result<Zeroizing<Vec<u8>>, Error> {
    let der = Zeroizing::new(hex(der));
    let rest = der
        .strip_prefix(PKCS8_PREFIX)
        .ok_or(Error::UnrecognizedPrivateKeyFormat)?;
    let scalar = rest
        .get(..SCALAR_HEX_LENGTH)
        .ok_or(Error::UnrecognizedPrivateKeyFormat)?;
    if !rest[SCALAR_HEX_LENGTH..].starts_with(PKCS8_SEPARATOR) {
        return Err(Error::UnrecognizedPrivateKeyFormat);
    }
    from_hex(scalar)
        .map(Zeroizing::new)
        .ok_or(Error::UnrecognizedPrivateKeyFormat)
}

/// Wraps an uncompressed point as SPKI DER.
pub fn wrap_public(point: &[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH]) -> Result<Vec<u8>, Error> {
    from_hex(&format!("{SPKI_PREFIX}{}", hex(point))).ok_or(Error::UnrecognizedPublicKeyFormat)
}

/// Extracts the uncompressed point from SPKI DER produced by [wrap_public] (or a platform).
pub fn unwrap_public(der: &[u8]) -> Result<Vec<u8>, Error> {
    let der = hex(der);
    let point = der
        .strip_prefix(SPKI_PREFIX)
        .ok_or(Error::UnrecognizedPublicKeyFormat)?;
    if point.len() != POINT_HEX_LENGTH {
        return Err(Error::UnrecognizedPublicKeyFormat);
    }
    from_hex(point).ok_or(Error::UnrecognizedPublicKeyFormat)
}
