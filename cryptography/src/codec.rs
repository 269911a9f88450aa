//! Checksummed string encodings for keys and signatures.
//!
//! Modern strings look like `<PREFIX>_<TYPE>_<base58(data || checksum)>` where the
//! checksum is the first 4 bytes of `RIPEMD-160(data || TYPE)`. Two legacy forms exist
//! for K1 keys: `EOS<base58(data || RIPEMD-160(data)[..4])>` public keys and WIF private
//! keys (`base58(0x80 || data || SHA-256(SHA-256(0x80 || data))[..4])`).

use crate::{
    hash::{Hasher, Ripemd160, Sha256},
    key::{PRIVATE_KEY_DATA_LENGTH, PUBLIC_KEY_DATA_LENGTH, SIGNATURE_DATA_LENGTH},
    Error, Key, KeyType,
};
use eosio_utils::{base58_to_binary, binary_to_base58};
use tracing::debug;

/// Prefix of legacy K1 public keys.
pub const LEGACY_PUBLIC_PREFIX: &str = "EOS";

/// Leading byte of a legacy (WIF) private key.
const LEGACY_PRIVATE_VERSION: u8 = 0x80;

const CHECKSUM_LENGTH: usize = 4;

fn checksum(data: &[u8], suffix: &str) -> [u8; CHECKSUM_LENGTH] {
    let mut hasher = Ripemd160::default();
    hasher.update(data);
    hasher.update(suffix.as_bytes());
    let digest = hasher.finalize();
    let mut result = [0; CHECKSUM_LENGTH];
    result.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    result
}

/// Decodes `s` into a [Key] of `key_type`, verifying its checksum against `suffix`.
///
/// A `size` of 0 decodes a payload of any length. Otherwise the payload must be
/// exactly `size` bytes.
pub fn string_to_key(s: &str, key_type: KeyType, size: usize, suffix: &str) -> Result<Key, Error> {
    let whole = base58_to_binary(
        if size == 0 { 0 } else { size + CHECKSUM_LENGTH },
        s,
    )?;
    if whole.len() < CHECKSUM_LENGTH {
        return Err(Error::ChecksumMismatch);
    }
    let (data, check) = whole.split_at(whole.len() - CHECKSUM_LENGTH);
    if checksum(data, suffix) != check {
        return Err(Error::ChecksumMismatch);
    }
    Ok(Key::new(key_type, data.to_vec()))
}

/// Encodes `key` as `prefix` followed by the base-58 payload and its checksum over `suffix`.
pub fn key_to_string(key: &Key, suffix: &str, prefix: &str) -> String {
    let mut whole = Vec::with_capacity(key.data().len() + CHECKSUM_LENGTH);
    whole.extend_from_slice(key.data());
    whole.extend_from_slice(&checksum(key.data(), suffix));
    let mut result = String::from(prefix);
    result.push_str(&binary_to_base58(&whole));
    result
}

/// Parses a public key in modern (`PUB_<TYPE>_...`) or legacy (`EOS...`) form.
pub fn string_to_public_key(s: &str) -> Result<Key, Error> {
    if s.is_empty() {
        return Err(Error::ExpectedStringContainingPublicKey);
    }
    if let Some(body) = s.strip_prefix(LEGACY_PUBLIC_PREFIX) {
        return string_to_key(body, KeyType::K1, PUBLIC_KEY_DATA_LENGTH, "");
    }
    for key_type in KeyType::ALL {
        let layout = key_type.layout();
        if let Some(body) = s.strip_prefix(layout.public_prefix) {
            let size = if layout.fixed_length {
                PUBLIC_KEY_DATA_LENGTH
            } else {
                0
            };
            return string_to_key(body, key_type, size, layout.suffix);
        }
    }
    Err(Error::UnrecognizedPublicKeyFormat)
}

/// Encodes a public key in modern form.
pub fn public_key_to_string(key: &Key) -> Result<String, Error> {
    let layout = key.key_type().layout();
    if layout.fixed_length && key.data().len() != PUBLIC_KEY_DATA_LENGTH {
        return Err(Error::UnrecognizedPublicKeyFormat);
    }
    Ok(key_to_string(key, layout.suffix, layout.public_prefix))
}

/// Encodes a K1 public key in legacy `EOS...` form.
pub fn public_key_to_legacy_string(key: &Key) -> Result<String, Error> {
    if !key.key_type().layout().legacy {
        return Err(Error::KeyFormatNotSupportedInLegacyConversion);
    }
    if key.data().len() != PUBLIC_KEY_DATA_LENGTH {
        return Err(Error::UnrecognizedPublicKeyFormat);
    }
    Ok(key_to_string(key, "", LEGACY_PUBLIC_PREFIX))
}

/// Parses a private key in modern (`PVT_<TYPE>_...`) or legacy WIF form.
///
/// The checksum of a legacy key is not verified.
pub fn string_to_private_key(s: &str) -> Result<Key, Error> {
    if s.is_empty() {
        return Err(Error::ExpectedStringContainingPrivateKey);
    }
    for key_type in KeyType::ALL {
        let layout = key_type.layout();
        let Some(prefix) = layout.private_prefix else {
            continue;
        };
        if let Some(body) = s.strip_prefix(prefix) {
            return string_to_key(body, key_type, PRIVATE_KEY_DATA_LENGTH, layout.suffix);
        }
    }

    let whole = base58_to_binary(PRIVATE_KEY_DATA_LENGTH + 1 + CHECKSUM_LENGTH, s)?;
    if whole[0] != LEGACY_PRIVATE_VERSION {
        return Err(Error::UnrecognizedPrivateKeyType);
    }
    debug!("decoded legacy private key without checksum verification");
    Ok(Key::new(
        KeyType::K1,
        whole[1..=PRIVATE_KEY_DATA_LENGTH].to_vec(),
    ))
}

/// Encodes a private key in modern form.
pub fn private_key_to_string(key: &Key) -> Result<String, Error> {
    let layout = key.key_type().layout();
    let Some(prefix) = layout.private_prefix else {
        return Err(Error::UnrecognizedPrivateKeyFormat);
    };
    if key.data().len() != PRIVATE_KEY_DATA_LENGTH {
        return Err(Error::UnrecognizedPrivateKeyFormat);
    }
    Ok(key_to_string(key, layout.suffix, prefix))
}

/// Encodes a K1 private key in legacy WIF form.
pub fn private_key_to_legacy_string(key: &Key) -> Result<String, Error> {
    if !key.key_type().layout().legacy {
        return Err(Error::KeyFormatNotSupportedInLegacyConversion);
    }
    if key.data().len() != PRIVATE_KEY_DATA_LENGTH {
        return Err(Error::UnrecognizedPrivateKeyFormat);
    }
    let mut whole = Vec::with_capacity(1 + PRIVATE_KEY_DATA_LENGTH + CHECKSUM_LENGTH);
    whole.push(LEGACY_PRIVATE_VERSION);
    whole.extend_from_slice(key.data());
    let digest = Sha256::hash(&Sha256::hash(&whole));
    whole.extend_from_slice(&digest[..CHECKSUM_LENGTH]);
    Ok(binary_to_base58(&whole))
}

/// Parses a signature (`SIG_<TYPE>_...`).
pub fn string_to_signature(s: &str) -> Result<Key, Error> {
    if s.is_empty() {
        return Err(Error::ExpectedStringContainingSignature);
    }
    for key_type in KeyType::ALL {
        let layout = key_type.layout();
        if let Some(body) = s.strip_prefix(layout.signature_prefix) {
            let size = if layout.fixed_length {
                SIGNATURE_DATA_LENGTH
            } else {
                0
            };
            return string_to_key(body, key_type, size, layout.suffix);
        }
    }
    Err(Error::UnrecognizedSignatureFormat)
}

/// Encodes a signature.
pub fn signature_to_string(signature: &Key) -> Result<String, Error> {
    let layout = signature.key_type().layout();
    if layout.fixed_length && signature.data().len() != SIGNATURE_DATA_LENGTH {
        return Err(Error::UnrecognizedSignatureFormat);
    }
    Ok(key_to_string(
        signature,
        layout.suffix,
        layout.signature_prefix,
    ))
}

/// Rewrites a legacy `EOS...` public key in modern form, leaving any other string untouched.
pub fn convert_legacy_public_key(s: &str) -> Result<String, Error> {
    if s.starts_with(LEGACY_PUBLIC_PREFIX) {
        return public_key_to_string(&string_to_public_key(s)?);
    }
    Ok(s.to_string())
}

/// Applies [convert_legacy_public_key] to every key in `keys`.
pub fn convert_legacy_public_keys<I, S>(keys: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .map(|key| convert_legacy_public_key(key.as_ref()))
        .collect()
}
