//! Key generation and validation helpers.

use crate::{
    curve,
    platform::{KeyPair, KeyUsage, Platform, ECDSA_P256},
    Error, KeyGenOptions, KeyType, PrivateKey, PublicKey, MAX_KEY_GENERATION_ATTEMPTS,
};
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Generates a software key pair of `key_type`.
///
/// Fails with [Error::InsecureEnvironment] unless `options.secure_env` is set.
pub fn generate_key_pair<R: RngCore + CryptoRng>(
    rng: &mut R,
    key_type: KeyType,
    options: &KeyGenOptions,
) -> Result<(PrivateKey, PublicKey), Error> {
    if !options.secure_env {
        return Err(Error::InsecureEnvironment);
    }
    let curve = curve::for_key_type(key_type);
    let mut scalar = Zeroizing::new([0u8; curve::PRIVATE_KEY_LENGTH]);
    for attempt in 1..=MAX_KEY_GENERATION_ATTEMPTS {
        rng.fill_bytes(scalar.as_mut());
        if curve.validate_private(scalar.as_ref()) {
            let private_key =
                PrivateKey::from_scalar_with_curve(scalar.as_ref(), key_type, curve)?;
            let public_key = private_key.public_key()?;
            return Ok((private_key, public_key));
        }
        debug!(attempt, "rejected out-of-range scalar");
    }
    warn!(attempts = MAX_KEY_GENERATION_ATTEMPTS, "rng produced no valid scalar");
    Err(Error::KeyGenerationAttemptsExhausted(MAX_KEY_GENERATION_ATTEMPTS))
}

/// Generates an ECDSA P-256 key pair inside `platform`.
pub fn generate_platform_key_pair<P: Platform>(
    platform: &P,
    extractable: bool,
    usages: &[KeyUsage],
) -> Result<KeyPair<P::Key>, Error> {
    platform.generate_key(ECDSA_P256, extractable, usages)
}

/// Returns true if `s` parses as a public key that lies on its curve.
pub fn is_public_key_valid(s: &str) -> bool {
    PublicKey::from_string(s).is_ok_and(|key| key.is_valid())
}

/// Returns true if `s` parses as a private key with a valid scalar.
pub fn is_private_key_valid(s: &str) -> bool {
    PrivateKey::from_string(s).is_ok_and(|key| key.is_valid())
}

/// Returns the key type of a public key string (legacy keys are K1).
pub fn key_type_from_public_key_string(s: &str) -> Result<KeyType, Error> {
    Ok(PublicKey::from_string(s)?.key_type())
}

/// Returns the key type of a private key string (legacy keys are K1).
pub fn key_type_from_private_key_string(s: &str) -> Result<KeyType, Error> {
    Ok(PrivateKey::from_string(s)?.key_type())
}
