//! Private keys and signing.

use crate::{
    codec::{key_to_string, private_key_to_legacy_string, string_to_private_key},
    curve::{self, Curve, DIGEST_LENGTH, PRIVATE_KEY_LENGTH},
    key::PRIVATE_KEY_DATA_LENGTH,
    Config, Error, Key, KeyType, PublicKey, Signature,
};
use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
    sync::Arc,
};
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

/// A private key and the curve it lives on.
///
/// The scalar is zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey {
    key: Key,
    curve: Arc<dyn Curve>,
}

impl PrivateKey {
    /// Wraps `key`, checking its payload length.
    pub fn from_key(key: Key) -> Result<Self, Error> {
        let curve = curve::for_key_type(key.key_type());
        Self::from_key_with_curve(key, curve)
    }

    /// Wraps `key` using `curve` for all arithmetic.
    pub fn from_key_with_curve(key: Key, curve: Arc<dyn Curve>) -> Result<Self, Error> {
        if key.key_type().layout().private_prefix.is_none()
            || key.data().len() != PRIVATE_KEY_DATA_LENGTH
        {
            return Err(Error::UnrecognizedPrivateKeyFormat);
        }
        Ok(Self { key, curve })
    }

    /// Parses a private key in modern or legacy (WIF) string form.
    pub fn from_string(s: &str) -> Result<Self, Error> {
        Self::from_key(string_to_private_key(s)?)
    }

    /// Parses a private key in modern or legacy string form, using `curve` for all arithmetic.
    pub fn from_string_with_curve(s: &str, curve: Arc<dyn Curve>) -> Result<Self, Error> {
        Self::from_key_with_curve(string_to_private_key(s)?, curve)
    }

    /// Builds a private key of `key_type` from a 32-byte scalar.
    pub fn from_scalar(scalar: &[u8], key_type: KeyType) -> Result<Self, Error> {
        Self::from_scalar_with_curve(scalar, key_type, curve::for_key_type(key_type))
    }

    /// Builds a private key of `key_type` from a 32-byte scalar on `curve`.
    pub fn from_scalar_with_curve(
        scalar: &[u8],
        key_type: KeyType,
        curve: Arc<dyn Curve>,
    ) -> Result<Self, Error> {
        if scalar.len() != PRIVATE_KEY_LENGTH {
            return Err(Error::InvalidPrivateKey);
        }
        Self::from_key_with_curve(Key::new(key_type, scalar.to_vec()), curve)
    }

    /// The big-endian scalar.
    pub fn to_scalar(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        let mut scalar = Zeroizing::new([0; PRIVATE_KEY_LENGTH]);
        scalar.copy_from_slice(self.key.data());
        scalar
    }

    /// Encodes the key in legacy WIF form (K1 only).
    pub fn to_legacy_string(&self) -> Result<String, Error> {
        private_key_to_legacy_string(&self.key)
    }

    /// Derives the public key of the same type.
    pub fn public_key(&self) -> Result<PublicKey, Error> {
        let point = self.curve.public_point(self.key.data())?;
        PublicKey::from_key_with_curve(
            Key::new(self.key.key_type(), point.to_vec()),
            self.curve.clone(),
        )
    }

    /// Returns true if the scalar is a valid secret on its curve.
    pub fn is_valid(&self) -> bool {
        self.curve.validate_private(self.key.data())
    }

    /// The type this key was encoded with.
    pub fn key_type(&self) -> KeyType {
        self.key.key_type()
    }

    /// The tagged raw scalar.
    pub fn as_key(&self) -> &Key {
        &self.key
    }

    /// The curve used for signing.
    pub fn curve(&self) -> &Arc<dyn Curve> {
        &self.curve
    }

    /// Hashes `message` with SHA-256 and signs the digest.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, Error> {
        self.sign_with(&Config::default(), message)
    }

    /// Like [Self::sign], bounding the K1 canonical search by `config`.
    pub fn sign_with(&self, config: &Config, message: &[u8]) -> Result<Signature, Error> {
        let digest = self.curve.hash(message);
        self.sign_prehashed(config, &digest)
    }

    /// Signs a 32-byte `digest` as-is.
    pub fn sign_digest(&self, digest: &[u8]) -> Result<Signature, Error> {
        self.sign_digest_with(&Config::default(), digest)
    }

    /// Like [Self::sign_digest], bounding the K1 canonical search by `config`.
    pub fn sign_digest_with(&self, config: &Config, digest: &[u8]) -> Result<Signature, Error> {
        let digest: &[u8; DIGEST_LENGTH] = digest
            .try_into()
            .map_err(|_| Error::InvalidDigestLength(digest.len()))?;
        self.sign_prehashed(config, digest)
    }

    fn sign_prehashed(
        &self,
        config: &Config,
        digest: &[u8; DIGEST_LENGTH],
    ) -> Result<Signature, Error> {
        let key_type = self.key.key_type();
        if key_type != KeyType::K1 {
            let raw = self.curve.sign(self.key.data(), digest, &[])?;
            return Ok(Signature::from_parts_with_curve(
                &raw,
                key_type,
                self.curve.clone(),
            ));
        }

        // K1 signatures must be canonical, so retry with fresh nonce data until one is
        for attempt in 1..=config.max_signing_attempts {
            let raw = self.curve.sign(self.key.data(), digest, &[attempt])?;
            if raw.is_canonical() {
                if attempt > 1 {
                    debug!(attempt, "found canonical signature");
                }
                return Ok(Signature::from_parts_with_curve(
                    &raw,
                    key_type,
                    self.curve.clone(),
                ));
            }
            trace!(attempt, "discarding non-canonical signature");
        }
        warn!(
            attempts = config.max_signing_attempts,
            "failed to find canonical signature"
        );
        Err(Error::SigningAttemptsExhausted(config.max_signing_attempts))
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let layout = self.key.key_type().layout();
        let prefix = layout.private_prefix.unwrap_or_default();
        f.write_str(&key_to_string(&self.key, layout.suffix, prefix))
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey({}:REDACTED)", self.key.key_type())
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PrivateKey {}
