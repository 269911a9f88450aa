//! Public keys.

use crate::{
    codec::{key_to_string, public_key_to_legacy_string, string_to_public_key},
    curve::{self, Curve, PUBLIC_KEY_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH},
    key::PUBLIC_KEY_DATA_LENGTH,
    Error, Key, KeyType,
};
use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};

/// A public key and the curve it lives on.
#[derive(Clone)]
pub struct PublicKey {
    key: Key,
    curve: Arc<dyn Curve>,
}

impl PublicKey {
    /// Wraps `key`, checking its payload length.
    pub fn from_key(key: Key) -> Result<Self, Error> {
        let curve = curve::for_key_type(key.key_type());
        Self::from_key_with_curve(key, curve)
    }

    /// Wraps `key` using `curve` for all arithmetic.
    pub fn from_key_with_curve(key: Key, curve: Arc<dyn Curve>) -> Result<Self, Error> {
        if key.key_type().layout().fixed_length && key.data().len() != PUBLIC_KEY_DATA_LENGTH {
            return Err(Error::UnrecognizedPublicKeyFormat);
        }
        Ok(Self { key, curve })
    }

    /// Parses a public key in modern or legacy string form.
    pub fn from_string(s: &str) -> Result<Self, Error> {
        Self::from_key(string_to_public_key(s)?)
    }

    /// Parses a public key in modern or legacy string form, using `curve` for all arithmetic.
    pub fn from_string_with_curve(s: &str, curve: Arc<dyn Curve>) -> Result<Self, Error> {
        Self::from_key_with_curve(string_to_public_key(s)?, curve)
    }

    /// Builds a public key of `key_type` from a compressed or uncompressed point.
    pub fn from_point(point: &[u8], key_type: KeyType) -> Result<Self, Error> {
        Self::from_point_with_curve(point, key_type, curve::for_key_type(key_type))
    }

    /// Builds a public key of `key_type` from a point on `curve`.
    pub fn from_point_with_curve(
        point: &[u8],
        key_type: KeyType,
        curve: Arc<dyn Curve>,
    ) -> Result<Self, Error> {
        let compressed = curve.compress(point)?;
        Ok(Self {
            key: Key::new(key_type, compressed.to_vec()),
            curve,
        })
    }

    /// The compressed point.
    pub fn to_point(&self) -> Result<[u8; PUBLIC_KEY_LENGTH], Error> {
        self.curve.compress(self.key.data())
    }

    /// The uncompressed point (`0x04 || X || Y`).
    pub fn to_uncompressed(&self) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH], Error> {
        self.curve.decompress(self.key.data())
    }

    /// Encodes the key in legacy `EOS...` form (K1 only).
    pub fn to_legacy_string(&self) -> Result<String, Error> {
        public_key_to_legacy_string(&self.key)
    }

    /// Returns true if the key encodes a point on its curve.
    pub fn is_valid(&self) -> bool {
        self.curve.validate_public(self.key.data())
    }

    /// The type this key was encoded with.
    pub fn key_type(&self) -> KeyType {
        self.key.key_type()
    }

    /// The tagged raw bytes (a compressed point, or opaque WA data).
    pub fn as_key(&self) -> &Key {
        &self.key
    }

    /// The curve used for validation and conversion.
    pub fn curve(&self) -> &Arc<dyn Curve> {
        &self.curve
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let layout = self.key.key_type().layout();
        f.write_str(&key_to_string(&self.key, layout.suffix, layout.public_prefix))
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
