//! Bridge R1 keys to and from a platform crypto provider (e.g. WebCrypto or an HSM).
//!
//! Keys cross the boundary as DER ([template]). Platform signatures are raw `r || s` without a
//! recovery id, so importing one searches all four recovery ids for the expected public key.

use crate::{
    curve::{self, RawSignature, DIGEST_LENGTH, SCALAR_LENGTH},
    Error, Key, KeyType, PrivateKey, PublicKey, Signature,
};
use tracing::{debug, trace};
use zeroize::Zeroizing;

pub mod software;
pub mod template;

/// Whether a [Handle] refers to the public or private half of a key pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Public,
    Private,
}

/// Operations a [Handle] may be used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyUsage {
    Sign,
    Verify,
}

/// Usages requested for generated key pairs unless specified otherwise.
pub const DEFAULT_KEY_USAGES: [KeyUsage; 2] = [KeyUsage::Sign, KeyUsage::Verify];

/// DER layouts used to move keys across the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyFormat {
    /// PKCS#8 `PrivateKeyInfo` (private keys).
    Pkcs8,
    /// `SubjectPublicKeyInfo` (public keys).
    Spki,
}

/// A platform key algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Algorithm {
    pub name: &'static str,
    pub named_curve: &'static str,
}

/// ECDSA over P-256, the only algorithm R1 keys map to.
pub const ECDSA_P256: Algorithm = Algorithm {
    name: "ECDSA",
    named_curve: "P-256",
};

/// An opaque key held by a [Platform].
pub trait Handle {
    fn kind(&self) -> KeyKind;
    fn extractable(&self) -> bool;
    fn usages(&self) -> &[KeyUsage];
    fn algorithm(&self) -> Algorithm;
}

/// A pair of platform key handles.
#[derive(Clone, Debug)]
pub struct KeyPair<K> {
    pub private_key: K,
    pub public_key: K,
}

/// A crypto provider that holds keys behind opaque handles.
pub trait Platform {
    type Key: Handle;

    /// Generate a fresh key pair.
    ///
    /// The public key is always extractable. Usages are split by kind (`Sign` on the private
    /// key, `Verify` on the public key).
    fn generate_key(
        &self,
        algorithm: Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<KeyPair<Self::Key>, Error>;

    /// Export `key` as DER. Fails if the key is not extractable.
    fn export_key(&self, format: KeyFormat, key: &Self::Key) -> Result<Vec<u8>, Error>;

    /// Import a DER encoded key.
    fn import_key(
        &self,
        format: KeyFormat,
        der: &[u8],
        algorithm: Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<Self::Key, Error>;

    /// Sign the SHA-256 digest of `data`, returning a raw 64-byte `r || s` signature.
    fn sign(&self, key: &Self::Key, data: &[u8]) -> Result<Vec<u8>, Error>;

    /// Verify a raw `r || s` signature over the SHA-256 digest of `data`.
    fn verify(&self, key: &Self::Key, signature: &[u8], data: &[u8]) -> Result<bool, Error>;

    /// SHA-256 digest of `data`.
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LENGTH];
}

fn require_r1(key_type: KeyType) -> Result<(), Error> {
    if key_type != KeyType::R1 {
        return Err(Error::UnsupportedKeyType(key_type));
    }
    Ok(())
}

impl PrivateKey {
    /// Imports this R1 key into `platform` as a signing key.
    pub fn to_platform<P: Platform>(&self, platform: &P, extractable: bool) -> Result<P::Key, Error> {
        require_r1(self.key_type())?;
        let point = self.public_key()?.to_uncompressed()?;
        let der = template::wrap_private(&self.to_scalar(), &point)?;
        debug!(extractable, "importing private key");
        platform.import_key(
            KeyFormat::Pkcs8,
            &der,
            ECDSA_P256,
            extractable,
            &[KeyUsage::Sign],
        )
    }

    /// Exports an extractable platform private key as an R1 key.
    pub fn from_platform<P: Platform>(platform: &P, key: &P::Key) -> Result<Self, Error> {
        if !key.extractable() {
            return Err(Error::KeyUnextractable);
        }
        let der = Zeroizing::new(platform.export_key(KeyFormat::Pkcs8, key)?);
        let scalar = template::unwrap_private(&der)?;
        Self::from_scalar(&scalar, KeyType::R1)
    }

    /// Signs `data` inside `platform` and attaches the recovery id.
    ///
    /// The key is imported as non-extractable for the duration of the call.
    pub fn platform_sign<P: Platform>(&self, platform: &P, data: &[u8]) -> Result<Signature, Error> {
        let public_key = self.public_key()?;
        let key = self.to_platform(platform, false)?;
        let signature = platform.sign(&key, data)?;
        Signature::from_platform(platform, data, &signature, &public_key)
    }
}

impl PublicKey {
    /// Imports this R1 key into `platform` as a verification key.
    pub fn to_platform<P: Platform>(&self, platform: &P, extractable: bool) -> Result<P::Key, Error> {
        require_r1(self.key_type())?;
        let der = template::wrap_public(&self.to_uncompressed()?)?;
        debug!(extractable, "importing public key");
        platform.import_key(
            KeyFormat::Spki,
            &der,
            ECDSA_P256,
            extractable,
            &[KeyUsage::Verify],
        )
    }

    /// Exports an extractable platform public key as an R1 key.
    pub fn from_platform<P: Platform>(platform: &P, key: &P::Key) -> Result<Self, Error> {
        if !key.extractable() {
            return Err(Error::KeyUnextractable);
        }
        let der = platform.export_key(KeyFormat::Spki, key)?;
        let point = template::unwrap_public(&der)?;
        Self::from_point(&point, KeyType::R1)
    }
}

impl Signature {
    /// Converts a raw 64-byte `r || s` platform signature over `data` into an R1 signature.
    ///
    /// `s` is normalized into the lower half of the order, then the recovery id that yields
    /// `public_key` is found by trial.
    pub fn from_platform<P: Platform>(
        platform: &P,
        data: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> Result<Self, Error> {
        let digest = platform.digest(data);
        let parsed =
            p256::ecdsa::Signature::from_slice(signature).map_err(|_| Error::InvalidSignature)?;
        let parsed = parsed.normalize_s().unwrap_or(parsed);
        let (r, s) = parsed.split_bytes();
        let mut raw = RawSignature {
            r: [0; SCALAR_LENGTH],
            s: [0; SCALAR_LENGTH],
            recovery_id: 0,
        };
        raw.r.copy_from_slice(&r);
        raw.s.copy_from_slice(&s);

        let curve = curve::for_key_type(KeyType::R1);
        for recovery_id in 0..4 {
            raw.recovery_id = recovery_id;
            let point = match curve.recover(&digest, &raw) {
                Ok(point) => point,
                Err(err) => {
                    trace!(recovery_id, ?err, "recovery failed");
                    continue;
                }
            };
            let candidate =
                PublicKey::from_key_with_curve(Key::new(KeyType::R1, point.to_vec()), curve.clone())?;
            if candidate.to_string() == public_key.to_string() {
                return Ok(Self::from_parts_with_curve(&raw, KeyType::R1, curve));
            }
        }
        Err(Error::InvalidRecoveryFactor)
    }

    /// Verifies a raw `r || s` platform signature over `data` inside `platform`.
    pub fn platform_verify<P: Platform>(
        platform: &P,
        data: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> Result<bool, Error> {
        let key = public_key.to_platform(platform, false)?;
        platform.verify(&key, signature, data)
    }
}

#[cfg(test)]
mod tests {
    use super::{software::Software, *};
    use eosio_utils::{from_hex_formatted, hex};

    const R1_PRIVATE: &str = "PVT_R1_ENSnpAGb4NHNA2chipxHQMVnAZdEAfRzHmJFEuxFkWvCXC5CG";
    const R1_PUBLIC: &str = "PUB_R1_8CHJquaQWe4Pkhp1fBR9deP5wkqfjuWdfhaKYDxGKCo7gQwU9C";
    const K1_PRIVATE: &str = "PVT_K1_2bfGi9rYsXQSXXTvJbDAPhHLQUojjaNLomdm3cEJ1XTzMqUt3V";
    const K1_PUBLIC: &str = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63";
    const PKCS8: &str = "
        308187020100301306072a8648ce3d020106082a8648ce3d030107046d306b0201010420
        1e5b8cf858526e0023b5650e3f1ec88bec545791407484bf509227110d84b820
        a14403420004b37ce9526ac8d79033ababf7a388f2231a113aebe836db8ba6374e86061cd3dd
        0d6e1fb01d089410d255ab7b5420ed1fadcafa473ebcd72230250339ea34ecfb";
    const SPKI: &str = "
        3059301306072a8648ce3d020106082a8648ce3d03010703420004b37ce9526ac8d79033ababf7a388f223
        1a113aebe836db8ba6374e86061cd3dd0d6e1fb01d089410d255ab7b5420ed1fadcafa473ebcd72230250339
        ea34ecfb";

    #[test]
    fn test_private_key_round_trip() {
        let platform = Software;
        let private_key = PrivateKey::from_string(R1_PRIVATE).unwrap();
        let handle = private_key.to_platform(&platform, true).unwrap();
        assert_eq!(handle.kind(), KeyKind::Private);
        assert_eq!(handle.usages(), &[KeyUsage::Sign]);
        assert_eq!(handle.algorithm(), ECDSA_P256);

        // The platform emits the same layout we import
        let der = platform.export_key(KeyFormat::Pkcs8, &handle).unwrap();
        assert_eq!(hex(&der), hex(&from_hex_formatted(PKCS8).unwrap()));

        let restored = PrivateKey::from_platform(&platform, &handle).unwrap();
        assert_eq!(restored.to_string(), R1_PRIVATE);
    }

    #[test]
    fn test_public_key_round_trip() {
        let platform = Software;
        let public_key = PublicKey::from_string(R1_PUBLIC).unwrap();
        let handle = public_key.to_platform(&platform, true).unwrap();
        assert_eq!(handle.kind(), KeyKind::Public);
        assert_eq!(handle.usages(), &[KeyUsage::Verify]);

        let der = platform.export_key(KeyFormat::Spki, &handle).unwrap();
        assert_eq!(der, from_hex_formatted(SPKI).unwrap());

        let restored = PublicKey::from_platform(&platform, &handle).unwrap();
        assert_eq!(restored.to_string(), R1_PUBLIC);
    }

    #[test]
    fn test_unextractable() {
        let platform = Software;
        let private_key = PrivateKey::from_string(R1_PRIVATE).unwrap();
        let handle = private_key.to_platform(&platform, false).unwrap();
        assert!(!handle.extractable());
        assert_eq!(
            PrivateKey::from_platform(&platform, &handle),
            Err(Error::KeyUnextractable)
        );

        let public_key = private_key.public_key().unwrap();
        let handle = public_key.to_platform(&platform, false).unwrap();
        assert_eq!(
            PublicKey::from_platform(&platform, &handle),
            Err(Error::KeyUnextractable)
        );
    }

    #[test]
    fn test_k1_unsupported() {
        let platform = Software;
        let private_key = PrivateKey::from_string(K1_PRIVATE).unwrap();
        assert_eq!(
            private_key.to_platform(&platform, true).unwrap_err(),
            Error::UnsupportedKeyType(KeyType::K1)
        );
        let public_key = PublicKey::from_string(K1_PUBLIC).unwrap();
        assert_eq!(
            public_key.to_platform(&platform, true).unwrap_err(),
            Error::UnsupportedKeyType(KeyType::K1)
        );
    }

    #[test]
    fn test_platform_sign() {
        let platform = Software;
        let private_key = PrivateKey::from_string(R1_PRIVATE).unwrap();
        let public_key = private_key.public_key().unwrap();
        let data = br#"{"message":"I am a test string"}"#;

        let signature = private_key.platform_sign(&platform, data).unwrap();
        assert_eq!(signature.key_type(), KeyType::R1);
        assert!(signature.verify(data, &public_key));
        assert_eq!(signature.recover(data).unwrap(), public_key);

        // Deterministic nonces make the platform agree with software signing
        assert_eq!(signature, private_key.sign(data).unwrap());
    }

    #[test]
    fn test_from_platform_normalizes_s() {
        let platform = Software;
        let private_key = PrivateKey::from_string(R1_PRIVATE).unwrap();
        let public_key = private_key.public_key().unwrap();
        let data = b"some string";

        // Produce a high-s encoding (n - s) of a valid signature
        let expected = private_key.sign(data).unwrap();
        let raw = expected.to_parts().unwrap();
        let order =
            from_hex_formatted("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
                .unwrap();
        let mut high_s = [0u8; 32];
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut diff = order[i] as i16 - raw.s[i] as i16 - borrow;
            borrow = 0;
            if diff < 0 {
                diff += 256;
                borrow = 1;
            }
            high_s[i] = diff as u8;
        }
        let mut high = raw.r.to_vec();
        high.extend_from_slice(&high_s);
        let parsed = p256::ecdsa::Signature::from_slice(&high).unwrap();
        assert!(parsed.normalize_s().is_some());

        let signature = Signature::from_platform(&platform, data, &high, &public_key).unwrap();
        assert_eq!(signature, expected);
    }

    #[test]
    fn test_from_platform_wrong_key() {
        let platform = Software;
        let private_key = PrivateKey::from_string(R1_PRIVATE).unwrap();
        let data = b"some string";
        let key = private_key.to_platform(&platform, false).unwrap();
        let raw = platform.sign(&key, data).unwrap();

        let other = PublicKey::from_string(K1_PUBLIC).unwrap();
        assert_eq!(
            Signature::from_platform(&platform, data, &raw, &other),
            Err(Error::InvalidRecoveryFactor)
        );
        assert_eq!(
            Signature::from_platform(&platform, data, &raw[..63], &other),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn test_platform_verify() {
        let platform = Software;
        let private_key = PrivateKey::from_string(R1_PRIVATE).unwrap();
        let public_key = private_key.public_key().unwrap();
        let data = b"some string";
        let key = private_key.to_platform(&platform, false).unwrap();
        let raw = platform.sign(&key, data).unwrap();

        assert!(Signature::platform_verify(&platform, data, &raw, &public_key).unwrap());
        assert!(!Signature::platform_verify(&platform, b"other", &raw, &public_key).unwrap());
    }
}
