//! An in-process [Platform] backed by [p256].
//!
//! Mirrors the behavior of WebCrypto ECDSA P-256 keys: handles carry their usages and
//! extractability, exported keys use the standard PKCS#8/SPKI layouts, and signatures are raw
//! `r || s` over the SHA-256 digest of the data.

use super::{Algorithm, Handle, KeyFormat, KeyKind, KeyPair, KeyUsage, Platform, ECDSA_P256};
use crate::{
    curve::DIGEST_LENGTH,
    hash::{Hasher, Sha256},
    Error,
};
use p256::{
    ecdsa::{
        signature::{Signer, Verifier},
        SigningKey, VerifyingKey,
    },
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey},
};
use rand::rngs::OsRng;
use std::fmt::{Debug, Formatter};

/// Software implementation of [Platform].
#[derive(Clone, Copy, Debug, Default)]
pub struct Software;

#[derive(Clone)]
enum Material {
    Private(p256::SecretKey),
    Public(p256::PublicKey),
}

/// A key held by [Software].
#[derive(Clone)]
pub struct SoftwareKey {
    extractable: bool,
    usages: Vec<KeyUsage>,
    material: Material,
}

impl Handle for SoftwareKey {
    fn kind(&self) -> KeyKind {
        match self.material {
            Material::Private(_) => KeyKind::Private,
            Material::Public(_) => KeyKind::Public,
        }
    }

    fn extractable(&self) -> bool {
        self.extractable
    }

    fn usages(&self) -> &[KeyUsage] {
        &self.usages
    }

    fn algorithm(&self) -> Algorithm {
        ECDSA_P256
    }
}

impl Debug for SoftwareKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareKey")
            .field("kind", &self.kind())
            .field("extractable", &self.extractable)
            .field("usages", &self.usages)
            .finish_non_exhaustive()
    }
}

fn check_algorithm(algorithm: Algorithm) -> Result<(), Error> {
    if algorithm != ECDSA_P256 {
        return Err(Error::Platform(format!(
            "unsupported algorithm: {}/{}",
            algorithm.name, algorithm.named_curve
        )));
    }
    Ok(())
}

/// Keeps the usages valid for `kind`, failing if a usage is not.
fn check_usages(kind: KeyKind, usages: &[KeyUsage]) -> Result<Vec<KeyUsage>, Error> {
    let allowed = match kind {
        KeyKind::Private => KeyUsage::Sign,
        KeyKind::Public => KeyUsage::Verify,
    };
    if let Some(usage) = usages.iter().find(|&&usage| usage != allowed) {
        return Err(Error::Platform(format!(
            "usage {usage:?} not allowed for {kind:?} key"
        )));
    }
    Ok(usages.to_vec())
}

impl Platform for Software {
    type Key = SoftwareKey;

    fn generate_key(
        &self,
        algorithm: Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<KeyPair<Self::Key>, Error> {
        check_algorithm(algorithm)?;
        let private_usages: Vec<_> = usages
            .iter()
            .copied()
            .filter(|&usage| usage == KeyUsage::Sign)
            .collect();
        if private_usages.is_empty() {
            return Err(Error::Platform("private key requires a usage".into()));
        }
        let public_usages = usages
            .iter()
            .copied()
            .filter(|&usage| usage == KeyUsage::Verify)
            .collect();

        let secret = p256::SecretKey::random(&mut OsRng);
        let public = secret.public_key();
        Ok(KeyPair {
            private_key: SoftwareKey {
                extractable,
                usages: private_usages,
                material: Material::Private(secret),
            },
            public_key: SoftwareKey {
                extractable: true,
                usages: public_usages,
                material: Material::Public(public),
            },
        })
    }

    fn export_key(&self, format: KeyFormat, key: &Self::Key) -> Result<Vec<u8>, Error> {
        if !key.extractable {
            return Err(Error::KeyUnextractable);
        }
        match (format, &key.material) {
            (KeyFormat::Pkcs8, Material::Private(secret)) => secret
                .to_pkcs8_der()
                .map(|der| der.as_bytes().to_vec())
                .map_err(|err| Error::Platform(err.to_string())),
            (KeyFormat::Spki, Material::Public(public)) => public
                .to_public_key_der()
                .map(|der| der.as_bytes().to_vec())
                .map_err(|err| Error::Platform(err.to_string())),
            (format, _) => Err(Error::Platform(format!(
                "cannot export {:?} key as {format:?}",
                key.kind()
            ))),
        }
    }

    fn import_key(
        &self,
        format: KeyFormat,
        der: &[u8],
        algorithm: Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<Self::Key, Error> {
        check_algorithm(algorithm)?;
        let (material, kind) = match format {
            KeyFormat::Pkcs8 => (
                Material::Private(
                    p256::SecretKey::from_pkcs8_der(der)
                        .map_err(|err| Error::Platform(err.to_string()))?,
                ),
                KeyKind::Private,
            ),
            KeyFormat::Spki => (
                Material::Public(
                    p256::PublicKey::from_public_key_der(der)
                        .map_err(|err| Error::Platform(err.to_string()))?,
                ),
                KeyKind::Public,
            ),
        };
        Ok(SoftwareKey {
            extractable,
            usages: check_usages(kind, usages)?,
            material,
        })
    }

    fn sign(&self, key: &Self::Key, data: &[u8]) -> Result<Vec<u8>, Error> {
        let Material::Private(secret) = &key.material else {
            return Err(Error::Platform("cannot sign with a public key".into()));
        };
        if !key.usages.contains(&KeyUsage::Sign) {
            return Err(Error::Platform("key does not permit signing".into()));
        }
        let signer = SigningKey::from(secret);
        let signature: p256::ecdsa::Signature = signer.sign(data);
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(&self, key: &Self::Key, signature: &[u8], data: &[u8]) -> Result<bool, Error> {
        let Material::Public(public) = &key.material else {
            return Err(Error::Platform("cannot verify with a private key".into()));
        };
        if !key.usages.contains(&KeyUsage::Verify) {
            return Err(Error::Platform("key does not permit verification".into()));
        }
        let Ok(signature) = p256::ecdsa::Signature::from_slice(signature) else {
            return Ok(false);
        };
        let verifier = VerifyingKey::from(public);
        Ok(verifier.verify(data, &signature).is_ok())
    }

    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LENGTH] {
        Sha256::hash(data)
    }
}
