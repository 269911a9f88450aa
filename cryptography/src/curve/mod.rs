//! Elliptic curve arithmetic behind K1 and R1 keys.
//!
//! Every [Curve] signs prehashed 32-byte digests with deterministic nonces
//! ([RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979)), normalizes `s` into the lower
//! half of the curve order (flipping the recovery id to match), and recovers compressed public
//! keys from signatures.

use crate::{
    hash::{Hasher, Sha256, SHA256_LENGTH},
    Error, KeyType,
};
use std::{fmt::Debug, sync::Arc};

mod secp256k1;
pub use secp256k1::Secp256k1;
mod secp256r1;
pub use secp256r1::Secp256r1;

/// Length of a scalar.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of a compressed point (`0x02`/`0x03` || X).
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Length of an uncompressed point (`0x04` || X || Y).
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Length of a digest accepted by [Curve::sign].
pub const DIGEST_LENGTH: usize = SHA256_LENGTH;

/// Length of a signature component.
pub const SCALAR_LENGTH: usize = 32;

/// A signature split into its components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSignature {
    pub r: [u8; SCALAR_LENGTH],
    pub s: [u8; SCALAR_LENGTH],
    /// Recovery id in `0..=3`.
    pub recovery_id: u8,
}

impl RawSignature {
    /// Returns true if neither `r` nor `s` has its top bit set or an unnecessary leading
    /// zero byte (the encoding the K1 signing loop searches for).
    pub fn is_canonical(&self) -> bool {
        fn canonical(component: &[u8; SCALAR_LENGTH]) -> bool {
            component[0] & 0x80 == 0 && !(component[0] == 0 && component[1] & 0x80 == 0)
        }
        canonical(&self.r) && canonical(&self.s)
    }
}

/// Interface to the elliptic curve operations used by keys and signatures.
pub trait Curve: Debug + Send + Sync {
    /// Name of the curve.
    fn name(&self) -> &'static str;

    /// Digest a message before signing or recovery.
    fn hash(&self, message: &[u8]) -> [u8; DIGEST_LENGTH] {
        Sha256::hash(message)
    }

    /// Derive the compressed public point of `scalar`.
    fn public_point(&self, scalar: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH], Error>;

    /// Re-encode a (compressed or uncompressed) point in compressed form.
    fn compress(&self, point: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH], Error>;

    /// Re-encode a (compressed or uncompressed) point in uncompressed form.
    fn decompress(&self, point: &[u8]) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH], Error>;

    /// Sign `digest` with a deterministic nonce derived from `scalar`, `digest`, and
    /// `nonce_data`, returning a low-`s` signature.
    fn sign(
        &self,
        scalar: &[u8],
        digest: &[u8; DIGEST_LENGTH],
        nonce_data: &[u8],
    ) -> Result<RawSignature, Error>;

    /// Recover the compressed public point that produced `signature` over `digest`.
    fn recover(
        &self,
        digest: &[u8; DIGEST_LENGTH],
        signature: &RawSignature,
    ) -> Result<[u8; PUBLIC_KEY_LENGTH], Error>;

    /// Check `signature` over `digest` against the (compressed or uncompressed) `point`.
    fn verify(&self, digest: &[u8; DIGEST_LENGTH], signature: &RawSignature, point: &[u8])
        -> bool;

    /// Returns true if `scalar` is a valid secret (32 bytes, non-zero, below the order).
    fn validate_private(&self, scalar: &[u8]) -> bool;

    /// Returns true if `point` encodes a point on the curve.
    fn validate_public(&self, point: &[u8]) -> bool;
}

/// Returns the curve keys of `key_type` live on.
pub fn for_key_type(key_type: KeyType) -> Arc<dyn Curve> {
    if key_type.is_p256() {
        Arc::new(Secp256r1)
    } else {
        Arc::new(Secp256k1)
    }
}

/// Implements [Curve] for `$name` with the RustCrypto crate `$lib`.
macro_rules! impl_curve {
    ($name:ident, $lib:ident, $label:literal) => {
        impl $name {
            fn secret_key(scalar: &[u8]) -> Result<$lib::SecretKey, $crate::Error> {
                if scalar.len() != $crate::curve::PRIVATE_KEY_LENGTH {
                    return Err($crate::Error::InvalidPrivateKey);
                }
                $lib::SecretKey::from_slice(scalar).map_err(|_| $crate::Error::InvalidPrivateKey)
            }

            fn point(point: &[u8]) -> Result<$lib::PublicKey, $crate::Error> {
                $lib::PublicKey::from_sec1_bytes(point).map_err(|_| $crate::Error::InvalidPublicKey)
            }

            fn encode<const N: usize>(point: &$lib::EncodedPoint) -> Result<[u8; N], $crate::Error> {
                point
                    .as_bytes()
                    .try_into()
                    .map_err(|_| $crate::Error::InvalidPublicKey)
            }

            fn signature(
                signature: &$crate::curve::RawSignature,
            ) -> Result<$lib::ecdsa::Signature, $crate::Error> {
                $lib::ecdsa::Signature::from_scalars(
                    $lib::FieldBytes::from(signature.r),
                    $lib::FieldBytes::from(signature.s),
                )
                .map_err(|_| $crate::Error::InvalidSignature)
            }
        }

        impl $crate::curve::Curve for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn public_point(
                &self,
                scalar: &[u8],
            ) -> Result<[u8; $crate::curve::PUBLIC_KEY_LENGTH], $crate::Error> {
                use $lib::elliptic_curve::sec1::ToEncodedPoint;
                let secret = Self::secret_key(scalar)?;
                Self::encode(&secret.public_key().to_encoded_point(true))
            }

            fn compress(
                &self,
                point: &[u8],
            ) -> Result<[u8; $crate::curve::PUBLIC_KEY_LENGTH], $crate::Error> {
                use $lib::elliptic_curve::sec1::ToEncodedPoint;
                Self::encode(&Self::point(point)?.to_encoded_point(true))
            }

            fn decompress(
                &self,
                point: &[u8],
            ) -> Result<[u8; $crate::curve::UNCOMPRESSED_PUBLIC_KEY_LENGTH], $crate::Error> {
                use $lib::elliptic_curve::sec1::ToEncodedPoint;
                Self::encode(&Self::point(point)?.to_encoded_point(false))
            }

            fn sign(
                &self,
                scalar: &[u8],
                digest: &[u8; $crate::curve::DIGEST_LENGTH],
                nonce_data: &[u8],
            ) -> Result<$crate::curve::RawSignature, $crate::Error> {
                use ecdsa::hazmat::SignPrimitive;
                let secret = Self::secret_key(scalar)?;
                let secret: $lib::Scalar = *secret.to_nonzero_scalar();
                let z = $lib::FieldBytes::from(*digest);
                let (signature, recovery_id) = secret
                    .try_sign_prehashed_rfc6979::<sha2::Sha256>(&z, nonce_data)
                    .map_err(|_| $crate::Error::InvalidSignature)?;
                let recovery_id = recovery_id.ok_or($crate::Error::InvalidSignature)?;

                // Negating `s` mirrors the nonce point, flipping its y-parity
                let (signature, recovery_id) = match signature.normalize_s() {
                    Some(normalized) => (
                        normalized,
                        ecdsa::RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
                    ),
                    None => (signature, recovery_id),
                };
                let (r, s) = signature.split_bytes();
                let mut raw = $crate::curve::RawSignature {
                    r: [0; $crate::curve::SCALAR_LENGTH],
                    s: [0; $crate::curve::SCALAR_LENGTH],
                    recovery_id: recovery_id.to_byte(),
                };
                raw.r.copy_from_slice(&r);
                raw.s.copy_from_slice(&s);
                Ok(raw)
            }

            fn recover(
                &self,
                digest: &[u8; $crate::curve::DIGEST_LENGTH],
                signature: &$crate::curve::RawSignature,
            ) -> Result<[u8; $crate::curve::PUBLIC_KEY_LENGTH], $crate::Error> {
                let recovery_id = ecdsa::RecoveryId::from_byte(signature.recovery_id)
                    .ok_or($crate::Error::InvalidSignature)?;
                let signature = Self::signature(signature)?;
                let key = $lib::ecdsa::VerifyingKey::recover_from_prehash(
                    digest,
                    &signature,
                    recovery_id,
                )
                .map_err(|_| $crate::Error::InvalidSignature)?;
                Self::encode(&key.to_encoded_point(true))
            }

            fn verify(
                &self,
                digest: &[u8; $crate::curve::DIGEST_LENGTH],
                signature: &$crate::curve::RawSignature,
                point: &[u8],
            ) -> bool {
                use $lib::ecdsa::signature::hazmat::PrehashVerifier;
                let Ok(key) = $lib::ecdsa::VerifyingKey::from_sec1_bytes(point) else {
                    return false;
                };
                let Ok(signature) = Self::signature(signature) else {
                    return false;
                };
                key.verify_prehash(digest, &signature).is_ok()
            }

            fn validate_private(&self, scalar: &[u8]) -> bool {
                Self::secret_key(scalar).is_ok()
            }

            fn validate_public(&self, point: &[u8]) -> bool {
                Self::point(point).is_ok()
            }
        }
    };
}
pub(crate) use impl_curve;
