//! Signatures, public key recovery, and verification.

use crate::{
    codec::{key_to_string, string_to_signature},
    curve::{self, Curve, RawSignature, DIGEST_LENGTH, SCALAR_LENGTH},
    key::SIGNATURE_DATA_LENGTH,
    Error, Key, KeyType, PublicKey,
};
use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};

/// Offset added to the recovery id of K1/R1 signatures (27 + 4 for a compressed key).
const RECOVERY_OFFSET: u8 = 27 + 4;

/// A signature and the curve it was produced on.
#[derive(Clone)]
pub struct Signature {
    key: Key,
    curve: Arc<dyn Curve>,
}

impl Signature {
    /// Wraps `key`, checking its payload length.
    pub fn from_key(key: Key) -> Result<Self, Error> {
        let curve = curve::for_key_type(key.key_type());
        Self::from_key_with_curve(key, curve)
    }

    /// Wraps `key` using `curve` for all arithmetic.
    pub fn from_key_with_curve(key: Key, curve: Arc<dyn Curve>) -> Result<Self, Error> {
        if key.key_type().layout().fixed_length && key.data().len() != SIGNATURE_DATA_LENGTH {
            return Err(Error::UnrecognizedSignatureFormat);
        }
        Ok(Self { key, curve })
    }

    /// Parses a `SIG_<TYPE>_...` string.
    pub fn from_string(s: &str) -> Result<Self, Error> {
        Self::from_key(string_to_signature(s)?)
    }

    /// Parses a `SIG_<TYPE>_...` string, using `curve` for all arithmetic.
    pub fn from_string_with_curve(s: &str, curve: Arc<dyn Curve>) -> Result<Self, Error> {
        Self::from_key_with_curve(string_to_signature(s)?, curve)
    }

    /// Packs `raw` as a signature of `key_type`.
    pub fn from_parts(raw: &RawSignature, key_type: KeyType) -> Self {
        Self::from_parts_with_curve(raw, key_type, curve::for_key_type(key_type))
    }

    /// Packs `raw` as a signature of `key_type` on `curve`.
    ///
    /// K1 and R1 signatures store the recovery id offset by 31. WA signatures store it as-is.
    pub fn from_parts_with_curve(
        raw: &RawSignature,
        key_type: KeyType,
        curve: Arc<dyn Curve>,
    ) -> Self {
        let recovery_byte = match key_type {
            KeyType::K1 | KeyType::R1 => (raw.recovery_id & 3) + RECOVERY_OFFSET,
            KeyType::WA => raw.recovery_id,
        };
        let mut data = Vec::with_capacity(SIGNATURE_DATA_LENGTH);
        data.push(recovery_byte);
        data.extend_from_slice(&raw.r);
        data.extend_from_slice(&raw.s);
        Self {
            key: Key::new(key_type, data),
            curve,
        }
    }

    /// Unpacks the recovery id, `r`, and `s`.
    pub fn to_parts(&self) -> Result<RawSignature, Error> {
        let data = self.key.data();
        if data.len() < SIGNATURE_DATA_LENGTH {
            return Err(Error::InvalidSignature);
        }
        let recovery_id = match self.key.key_type() {
            KeyType::K1 | KeyType::R1 => data[0].wrapping_sub(27) & 3,
            KeyType::WA => data[0] & 3,
        };
        let mut raw = RawSignature {
            r: [0; SCALAR_LENGTH],
            s: [0; SCALAR_LENGTH],
            recovery_id,
        };
        raw.r.copy_from_slice(&data[1..1 + SCALAR_LENGTH]);
        raw.s.copy_from_slice(&data[1 + SCALAR_LENGTH..SIGNATURE_DATA_LENGTH]);
        Ok(raw)
    }

    /// The raw signature bytes.
    pub fn to_binary(&self) -> &[u8] {
        self.key.data()
    }

    /// The type this signature was encoded with.
    pub fn key_type(&self) -> KeyType {
        self.key.key_type()
    }

    /// The tagged raw bytes (recovery byte, `r`, `s`).
    pub fn as_key(&self) -> &Key {
        &self.key
    }

    /// The curve used for recovery and verification.
    pub fn curve(&self) -> &Arc<dyn Curve> {
        &self.curve
    }

    /// Recovers the public key that signed the SHA-256 digest of `message`.
    pub fn recover(&self, message: &[u8]) -> Result<PublicKey, Error> {
        let digest = self.curve.hash(message);
        self.recover_prehashed(&digest)
    }

    /// Recovers the public key that signed the 32-byte `digest`.
    pub fn recover_digest(&self, digest: &[u8]) -> Result<PublicKey, Error> {
        let digest: &[u8; DIGEST_LENGTH] = digest
            .try_into()
            .map_err(|_| Error::InvalidDigestLength(digest.len()))?;
        self.recover_prehashed(digest)
    }

    fn recover_prehashed(&self, digest: &[u8; DIGEST_LENGTH]) -> Result<PublicKey, Error> {
        let point = self.curve.recover(digest, &self.to_parts()?)?;
        PublicKey::from_key_with_curve(
            Key::new(self.key.key_type(), point.to_vec()),
            self.curve.clone(),
        )
    }

    /// Returns true if this signature over the SHA-256 digest of `message` was produced by
    /// `public_key`.
    pub fn verify(&self, message: &[u8], public_key: &PublicKey) -> bool {
        let digest = self.curve.hash(message);
        self.verify_prehashed(&digest, public_key)
    }

    /// Returns true if this signature over `digest` was produced by `public_key`.
    pub fn verify_digest(&self, digest: &[u8], public_key: &PublicKey) -> bool {
        let Ok(digest) = <&[u8; DIGEST_LENGTH]>::try_from(digest) else {
            return false;
        };
        self.verify_prehashed(digest, public_key)
    }

    fn verify_prehashed(&self, digest: &[u8; DIGEST_LENGTH], public_key: &PublicKey) -> bool {
        let Ok(raw) = self.to_parts() else {
            return false;
        };
        self.curve.verify(digest, &raw, public_key.as_key().data())
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let layout = self.key.key_type().layout();
        f.write_str(&key_to_string(&self.key, layout.suffix, layout.signature_prefix))
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hash::{Hasher as _, Sha256},
        PrivateKey,
    };
    use eosio_utils::hex;
    use test_case::test_case;

    const K1_PRIVATE: &str = "PVT_K1_2bfGi9rYsXQSXXTvJbDAPhHLQUojjaNLomdm3cEJ1XTzMqUt3V";
    const K1_PUBLIC: &str = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63";
    const K1_SIGNATURE: &str = "SIG_K1_KBGpnLgtbEgHuD18q7Ekn9VTBiC1K9zCFDq3GdhftW5Y61258yfAPB6Z2jdtPCeWZFsSeLwZz7rT7tccR5uoGzVPoiL3ys";
    const R1_PRIVATE: &str = "PVT_R1_ENSnpAGb4NHNA2chipxHQMVnAZdEAfRzHmJFEuxFkWvCXC5CG";
    const R1_PUBLIC: &str = "PUB_R1_8CHJquaQWe4Pkhp1fBR9deP5wkqfjuWdfhaKYDxGKCo7gQwU9C";
    const R1_SIGNATURE: &str = "SIG_R1_KKdUwDH8fkSghmgB2afD9913KsMDNANtg75SSPSTfyqHDy91T6usXnDnYasNnc37ApQmFV41JZdyvXyD2Wtipxjybm6Fap";

    #[test]
    fn test_string_round_trip() {
        let signature = Signature::from_string(K1_SIGNATURE).unwrap();
        assert_eq!(signature.key_type(), KeyType::K1);
        assert_eq!(signature.to_binary().len(), SIGNATURE_DATA_LENGTH);
        assert_eq!(signature.to_string(), K1_SIGNATURE);

        let signature: Signature = R1_SIGNATURE.parse().unwrap();
        assert_eq!(signature.key_type(), KeyType::R1);
        assert_eq!(signature.to_string(), R1_SIGNATURE);
    }

    #[test_case(
        "SIG_R1_KCymCyJCtCmbhGtb2B5XTfWQgtCDpESZNf9tYAJvTwsb3xw43ySdCohp1Lwko5TfChCW5c5Toyftv6f99Hv7UNsLoDv1QG";
        "signed payload"
    )]
    #[test_case(
        "SIG_R1_KFVMm45forRPwnSrdX9YG6ioUUbUuTnJLyfeRH9kvW7JNfd81jenf9Z2aZXwjnprvBYnfSKoYF7Gn6ZKBLiBcXFwN5Hy2H";
        "external"
    )]
    fn test_r1_vectors_round_trip(s: &str) {
        let signature = Signature::from_string(s).unwrap();
        assert_eq!(signature.key_type(), KeyType::R1);
        assert_eq!(signature.to_binary().len(), SIGNATURE_DATA_LENGTH);
        assert_eq!(signature.to_string(), s);
        let raw = signature.to_parts().unwrap();
        assert_eq!(Signature::from_parts(&raw, KeyType::R1), signature);
    }

    #[test]
    fn test_r1_external_vector_parts() {
        let signature = Signature::from_string(
            "SIG_R1_KFVMm45forRPwnSrdX9YG6ioUUbUuTnJLyfeRH9kvW7JNfd81jenf9Z2aZXwjnprvBYnfSKoYF7Gn6ZKBLiBcXFwN5Hy2H",
        )
        .unwrap();
        let raw = signature.to_parts().unwrap();
        assert_eq!(signature.to_binary()[0], 31);
        assert_eq!(raw.recovery_id, 0);
        assert_eq!(
            hex(&raw.r),
            "9aa971716b38c5de1d2e8234f6e60a9ec30b3c2c3678c840b96f757ee05c85da"
        );
        assert_eq!(
            hex(&raw.s),
            "1a047c9a35e1dd438d4154c16b26dac833ab874362cb3e7a5c21be5f696ac423"
        );
    }

    #[test]
    fn test_parts_round_trip() {
        let signature = Signature::from_string(K1_SIGNATURE).unwrap();
        let raw = signature.to_parts().unwrap();
        assert_eq!(raw.recovery_id, 0);
        assert_eq!(signature.to_binary()[0], 31);
        assert_eq!(Signature::from_parts(&raw, KeyType::K1), signature);
    }

    #[test_case(KeyType::K1, 31, 0; "k1 compressed")]
    #[test_case(KeyType::R1, 34, 3; "r1 compressed")]
    #[test_case(KeyType::K1, 28, 1; "k1 uncompressed")]
    #[test_case(KeyType::R1, 0, 1; "r1 below offset")]
    #[test_case(KeyType::WA, 2, 2; "wa raw")]
    #[test_case(KeyType::WA, 0x1f, 3; "wa masked")]
    fn test_recovery_byte(key_type: KeyType, byte: u8, expected: u8) {
        let mut data = vec![0x11; SIGNATURE_DATA_LENGTH];
        data[0] = byte;
        let signature = Signature::from_key(Key::new(key_type, data)).unwrap();
        assert_eq!(signature.to_parts().unwrap().recovery_id, expected);
    }

    #[test]
    fn test_wa_recovery_byte_stored_raw() {
        let raw = RawSignature {
            r: [1; 32],
            s: [2; 32],
            recovery_id: 3,
        };
        assert_eq!(Signature::from_parts(&raw, KeyType::WA).to_binary()[0], 3);
        assert_eq!(Signature::from_parts(&raw, KeyType::R1).to_binary()[0], 34);
    }

    #[test]
    fn test_recover() {
        let signature = Signature::from_string(K1_SIGNATURE).unwrap();
        let public_key = signature.recover(b"some string").unwrap();
        assert_eq!(public_key.to_string(), K1_PUBLIC);

        let signature = Signature::from_string(R1_SIGNATURE).unwrap();
        let digest = Sha256::hash(b"some string");
        let public_key = signature.recover_digest(&digest).unwrap();
        assert_eq!(public_key.to_string(), R1_PUBLIC);

        assert_eq!(
            signature.recover_digest(&digest[..16]),
            Err(Error::InvalidDigestLength(16))
        );
    }

    #[test]
    fn test_verify() {
        let signature = Signature::from_string(K1_SIGNATURE).unwrap();
        let public_key = PublicKey::from_string(K1_PUBLIC).unwrap();
        assert!(signature.verify(b"some string", &public_key));
        assert!(!signature.verify(b"some other string", &public_key));

        let digest = Sha256::hash(b"some string");
        assert!(signature.verify_digest(&digest, &public_key));
        assert!(!signature.verify_digest(&digest[1..], &public_key));

        // Wrong key
        let other = PublicKey::from_string(R1_PUBLIC).unwrap();
        assert!(!signature.verify(b"some string", &other));
    }

    #[test]
    fn test_sign_recover_verify() {
        for private in [K1_PRIVATE, R1_PRIVATE] {
            let private_key = PrivateKey::from_string(private).unwrap();
            let public_key = private_key.public_key().unwrap();
            for message in [&b"some string"[..], b"", b"I am a test string"] {
                let signature = private_key.sign(message).unwrap();
                assert_eq!(signature.key_type(), private_key.key_type());
                assert!(signature.verify(message, &public_key));
                assert_eq!(signature.recover(message).unwrap(), public_key);
                let parsed = Signature::from_string(&signature.to_string()).unwrap();
                assert_eq!(parsed, signature);
            }
        }
    }

    #[test]
    fn test_wa_short_payload() {
        let signature = Signature::from_key(Key::new(KeyType::WA, vec![1; 10])).unwrap();
        assert_eq!(signature.to_parts(), Err(Error::InvalidSignature));
        let public_key = PublicKey::from_string(R1_PUBLIC).unwrap();
        assert!(!signature.verify(b"some string", &public_key));
    }

    #[test]
    fn test_from_key_wrong_length() {
        assert_eq!(
            Signature::from_key(Key::new(KeyType::K1, vec![31; 64])),
            Err(Error::UnrecognizedSignatureFormat)
        );
    }
}
