//! Error types for key and signature operations.

use crate::KeyType;
use thiserror::Error;

/// Errors that can occur when parsing, converting, or using keys and signatures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unrecognized public key format")]
    UnrecognizedPublicKeyFormat,
    #[error("unrecognized private key format")]
    UnrecognizedPrivateKeyFormat,
    #[error("unrecognized private key type")]
    UnrecognizedPrivateKeyType,
    #[error("unrecognized signature format")]
    UnrecognizedSignatureFormat,
    #[error("expected string containing public key")]
    ExpectedStringContainingPublicKey,
    #[error("expected string containing private key")]
    ExpectedStringContainingPrivateKey,
    #[error("expected string containing signature")]
    ExpectedStringContainingSignature,
    #[error("checksum doesn't match")]
    ChecksumMismatch,
    #[error("key is not extractable")]
    KeyUnextractable,
    #[error("key format not supported in legacy conversion")]
    KeyFormatNotSupportedInLegacyConversion,
    #[error("key generation requires acknowledging that the environment is secure")]
    InsecureEnvironment,
    #[error("unable to find valid recovery factor")]
    InvalidRecoveryFactor,
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(KeyType),
    #[error("no canonical signature after {0} attempts")]
    SigningAttemptsExhausted(u8),
    #[error("no valid scalar after {0} attempts")]
    KeyGenerationAttemptsExhausted(u8),
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid digest length: {0}")]
    InvalidDigestLength(usize),
    #[error("platform: {0}")]
    Platform(String),
    #[error("numeric: {0}")]
    Numeric(#[from] eosio_utils::Error),
}
