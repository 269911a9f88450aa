//! Parse, sign with, recover, and verify EOSIO-style K1/R1/WA keys and signatures.
//!
//! Keys and signatures are carried as checksummed base-58 strings (`PUB_K1_...`, `PVT_R1_...`,
//! `SIG_K1_...`, plus the legacy `EOS...` and WIF forms). [PrivateKey]s sign SHA-256 digests
//! with deterministic nonces, [Signature]s recover the [PublicKey] that produced them, and R1
//! keys can be moved in and out of a [platform::Platform] crypto provider.
//!
//! # Example
//! ```rust
//! use eosio_cryptography::{PrivateKey, PublicKey};
//!
//! // Parse a legacy private key
//! let private_key = PrivateKey::from_string("5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3").unwrap();
//! let public_key = private_key.public_key().unwrap();
//! assert_eq!(
//!     public_key,
//!     PublicKey::from_string("EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV").unwrap(),
//! );
//!
//! // Sign a message and recover the signer
//! let signature = private_key.sign(b"hello, world!").unwrap();
//! assert!(signature.verify(b"hello, world!", &public_key));
//! assert_eq!(signature.recover(b"hello, world!").unwrap(), public_key);
//! ```
//!
//! # Status
//!
//! `eosio-cryptography` is **ALPHA** software and is not yet recommended for production use.
//! Developers should expect breaking changes and occasional instability.

pub mod codec;
pub use codec::{
    convert_legacy_public_key, convert_legacy_public_keys, key_to_string,
    private_key_to_legacy_string, private_key_to_string, public_key_to_legacy_string,
    public_key_to_string, signature_to_string, string_to_key, string_to_private_key,
    string_to_public_key, string_to_signature,
};
mod config;
pub use config::{
    Config, KeyGenOptions, DEFAULT_MAX_SIGNING_ATTEMPTS, MAX_KEY_GENERATION_ATTEMPTS,
};
pub mod curve;
pub use curve::{Curve, RawSignature};
mod error;
pub use error::Error;
pub mod hash;
mod key;
pub use key::{
    Key, KeyType, PRIVATE_KEY_DATA_LENGTH, PUBLIC_KEY_DATA_LENGTH, SIGNATURE_DATA_LENGTH,
};
pub mod platform;
mod private_key;
pub use private_key::PrivateKey;
mod public_key;
pub use public_key::PublicKey;
mod signature;
pub use signature::Signature;
mod utils;
pub use utils::{
    generate_key_pair, generate_platform_key_pair, is_private_key_valid, is_public_key_valid,
    key_type_from_private_key_string, key_type_from_public_key_string,
};
