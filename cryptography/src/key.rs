//! Key types and the raw tagged payload shared by keys and signatures.

use eosio_utils::hex;
use std::fmt::{Debug, Display, Formatter};
use zeroize::Zeroize;

/// Length of a compressed public key payload.
pub const PUBLIC_KEY_DATA_LENGTH: usize = 33;

/// Length of a private key payload.
pub const PRIVATE_KEY_DATA_LENGTH: usize = 32;

/// Length of a K1/R1 signature payload (recovery byte, `r`, and `s`).
pub const SIGNATURE_DATA_LENGTH: usize = 65;

/// The curve and encoding family of a key or signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyType {
    /// secp256k1.
    K1,
    /// NIST P-256 (secp256r1).
    R1,
    /// NIST P-256 produced by a WebAuthn authenticator.
    WA,
}

/// String encoding parameters for a [KeyType].
pub(crate) struct Layout {
    pub suffix: &'static str,
    pub public_prefix: &'static str,
    pub private_prefix: Option<&'static str>,
    pub signature_prefix: &'static str,
    /// Public keys and signatures have fixed payload lengths.
    pub fixed_length: bool,
    /// Supports the legacy `EOS`/WIF encodings.
    pub legacy: bool,
}

const LAYOUTS: [Layout; 3] = [
    Layout {
        suffix: "K1",
        public_prefix: "PUB_K1_",
        private_prefix: Some("PVT_K1_"),
        signature_prefix: "SIG_K1_",
        fixed_length: true,
        legacy: true,
    },
    Layout {
        suffix: "R1",
        public_prefix: "PUB_R1_",
        private_prefix: Some("PVT_R1_"),
        signature_prefix: "SIG_R1_",
        fixed_length: true,
        legacy: false,
    },
    Layout {
        suffix: "WA",
        public_prefix: "PUB_WA_",
        private_prefix: None,
        signature_prefix: "SIG_WA_",
        fixed_length: false,
        legacy: false,
    },
];

impl KeyType {
    /// Every supported key type, in prefix matching order.
    pub const ALL: [KeyType; 3] = [KeyType::K1, KeyType::R1, KeyType::WA];

    pub(crate) fn layout(self) -> &'static Layout {
        &LAYOUTS[self as usize]
    }

    /// The checksum suffix (`"K1"`, `"R1"`, or `"WA"`).
    pub fn suffix(self) -> &'static str {
        self.layout().suffix
    }

    /// Whether keys of this type are recovered and verified on P-256.
    pub fn is_p256(self) -> bool {
        matches!(self, KeyType::R1 | KeyType::WA)
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A key type paired with its raw bytes.
///
/// Used for public keys (compressed point), private keys (scalar), and
/// signatures (recovery byte followed by `r` and `s`).
#[derive(Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct Key {
    #[zeroize(skip)]
    key_type: KeyType,
    data: Vec<u8>,
}

impl Key {
    pub fn new(key_type: KeyType, data: Vec<u8>) -> Self {
        Self { key_type, data }
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key_type, hex(&self.data))
    }
}
