//! Message digests used by key checksums and signing.

use ripemd::Ripemd160 as IRipemd160;
use sha2::{Digest as _, Sha256 as ISha256};

/// Length of a SHA-256 digest.
pub const SHA256_LENGTH: usize = 32;

/// Length of a RIPEMD-160 digest.
pub const RIPEMD160_LENGTH: usize = 20;

/// Interface that hash functions used by this crate must implement.
pub trait Hasher: Default {
    /// Output of the hash function.
    type Digest: AsRef<[u8]> + Copy;

    /// Append `message` to the pending input.
    fn update(&mut self, message: &[u8]);

    /// Hash all pending input and reset the hasher.
    fn finalize(&mut self) -> Self::Digest;

    /// Discard all pending input.
    fn reset(&mut self);

    /// Hash `message` in one shot.
    fn hash(message: &[u8]) -> Self::Digest {
        let mut hasher = Self::default();
        hasher.update(message);
        hasher.finalize()
    }
}

/// SHA-256, used for message digests and the legacy private key checksum.
#[derive(Clone, Default)]
pub struct Sha256 {
    hasher: ISha256,
}

impl Hasher for Sha256 {
    type Digest = [u8; SHA256_LENGTH];

    fn update(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    fn finalize(&mut self) -> Self::Digest {
        self.hasher.finalize_reset().into()
    }

    fn reset(&mut self) {
        self.hasher = ISha256::new();
    }
}

/// RIPEMD-160, used for key and signature string checksums.
#[derive(Clone, Default)]
pub struct Ripemd160 {
    hasher: IRipemd160,
}

impl Hasher for Ripemd160 {
    type Digest = [u8; RIPEMD160_LENGTH];

    fn update(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    fn finalize(&mut self) -> Self::Digest {
        self.hasher.finalize_reset().into()
    }

    fn reset(&mut self) {
        self.hasher = IRipemd160::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eosio_utils::hex;

    #[test]
    fn test_sha256() {
        let message = b"hello world";

        // Generate initial hash
        let mut hasher = Sha256::default();
        hasher.update(message);
        let hash = hasher.finalize();
        assert_eq!(
            hex(&hash),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );

        // Reuse hasher
        hasher.update(message);
        assert_eq!(hasher.finalize(), hash);
    }

    #[test]
    fn test_sha256_reset() {
        let mut hasher = Sha256::default();
        hasher.update(b"garbage");
        hasher.reset();
        hasher.update(b"hello world");
        assert_eq!(hasher.finalize(), Sha256::hash(b"hello world"));
    }

    #[test]
    fn test_ripemd160() {
        assert_eq!(
            hex(&Ripemd160::hash(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
        assert_eq!(
            hex(&Ripemd160::hash(b"abc")),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn test_ripemd160_incremental() {
        let mut hasher = Ripemd160::default();
        hasher.update(b"a");
        hasher.update(b"bc");
        assert_eq!(hasher.finalize(), Ripemd160::hash(b"abc"));
    }
}
