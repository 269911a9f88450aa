//! Tunables for signing and key generation.

/// Default cap on K1 signing attempts.
pub const DEFAULT_MAX_SIGNING_ATTEMPTS: u8 = u8::MAX;

/// Cap on scalars drawn by [crate::generate_key_pair] before giving up on the RNG.
///
/// A working RNG lands outside the curve order with probability below 2^-32 per draw.
pub const MAX_KEY_GENERATION_ATTEMPTS: u8 = u8::MAX;

/// Configuration for signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of nonces to try when searching for a canonical K1 signature.
    ///
    /// Attempt `n` feeds the single byte `n` into nonce generation, so at most 255
    /// distinct attempts exist.
    pub max_signing_attempts: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_signing_attempts: DEFAULT_MAX_SIGNING_ATTEMPTS,
        }
    }
}

/// Options for generating a software key pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyGenOptions {
    /// The caller asserts the process is a safe place to hold a private key.
    ///
    /// Key generation is refused unless this is set.
    pub secure_env: bool,
}
