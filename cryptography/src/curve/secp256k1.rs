//! secp256k1 (K1) via [k256].

use super::impl_curve;

/// The secp256k1 curve.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1;

impl_curve!(Secp256k1, k256, "secp256k1");
