//! NIST P-256 (R1 and WA) via [p256].

use super::impl_curve;

/// The NIST P-256 curve.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256r1;

impl_curve!(Secp256r1, p256, "secp256r1");
