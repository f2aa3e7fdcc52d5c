//! Conversions between blinding factors and Ristretto scalars, plus key
//! generation.

use curve25519_dalek::scalar::Scalar;
use mimble_core::{BlindingFactor, CoreError};

/// Context string for deterministic blinding factors.
const SEED_CONTEXT: &str = "mimble-v1 blinding-factor-from-seed";

/// Interpret a blinding factor as a canonical scalar.
///
/// Fails with [`CoreError::InvalidBlindingFactor`] if the bytes are not
/// reduced mod the group order.
pub fn scalar_from_blind(blind: &BlindingFactor) -> Result<Scalar, CoreError> {
    Option::<Scalar>::from(Scalar::from_canonical_bytes(*blind.as_bytes()))
        .ok_or(CoreError::InvalidBlindingFactor)
}

pub fn blind_from_scalar(scalar: &Scalar) -> BlindingFactor {
    BlindingFactor::from_bytes(scalar.to_bytes())
}

/// Generate a fresh random blinding factor.
pub fn random_blind() -> BlindingFactor {
    let mut rng = rand::thread_rng();
    blind_from_scalar(&Scalar::random(&mut rng))
}

/// Derive a blinding factor from seed bytes.
///
/// The same seed always gives the same factor, which keeps test vectors and
/// fixtures reproducible.
pub fn blind_from_seed(seed: &[u8]) -> BlindingFactor {
    let mut hasher = blake3::Hasher::new_derive_key(SEED_CONTEXT);
    hasher.update(seed);
    blind_from_scalar(&wide_scalar(hasher))
}

/// Finish a hasher into a uniformly distributed scalar.
pub(crate) fn wide_scalar(hasher: blake3::Hasher) -> Scalar {
    let mut wide = [0u8; 64];
    hasher.finalize_xof().fill(&mut wide);
    Scalar::from_bytes_mod_order_wide(&wide)
}
