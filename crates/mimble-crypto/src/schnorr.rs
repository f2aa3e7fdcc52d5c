//! Schnorr signatures over Ristretto, keyed by a kernel excess.
//!
//! A kernel excess `x·G` is a public key on the blinding generator `G`.
//! Signatures are `R || s` with `R = k·G`, `e = H(R || P || m)` and
//! `s = k + e·x`. Nonces are derived from the secret and message, so signing
//! needs no randomness.

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::IsIdentity;
use mimble_core::{Blake3Hash, CoreError, Signature};

use crate::keys::wide_scalar;

const NONCE_CONTEXT: &str = "mimble-v1 kernel-signature-nonce";
const CHALLENGE_CONTEXT: &str = "mimble-v1 kernel-signature-challenge";

/// Sign `message` with secret `x` on generator `generator`.
pub fn sign(generator: &RistrettoPoint, secret: &Scalar, message: &Blake3Hash) -> Signature {
    let public = (secret * generator).compress();

    let mut nonce_hasher = blake3::Hasher::new_derive_key(NONCE_CONTEXT);
    nonce_hasher.update(secret.as_bytes());
    nonce_hasher.update(message.as_bytes());
    let k = wide_scalar(nonce_hasher);

    let r = (k * generator).compress();
    let e = challenge(&r, &public, message);
    let s = k + e * secret;

    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(r.as_bytes());
    bytes[32..].copy_from_slice(s.as_bytes());
    Signature::from_bytes(bytes)
}

/// Verify `signature` over `message` against public key `public`.
///
/// The identity point is never a valid key: anyone could sign for it.
pub fn verify(
    generator: &RistrettoPoint,
    public: &CompressedRistretto,
    message: &Blake3Hash,
    signature: &Signature,
) -> Result<(), CoreError> {
    let p = public.decompress().ok_or(CoreError::InvalidCommitment)?;
    if p.is_identity() {
        return Err(CoreError::InvalidSignature);
    }

    let (r_bytes, s_bytes) = signature.as_bytes().split_at(32);
    let r_compressed =
        CompressedRistretto::from_slice(r_bytes).map_err(|_| CoreError::InvalidSignature)?;
    let r = r_compressed
        .decompress()
        .ok_or(CoreError::InvalidSignature)?;
    let mut s_array = [0u8; 32];
    s_array.copy_from_slice(s_bytes);
    let s = Option::<Scalar>::from(Scalar::from_canonical_bytes(s_array))
        .ok_or(CoreError::InvalidSignature)?;

    let e = challenge(&r_compressed, public, message);
    if s * generator == r + e * p {
        Ok(())
    } else {
        Err(CoreError::InvalidSignature)
    }
}

fn challenge(
    r: &CompressedRistretto,
    public: &CompressedRistretto,
    message: &Blake3Hash,
) -> Scalar {
    let mut hasher = blake3::Hasher::new_derive_key(CHALLENGE_CONTEXT);
    hasher.update(r.as_bytes());
    hasher.update(public.as_bytes());
    hasher.update(message.as_bytes());
    wide_scalar(hasher)
}
