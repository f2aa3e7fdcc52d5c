//! A toy [`Crypto`] for unit tests in this crate.
//!
//! Commitments live in the additive group of integers mod 2^64, stored in
//! the first 8 bytes: `commit(v, r) = v·H + r`. Homomorphic but trivially
//! breakable. Real-curve tests live in the testkit.

use crate::crypto::{Blake3Hash, Crypto, RangeProof, Signature};
use crate::error::CoreError;
use crate::types::{BlindingFactor, Commitment};

const H: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct ToyCrypto;

impl ToyCrypto {
    /// A commitment that fails to decode.
    pub const INVALID: Commitment = Commitment([0xff; 32]);

    pub fn prove(commitment: &Commitment) -> RangeProof {
        RangeProof::from_bytes(Blake3Hash::hash(&commitment.0).0.to_vec())
    }

    pub fn sign(excess: &Commitment, message: &Blake3Hash) -> Signature {
        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(&signature_tag(excess, message));
        Signature(sig)
    }
}

pub fn blind(n: u64) -> BlindingFactor {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&n.to_le_bytes());
    BlindingFactor(bytes)
}

fn signature_tag(excess: &Commitment, message: &Blake3Hash) -> [u8; 32] {
    let mut buf = excess.0.to_vec();
    buf.extend_from_slice(&message.0);
    Blake3Hash::hash(&buf).0
}

fn decode(bytes: &[u8; 32]) -> Option<u64> {
    if bytes[8..].iter().any(|b| *b != 0) {
        return None;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[..8]);
    Some(u64::from_le_bytes(low))
}

fn encode(n: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&n.to_le_bytes());
    bytes
}

impl Crypto for ToyCrypto {
    fn commit_transparent(&self, value: u64) -> Result<Commitment, CoreError> {
        Ok(Commitment(encode(value.wrapping_mul(H))))
    }

    fn commit_blinded(&self, value: u64, blind: &BlindingFactor) -> Result<Commitment, CoreError> {
        let r = decode(&blind.0).ok_or(CoreError::InvalidBlindingFactor)?;
        Ok(Commitment(encode(value.wrapping_mul(H).wrapping_add(r))))
    }

    fn add_commitments(
        &self,
        positive: &[Commitment],
        negative: &[Commitment],
    ) -> Result<Commitment, CoreError> {
        let mut acc = 0u64;
        for c in positive {
            acc = acc.wrapping_add(decode(&c.0).ok_or(CoreError::InvalidCommitment)?);
        }
        for c in negative {
            acc = acc.wrapping_sub(decode(&c.0).ok_or(CoreError::InvalidCommitment)?);
        }
        Ok(Commitment(encode(acc)))
    }

    fn add_blinding_factors(
        &self,
        positive: &[BlindingFactor],
        negative: &[BlindingFactor],
    ) -> Result<BlindingFactor, CoreError> {
        let mut acc = 0u64;
        for b in positive {
            acc = acc.wrapping_add(decode(&b.0).ok_or(CoreError::InvalidBlindingFactor)?);
        }
        for b in negative {
            acc = acc.wrapping_sub(decode(&b.0).ok_or(CoreError::InvalidBlindingFactor)?);
        }
        Ok(BlindingFactor(encode(acc)))
    }

    fn verify_range_proofs(
        &self,
        commitments: &[Commitment],
        proofs: &[RangeProof],
    ) -> Result<(), CoreError> {
        if commitments.len() != proofs.len() {
            return Err(CoreError::LengthMismatch {
                commitments: commitments.len(),
                proofs: proofs.len(),
            });
        }
        for (c, p) in commitments.iter().zip(proofs) {
            if ToyCrypto::prove(c) != *p {
                return Err(CoreError::InvalidRangeProof);
            }
        }
        Ok(())
    }

    fn verify_kernel_signature(
        &self,
        excess: &Commitment,
        message: &Blake3Hash,
        signature: &Signature,
    ) -> Result<(), CoreError> {
        if ToyCrypto::sign(excess, message) == *signature {
            Ok(())
        } else {
            Err(CoreError::InvalidSignature)
        }
    }
}
