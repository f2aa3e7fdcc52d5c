//! [`DalekCrypto`]: the production [`Crypto`] provider.
//!
//! Commitments are Ristretto points `v·H + r·G` with the Bulletproofs
//! Pedersen generators (`H = B`, `G = B_blinding`). Range proofs are 64-bit
//! single-value Bulletproofs. Kernel signatures are Schnorr on `G`.

use bulletproofs::{BulletproofGens, PedersenGens, RangeProof as Bulletproof};
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use merlin::Transcript;
use mimble_core::{
    Blake3Hash, BlindingFactor, Commitment, CoreError, Crypto, RangeProof, Signature,
};

use crate::keys::{blind_from_scalar, scalar_from_blind};
use crate::schnorr;

/// Bit width every output value is proven to fit in.
pub const RANGE_PROOF_BITS: usize = 64;

/// Transcript label shared by provers and verifiers.
const RANGE_PROOF_LABEL: &[u8] = b"mimble-v1 range-proof";

/// Pedersen commitments, Bulletproofs and Schnorr kernel signatures over
/// Ristretto.
///
/// Holds only precomputed generators, so one instance can be shared across
/// threads behind an `Arc`.
pub struct DalekCrypto {
    pc_gens: PedersenGens,
    bp_gens: BulletproofGens,
}

impl DalekCrypto {
    pub fn new() -> Self {
        Self {
            pc_gens: PedersenGens::default(),
            bp_gens: BulletproofGens::new(RANGE_PROOF_BITS, 1),
        }
    }

    /// Commit to `value` and prove it lies in `[0, 2^64)`.
    pub fn prove_range(
        &self,
        value: u64,
        blind: &BlindingFactor,
    ) -> Result<(Commitment, RangeProof), CoreError> {
        let r = scalar_from_blind(blind)?;
        let mut transcript = Transcript::new(RANGE_PROOF_LABEL);
        let (proof, committed) = Bulletproof::prove_single(
            &self.bp_gens,
            &self.pc_gens,
            &mut transcript,
            value,
            &r,
            RANGE_PROOF_BITS,
        )
        .map_err(|_| CoreError::InvalidRangeProof)?;
        Ok((
            Commitment::from_bytes(committed.to_bytes()),
            RangeProof::from_bytes(proof.to_bytes()),
        ))
    }

    /// Sign a kernel message with the excess secret.
    pub fn sign_kernel(
        &self,
        excess_blind: &BlindingFactor,
        message: &Blake3Hash,
    ) -> Result<Signature, CoreError> {
        let x = scalar_from_blind(excess_blind)?;
        Ok(schnorr::sign(&self.pc_gens.B_blinding, &x, message))
    }

    /// The public excess `x·G` for a secret excess.
    pub fn excess_commitment(
        &self,
        excess_blind: &BlindingFactor,
    ) -> Result<Commitment, CoreError> {
        self.commit_blinded(0, excess_blind)
    }

    fn commit_point(&self, value: u64, blind: Scalar) -> Commitment {
        to_commitment(&self.pc_gens.commit(Scalar::from(value), blind))
    }
}

impl Default for DalekCrypto {
    fn default() -> Self {
        Self::new()
    }
}

impl Crypto for DalekCrypto {
    fn commit_transparent(&self, value: u64) -> Result<Commitment, CoreError> {
        Ok(self.commit_point(value, Scalar::ZERO))
    }

    fn commit_blinded(&self, value: u64, blind: &BlindingFactor) -> Result<Commitment, CoreError> {
        Ok(self.commit_point(value, scalar_from_blind(blind)?))
    }

    fn add_commitments(
        &self,
        positive: &[Commitment],
        negative: &[Commitment],
    ) -> Result<Commitment, CoreError> {
        let mut sum = RistrettoPoint::identity();
        for c in positive {
            sum += to_point(c)?;
        }
        for c in negative {
            sum -= to_point(c)?;
        }
        Ok(to_commitment(&sum))
    }

    fn add_blinding_factors(
        &self,
        positive: &[BlindingFactor],
        negative: &[BlindingFactor],
    ) -> Result<BlindingFactor, CoreError> {
        let mut sum = Scalar::ZERO;
        for b in positive {
            sum += scalar_from_blind(b)?;
        }
        for b in negative {
            sum -= scalar_from_blind(b)?;
        }
        Ok(blind_from_scalar(&sum))
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

        for (index, (commitment, proof)) in commitments.iter().zip(proofs).enumerate() {
            let bulletproof = Bulletproof::from_bytes(proof.as_bytes()).map_err(|_| {
                tracing::trace!(index, "range proof does not decode");
                CoreError::InvalidRangeProof
            })?;
            let mut transcript = Transcript::new(RANGE_PROOF_LABEL);
            bulletproof
                .verify_single(
                    &self.bp_gens,
                    &self.pc_gens,
                    &mut transcript,
                    &CompressedRistretto(commitment.0),
                    RANGE_PROOF_BITS,
                )
                .map_err(|_| {
                    tracing::trace!(index, %commitment, "range proof rejected");
                    CoreError::InvalidRangeProof
                })?;
        }
        Ok(())
    }

    fn verify_kernel_signature(
        &self,
        excess: &Commitment,
        message: &Blake3Hash,
        signature: &Signature,
    ) -> Result<(), CoreError> {
        schnorr::verify(
            &self.pc_gens.B_blinding,
            &CompressedRistretto(excess.0),
            message,
            signature,
        )
    }
}

fn to_point(commitment: &Commitment) -> Result<RistrettoPoint, CoreError> {
    CompressedRistretto(commitment.0)
        .decompress()
        .ok_or(CoreError::InvalidCommitment)
}

fn to_commitment(point: &RistrettoPoint) -> Commitment {
    Commitment::from_bytes(point.compress().to_bytes())
}
