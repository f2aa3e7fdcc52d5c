//! Error types for Mimble Core.

use std::fmt;

use thiserror::Error;

use crate::types::Commitment;

/// Errors reported by a [`Crypto`](crate::crypto::Crypto) provider or by
/// parameter checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid commitment")]
    InvalidCommitment,

    #[error("invalid blinding factor")]
    InvalidBlindingFactor,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid range proof")]
    InvalidRangeProof,

    #[error("length mismatch: {commitments} commitments, {proofs} proofs")]
    LengthMismatch { commitments: usize, proofs: usize },

    #[error("value out of range: {0}")]
    ValueOverflow(String),
}

/// The body collection a structural failure was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Inputs,
    Outputs,
    Kernels,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Inputs => "inputs",
            Collection::Outputs => "outputs",
            Collection::Kernels => "kernels",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a rejection, for callers that log or count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Wrong count, order, or size.
    Structural,
    /// Bad range proof, bad signature, or a commitment that cannot be built.
    Cryptographic,
    /// Lock height, issuance, or value balance.
    ConsensusRule,
}

/// Why a transaction body, transaction or block was rejected.
///
/// Every variant is a hard rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("body too heavy: weight {weight} exceeds maximum {max}")]
    TooHeavy { weight: u64, max: u64 },

    #[error("{collection} not strictly sorted at index {index}")]
    Unsorted { collection: Collection, index: usize },

    #[error("input spends output {0} created in the same body")]
    CutThrough(Commitment),

    #[error("range proof verification failed")]
    InvalidRangeProof,

    #[error("kernel {index} signature verification failed")]
    InvalidKernelSignature { index: usize },

    #[error("commitment construction failed: {0}")]
    Commitment(#[source] CoreError),

    #[error("kernel lock height {lock_height} above block height {height}")]
    LockHeight { lock_height: u64, height: u64 },

    #[error("coinbase outputs do not match coinbase kernels plus reward")]
    CoinbaseSumMismatch,

    #[error("reward plus fees overflows")]
    RewardOverflow,

    #[error("sum of kernel fees overflows")]
    FeeOverflow,

    #[error("sum of outputs minus inputs does not match kernel excesses")]
    KernelSumMismatch,

    #[error("coinbase features are not allowed in a standalone transaction")]
    CoinbaseInTransaction,
}

impl ValidationError {
    /// Category used for observability.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidationError::TooHeavy { .. }
            | ValidationError::Unsorted { .. }
            | ValidationError::CutThrough(_) => ErrorCategory::Structural,
            ValidationError::InvalidRangeProof
            | ValidationError::InvalidKernelSignature { .. }
            | ValidationError::Commitment(_) => ErrorCategory::Cryptographic,
            ValidationError::LockHeight { .. }
            | ValidationError::CoinbaseSumMismatch
            | ValidationError::RewardOverflow
            | ValidationError::FeeOverflow
            | ValidationError::KernelSumMismatch
            | ValidationError::CoinbaseInTransaction => ErrorCategory::ConsensusRule,
        }
    }
}

impl From<CoreError> for ValidationError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidRangeProof | CoreError::LengthMismatch { .. } => {
                ValidationError::InvalidRangeProof
            }
            other => ValidationError::Commitment(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            ValidationError::TooHeavy { weight: 2, max: 1 }.category(),
            ErrorCategory::Structural
        );
        assert_eq!(
            ValidationError::CutThrough(Commitment::from_bytes([1; 32])).category(),
            ErrorCategory::Structural
        );
        assert_eq!(
            ValidationError::InvalidKernelSignature { index: 0 }.category(),
            ErrorCategory::Cryptographic
        );
        assert_eq!(
            ValidationError::Commitment(CoreError::InvalidCommitment).category(),
            ErrorCategory::Cryptographic
        );
        assert_eq!(
            ValidationError::KernelSumMismatch.category(),
            ErrorCategory::ConsensusRule
        );
        assert_eq!(
            ValidationError::FeeOverflow.category(),
            ErrorCategory::ConsensusRule
        );
    }

    #[test]
    fn test_core_error_conversion() {
        assert_eq!(
            ValidationError::from(CoreError::LengthMismatch { commitments: 2, proofs: 1 }),
            ValidationError::InvalidRangeProof
        );
        assert_eq!(
            ValidationError::from(CoreError::InvalidCommitment),
            ValidationError::Commitment(CoreError::InvalidCommitment)
        );
    }

    #[test]
    fn test_display() {
        let e = ValidationError::Unsorted {
            collection: Collection::Outputs,
            index: 3,
        };
        assert_eq!(e.to_string(), "outputs not strictly sorted at index 3");
    }
}
