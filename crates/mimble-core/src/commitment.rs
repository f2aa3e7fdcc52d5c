//! Kernel offset and commitment sum arithmetic.
//!
//! [`verify_kernel_sums`] is the balance equation: for a body with overage
//! `o` (the fee for a transaction, minus the reward for a block) and kernel
//! offset `k`,
//!
//! ```text
//! Σ outputs − Σ inputs + o·H  ==  Σ kernel excesses + k·G
//! ```
//!
//! Equality holds only if no value was created or destroyed and every
//! excess is the true blinding imbalance.

use crate::crypto::Crypto;
use crate::error::ValidationError;
use crate::transaction::TransactionBody;
use crate::types::{BlindingFactor, Commitment};

/// Sum two lists of kernel offsets mod the group order.
pub fn add_kernel_offsets<C: Crypto + ?Sized>(
    crypto: &C,
    offsets_a: &[BlindingFactor],
    offsets_b: &[BlindingFactor],
) -> Result<BlindingFactor, ValidationError> {
    let all: Vec<BlindingFactor> = offsets_a.iter().chain(offsets_b).copied().collect();
    Ok(crypto.add_blinding_factors(&all, &[])?)
}

/// The offset a block contributes: its header total minus the previous
/// block's total.
pub fn kernel_offset_delta<C: Crypto + ?Sized>(
    crypto: &C,
    total: &BlindingFactor,
    previous: &BlindingFactor,
) -> Result<BlindingFactor, ValidationError> {
    Ok(crypto.add_blinding_factors(&[*total], &[*previous])?)
}

/// `Σ outputs − Σ inputs + overage·H`.
///
/// A negative overage is committed by magnitude and subtracted.
pub fn sum_commitments<C: Crypto + ?Sized>(
    crypto: &C,
    body: &TransactionBody,
    overage: i64,
) -> Result<Commitment, ValidationError> {
    let mut positive: Vec<Commitment> = body.outputs.iter().map(|o| o.commitment).collect();
    let mut negative: Vec<Commitment> = body.inputs.iter().map(|i| i.commitment).collect();

    if overage != 0 {
        let over_commit = crypto
            .commit_transparent(overage.unsigned_abs())
            .map_err(ValidationError::Commitment)?;
        if overage < 0 {
            negative.push(over_commit);
        } else {
            positive.push(over_commit);
        }
    }

    crypto
        .add_commitments(&positive, &negative)
        .map_err(ValidationError::Commitment)
}

/// Check the balance equation for `body` with the given overage and
/// kernel offset.
pub fn verify_kernel_sums<C: Crypto + ?Sized>(
    crypto: &C,
    body: &TransactionBody,
    overage: i64,
    offset: &BlindingFactor,
) -> Result<(), ValidationError> {
    let io_sum = sum_commitments(crypto, body, overage)?;

    let mut kernel_commits: Vec<Commitment> = body.kernels.iter().map(|k| k.excess).collect();
    if !offset.is_zero() {
        let offset_commit = crypto
            .commit_blinded(0, offset)
            .map_err(ValidationError::Commitment)?;
        kernel_commits.push(offset_commit);
    }
    let kernel_sum = crypto
        .add_commitments(&kernel_commits, &[])
        .map_err(ValidationError::Commitment)?;

    if kernel_sum != io_sum {
        tracing::debug!(overage, "kernel sum mismatch");
        return Err(ValidationError::KernelSumMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{RangeProof, Signature};
    use crate::testing::{blind, ToyCrypto};
    use crate::transaction::{
        KernelFeatures, OutputFeatures, TransactionInput, TransactionKernel, TransactionOutput,
    };

    fn kernel(excess: Commitment, fee: u64) -> TransactionKernel {
        TransactionKernel {
            features: KernelFeatures::PLAIN,
            fee,
            lock_height: 0,
            excess,
            excess_sig: Signature::ZERO,
        }
    }

    /// in(50, r1) -> out(48, r2), fee 2, offset k: excess = (r2 - r1 - k)·G
    fn balanced_tx(crypto: &ToyCrypto) -> (TransactionBody, BlindingFactor) {
        let r1 = blind(7);
        let r2 = blind(19);
        let k = blind(5);
        let excess_blind = crypto.add_blinding_factors(&[r2], &[r1, k]).unwrap();
        let body = TransactionBody::new(
            vec![TransactionInput::new(
                OutputFeatures::PLAIN,
                crypto.commit_blinded(50, &r1).unwrap(),
            )],
            vec![TransactionOutput::new(
                OutputFeatures::PLAIN,
                crypto.commit_blinded(48, &r2).unwrap(),
                RangeProof::default(),
            )],
            vec![kernel(crypto.commit_blinded(0, &excess_blind).unwrap(), 2)],
        );
        (body, k)
    }

    #[test]
    fn test_balanced_tx_verifies() {
        let crypto = ToyCrypto;
        let (body, offset) = balanced_tx(&crypto);
        verify_kernel_sums(&crypto, &body, 2, &offset).unwrap();
    }

    #[test]
    fn test_wrong_overage_fails() {
        let crypto = ToyCrypto;
        let (body, offset) = balanced_tx(&crypto);
        assert_eq!(
            verify_kernel_sums(&crypto, &body, 3, &offset),
            Err(ValidationError::KernelSumMismatch)
        );
        assert_eq!(
            verify_kernel_sums(&crypto, &body, -2, &offset),
            Err(ValidationError::KernelSumMismatch)
        );
    }

    #[test]
    fn test_wrong_offset_fails() {
        let crypto = ToyCrypto;
        let (body, _) = balanced_tx(&crypto);
        assert_eq!(
            verify_kernel_sums(&crypto, &body, 2, &BlindingFactor::ZERO),
            Err(ValidationError::KernelSumMismatch)
        );
    }

    #[test]
    fn test_negative_overage_issues_value() {
        // A coinbase-only body: out(R, r), excess r·G, overage -R.
        let crypto = ToyCrypto;
        let r = blind(3);
        let body = TransactionBody::new(
            vec![],
            vec![TransactionOutput::new(
                OutputFeatures::COINBASE_OUTPUT,
                crypto.commit_blinded(60, &r).unwrap(),
                RangeProof::default(),
            )],
            vec![kernel(crypto.commit_blinded(0, &r).unwrap(), 0)],
        );
        verify_kernel_sums(&crypto, &body, -60, &BlindingFactor::ZERO).unwrap();
        assert!(verify_kernel_sums(&crypto, &body, -59, &BlindingFactor::ZERO).is_err());
    }

    #[test]
    fn test_empty_body_balances() {
        let crypto = ToyCrypto;
        verify_kernel_sums(&crypto, &TransactionBody::default(), 0, &BlindingFactor::ZERO)
            .unwrap();
    }

    #[test]
    fn test_add_kernel_offsets_roundtrip() {
        let crypto = ToyCrypto;
        let a = blind(40);
        let b = blind(2);
        let sum = add_kernel_offsets(&crypto, &[a], &[b]).unwrap();
        assert_eq!(kernel_offset_delta(&crypto, &sum, &b).unwrap(), a);
    }

    #[test]
    fn test_offset_delta_of_equal_totals_is_zero() {
        let crypto = ToyCrypto;
        let a = blind(40);
        assert!(kernel_offset_delta(&crypto, &a, &a).unwrap().is_zero());
    }

    #[test]
    fn test_invalid_commitment_propagates() {
        let crypto = ToyCrypto;
        let body = TransactionBody::new(
            vec![],
            vec![TransactionOutput::new(
                OutputFeatures::PLAIN,
                ToyCrypto::INVALID,
                RangeProof::default(),
            )],
            vec![],
        );
        assert!(matches!(
            verify_kernel_sums(&crypto, &body, 0, &BlindingFactor::ZERO),
            Err(ValidationError::Commitment(_))
        ));
    }
}
