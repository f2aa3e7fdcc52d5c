//! Transaction body validation: weight, ordering, cut-through, range proofs
//! and kernel signatures.

use std::collections::HashSet;

use crate::commitment::verify_kernel_sums;
use crate::consensus::ConsensusParams;
use crate::crypto::{Crypto, RangeProof};
use crate::error::{Collection, ValidationError};
use crate::transaction::{
    Hashed, Transaction, TransactionBody, TransactionKernel, TransactionOutput,
};
use crate::types::Commitment;

/// Validates a transaction body in isolation. Holds only borrows.
pub struct TransactionBodyValidator<'a, C: Crypto + ?Sized> {
    crypto: &'a C,
    params: &'a ConsensusParams,
}

impl<'a, C: Crypto + ?Sized> TransactionBodyValidator<'a, C> {
    pub fn new(crypto: &'a C, params: &'a ConsensusParams) -> Self {
        Self { crypto, params }
    }

    /// Run every body check, stopping at the first failure.
    ///
    /// With `with_reward` the body is weighed as a block: one extra output
    /// and one extra kernel are reserved for the reward.
    pub fn validate(
        &self,
        body: &TransactionBody,
        with_reward: bool,
    ) -> Result<(), ValidationError> {
        self.validate_weight(body, with_reward)?;
        self.verify_sorted(body)?;
        self.verify_cut_through(body)?;
        self.verify_outputs(&body.outputs)?;
        self.verify_kernels(&body.kernels)?;
        Ok(())
    }

    /// Boolean form of [`validate`](Self::validate).
    pub fn is_valid(&self, body: &TransactionBody, with_reward: bool) -> bool {
        self.validate(body, with_reward).is_ok()
    }

    /// Verify the body is not too big in terms of inputs, outputs and kernels.
    pub fn validate_weight(
        &self,
        body: &TransactionBody,
        with_reward: bool,
    ) -> Result<(), ValidationError> {
        let reserve = usize::from(with_reward);
        let weight = self.params.body_weight(
            body.inputs.len(),
            body.outputs.len().saturating_add(reserve),
            body.kernels.len().saturating_add(reserve),
        );

        if weight > self.params.max_block_weight {
            tracing::debug!(weight, max = self.params.max_block_weight, "body too heavy");
            return Err(ValidationError::TooHeavy {
                weight,
                max: self.params.max_block_weight,
            });
        }
        Ok(())
    }

    /// Each collection must be strictly ascending by hash. Strictness also
    /// rejects duplicates.
    pub fn verify_sorted(&self, body: &TransactionBody) -> Result<(), ValidationError> {
        verify_sort_order(&body.inputs, Collection::Inputs)?;
        verify_sort_order(&body.outputs, Collection::Outputs)?;
        verify_sort_order(&body.kernels, Collection::Kernels)?;
        Ok(())
    }

    /// Verify that no input spends an output created in the same body.
    pub fn verify_cut_through(&self, body: &TransactionBody) -> Result<(), ValidationError> {
        let commitments: HashSet<&Commitment> =
            body.outputs.iter().map(|o| &o.commitment).collect();

        match body
            .inputs
            .iter()
            .find(|i| commitments.contains(&i.commitment))
        {
            Some(input) => {
                tracing::debug!(commitment = %input.commitment, "cut-through violation");
                Err(ValidationError::CutThrough(input.commitment))
            }
            None => Ok(()),
        }
    }

    /// Verify all range proofs in one batched call.
    pub fn verify_outputs(&self, outputs: &[TransactionOutput]) -> Result<(), ValidationError> {
        let commitments: Vec<Commitment> = outputs.iter().map(|o| o.commitment).collect();
        let proofs: Vec<RangeProof> = outputs.iter().map(|o| o.proof.clone()).collect();

        self.crypto
            .verify_range_proofs(&commitments, &proofs)
            .map_err(|e| {
                tracing::debug!(error = %e, count = outputs.len(), "range proof batch rejected");
                ValidationError::InvalidRangeProof
            })
    }

    /// Verify each kernel signature with its excess as the public key.
    ///
    /// Kernels are checked one at a time; there is no batch verification.
    pub fn verify_kernels(&self, kernels: &[TransactionKernel]) -> Result<(), ValidationError> {
        for (index, kernel) in kernels.iter().enumerate() {
            let message = kernel.signature_message();
            if let Err(e) =
                self.crypto
                    .verify_kernel_signature(&kernel.excess, &message, &kernel.excess_sig)
            {
                tracing::debug!(index, error = %e, "kernel signature rejected");
                return Err(ValidationError::InvalidKernelSignature { index });
            }
        }
        Ok(())
    }
}

fn verify_sort_order<T: Hashed>(
    items: &[T],
    collection: Collection,
) -> Result<(), ValidationError> {
    let hashes: Vec<_> = items.iter().map(Hashed::hash).collect();
    match hashes.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => {
            tracing::debug!(%collection, index, "sort order violated");
            Err(ValidationError::Unsorted { collection, index })
        }
        None => Ok(()),
    }
}

/// A standalone transaction may not mint: no coinbase outputs or kernels.
pub fn verify_no_coinbase(body: &TransactionBody) -> Result<(), ValidationError> {
    if body.outputs.iter().any(TransactionOutput::is_coinbase)
        || body.kernels.iter().any(TransactionKernel::is_coinbase)
    {
        return Err(ValidationError::CoinbaseInTransaction);
    }
    Ok(())
}

/// Validate a standalone transaction.
///
/// Body checks as for a block without the reward reservation, then the
/// balance equation with the fee as overage and the transaction's own
/// offset.
pub fn validate_transaction<C: Crypto + ?Sized>(
    crypto: &C,
    params: &ConsensusParams,
    tx: &Transaction,
) -> Result<(), ValidationError> {
    TransactionBodyValidator::new(crypto, params).validate(&tx.body, false)?;
    verify_no_coinbase(&tx.body)?;

    let fee = tx
        .fee()
        .and_then(|f| i64::try_from(f).ok())
        .ok_or(ValidationError::FeeOverflow)?;
    verify_kernel_sums(crypto, &tx.body, fee, &tx.offset)
}
