//! Block validation.
//!
//! [`BlockValidator`] layers the block-only rules on top of the shared body
//! checks: kernel lock heights, coinbase issuance, and the balance equation
//! with the block's share of the accumulated kernel offset.

use std::sync::Arc;

use mimble_core::commitment::{kernel_offset_delta, verify_kernel_sums};
use mimble_core::{
    BlindingFactor, Commitment, Crypto, FullBlock, Transaction, TransactionBodyValidator,
    ValidationError,
};
use mimble_store::TxHashSet;

use crate::config::ValidatorConfig;

/// Whether the header's MMR roots and sizes were checked against chain
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmrValidation {
    /// The roots were not checked. A block accepted with this verdict is
    /// valid in every other respect.
    NotEnforced,
}

/// Outcome of a successful [`BlockValidator::validate_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockVerdict {
    pub mmr: MmrValidation,
}

impl BlockVerdict {
    /// Whether every consensus rule, MMR roots included, was enforced.
    pub fn is_complete(&self) -> bool {
        self.mmr != MmrValidation::NotEnforced
    }
}

/// Validates full blocks against the consensus rules.
///
/// Stateless apart from shared handles: one instance can validate any
/// number of blocks from any number of threads.
pub struct BlockValidator<C: Crypto, S: TxHashSet> {
    crypto: Arc<C>,
    tx_hash_set: Arc<S>,
    config: ValidatorConfig,
}

impl<C: Crypto, S: TxHashSet> BlockValidator<C, S> {
    pub fn new(crypto: Arc<C>, tx_hash_set: Arc<S>, config: ValidatorConfig) -> Self {
        Self {
            crypto,
            tx_hash_set,
            config,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn crypto(&self) -> &C {
        &self.crypto
    }

    /// Validate a block, stopping at the first failed rule.
    ///
    /// `previous_kernel_offset` is the total kernel offset of the block this
    /// one builds on; the caller owns chain state and supplies it.
    pub fn validate_block(
        &self,
        block: &FullBlock,
        previous_kernel_offset: &BlindingFactor,
    ) -> Result<BlockVerdict, ValidationError> {
        let crypto = self.crypto.as_ref();
        let params = &self.config.consensus;

        TransactionBodyValidator::new(crypto, params).validate(&block.body, true)?;
        self.verify_kernel_lock_heights(block)?;
        self.verify_coinbase(block)?;

        let block_offset = kernel_offset_delta(
            crypto,
            &block.header.total_kernel_offset,
            previous_kernel_offset,
        )?;
        let overage = i64::try_from(params.reward)
            .map(|reward| -reward)
            .map_err(|_| ValidationError::RewardOverflow)?;
        verify_kernel_sums(crypto, &block.body, overage, &block_offset)?;

        Ok(BlockVerdict {
            mmr: self.validate_mmrs(block),
        })
    }

    /// Boolean form of [`validate_block`](Self::validate_block).
    pub fn is_block_valid(
        &self,
        block: &FullBlock,
        previous_kernel_offset: &BlindingFactor,
    ) -> bool {
        match self.validate_block(block, previous_kernel_offset) {
            Ok(_) => true,
            Err(e) => {
                if self.config.log_rejections {
                    tracing::warn!(
                        height = block.height(),
                        block = %block.hash(),
                        category = ?e.category(),
                        error = %e,
                        "block rejected"
                    );
                }
                false
            }
        }
    }

    /// No kernel may be locked above the block's height.
    pub fn verify_kernel_lock_heights(&self, block: &FullBlock) -> Result<(), ValidationError> {
        let height = block.height();
        match block.body.kernels.iter().find(|k| k.lock_height > height) {
            Some(kernel) => {
                tracing::debug!(
                    lock_height = kernel.lock_height,
                    height,
                    "kernel locked above block"
                );
                Err(ValidationError::LockHeight {
                    lock_height: kernel.lock_height,
                    height,
                })
            }
            None => Ok(()),
        }
    }

    /// Coinbase outputs must commit to exactly the reward plus all fees,
    /// blinded by the coinbase kernel excesses.
    pub fn verify_coinbase(&self, block: &FullBlock) -> Result<(), ValidationError> {
        let reward = block
            .body
            .fee()
            .and_then(|fees| self.config.consensus.reward.checked_add(fees))
            .ok_or(ValidationError::RewardOverflow)?;

        let coinbase_outputs: Vec<Commitment> = block
            .body
            .outputs
            .iter()
            .filter(|o| o.is_coinbase())
            .map(|o| o.commitment)
            .collect();
        let mut coinbase_kernels: Vec<Commitment> = block
            .body
            .kernels
            .iter()
            .filter(|k| k.is_coinbase())
            .map(|k| k.excess)
            .collect();
        coinbase_kernels.push(
            self.crypto
                .commit_transparent(reward)
                .map_err(ValidationError::Commitment)?,
        );

        let out_sum = self
            .crypto
            .add_commitments(&coinbase_outputs, &[])
            .map_err(ValidationError::Commitment)?;
        let kernel_sum = self
            .crypto
            .add_commitments(&coinbase_kernels, &[])
            .map_err(ValidationError::Commitment)?;

        if out_sum != kernel_sum {
            tracing::debug!(
                outputs = coinbase_outputs.len(),
                kernels = coinbase_kernels.len() - 1,
                reward,
                "coinbase sum mismatch"
            );
            return Err(ValidationError::CoinbaseSumMismatch);
        }
        Ok(())
    }

    /// Validate a standalone transaction with this validator's parameters.
    pub fn validate_transaction(&self, tx: &Transaction) -> Result<(), ValidationError> {
        mimble_core::validate_transaction(self.crypto.as_ref(), &self.config.consensus, tx)
    }

    /// Header MMR roots and sizes against the UTXO and kernel sets.
    ///
    /// Not enforced yet. The verdict says so, and the current MMR sizes are
    /// logged so the gap shows up next to each block.
    pub fn validate_mmrs(&self, block: &FullBlock) -> MmrValidation {
        let output_mmr_size = self.tx_hash_set.output_mmr_size().ok();
        let kernel_mmr_size = self.tx_hash_set.kernel_mmr_size().ok();
        tracing::debug!(
            height = block.height(),
            ?output_mmr_size,
            ?kernel_mmr_size,
            "MMR validation not enforced"
        );
        MmrValidation::NotEnforced
    }
}
