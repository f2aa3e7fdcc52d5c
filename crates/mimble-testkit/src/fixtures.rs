//! Test fixtures and helpers.
//!
//! [`TestFixture`] builds transactions and blocks that pass every check.
//! Blinding factors come from the fixture's seed and an internal counter.
//!
//! Fixture methods panic on crypto failures; every blinding factor they use
//! is a canonical scalar, so those failures indicate a bug in the provider.

use std::sync::Arc;

use mimble_core::canonical::kernel_signature_message;
use mimble_core::consensus::REWARD;
use mimble_core::{
    add_kernel_offsets, BlindingFactor, BlockHeader, Crypto, FullBlock, KernelFeatures,
    OutputFeatures, Transaction, TransactionBody, TransactionInput, TransactionKernel,
    TransactionOutput,
};
use mimble_crypto::{blind_from_seed, DalekCrypto};
use mimble_store::MemoryTxHashSet;

/// Deterministic builder of valid transactions and blocks.
pub struct TestFixture {
    crypto: Arc<DalekCrypto>,
    seed: Vec<u8>,
    counter: u64,
}

impl TestFixture {
    /// Create a fixture whose values all derive from `seed`.
    pub fn new(seed: &[u8]) -> Self {
        Self {
            crypto: Arc::new(DalekCrypto::new()),
            seed: seed.to_vec(),
            counter: 0,
        }
    }

    /// Shared handle to the fixture's crypto provider.
    pub fn crypto(&self) -> Arc<DalekCrypto> {
        Arc::clone(&self.crypto)
    }

    /// The next blinding factor in this fixture's sequence.
    pub fn next_blind(&mut self) -> BlindingFactor {
        self.counter += 1;
        let mut material = self.seed.clone();
        material.extend_from_slice(&self.counter.to_le_bytes());
        blind_from_seed(&material)
    }

    /// A kernel offset, such as a previous block's total.
    pub fn fresh_offset(&mut self) -> BlindingFactor {
        self.next_blind()
    }

    /// An input spending an output of `value`, with its blinding factor.
    pub fn input(&mut self, value: u64) -> (TransactionInput, BlindingFactor) {
        let blind = self.next_blind();
        let commitment = self
            .crypto
            .commit_blinded(value, &blind)
            .expect("seeded blinds are canonical");
        (TransactionInput::new(OutputFeatures::PLAIN, commitment), blind)
    }

    /// An output of `value` with a real range proof, with its blinding
    /// factor.
    pub fn output(
        &mut self,
        features: OutputFeatures,
        value: u64,
    ) -> (TransactionOutput, BlindingFactor) {
        let blind = self.next_blind();
        let (commitment, proof) = self
            .crypto
            .prove_range(value, &blind)
            .expect("seeded blinds are canonical");
        (TransactionOutput::new(features, commitment, proof), blind)
    }

    /// A kernel signed with `excess_blind`.
    pub fn kernel(
        &self,
        features: KernelFeatures,
        fee: u64,
        lock_height: u64,
        excess_blind: &BlindingFactor,
    ) -> TransactionKernel {
        let message = kernel_signature_message(fee, lock_height);
        TransactionKernel {
            features,
            fee,
            lock_height,
            excess: self
                .crypto
                .excess_commitment(excess_blind)
                .expect("seeded blinds are canonical"),
            excess_sig: self
                .crypto
                .sign_kernel(excess_blind, &message)
                .expect("seeded blinds are canonical"),
        }
    }

    /// A one-kernel transaction with lock height 0.
    ///
    /// The transaction balances only if `Σ inputs == Σ outputs + fee`;
    /// unbalanced amounts are allowed so tests can build invalid ones.
    pub fn transaction(&mut self, inputs: &[u64], outputs: &[u64], fee: u64) -> Transaction {
        self.transaction_with_lock_height(inputs, outputs, fee, 0)
    }

    pub fn transaction_with_lock_height(
        &mut self,
        inputs: &[u64],
        outputs: &[u64],
        fee: u64,
        lock_height: u64,
    ) -> Transaction {
        let mut spent_blinds = Vec::with_capacity(inputs.len() + 1);
        let mut created_blinds = Vec::with_capacity(outputs.len());

        let mut body_inputs = Vec::with_capacity(inputs.len());
        for &value in inputs {
            let (input, blind) = self.input(value);
            body_inputs.push(input);
            spent_blinds.push(blind);
        }
        let mut body_outputs = Vec::with_capacity(outputs.len());
        for &value in outputs {
            let (output, blind) = self.output(OutputFeatures::PLAIN, value);
            body_outputs.push(output);
            created_blinds.push(blind);
        }

        // excess = Σ created − Σ spent − offset
        let offset = self.next_blind();
        spent_blinds.push(offset);
        let excess_blind = self
            .crypto
            .add_blinding_factors(&created_blinds, &spent_blinds)
            .expect("seeded blinds are canonical");
        let kernel = self.kernel(KernelFeatures::PLAIN, fee, lock_height, &excess_blind);

        Transaction::new(
            offset,
            TransactionBody::new(body_inputs, body_outputs, vec![kernel]).sorted(),
        )
    }

    /// A coinbase output of `value` and its matching kernel.
    pub fn coinbase(&mut self, value: u64) -> TransactionBody {
        let (output, blind) = self.output(OutputFeatures::COINBASE_OUTPUT, value);
        let kernel = self.kernel(KernelFeatures::COINBASE_KERNEL, 0, 0, &blind);
        TransactionBody::new(vec![], vec![output], vec![kernel])
    }

    /// A valid block at `height` holding `tx_count` transactions, built on a
    /// chain whose total kernel offset is `previous`.
    pub fn block(&mut self, height: u64, previous: &BlindingFactor, tx_count: usize) -> FullBlock {
        self.block_with_reward(height, previous, tx_count, REWARD)
    }

    /// Like [`block`](Self::block), but the coinbase claims `reward` plus
    /// fees instead of [`REWARD`] plus fees.
    pub fn block_with_reward(
        &mut self,
        height: u64,
        previous: &BlindingFactor,
        tx_count: usize,
        reward: u64,
    ) -> FullBlock {
        let txs = (0..tx_count as u64)
            .map(|i| self.transaction(&[100 + i], &[60, 38 + i], 2))
            .collect();
        self.assemble(height, previous, txs, reward)
    }

    /// A valid block at `height` aggregating `txs` and a coinbase.
    pub fn block_with(
        &mut self,
        height: u64,
        previous: &BlindingFactor,
        txs: Vec<Transaction>,
    ) -> FullBlock {
        self.assemble(height, previous, txs, REWARD)
    }

    /// A memory set holding every input of `block` as unspent.
    pub fn tx_hash_set_for(&self, block: &FullBlock) -> MemoryTxHashSet {
        block
            .body
            .inputs
            .iter()
            .fold(MemoryTxHashSet::new(), |set, input| {
                set.with_output(input.commitment)
            })
    }

    fn assemble(
        &mut self,
        height: u64,
        previous: &BlindingFactor,
        txs: Vec<Transaction>,
        reward: u64,
    ) -> FullBlock {
        let fees = txs
            .iter()
            .filter_map(Transaction::fee)
            .fold(0u64, u64::saturating_add);
        let offsets: Vec<BlindingFactor> = txs.iter().map(|tx| tx.offset).collect();

        let body = txs
            .into_iter()
            .fold(self.coinbase(reward.saturating_add(fees)), |body, tx| {
                body.merge(tx.body)
            });

        let total = add_kernel_offsets(self.crypto.as_ref(), &[*previous], &offsets)
            .expect("seeded blinds are canonical");
        FullBlock::new(
            BlockHeader::at_height(height).with_total_kernel_offset(total),
            body,
        )
    }
}
