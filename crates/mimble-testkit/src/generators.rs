//! Proptest generators for property-based testing.
//!
//! Anything that builds real range proofs is slow; keep case counts low in
//! tests that use [`block_shape`].

use proptest::prelude::*;

use mimble_core::{
    BlindingFactor, Commitment, FullBlock, KernelFeatures, OutputFeatures, TransactionInput,
};
use mimble_crypto::blind_from_seed;

use crate::fixtures::TestFixture;

/// Generate a canonical blinding factor.
pub fn blinding_factor() -> impl Strategy<Value = BlindingFactor> {
    any::<[u8; 32]>().prop_map(|seed| blind_from_seed(&seed))
}

/// Generate arbitrary commitment bytes. Most are not valid points.
pub fn commitment_bytes() -> impl Strategy<Value = Commitment> {
    any::<[u8; 32]>().prop_map(Commitment::from_bytes)
}

pub fn output_features() -> impl Strategy<Value = OutputFeatures> {
    prop_oneof![Just(OutputFeatures::PLAIN), Just(OutputFeatures::COINBASE_OUTPUT)]
}

pub fn kernel_features() -> impl Strategy<Value = KernelFeatures> {
    prop_oneof![Just(KernelFeatures::PLAIN), Just(KernelFeatures::COINBASE_KERNEL)]
}

/// Generate inputs for a structural check: no proofs, arbitrary bytes.
pub fn inputs(max_len: usize) -> impl Strategy<Value = Vec<TransactionInput>> {
    prop::collection::vec(
        (output_features(), commitment_bytes())
            .prop_map(|(features, commitment)| TransactionInput::new(features, commitment)),
        0..=max_len,
    )
}

/// Amounts for a balanced one-kernel transaction.
#[derive(Debug, Clone)]
pub struct TxAmounts {
    pub inputs: Vec<u64>,
    pub outputs: Vec<u64>,
    pub fee: u64,
}

/// Generate amounts where `Σ inputs == Σ outputs + fee`.
pub fn tx_amounts() -> impl Strategy<Value = TxAmounts> {
    (
        prop::collection::vec(2u64..1_000_000, 1..=2),
        0u64..1_000,
        1u64..=2,
    )
        .prop_map(|(outputs, fee, input_count)| {
            let total: u64 = outputs.iter().sum::<u64>() + fee;
            let share = total / input_count;
            let mut inputs = vec![share; input_count as usize];
            if let Some(last) = inputs.last_mut() {
                *last += total - share * input_count;
            }
            TxAmounts {
                inputs,
                outputs,
                fee,
            }
        })
}

/// Parameters for generating a valid block.
#[derive(Debug, Clone)]
pub struct BlockShape {
    pub seed: [u8; 8],
    pub height: u64,
    pub tx_count: usize,
}

impl BlockShape {
    /// Build the block on a fixture-chosen previous offset.
    ///
    /// Returns the fixture (for further building), the block and the
    /// previous total kernel offset to validate it against.
    pub fn build(&self) -> (TestFixture, FullBlock, BlindingFactor) {
        let mut fixture = TestFixture::new(&self.seed);
        let previous = fixture.fresh_offset();
        let block = fixture.block(self.height, &previous, self.tx_count);
        (fixture, block, previous)
    }
}

/// Generate a small valid block shape.
pub fn block_shape() -> impl Strategy<Value = BlockShape> {
    (any::<[u8; 8]>(), 1u64..1_000_000, 0usize..=2).prop_map(|(seed, height, tx_count)| {
        BlockShape {
            seed,
            height,
            tx_count,
        }
    })
}
