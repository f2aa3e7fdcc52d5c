//! Transaction inputs, outputs, kernels and bodies.
//!
//! A [`TransactionBody`] is the unit both validators work on: a standalone
//! [`Transaction`] wraps one with its kernel offset, and a
//! [`FullBlock`](crate::block::FullBlock) wraps one with a header.

use serde::{Deserialize, Serialize};

use crate::canonical::{input_bytes, kernel_bytes, kernel_signature_message, output_bytes};
use crate::crypto::{Blake3Hash, RangeProof, Signature};
use crate::types::{BlindingFactor, Commitment};

/// Feature flags carried by an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OutputFeatures(u8);

impl OutputFeatures {
    /// No flags.
    pub const PLAIN: Self = Self(0b0000_0000);
    /// Output created by a block's coinbase.
    pub const COINBASE_OUTPUT: Self = Self(0b0000_0001);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Whether every flag in `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Feature flags carried by a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KernelFeatures(u8);

impl KernelFeatures {
    /// No flags.
    pub const PLAIN: Self = Self(0b0000_0000);
    /// Kernel matching a coinbase output.
    pub const COINBASE_KERNEL: Self = Self(0b0000_0001);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Whether every flag in `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Anything with a canonical hash. The hash defines sort order in a body.
pub trait Hashed {
    fn hash(&self) -> Blake3Hash;
}

/// A reference to a previously created output, by commitment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionInput {
    pub features: OutputFeatures,
    pub commitment: Commitment,
}

impl TransactionInput {
    pub fn new(features: OutputFeatures, commitment: Commitment) -> Self {
        Self {
            features,
            commitment,
        }
    }
}

impl Hashed for TransactionInput {
    fn hash(&self) -> Blake3Hash {
        Blake3Hash::hash(&input_bytes(self))
    }
}

/// A newly created output: a commitment and the proof that its value is
/// in range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub features: OutputFeatures,
    pub commitment: Commitment,
    pub proof: RangeProof,
}

impl TransactionOutput {
    pub fn new(features: OutputFeatures, commitment: Commitment, proof: RangeProof) -> Self {
        Self {
            features,
            commitment,
            proof,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.features.contains(OutputFeatures::COINBASE_OUTPUT)
    }
}

impl Hashed for TransactionOutput {
    fn hash(&self) -> Blake3Hash {
        Blake3Hash::hash(&output_bytes(self))
    }
}

/// Proof that a transaction's commitments sum to zero value.
///
/// `excess` is the net blinding imbalance, and therefore a public key; the
/// signature over `(fee, lock_height)` proves knowledge of its secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionKernel {
    pub features: KernelFeatures,
    pub fee: u64,
    /// The kernel is not valid in a block below this height.
    pub lock_height: u64,
    pub excess: Commitment,
    pub excess_sig: Signature,
}

impl TransactionKernel {
    /// The message `excess_sig` must sign.
    pub fn signature_message(&self) -> Blake3Hash {
        kernel_signature_message(self.fee, self.lock_height)
    }

    pub fn is_coinbase(&self) -> bool {
        self.features.contains(KernelFeatures::COINBASE_KERNEL)
    }
}

impl Hashed for TransactionKernel {
    fn hash(&self) -> Blake3Hash {
        Blake3Hash::hash(&kernel_bytes(self))
    }
}

/// Inputs, outputs and kernels of a transaction or of a whole block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub kernels: Vec<TransactionKernel>,
}

impl TransactionBody {
    /// Create a body from its parts, as given. Call [`sort`](Self::sort) to
    /// put it in canonical order.
    pub fn new(
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        kernels: Vec<TransactionKernel>,
    ) -> Self {
        Self {
            inputs,
            outputs,
            kernels,
        }
    }

    /// Sort every collection by canonical hash.
    pub fn sort(&mut self) {
        self.inputs.sort_by_cached_key(Hashed::hash);
        self.outputs.sort_by_cached_key(Hashed::hash);
        self.kernels.sort_by_cached_key(Hashed::hash);
    }

    /// Builder-style [`sort`](Self::sort).
    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    /// Merge another body into this one, keeping canonical order.
    pub fn merge(mut self, other: TransactionBody) -> Self {
        self.inputs.extend(other.inputs);
        self.outputs.extend(other.outputs);
        self.kernels.extend(other.kernels);
        self.sorted()
    }

    /// Total fee of all kernels, or `None` on overflow.
    pub fn fee(&self) -> Option<u64> {
        self.kernels
            .iter()
            .try_fold(0u64, |acc, k| acc.checked_add(k.fee))
    }

    /// The highest kernel lock height, 0 for a body without kernels.
    pub fn lock_height(&self) -> u64 {
        self.kernels.iter().map(|k| k.lock_height).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty() && self.kernels.is_empty()
    }
}

/// A standalone transaction: a body plus the kernel offset split off its
/// excess.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub offset: BlindingFactor,
    pub body: TransactionBody,
}

impl Transaction {
    pub fn new(offset: BlindingFactor, body: TransactionBody) -> Self {
        Self { offset, body }
    }

    /// Total fee, or `None` on overflow.
    pub fn fee(&self) -> Option<u64> {
        self.body.fee()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commitment(b: u8) -> Commitment {
        Commitment::from_bytes([b; 32])
    }

    fn kernel(fee: u64, lock_height: u64) -> TransactionKernel {
        TransactionKernel {
            features: KernelFeatures::PLAIN,
            fee,
            lock_height,
            excess: commitment(fee as u8),
            excess_sig: Signature::ZERO,
        }
    }

    #[test]
    fn test_feature_flags() {
        assert!(OutputFeatures::COINBASE_OUTPUT.contains(OutputFeatures::COINBASE_OUTPUT));
        assert!(!OutputFeatures::PLAIN.contains(OutputFeatures::COINBASE_OUTPUT));
        assert!(OutputFeatures::PLAIN.contains(OutputFeatures::PLAIN));
        assert!(KernelFeatures::from_bits(0b11).contains(KernelFeatures::COINBASE_KERNEL));
    }

    #[test]
    fn test_sort_orders_by_hash() {
        let body = TransactionBody::new(
            (1..=5)
                .map(|b| TransactionInput::new(OutputFeatures::PLAIN, commitment(b)))
                .collect(),
            vec![],
            vec![],
        )
        .sorted();

        for pair in body.inputs.windows(2) {
            assert!(pair[0].hash() < pair[1].hash());
        }
    }

    #[test]
    fn test_fee_and_lock_height() {
        let body = TransactionBody::new(vec![], vec![], vec![kernel(2, 10), kernel(3, 4)]);
        assert_eq!(body.fee(), Some(5));
        assert_eq!(body.lock_height(), 10);
        assert_eq!(TransactionBody::default().lock_height(), 0);
    }

    #[test]
    fn test_fee_overflow() {
        let body = TransactionBody::new(vec![], vec![], vec![kernel(u64::MAX, 0), kernel(1, 0)]);
        assert_eq!(body.fee(), None);
    }

    #[test]
    fn test_merge_keeps_order() {
        let a = TransactionBody::new(
            vec![TransactionInput::new(OutputFeatures::PLAIN, commitment(9))],
            vec![],
            vec![kernel(1, 0)],
        );
        let b = TransactionBody::new(
            vec![TransactionInput::new(OutputFeatures::PLAIN, commitment(3))],
            vec![],
            vec![kernel(2, 0)],
        );
        let merged = a.merge(b);
        assert_eq!(merged.inputs.len(), 2);
        assert_eq!(merged.kernels.len(), 2);
        assert!(merged.inputs[0].hash() < merged.inputs[1].hash());
        assert!(merged.kernels[0].hash() < merged.kernels[1].hash());
    }

    #[test]
    fn test_kernel_hash_covers_lock_height() {
        let a = kernel(2, 1);
        let mut b = a.clone();
        b.lock_height = 2;
        assert_ne!(a.hash(), b.hash());
        assert_ne!(a.signature_message(), b.signature_message());
    }

    #[test]
    fn test_coinbase_predicates() {
        let out = TransactionOutput::new(
            OutputFeatures::COINBASE_OUTPUT,
            commitment(1),
            RangeProof::default(),
        );
        assert!(out.is_coinbase());
        let mut k = kernel(0, 0);
        assert!(!k.is_coinbase());
        k.features = KernelFeatures::COINBASE_KERNEL;
        assert!(k.is_coinbase());
    }
}
