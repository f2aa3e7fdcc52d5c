//! TxHashSet trait: the read-only view of chain state.

use mimble_core::Commitment;

use crate::error::Result;

/// Read-only access to the UTXO set, the kernel set and their MMR sizes.
///
/// Implementations must be safe to share across threads; several validators
/// may read the same set concurrently.
pub trait TxHashSet: Send + Sync {
    /// Whether an output with this commitment exists and is unspent.
    fn is_unspent(&self, commitment: &Commitment) -> Result<bool>;

    /// Whether a kernel with this excess has been included in the chain.
    fn contains_kernel(&self, excess: &Commitment) -> Result<bool>;

    /// Number of leaves ever appended to the output MMR, spent or not.
    fn output_mmr_size(&self) -> Result<u64>;

    /// Number of leaves in the kernel MMR.
    fn kernel_mmr_size(&self) -> Result<u64>;
}
