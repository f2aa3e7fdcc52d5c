//! In-memory implementation of the TxHashSet trait.
//!
//! Population goes through inherent methods; the trait itself is read-only.
//! Spending and block application belong to the chain, not to this set.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use mimble_core::Commitment;

use crate::error::{Result, StoreError};
use crate::traits::TxHashSet;

/// In-memory UTXO and kernel set. Thread-safe via RwLock.
pub struct MemoryTxHashSet {
    inner: RwLock<MemoryTxHashSetInner>,
}

#[derive(Default)]
struct MemoryTxHashSetInner {
    /// Commitments of unspent outputs.
    unspent: HashSet<Commitment>,

    /// Excesses of every included kernel.
    kernels: HashSet<Commitment>,

    /// Leaves appended to the output MMR; spending does not shrink it.
    output_mmr_size: u64,

    kernel_mmr_size: u64,
}

impl MemoryTxHashSet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryTxHashSetInner::default()),
        }
    }

    /// Builder-style [`add_output`](Self::add_output).
    pub fn with_output(mut self, commitment: Commitment) -> Self {
        self.inner_mut().push_output(commitment);
        self
    }

    /// Builder-style [`add_kernel`](Self::add_kernel).
    pub fn with_kernel(mut self, excess: Commitment) -> Self {
        self.inner_mut().push_kernel(excess);
        self
    }

    /// Append an unspent output.
    pub fn add_output(&self, commitment: Commitment) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.push_output(commitment);
        Ok(())
    }

    /// Append a kernel.
    pub fn add_kernel(&self, excess: Commitment) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.push_kernel(excess);
        Ok(())
    }

    /// Exclusive access through ownership; no other thread holds the lock.
    fn inner_mut(&mut self) -> &mut MemoryTxHashSetInner {
        self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryTxHashSetInner {
    fn push_output(&mut self, commitment: Commitment) {
        self.unspent.insert(commitment);
        self.output_mmr_size += 1;
    }

    fn push_kernel(&mut self, excess: Commitment) {
        self.kernels.insert(excess);
        self.kernel_mmr_size += 1;
    }
}

impl Default for MemoryTxHashSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TxHashSet for MemoryTxHashSet {
    fn is_unspent(&self, commitment: &Commitment) -> Result<bool> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.unspent.contains(commitment))
    }

    fn contains_kernel(&self, excess: &Commitment) -> Result<bool> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.kernels.contains(excess))
    }

    fn output_mmr_size(&self) -> Result<u64> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.output_mmr_size)
    }

    fn kernel_mmr_size(&self) -> Result<u64> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.kernel_mmr_size)
    }
}
