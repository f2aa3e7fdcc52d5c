//! # Mimble Core
//!
//! Pure primitives for validating a Mimblewimble-style confidential ledger:
//! commitments, transaction bodies, canonical hashing, and the body and
//! balance checks every block and transaction must pass.
//!
//! This crate contains no I/O, no storage, and no curve arithmetic. Group
//! operations, range proofs and signatures are provided by an implementation
//! of the [`Crypto`] trait.
//!
//! ## Key Types
//!
//! - [`TransactionBody`] - Inputs, outputs and kernels in canonical order
//! - [`Transaction`] - A body plus its kernel offset
//! - [`FullBlock`] - A header plus the merged body of a block
//! - [`TransactionBodyValidator`] - Weight, order, cut-through, proofs, signatures
//!
//! ## Balance
//!
//! See the [`commitment`] module for the sum every body must satisfy.

pub mod block;
pub mod canonical;
pub mod commitment;
pub mod consensus;
pub mod crypto;
pub mod error;
pub mod transaction;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

pub use block::{BlockHeader, FullBlock};
pub use commitment::{add_kernel_offsets, kernel_offset_delta, sum_commitments, verify_kernel_sums};
pub use consensus::ConsensusParams;
pub use crypto::{Blake3Hash, Crypto, RangeProof, Signature};
pub use error::{Collection, CoreError, ErrorCategory, ValidationError};
pub use transaction::{
    Hashed, KernelFeatures, OutputFeatures, Transaction, TransactionBody, TransactionInput,
    TransactionKernel, TransactionOutput,
};
pub use types::{BlindingFactor, Commitment};
pub use validation::{validate_transaction, verify_no_coinbase, TransactionBodyValidator};
