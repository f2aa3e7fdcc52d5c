//! # Mimble
//!
//! Mimblewimble block and transaction validation.
//!
//! ## Overview
//!
//! A block is valid when:
//!
//! - **Body**: it is within the weight limit, canonically sorted, fully
//!   cut-through, and every range proof and kernel signature verifies
//! - **Lock heights**: no kernel is locked above the block's height
//! - **Coinbase**: coinbase outputs commit to exactly the reward plus fees
//! - **Balance**: outputs minus inputs minus the reward equal the kernel
//!   excesses plus the block's kernel offset
//!
//! Header MMR roots are not yet checked; [`BlockVerdict`] reports this as
//! [`MmrValidation::NotEnforced`] instead of hiding it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mimble::{BlindingFactor, BlockValidator, DalekCrypto, MemoryTxHashSet, ValidatorConfig};
//!
//! let validator = BlockValidator::new(
//!     Arc::new(DalekCrypto::new()),
//!     Arc::new(MemoryTxHashSet::new()),
//!     ValidatorConfig::default(),
//! );
//!
//! // let block: FullBlock = ...;
//! // let verdict = validator.validate_block(&block, &previous_total_offset)?;
//! ```
//!
//! ## Re-exports
//!
//! - `mimble::core` - Data model, canonical hashing, body validation
//! - `mimble::crypto` - The Ristretto `Crypto` provider
//! - `mimble::store` - The read-only chain-state handle

pub mod config;
pub mod error;
pub mod validator;

// Re-export component crates
pub use mimble_core as core;
pub use mimble_crypto as crypto;
pub use mimble_store as store;

pub use config::ValidatorConfig;
pub use error::{MimbleError, Result};
pub use validator::{BlockValidator, BlockVerdict, MmrValidation};

// Re-export commonly used types
pub use mimble_core::{
    validate_transaction, BlindingFactor, BlockHeader, Commitment, ConsensusParams, Crypto,
    ErrorCategory, FullBlock, Transaction, TransactionBody, ValidationError,
};
pub use mimble_crypto::DalekCrypto;
pub use mimble_store::{MemoryTxHashSet, TxHashSet};
