//! # Mimble Store
//!
//! The chain-state handle block validation reads from.
//!
//! ## Overview
//!
//! [`TxHashSet`] is the read-only view of the UTXO set and kernel set, with
//! their MMR sizes. Validators hold it behind an `Arc` and never write to it;
//! applying blocks is the chain's job. [`MemoryTxHashSet`] keeps everything
//! in memory and is what tests and fixtures use.
//!
//! ## Usage
//!
//! ```rust
//! use mimble_core::Commitment;
//! use mimble_store::{MemoryTxHashSet, TxHashSet};
//!
//! let commitment = Commitment::from_bytes([7u8; 32]);
//! let set = MemoryTxHashSet::new().with_output(commitment);
//! assert!(set.is_unspent(&commitment).unwrap());
//! assert_eq!(set.output_mmr_size().unwrap(), 1);
//! ```

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryTxHashSet;
pub use traits::TxHashSet;
