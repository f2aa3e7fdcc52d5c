//! # Mimble Crypto
//!
//! The concrete [`Crypto`](mimble_core::Crypto) provider for Mimble
//! validation, built on Ristretto.
//!
//! - **Commitments**: Pedersen `v·H + r·G` with the Bulletproofs generators
//! - **Range proofs**: 64-bit Bulletproofs, one per output
//! - **Kernel signatures**: Schnorr with the excess as public key
//!
//! Validators only need [`DalekCrypto`] through the trait. The signing and
//! proving helpers exist for wallets and test fixtures that build valid
//! transactions.
//!
//! ```rust,no_run
//! use mimble_core::Crypto;
//! use mimble_crypto::{blind_from_seed, DalekCrypto};
//!
//! let crypto = DalekCrypto::new();
//! let blind = blind_from_seed(b"output-0");
//! let (commitment, proof) = crypto.prove_range(1_000, &blind).unwrap();
//! crypto.verify_range_proofs(&[commitment], &[proof]).unwrap();
//! ```

pub mod keys;
pub mod provider;
pub mod schnorr;

pub use keys::{blind_from_scalar, blind_from_seed, random_blind, scalar_from_blind};
pub use provider::{DalekCrypto, RANGE_PROOF_BITS};
