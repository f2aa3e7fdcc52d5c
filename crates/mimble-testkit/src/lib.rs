//! # Mimble Testkit
//!
//! Testing utilities for Mimble validation.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Build valid, canonically sorted transactions and blocks
//!   with real Bulletproofs and kernel signatures
//! - **Generators**: Proptest strategies for property-based testing
//! - **Mutations**: Single-field corruptions every valid block must fail on
//!
//! ## Test Fixtures
//!
//! Every value a fixture produces is derived from its seed, so a failing
//! test reproduces exactly:
//!
//! ```rust
//! use mimble_core::BlindingFactor;
//! use mimble_testkit::TestFixture;
//!
//! let mut fixture = TestFixture::new(b"doc");
//! let tx = fixture.transaction(&[50], &[48], 2);
//! let block = fixture.block_with(1, &BlindingFactor::ZERO, vec![tx]);
//! assert_eq!(block.body.outputs.len(), 2);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use mimble_testkit::generators::{block_shape, BlockShape};
//!
//! proptest! {
//!     #[test]
//!     fn valid_blocks_validate(shape in block_shape()) {
//!         let (fixture, block, previous) = shape.build();
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod mutations;

pub use fixtures::TestFixture;
