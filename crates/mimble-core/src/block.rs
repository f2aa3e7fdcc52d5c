//! Block header and full block.

use serde::{Deserialize, Serialize};

use crate::canonical::header_bytes;
use crate::crypto::Blake3Hash;
use crate::transaction::TransactionBody;
use crate::types::BlindingFactor;

/// Current header version.
pub const HEADER_VERSION: u16 = 1;

/// Block header.
///
/// The MMR roots are carried for completeness; nothing in this workspace
/// checks them yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: u16,
    pub height: u64,
    /// Hash of the previous header.
    pub previous: Blake3Hash,
    /// Unix seconds.
    pub timestamp: i64,
    pub output_root: Blake3Hash,
    pub range_proof_root: Blake3Hash,
    pub kernel_root: Blake3Hash,
    /// Sum of every kernel offset from genesis up to and including this block.
    pub total_kernel_offset: BlindingFactor,
}

impl BlockHeader {
    /// A header at `height` with zeroed metadata.
    pub fn at_height(height: u64) -> Self {
        Self {
            version: HEADER_VERSION,
            height,
            previous: Blake3Hash::ZERO,
            timestamp: 0,
            output_root: Blake3Hash::ZERO,
            range_proof_root: Blake3Hash::ZERO,
            kernel_root: Blake3Hash::ZERO,
            total_kernel_offset: BlindingFactor::ZERO,
        }
    }

    /// Builder-style setter for the accumulated kernel offset.
    pub fn with_total_kernel_offset(mut self, offset: BlindingFactor) -> Self {
        self.total_kernel_offset = offset;
        self
    }

    /// Blake3 over the canonical header bytes.
    pub fn hash(&self) -> Blake3Hash {
        Blake3Hash::hash(&header_bytes(self))
    }
}

/// A header plus the cut-through body of every transaction in the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullBlock {
    pub header: BlockHeader,
    pub body: TransactionBody,
}

impl FullBlock {
    pub fn new(header: BlockHeader, body: TransactionBody) -> Self {
        Self { header, body }
    }

    pub fn height(&self) -> u64 {
        self.header.height
    }

    pub fn hash(&self) -> Blake3Hash {
        self.header.hash()
    }
}
