//! Single-field corruptions of a valid block.
//!
//! Each mutation returns a copy with its body back in canonical order
//! where the change moved a hash, so the check that fails is the one the
//! mutation targets rather than the sort check.

use mimble_core::{FullBlock, OutputFeatures, TransactionInput};

/// Flip one bit of one output's range proof.
pub fn flip_range_proof_bit(block: &FullBlock, output: usize, byte: usize, bit: u8) -> FullBlock {
    let mut block = block.clone();
    let target = &mut block.body.outputs[output];
    let mut bytes = target.proof.as_bytes().to_vec();
    let byte = byte % bytes.len();
    bytes[byte] ^= 1 << (bit % 8);
    target.proof = bytes.into();
    block
}

/// Flip one bit of one kernel's signature.
pub fn flip_signature_bit(block: &FullBlock, kernel: usize, byte: usize, bit: u8) -> FullBlock {
    let mut block = block.clone();
    block.body.kernels[kernel].excess_sig.0[byte % 64] ^= 1 << (bit % 8);
    block.body.sort();
    block
}

/// Change one kernel's lock height without re-signing.
pub fn change_lock_height(block: &FullBlock, kernel: usize, lock_height: u64) -> FullBlock {
    let mut block = block.clone();
    block.body.kernels[kernel].lock_height = lock_height;
    block.body.sort();
    block
}

/// Swap two items of the output list, breaking canonical order.
pub fn swap_outputs(block: &FullBlock, a: usize, b: usize) -> FullBlock {
    let mut block = block.clone();
    block.body.outputs.swap(a, b);
    block
}

/// Swap two items of the kernel list, breaking canonical order.
pub fn swap_kernels(block: &FullBlock, a: usize, b: usize) -> FullBlock {
    let mut block = block.clone();
    block.body.kernels.swap(a, b);
    block
}

/// Add an input spending one of the block's own outputs.
pub fn spend_own_output(block: &FullBlock, output: usize) -> FullBlock {
    let mut block = block.clone();
    let commitment = block.body.outputs[output].commitment;
    block
        .body
        .inputs
        .push(TransactionInput::new(OutputFeatures::PLAIN, commitment));
    block.body.sort();
    block
}

/// Append a copy of an output, so the list holds a duplicate.
pub fn duplicate_output(block: &FullBlock, output: usize) -> FullBlock {
    let mut block = block.clone();
    let copy = block.body.outputs[output].clone();
    block.body.outputs.push(copy);
    block.body.sort();
    block
}
