//! Canonical CBOR encoding for deterministic hashing.
//!
//! Inputs, outputs, kernels and headers are hashed over their canonical
//! bytes, and those hashes define the sort order a valid body must follow.
//! The encoding follows RFC 8949 Core Deterministic Encoding:
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - Map keys sorted by encoded byte comparison
//! - No floats

use ciborium::value::Value;

use crate::block::BlockHeader;
use crate::crypto::Blake3Hash;
use crate::transaction::{TransactionInput, TransactionKernel, TransactionOutput};

/// Domain separator for kernel signature messages.
pub const KERNEL_SIG_DOMAIN: &[u8] = b"mimble/kernel-sig/v1";

/// Header field keys (integer keys for compact encoding).
mod keys {
    pub const VERSION: u64 = 0;
    pub const HEIGHT: u64 = 1;
    pub const PREVIOUS: u64 = 2;
    pub const TIMESTAMP: u64 = 3;
    pub const OUTPUT_ROOT: u64 = 4;
    pub const RANGE_PROOF_ROOT: u64 = 5;
    pub const KERNEL_ROOT: u64 = 6;
    pub const TOTAL_KERNEL_OFFSET: u64 = 7;
}

/// Canonical bytes identifying an input: `[features, commitment]`.
pub fn input_bytes(input: &TransactionInput) -> Vec<u8> {
    encode_cbor_value_canonical(&Value::Array(vec![
        Value::Integer(input.features.bits().into()),
        Value::Bytes(input.commitment.0.to_vec()),
    ]))
}

/// Canonical bytes identifying an output: `[features, commitment]`.
///
/// The range proof is not part of an output's identity.
pub fn output_bytes(output: &TransactionOutput) -> Vec<u8> {
    encode_cbor_value_canonical(&Value::Array(vec![
        Value::Integer(output.features.bits().into()),
        Value::Bytes(output.commitment.0.to_vec()),
    ]))
}

/// Canonical bytes of a kernel, signature included.
pub fn kernel_bytes(kernel: &TransactionKernel) -> Vec<u8> {
    encode_cbor_value_canonical(&Value::Array(vec![
        Value::Integer(kernel.features.bits().into()),
        Value::Integer(kernel.fee.into()),
        Value::Integer(kernel.lock_height.into()),
        Value::Bytes(kernel.excess.0.to_vec()),
        Value::Bytes(kernel.excess_sig.0.to_vec()),
    ]))
}

/// Canonical bytes of a block header.
pub fn header_bytes(header: &BlockHeader) -> Vec<u8> {
    let entries = vec![
        (
            Value::Integer(keys::VERSION.into()),
            Value::Integer(header.version.into()),
        ),
        (
            Value::Integer(keys::HEIGHT.into()),
            Value::Integer(header.height.into()),
        ),
        (
            Value::Integer(keys::PREVIOUS.into()),
            Value::Bytes(header.previous.0.to_vec()),
        ),
        (
            Value::Integer(keys::TIMESTAMP.into()),
            Value::Integer(header.timestamp.into()),
        ),
        (
            Value::Integer(keys::OUTPUT_ROOT.into()),
            Value::Bytes(header.output_root.0.to_vec()),
        ),
        (
            Value::Integer(keys::RANGE_PROOF_ROOT.into()),
            Value::Bytes(header.range_proof_root.0.to_vec()),
        ),
        (
            Value::Integer(keys::KERNEL_ROOT.into()),
            Value::Bytes(header.kernel_root.0.to_vec()),
        ),
        (
            Value::Integer(keys::TOTAL_KERNEL_OFFSET.into()),
            Value::Bytes(header.total_kernel_offset.0.to_vec()),
        ),
    ];
    encode_cbor_value_canonical(&Value::Map(entries))
}

/// The message a kernel signs: `Blake3(domain || [fee, lock_height])`.
pub fn kernel_signature_message(fee: u64, lock_height: u64) -> Blake3Hash {
    let mut buf = KERNEL_SIG_DOMAIN.to_vec();
    buf.extend(encode_cbor_value_canonical(&Value::Array(vec![
        Value::Integer(fee.into()),
        Value::Integer(lock_height.into()),
    ])));
    Blake3Hash::hash(&buf)
}

fn encode_cbor_value_canonical(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Array(arr) => encode_array(buf, arr),
        Value::Map(entries) => encode_map_canonical(buf, entries),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        // Only the variants above are built in this module.
        _ => buf.push(0xf7),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item);
    }
}

/// Encode a map with keys sorted by their encoded bytes.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}
