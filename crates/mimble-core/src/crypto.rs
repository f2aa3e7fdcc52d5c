//! Cryptographic primitives and the provider interface.
//!
//! This crate never touches curve arithmetic. Everything that needs a group
//! operation goes through the [`Crypto`] trait; the hashing used for
//! canonical ordering and kernel messages is plain Blake3.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::types::{BlindingFactor, Commitment};

/// A 32-byte Blake3 hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Blake3Hash(pub [u8; 32]);

impl Blake3Hash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The zero hash (sentinel value).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Blake3Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake3({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Blake3Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Blake3Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Blake3Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte kernel signature, `R || s`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "sig_bytes")] pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The zero signature (invalid, used as placeholder).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

// serde only derives arrays up to 32 elements.
mod sig_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 64], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 64], D::Error> {
        let v: Vec<u8> = Deserialize::deserialize(d)?;
        v.try_into()
            .map_err(|v: Vec<u8>| D::Error::invalid_length(v.len(), &"64 bytes"))
    }
}

/// An opaque range proof attached to an output.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RangeProof(pub Bytes);

impl RangeProof {
    /// Wrap serialized proof bytes.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Proof length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the proof is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for RangeProof {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl fmt::Debug for RangeProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeProof({} bytes)", self.0.len())
    }
}

/// The cryptographic primitive provider.
///
/// Implementations own all elliptic-curve details. Every fallible operation
/// reports failure as a [`CoreError`]; validators turn that into a rejection,
/// never a panic.
pub trait Crypto: Send + Sync {
    /// Commit to `value` with a zero blinding factor.
    fn commit_transparent(&self, value: u64) -> Result<Commitment, CoreError>;

    /// Commit to `value` with the given blinding factor.
    ///
    /// `commit_blinded(0, offset)` is the commitment form of a kernel offset.
    fn commit_blinded(&self, value: u64, blind: &BlindingFactor) -> Result<Commitment, CoreError>;

    /// Compute `Σ positive − Σ negative`.
    ///
    /// Fails if any commitment does not decode to a valid group element.
    fn add_commitments(
        &self,
        positive: &[Commitment],
        negative: &[Commitment],
    ) -> Result<Commitment, CoreError>;

    /// Compute `Σ positive − Σ negative` over scalars mod the group order.
    fn add_blinding_factors(
        &self,
        positive: &[BlindingFactor],
        negative: &[BlindingFactor],
    ) -> Result<BlindingFactor, CoreError>;

    /// Verify a batch of range proofs, pairwise with their commitments.
    fn verify_range_proofs(
        &self,
        commitments: &[Commitment],
        proofs: &[RangeProof],
    ) -> Result<(), CoreError>;

    /// Verify a kernel signature, treating `excess` as the public key.
    fn verify_kernel_signature(
        &self,
        excess: &Commitment,
        message: &Blake3Hash,
        signature: &Signature,
    ) -> Result<(), CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_hash() {
        let h1 = Blake3Hash::hash(b"test data");
        let h2 = Blake3Hash::hash(b"test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, Blake3Hash::hash(b"different data"));
    }

    #[test]
    fn test_signature_serde_roundtrip() {
        let sig = Signature::from_bytes([0x17; 64]);
        let json = serde_json::to_string(&sig).unwrap();
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }

    #[test]
    fn test_signature_serde_rejects_short() {
        let json = serde_json::to_string(&vec![0u8; 10]).unwrap();
        assert!(serde_json::from_str::<Signature>(&json).is_err());
    }

    #[test]
    fn test_range_proof_len() {
        let proof = RangeProof::from_bytes(vec![1u8, 2, 3]);
        assert_eq!(proof.len(), 3);
        assert!(!proof.is_empty());
        assert!(RangeProof::default().is_empty());
        assert_eq!(format!("{:?}", proof), "RangeProof(3 bytes)");
    }
}
