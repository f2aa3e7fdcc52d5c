//! Strong type definitions for commitments and blinding factors.
//!
//! Both are opaque 32-byte newtypes. Arithmetic on them is delegated to a
//! [`Crypto`](crate::crypto::Crypto) provider; this module only knows bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Pedersen commitment `v·H + r·G` in compressed form.
///
/// Ordering and equality are by exact bytes. Two commitments to the same
/// value with different blinding factors are unrelated as far as this type
/// is concerned.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Commitment(pub [u8; 32]);

impl Commitment {
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

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Commitment {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A scalar blinding factor, little-endian, reduced mod the group order.
///
/// Used as the per-output secret and, summed over a chain, as the header's
/// total kernel offset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlindingFactor(pub [u8; 32]);

impl BlindingFactor {
    /// The zero scalar.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the zero scalar.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for BlindingFactor {
    fn default() -> Self {
        Self::ZERO
    }
}

// Never print secret material in full.
impl fmt::Debug for BlindingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlindingFactor({}..)", &self.to_hex()[..8])
    }
}

impl From<[u8; 32]> for BlindingFactor {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_hex_roundtrip() {
        let c = Commitment::from_bytes([0x42; 32]);
        let recovered = Commitment::from_hex(&c.to_hex()).unwrap();
        assert_eq!(c, recovered);
    }

    #[test]
    fn test_commitment_hex_wrong_length() {
        assert!(Commitment::from_hex("abcd").is_err());
    }

    #[test]
    fn test_commitment_display() {
        let c = Commitment::from_bytes([0xab; 32]);
        assert_eq!(format!("{}", c), "abababababababab");
    }

    #[test]
    fn test_commitment_ordering_is_bytewise() {
        let mut low = [0u8; 32];
        let mut high = [0u8; 32];
        low[0] = 1;
        high[0] = 2;
        assert!(Commitment(low) < Commitment(high));
    }

    #[test]
    fn test_blinding_factor_zero() {
        assert!(BlindingFactor::ZERO.is_zero());
        assert!(BlindingFactor::default().is_zero());
        assert!(!BlindingFactor::from_bytes([1; 32]).is_zero());
    }

    #[test]
    fn test_blinding_factor_debug_is_truncated() {
        let debug = format!("{:?}", BlindingFactor::from_bytes([0xcd; 32]));
        assert_eq!(debug, "BlindingFactor(cdcdcdcd..)");
    }
}
