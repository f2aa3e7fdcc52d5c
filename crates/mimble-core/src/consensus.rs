//! Consensus parameters: block reward and weight limits.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Smallest units per coin.
pub const COIN: u64 = 1_000_000_000;

/// Reward for mining a block, excluding fees.
pub const REWARD: u64 = 60 * COIN;

/// Weight of an input when counted against the max block weight.
pub const BLOCK_INPUT_WEIGHT: u64 = 1;

/// Weight of an output when counted against the max block weight.
pub const BLOCK_OUTPUT_WEIGHT: u64 = 21;

/// Weight of a kernel when counted against the max block weight.
pub const BLOCK_KERNEL_WEIGHT: u64 = 3;

/// Total maximum block weight.
pub const MAX_BLOCK_WEIGHT: u64 = 40_000;

/// The protocol constants a validator runs against.
///
/// Defaults are mainnet values. Tests shrink the weight limit to exercise
/// the boundary without building thousands of outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusParams {
    pub reward: u64,
    pub block_input_weight: u64,
    pub block_output_weight: u64,
    pub block_kernel_weight: u64,
    pub max_block_weight: u64,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self {
            reward: REWARD,
            block_input_weight: BLOCK_INPUT_WEIGHT,
            block_output_weight: BLOCK_OUTPUT_WEIGHT,
            block_kernel_weight: BLOCK_KERNEL_WEIGHT,
            max_block_weight: MAX_BLOCK_WEIGHT,
        }
    }
}

impl ConsensusParams {
    /// Reject parameter sets no chain could run on.
    ///
    /// The reward feeds a signed overage, so it must fit in an `i64`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if i64::try_from(self.reward).is_err() {
            return Err(CoreError::ValueOverflow(format!(
                "reward {} does not fit in i64",
                self.reward
            )));
        }
        if self.block_input_weight == 0
            || self.block_output_weight == 0
            || self.block_kernel_weight == 0
        {
            return Err(CoreError::ValueOverflow("item weights must be non-zero".into()));
        }
        Ok(())
    }

    /// Weight of a body with the given item counts. Saturates instead of
    /// overflowing.
    pub fn body_weight(&self, inputs: usize, outputs: usize, kernels: usize) -> u64 {
        let count = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
        count(inputs)
            .saturating_mul(self.block_input_weight)
            .saturating_add(count(outputs).saturating_mul(self.block_output_weight))
            .saturating_add(count(kernels).saturating_mul(self.block_kernel_weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        ConsensusParams::default().validate().unwrap();
    }

    #[test]
    fn test_reward_must_fit_i64() {
        let params = ConsensusParams {
            reward: u64::MAX,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_weight_rejected() {
        let params = ConsensusParams {
            block_kernel_weight: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_body_weight() {
        let params = ConsensusParams::default();
        assert_eq!(params.body_weight(2, 2, 1), 2 + 42 + 3);
        assert_eq!(params.body_weight(0, 0, 0), 0);
        assert_eq!(params.body_weight(usize::MAX, usize::MAX, 1), u64::MAX);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: ConsensusParams = serde_json::from_str(r#"{"max_block_weight": 100}"#).unwrap();
        assert_eq!(params.max_block_weight, 100);
        assert_eq!(params.reward, REWARD);
    }
}
