//! Validator configuration, loadable from JSON.

use std::path::Path;

use mimble_core::ConsensusParams;
use serde::{Deserialize, Serialize};

use crate::error::{MimbleError, Result};

/// Configuration for a [`BlockValidator`](crate::BlockValidator).
///
/// Missing fields take their defaults, so `{}` is a valid config:
///
/// ```json
/// {
///   "consensus": { "max_block_weight": 40000 },
///   "log_rejections": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Reward and weight limits.
    pub consensus: ConsensusParams,
    /// Whether `is_block_valid` logs each rejection at warn level.
    pub log_rejections: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            consensus: ConsensusParams::default(),
            log_rejections: true,
        }
    }
}

impl ValidatorConfig {
    /// Parse and check a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and check a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded validator config");
        Ok(config)
    }

    /// Builder-style override of the consensus parameters.
    pub fn with_consensus(mut self, consensus: ConsensusParams) -> Self {
        self.consensus = consensus;
        self
    }

    /// Builder-style override of rejection logging.
    pub fn with_log_rejections(mut self, log_rejections: bool) -> Self {
        self.log_rejections = log_rejections;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.consensus
            .validate()
            .map_err(|e| MimbleError::Config(e.to_string()))
    }
}
