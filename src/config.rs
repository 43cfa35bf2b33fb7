//! Configuration management for the ledger

use crate::error::LedgerError;
use crate::ledger::{DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Required count of leading zero hex digits in a sealed block's hash.
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    /// Amount credited to the miner per sealed block.
    #[serde(default = "default_mining_reward")]
    pub mining_reward: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            difficulty: default_difficulty(),
            mining_reward: default_mining_reward(),
        }
    }
}

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

fn default_mining_reward() -> u64 {
    DEFAULT_MINING_REWARD
}

/// Loads configuration from a TOML file, falling back to defaults when the
/// file is absent or empty.
pub fn load_config(path: &Path) -> Result<LedgerConfig, LedgerError> {
    let config_str = fs::read_to_string(path).unwrap_or_default();
    let config: LedgerConfig = if config_str.is_empty() {
        LedgerConfig::default()
    } else {
        toml::from_str(&config_str).map_err(|e| LedgerError::ConfigError(e.to_string()))?
    };

    // Validate critical values
    if config.difficulty == 0 {
        return Err(LedgerError::ConfigError(
            "difficulty must be at least 1".to_string(),
        ));
    }
    if config.difficulty > 64 {
        return Err(LedgerError::ConfigError(
            "difficulty cannot exceed the 64 hex digits of a SHA-256 hash".to_string(),
        ));
    }
    if config.mining_reward == 0 {
        return Err(LedgerError::ConfigError(
            "mining_reward must be positive".to_string(),
        ));
    }

    Ok(config)
}
