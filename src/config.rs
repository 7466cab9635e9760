use eyre::{Context, Result};
use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// width of a trace address in bits
pub const ADDRESS_BITS: u32 = u64::BITS;
/// the sets are allocated up front, so the set index can't be arbitrarily wide
pub const MAX_SET_INDEX_BITS: u32 = 24;

/// the geometry of the simulated cache
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// number of sets is `2^set_index_bits`
    pub set_index_bits: u32,
    /// lines per set
    pub associativity: usize,
    /// block size is `2^block_offset_bits` bytes
    pub block_offset_bits: u32,
}

impl CacheConfig {
    pub fn new(set_index_bits: u32, associativity: usize, block_offset_bits: u32) -> Self {
        Self {
            set_index_bits,
            associativity,
            block_offset_bits,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.associativity == 0 {
            return Err(SimError::InvalidConfiguration(
                "associativity must be at least 1".to_string(),
            ));
        }
        let used_bits = self.set_index_bits as u64 + self.block_offset_bits as u64;
        if used_bits > ADDRESS_BITS as u64 {
            return Err(SimError::InvalidConfiguration(format!(
                "set index bits ({}) plus block offset bits ({}) exceed the {ADDRESS_BITS}-bit address",
                self.set_index_bits, self.block_offset_bits
            )));
        }
        if self.set_index_bits > MAX_SET_INDEX_BITS {
            return Err(SimError::InvalidConfiguration(format!(
                "set index bits ({}) above the supported maximum of {MAX_SET_INDEX_BITS}",
                self.set_index_bits
            )));
        }
        Ok(())
    }

    /// only meaningful for a validated config
    pub fn num_sets(&self) -> usize {
        1 << self.set_index_bits
    }
}

/// the config of a whole run, as read from a toml file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub cache: CacheConfig,
    /// the trace to replay
    #[serde(default)]
    pub trace: Option<PathBuf>,
    /// print the outcome of every instruction
    #[serde(default)]
    pub verbose: bool,
    /// where to save the json report
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl Config {
    pub fn from_config_file(config_file: &str) -> Result<Config> {
        let config_file = fs::read_to_string(config_file).wrap_err("cannot read config file")?;
        let config: Config =
            toml::from_str(&config_file).wrap_err("cannot deserialize to Config")?;
        Ok(config)
    }

    pub fn show_config(&self) -> Result<()> {
        let config = serde_json::to_string_pretty(self).wrap_err("cannot serialize Config")?;
        tracing::info!("config:\n{config}");
        Ok(())
    }
}
