use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::common::{CoreMode, SimError, SimResult, DEFAULT_CORES};

const DEFAULT_TICK_MS: u64 = 1000;
const DEFAULT_MAX_CYCLES: u64 = 20;
const DEFAULT_CASHIERS: usize = 4;

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl Config {
    /// Reads, parses and validates a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML configuration text.
    pub fn from_toml_str(content: &str) -> SimResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.pipeline.cores == 0 {
            return Err(SimError::InvalidConfig(
                "pipeline.cores must be at least 1".to_string(),
            ));
        }
        if self.pipeline.max_cycles == 0 {
            return Err(SimError::InvalidConfig(
                "pipeline.max_cycles must be at least 1".to_string(),
            ));
        }
        if self.checkout.cashiers == 0 {
            return Err(SimError::InvalidConfig(
                "checkout.cashiers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace: bool,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl GeneralConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub mode: CoreMode,

    #[serde(default = "default_cores")]
    pub cores: usize,

    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: CoreMode::Single,
            cores: DEFAULT_CORES,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CheckoutConfig {
    #[serde(default = "default_cashiers")]
    pub cashiers: usize,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            cashiers: DEFAULT_CASHIERS,
        }
    }
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

fn default_cores() -> usize {
    DEFAULT_CORES
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_cashiers() -> usize {
    DEFAULT_CASHIERS
}
