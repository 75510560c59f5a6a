//! Application configuration.

use crate::error::{AppError, AppResult};
use ladder_pricer::PricerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config path when neither the CLI nor `LADDER_CONFIG` names one.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Position sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepConfig {
    /// Peak absolute position. Default: 40.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// Full sine periods over the sweep. Default: 1.
    #[serde(default = "default_cycles")]
    pub cycles: f64,
    /// Number of position updates (one frame each). Default: 120.
    #[serde(default = "default_frames")]
    pub frames: usize,
}

fn default_amplitude() -> f64 {
    40.0
}

fn default_cycles() -> f64 {
    1.0
}

fn default_frames() -> usize {
    120
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            amplitude: default_amplitude(),
            cycles: default_cycles(),
            frames: default_frames(),
        }
    }
}

/// Frame output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// JSON-lines output file. `None` writes to stdout.
    #[serde(default)]
    pub path: Option<String>,
}

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    #[serde(default)]
    pub pricer: PricerConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimConfig {
    /// Load configuration.
    ///
    /// Path precedence: `path` argument > `LADDER_CONFIG` env var >
    /// `config/default.toml`. A missing file falls back to defaults.
    pub fn load(path: Option<String>) -> AppResult<Self> {
        let config_path = path
            .or_else(|| std::env::var("LADDER_CONFIG").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        if Path::new(&config_path).exists() {
            tracing::info!(path = %config_path, "Loading configuration");
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.pricer.validate()?;
        if !self.sweep.amplitude.is_finite() || self.sweep.amplitude < 0.0 {
            return Err(AppError::Config(format!(
                "sweep.amplitude must be finite and non-negative, got {}",
                self.sweep.amplitude
            )));
        }
        if !self.sweep.cycles.is_finite() {
            return Err(AppError::Config(format!(
                "sweep.cycles must be finite, got {}",
                self.sweep.cycles
            )));
        }
        Ok(())
    }
}
