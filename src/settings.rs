//! # Settings Module
//!
//! ## Purpose
//! Run configuration of the explorer: where the species cache and the exported tables
//! live, the temperature of the calculation, the politeness delay between NIST requests,
//! the reactions file and whether the NIST lookup is used at all.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "cache_path": "data/raw/nist_species_cache.json",
//!   "output_dir": "data/processed",
//!   "temperature_k": 298.15,
//!   "sleep_seconds": 0.8,
//!   "reactions_file": null,
//!   "offline": false,
//!   "phase": "gas"
//! }
//! ```
//! Missing keys take their default values; a missing file gives the default configuration.

use crate::Thermodynamics::DBhandlers::NIST_parser::Phase;
use crate::Thermodynamics::units::T_REF;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// default name of the configuration file
pub const CONFIG_FILE: &str = "thermo_explorer_config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// species cache file
    pub cache_path: String,
    /// directory of reaction_thermo.csv, delta_g.csv, spont.csv
    pub output_dir: String,
    pub temperature_k: f64,
    /// minimum delay between two NIST requests
    pub sleep_seconds: f64,
    /// one reaction per line; None means the built-in list
    pub reactions_file: Option<String>,
    /// no NIST lookups: cache and fallback table only
    pub offline: bool,
    pub phase: Phase,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            cache_path: "data/raw/nist_species_cache.json".to_string(),
            output_dir: "data/processed".to_string(),
            temperature_k: T_REF,
            sleep_seconds: 0.8,
            reactions_file: None,
            offline: false,
            phase: Phase::Gas,
        }
    }
}

impl ExplorerConfig {
    /// Loads configuration from a JSON file. A missing file gives the default configuration,
    /// an unreadable or invalid one is an error.
    pub fn load(config_file: &str) -> Result<Self, ConfigError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: ExplorerConfig = serde_json::from_str(&content)?;
            config.validate()?;
            info!("configuration loaded from '{}'", config_file);
            Ok(config)
        } else {
            Ok(ExplorerConfig::default())
        }
    }

    /// like `load`, but any problem falls back to defaults with a warning
    pub fn load_or_default(config_file: &str) -> Self {
        Self::load(config_file).unwrap_or_else(|e| {
            warn!("{}; using default configuration", e);
            ExplorerConfig::default()
        })
    }

    pub fn save(&self, config_file: &str) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.temperature_k.is_finite() || self.temperature_k < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "temperature_k = {}",
                self.temperature_k
            )));
        }
        if !self.sleep_seconds.is_finite() || self.sleep_seconds < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sleep_seconds = {}",
                self.sleep_seconds
            )));
        }
        Ok(())
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_secs_f64(self.sleep_seconds.max(0.0))
    }
}
