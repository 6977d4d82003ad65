//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults for the requested profile (Serialized)
//! 2. Config file (`wikiracer.toml`, or an explicit path)
//! 3. Environment variables (WIKIRACER_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{SearchConfig, TuningProfile};
use crate::types::{Result, WikiError};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain:
    /// profile defaults → config file → env vars.
    pub fn load(path: Option<&Path>, profile: TuningProfile) -> Result<SearchConfig> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(SearchConfig::for_profile(profile)));

        let file = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);
        if file.exists() {
            debug!("Loading config from: {}", file.display());
            figment = figment.merge(Toml::file(&file));
        }

        // e.g. WIKIRACER_MAX_PER_ROUND=250 -> max_per_round
        figment = figment.merge(Env::prefixed("WIKIRACER_").lowercase(true));

        let config: SearchConfig = figment
            .extract()
            .map_err(|e| WikiError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Default config file location (working directory).
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("wikiracer.toml")
    }
}
