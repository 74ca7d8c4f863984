//! Configuration file loading and validation
//!
//! This module handles:
//! - Reading the JSON configuration file
//! - Checking that every required key is present (no defaulting)
//! - Validation and error reporting

mod types;
mod validation;


use std::fs;
use std::path::Path;

use anyhow::Context;

pub use types::{Config, PATH_PLACEHOLDER, RawConfig, Settings};
pub use validation::ConfigValidator;

use crate::error::Result;

/// Default configuration filename, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "configure.json";

/// Configuration loader that coordinates reading, parsing and validation
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate the configuration at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON,
    /// lacks one of the required keys or contains empty entries.
    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            patterns = config.paths.len(),
            settings = config.settings.len(),
            extensions = config.extensions.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a key is missing or an
    /// entry is invalid.
    pub fn parse(content: &str) -> Result<Config> {
        let raw: RawConfig = serde_json::from_str(content).context("Malformed JSON")?;
        let config = Config::try_from(raw)?;

        ConfigValidator::validate(&config)?;

        Ok(config)
    }
}
