//! Configuration validation and error reporting

use super::types::Config;
use crate::error::{PhpIniError, Result};
use crate::patch::reads_back;

fn invalid(message: impl Into<String>) -> anyhow::Error {
    PhpIniError::InvalidConfig(message.into()).into()
}

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern, filename, setting name or extension
    /// name is empty, or a setting would not fit on a single ini line or
    /// would not read back as written.
    pub fn validate(config: &Config) -> Result<()> {
        if config.paths.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("Path pattern cannot be empty"));
        }

        if config.base.iter().any(|b| b.trim().is_empty()) {
            return Err(invalid("Base filename cannot be empty"));
        }

        for (name, value) in config.settings.iter() {
            if name.trim().is_empty() {
                return Err(invalid("Setting name cannot be empty"));
            }
            if name.contains(['=', ';', '\n', '\r']) || name.trim() != name {
                return Err(invalid(format!("Setting name '{name}' contains a reserved character")));
            }
            if value.contains(['\n', '\r']) {
                return Err(invalid(format!("Value of setting '{name}' spans multiple lines")));
            }
            if !reads_back(value) {
                return Err(invalid(format!(
                    "Value of setting '{name}' would not read back unchanged: \
                     remove surrounding whitespace or wrap it in double quotes"
                )));
            }
        }

        for (idx, name) in config.extensions.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(invalid(format!("Extension #{} has an empty name", idx + 1)));
            }
        }

        Ok(())
    }
}
