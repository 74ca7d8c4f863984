//! PHP version probing
//!
//! The version is only used for logging, but a PHP binary that cannot report
//! one is treated as a broken installation and aborts the run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use anyhow::Context;

use crate::error::{PhpIniError, Result};

/// Executable name looked up inside an installation directory
pub const PHP_BINARY: &str = "php";

/// Inline script whose only output is the version string
const VERSION_SCRIPT: &str = "echo PHP_VERSION;";

/// Semantic version reported by a PHP binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
    /// Full version string as printed, e.g. `8.3.0-dev`
    pub raw: String,
}

impl FromStr for PhpVersion {
    type Err = PhpIniError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || PhpIniError::InvalidVersion(raw.to_string());

        let mut parts = raw.splitn(3, '.');
        let number = |digits: &str| -> std::result::Result<u32, PhpIniError> {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            digits.parse().map_err(|_| invalid())
        };

        let major = number(parts.next().ok_or_else(invalid)?)?;
        let minor = number(parts.next().ok_or_else(invalid)?)?;
        let rest = parts.next().ok_or_else(invalid)?;
        let patch_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let patch = number(&rest[..patch_len])?;

        if raw.contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            major,
            minor,
            patch,
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Probes PHP installations for their version
pub struct VersionProbe;

impl VersionProbe {
    /// Locate the PHP executable inside `dir`
    ///
    /// Uses the platform's executable lookup, so `php.exe` is found on
    /// Windows and an executable `php` elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if no executable PHP binary exists in `dir`.
    pub fn executable(dir: &Path) -> Result<PathBuf> {
        which::which_in(PHP_BINARY, Some(dir), dir).map_err(|e| {
            PhpIniError::ProbeFailed {
                dir: dir.to_path_buf(),
                reason: format!("no PHP executable found ({e})"),
            }
            .into()
        })
    }

    /// Run the PHP binary in `dir` and parse the version it reports
    ///
    /// # Errors
    ///
    /// Returns an error if the binary is missing, fails to run, exits
    /// unsuccessfully or prints something other than a version.
    pub fn probe(dir: &Path) -> Result<PhpVersion> {
        let php = Self::executable(dir)?;

        let output = Command::new(&php)
            .arg("-r")
            .arg(VERSION_SCRIPT)
            .output()
            .with_context(|| format!("Failed to run {}", php.display()))?;

        if !output.status.success() {
            return Err(PhpIniError::ProbeFailed {
                dir: dir.to_path_buf(),
                reason: format!("{} exited with {}", php.display(), output.status),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout.parse::<PhpVersion>()?;

        tracing::debug!(php = %php.display(), version = %version, "Probed PHP version");

        Ok(version)
    }
}
