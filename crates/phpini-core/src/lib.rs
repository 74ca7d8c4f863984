//! # phpini-core
//!
//! Core library for batch-configuring `php.ini` files.
//!
//! This library discovers PHP installations from glob patterns, makes sure
//! each one has a `php.ini` (seeding it from a shipped template when needed)
//! and rewrites the individual `key = value` and `extension=` lines requested
//! by a JSON configuration, leaving every other byte of the file untouched.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the phpini library
pub mod error {
    use std::path::PathBuf;

    /// Result type alias using `anyhow::Error`
    pub type Result<T> = anyhow::Result<T>;

    /// Domain failures callers may want to match on
    #[derive(Debug, thiserror::Error)]
    pub enum PhpIniError {
        /// A required top-level key is absent from the configuration file
        #[error("Missing required configuration key '{0}'")]
        MissingConfigKey(&'static str),

        /// A configuration entry is present but unusable
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        /// No `php.ini` and none of the base templates exist
        #[error("No php.ini found in {dir} and none of the base files exist: {candidates}")]
        NoBaseFile {
            /// Installation directory
            dir: PathBuf,
            /// Comma separated list of the candidate filenames tried
            candidates: String,
        },

        /// The PHP executable could not be located or run
        #[error("Failed to probe PHP in {dir}: {reason}")]
        ProbeFailed {
            /// Installation directory
            dir: PathBuf,
            /// What went wrong
            reason: String,
        },

        /// The probe ran but its output is not a `MAJOR.MINOR.PATCH` version
        #[error("Unrecognised PHP version output: '{0}'")]
        InvalidVersion(String),
    }
}

/// JSON configuration loading and validation
pub mod config;

/// Glob-based discovery of PHP installation directories
pub mod discovery;

/// PHP version probing
pub mod probe;

/// Seeding a missing `php.ini` from a base template
pub mod bootstrap;

/// Line-level patching of ini text
pub mod patch;

/// Per-installation orchestration
pub mod driver;
