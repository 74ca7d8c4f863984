//! Line-level patching of ini text
//!
//! The patcher never parses the ini format as a whole. Each directive is a
//! small matcher run over the text line by line, and at most one line is
//! changed (or one line inserted) per directive:
//!
//! - extensions: an active `extension=` line wins, otherwise the first
//!   commented one is uncommented
//! - settings: the first active `key = value` line is updated, otherwise a
//!   new line is added below the first commented one
//!
//! Directives the text does not mention in any form are reported as
//! [`ExtensionOutcome::NotFound`] / [`SettingOutcome::NotFound`] and skipped,
//! so the tool only configures what the template already knows about.
//!
//! Text is raw bytes, so comments in any encoding pass through untouched.
//! It is threaded through the directives by value; the `modified` flag of
//! the resulting [`PatchReport`] says whether it differs from the input.

mod extension;
mod lines;
mod setting;

#[cfg(test)]
mod integration_tests;

use std::fmt;
use std::path::Path;

pub use setting::reads_back;

use crate::config::{Config, PATH_PLACEHOLDER, Settings};

/// Result of an extension activation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionOutcome {
    /// An active `extension=` line already loads the module
    AlreadyEnabled,
    /// A commented line was uncommented
    Enabled {
        /// Module identifier as spelled in the file
        module: String,
    },
    /// Neither an active nor a commented line mentions the module
    NotFound,
}

impl ExtensionOutcome {
    /// Whether the text was changed
    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

/// Result of a setting assignment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingOutcome {
    /// The active line already holds the desired value
    Unchanged,
    /// The active line was rewritten
    Updated {
        /// Value found on the line before rewriting
        previous: String,
    },
    /// A new line was added below the commented one
    Inserted,
    /// Neither an active nor a commented line mentions the setting
    NotFound,
}

impl SettingOutcome {
    /// Whether the text was changed
    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(self, Self::Updated { .. } | Self::Inserted)
    }
}

impl fmt::Display for ExtensionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyEnabled => f.write_str("already enabled"),
            Self::Enabled { module } => write!(f, "enabled ({module})"),
            Self::NotFound => f.write_str("not found"),
        }
    }
}

impl fmt::Display for SettingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => f.write_str("unchanged"),
            Self::Updated { previous } => write!(f, "updated (was '{previous}')"),
            Self::Inserted => f.write_str("inserted"),
            Self::NotFound => f.write_str("not found"),
        }
    }
}

/// Outcome of one extension directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionReport {
    /// Requested extension name
    pub name: String,
    /// What happened
    pub outcome: ExtensionOutcome,
}

/// Outcome of one setting directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingReport {
    /// Setting name
    pub name: String,
    /// Desired value after placeholder substitution
    pub value: String,
    /// What happened
    pub outcome: SettingOutcome,
}

/// Per-directive outcomes for one ini file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Extension directives, in request order
    pub extensions: Vec<ExtensionReport>,
    /// Setting directives, in request order
    pub settings: Vec<SettingReport>,
    /// Whether any directive changed the text
    pub modified: bool,
}

/// Patched text together with what was done to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// Resulting ini text
    pub text: Vec<u8>,
    /// Per-directive outcomes
    pub report: PatchReport,
}

/// Replace every [`PATH_PLACEHOLDER`] in `value` with `dir`
#[must_use]
pub fn substitute_placeholder(value: &str, dir: &Path) -> String {
    value.replace(PATH_PLACEHOLDER, &dir.display().to_string())
}

/// Applies the configured extensions and settings to ini text
#[derive(Debug, Clone, Copy)]
pub struct IniPatcher<'a> {
    extensions: &'a [String],
    settings: &'a Settings,
}

impl<'a> IniPatcher<'a> {
    /// Create a patcher for the given directives
    #[must_use]
    pub const fn new(extensions: &'a [String], settings: &'a Settings) -> Self {
        Self {
            extensions,
            settings,
        }
    }

    /// Create a patcher for the directives of a configuration
    #[must_use]
    pub fn from_config(config: &'a Config) -> Self {
        Self::new(&config.extensions, &config.settings)
    }

    /// Apply every directive to `text` for the installation at `install_dir`
    ///
    /// Extensions are applied first, then settings, each in configuration
    /// order. `{PATH}` in setting values is replaced with `install_dir`.
    #[must_use]
    pub fn patch(&self, text: Vec<u8>, install_dir: &Path) -> Patched {
        let mut report = PatchReport::default();

        let text = self.extensions.iter().fold(text, |text, name| {
            let (text, outcome) = extension::enable(text, name);
            report.modified |= outcome.is_change();
            report.extensions.push(ExtensionReport {
                name: name.clone(),
                outcome,
            });
            text
        });

        let text = self.settings.iter().fold(text, |text, (name, raw)| {
            let value = substitute_placeholder(raw, install_dir);
            let (text, outcome) = setting::assign(text, name, &value);
            report.modified |= outcome.is_change();
            report.settings.push(SettingReport {
                name: name.to_string(),
                value,
                outcome,
            });
            text
        });

        Patched { text, report }
    }
}
