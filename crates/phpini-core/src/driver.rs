//! Per-installation orchestration
//!
//! Installations are configured strictly one after another, in discovery
//! order. The first failure stops the run; installations already written
//! keep their changes.

mod executor;
mod reporting;

use std::path::{Path, PathBuf};

use anyhow::Context;

pub use executor::IniWriter;
pub use reporting::RunReporter;

use crate::bootstrap::IniBootstrapper;
use crate::config::Config;
use crate::discovery::InstallationDiscovery;
use crate::error::Result;
use crate::patch::{ExtensionOutcome, IniPatcher, PatchReport, SettingOutcome};
use crate::probe::{PhpVersion, VersionProbe};

/// Function used to determine the PHP version of an installation
pub type ProbeFn = fn(&Path) -> Result<PhpVersion>;

/// What happened to one installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationReport {
    /// Installation directory
    pub path: PathBuf,
    /// Version reported by its PHP binary
    pub version: PhpVersion,
    /// The `php.ini` that was configured
    pub ini: PathBuf,
    /// Whether the ini had to be created from a base file
    ///
    /// In a dry run the copy is only planned, not performed.
    pub seeded: bool,
    /// Whether patched text was written to disk
    pub written: bool,
    /// Per-directive outcomes
    pub patch: PatchReport,
}

impl InstallationReport {
    /// Whether any directive changed the ini text
    #[must_use]
    pub const fn modified(&self) -> bool {
        self.patch.modified
    }
}

/// Directive outcome counts across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Extensions uncommented
    pub extensions_enabled: usize,
    /// Extensions that were already active
    pub extensions_present: usize,
    /// Extensions absent from the ini
    pub extensions_missing: usize,
    /// Settings whose active line was rewritten
    pub settings_updated: usize,
    /// Settings inserted below their commented line
    pub settings_inserted: usize,
    /// Settings that already had the desired value
    pub settings_unchanged: usize,
    /// Settings absent from the ini
    pub settings_missing: usize,
}

/// Result of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Configured installations, in processing order
    pub installations: Vec<InstallationReport>,
    /// Whether the run was a dry run
    pub dry_run: bool,
}

impl RunReport {
    /// Number of ini files created (or, in a dry run, to be created) from a base file
    #[must_use]
    pub fn seeded_count(&self) -> usize {
        self.installations.iter().filter(|i| i.seeded).count()
    }

    /// Number of ini files written back
    #[must_use]
    pub fn written_count(&self) -> usize {
        self.installations.iter().filter(|i| i.written).count()
    }

    /// Directive outcome counts across all installations
    #[must_use]
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for installation in &self.installations {
            for ext in &installation.patch.extensions {
                match ext.outcome {
                    ExtensionOutcome::Enabled { .. } => totals.extensions_enabled += 1,
                    ExtensionOutcome::AlreadyEnabled => totals.extensions_present += 1,
                    ExtensionOutcome::NotFound => totals.extensions_missing += 1,
                }
            }
            for setting in &installation.patch.settings {
                match setting.outcome {
                    SettingOutcome::Updated { .. } => totals.settings_updated += 1,
                    SettingOutcome::Inserted => totals.settings_inserted += 1,
                    SettingOutcome::Unchanged => totals.settings_unchanged += 1,
                    SettingOutcome::NotFound => totals.settings_missing += 1,
                }
            }
        }
        totals
    }
}

/// Main configuration driver
pub struct Driver<'a> {
    config: &'a Config,
    discovery: InstallationDiscovery,
    writer: IniWriter,
    probe: ProbeFn,
    dry_run: bool,
}

impl<'a> Driver<'a> {
    /// Create a new driver
    ///
    /// # Errors
    ///
    /// Returns an error if a path pattern fails to compile.
    pub fn new(config: &'a Config, dry_run: bool) -> Result<Self> {
        let discovery = InstallationDiscovery::new(&config.paths)
            .context("Failed to compile installation path patterns")?;

        Ok(Self {
            config,
            discovery,
            writer: IniWriter::new(dry_run),
            probe: VersionProbe::probe,
            dry_run,
        })
    }

    /// Use a different version probe
    #[must_use]
    pub fn with_probe(mut self, probe: ProbeFn) -> Self {
        self.probe = probe;
        self
    }

    /// Configure every discovered installation
    ///
    /// # Errors
    ///
    /// Returns the first installation failure; later installations are not
    /// attempted.
    pub fn run(&self) -> Result<RunReport> {
        let mut report = RunReport {
            installations: Vec::new(),
            dry_run: self.dry_run,
        };

        for dir in self.discovery.installations() {
            let installation = self
                .configure(&dir)
                .with_context(|| format!("Failed to configure {}", dir.display()))?;
            report.installations.push(installation);
        }

        if report.installations.is_empty() {
            tracing::warn!("No PHP installations matched the configured paths");
        }

        Ok(report)
    }

    /// Configure a single installation directory
    ///
    /// # Errors
    ///
    /// Returns an error if probing, bootstrapping, reading or writing fails.
    pub fn configure(&self, dir: &Path) -> Result<InstallationReport> {
        let version = (self.probe)(dir)?;
        tracing::info!(path = %dir.display(), version = %version, "Configuring PHP installation");

        let ini = IniBootstrapper::locate(dir, &self.config.base)?;
        self.writer.seed(&ini)?;
        let text = self.writer.read(&ini)?;

        let patched = IniPatcher::from_config(self.config).patch(text, dir);
        Self::log_outcomes(&patched.report);

        let written = patched.report.modified && !self.dry_run;
        if patched.report.modified {
            self.writer.write(ini.path(), &patched.text)?;
        } else {
            tracing::info!(path = %ini.path().display(), "php.ini already up to date");
        }

        Ok(InstallationReport {
            path: dir.to_path_buf(),
            version,
            ini: ini.path().to_path_buf(),
            seeded: ini.is_seeded(),
            written,
            patch: patched.report,
        })
    }

    fn log_outcomes(report: &PatchReport) {
        for ext in &report.extensions {
            match &ext.outcome {
                ExtensionOutcome::Enabled { module } => {
                    tracing::info!(extension = %ext.name, module = %module, "Enabled extension");
                }
                ExtensionOutcome::AlreadyEnabled => {
                    tracing::debug!(extension = %ext.name, "Extension already enabled");
                }
                ExtensionOutcome::NotFound => {
                    tracing::info!(extension = %ext.name, "Extension not found in php.ini");
                }
            }
        }

        for setting in &report.settings {
            match &setting.outcome {
                SettingOutcome::Updated { previous } => tracing::info!(
                    setting = %setting.name,
                    value = %setting.value,
                    previous = %previous,
                    "Updated setting"
                ),
                SettingOutcome::Inserted => tracing::info!(
                    setting = %setting.name,
                    value = %setting.value,
                    "Set previously commented setting"
                ),
                SettingOutcome::Unchanged => {
                    tracing::debug!(setting = %setting.name, "Setting already up to date");
                }
                SettingOutcome::NotFound => {
                    tracing::info!(setting = %setting.name, "Setting not found in php.ini");
                }
            }
        }
    }
}
