//! File operations executor

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::bootstrap::{IniBootstrapper, IniFile};
use crate::error::Result;

/// Executes the filesystem side of configuring an installation
pub struct IniWriter {
    dry_run: bool,
}

impl IniWriter {
    /// Create a new writer
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a seeded ini file from its template
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    pub fn seed(&self, file: &IniFile) -> Result<()> {
        match file {
            IniFile::Existing(_) => Ok(()),
            IniFile::Seeded { ini, template } if self.dry_run => {
                tracing::info!(
                    "[DRY RUN] Would create {} from {}",
                    ini.display(),
                    template.display()
                );
                Ok(())
            }
            IniFile::Seeded { .. } => IniBootstrapper::materialize(file),
        }
    }

    /// Read the bytes the patcher should start from
    ///
    /// The file is not required to be UTF-8. In dry-run mode a seeded ini
    /// does not exist yet, so its template is read instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, file: &IniFile) -> Result<Vec<u8>> {
        let source = match file {
            IniFile::Seeded { template, .. } if self.dry_run => template,
            _ => file.path(),
        };

        fs::read(source).with_context(|| format!("Failed to read ini file: {}", source.display()))
    }

    /// Overwrite the ini file with patched text
    ///
    /// This is a single whole-file write, not an atomic replace.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: &Path, text: &[u8]) -> Result<()> {
        if self.dry_run {
            tracing::info!("[DRY RUN] Would update: {}", path.display());
            return Ok(());
        }

        fs::write(path, text)
            .with_context(|| format!("Failed to write ini file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved php.ini");

        Ok(())
    }
}
